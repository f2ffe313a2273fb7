#[cfg(test)]
mod tests {
    use log::info;

    use crate::analysis::lifecycle::*;
    use crate::errors::ParcelflowError;
    use crate::models::common::{ ApprovalState, LifecyclePhase };
    use crate::models::history::{ StateType, StateValue };
    use crate::models::process::{ kinds, ProcessStatus };
    use crate::tests::support::{ days_from_now, lifecycle_change, now, process, property, setup };

    use LifecyclePhase::*;

    #[test]
    fn test_path_with_regression() {
        setup();
        let mut prop = property("prop-1");
        prop.lifecycle = Feasibility;
        // out of order on purpose
        prop.state_history = vec![
            lifecycle_change("h3", Entitlement, Feasibility, 2, Some("Zoning variance required")),
            lifecycle_change("h1", Intake, Feasibility, 40, None),
            lifecycle_change("h2", Feasibility, Entitlement, 20, Some("Feasibility approved"))
        ];

        let path = lifecycle_path(&prop);
        info!("Path: {:?}", path.iter().map(|n| n.phase).collect::<Vec<_>>());

        let phases: Vec<LifecyclePhase> = path
            .iter()
            .map(|n| n.phase)
            .collect();
        assert_eq!(phases, vec![Intake, Feasibility, Entitlement, Feasibility]);
        assert_eq!(path[0].reason.as_deref(), Some("Starting point"));
        assert_eq!(path[0].entered_at, days_from_now(-40));
        assert!(!path[2].backward);
        assert!(path[3].backward);
        assert_eq!(path[3].reason.as_deref(), Some("Zoning variance required"));
        assert!(has_regression(&prop));
    }

    #[test]
    fn test_closing_is_not_a_regression() {
        let mut prop = property("prop-2");
        prop.state_history = vec![
            lifecycle_change("h1", Construction, Servicing, 10, None),
            lifecycle_change("h2", Servicing, Closed, 1, None)
        ];
        assert!(!has_regression(&prop));
    }

    #[test]
    fn test_path_skips_other_state_types() {
        let mut prop = property("prop-3");
        assert!(lifecycle_path(&prop).is_empty());

        let mut risk = lifecycle_change("r1", Intake, Intake, 5, None);
        risk.state_type = StateType::Risk;
        risk.previous_value = StateValue::Number(3.0);
        risk.new_value = StateValue::Number(6.5);
        prop.state_history.push(risk);
        assert!(lifecycle_path(&prop).is_empty());

        let mut garbled = lifecycle_change("g1", Intake, Feasibility, 3, None);
        garbled.new_value = StateValue::Text("somewhere".to_string());
        prop.state_history.push(garbled);
        prop.state_history.push(lifecycle_change("h1", Feasibility, Entitlement, 1, None));

        let phases: Vec<LifecyclePhase> = lifecycle_path(&prop)
            .iter()
            .map(|n| n.phase)
            .collect();
        assert_eq!(phases, vec![Intake, Entitlement]);
    }

    #[test]
    fn test_intake_transition() {
        setup();
        let mut prop = property("prop-4");
        prop.approval_state = ApprovalState::Pending;
        prop.active_processes.push(
            process("q1", kinds::INTAKE_QUALIFICATION, ProcessStatus::InProgress, Some(3))
        );

        assert!(available_transitions(&prop).is_empty());
        match can_transition(&prop, Feasibility) {
            Err(ParcelflowError::TransitionConditionsUnmet { from, to, .. }) => {
                assert_eq!((from, to), (Intake, Feasibility));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let prop = complete_process(&prop, "q1", now()).unwrap();
        let rules = available_transitions(&prop);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].to, Feasibility);

        let mut rejected = prop.clone();
        rejected.approval_state = ApprovalState::Rejected;
        assert!(can_transition(&rejected, Feasibility).is_err());
    }

    #[test]
    fn test_undefined_transition() {
        let prop = property("prop-5");
        assert!(
            matches!(
                can_transition(&prop, Construction),
                Err(ParcelflowError::TransitionNotDefined { from: Intake, to: Construction })
            )
        );
    }

    #[test]
    fn test_feasibility_requires_all_reviews() {
        let mut prop = property("prop-6");
        prop.lifecycle = Feasibility;
        assert!(can_transition(&prop, Entitlement).is_err());

        prop.active_processes.push(process("z", kinds::ZONING_REVIEW, ProcessStatus::Completed, None));
        prop.active_processes.push(process("t", kinds::TITLE_REVIEW, ProcessStatus::InProgress, None));
        assert!(can_transition(&prop, Entitlement).is_err());

        let prop = complete_process(&prop, "t", now()).unwrap();
        assert!(can_transition(&prop, Entitlement).is_ok());
    }

    #[test]
    fn test_return_to_feasibility() {
        let mut prop = property("prop-7");
        prop.lifecycle = Entitlement;
        prop.approval_state = ApprovalState::NeedsRevision;

        let rules = available_transitions(&prop);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].is_backward());
        assert!(can_transition(&prop, Construction).is_err());
    }

    #[test]
    fn test_apply_transition_appends_history() {
        setup();
        let mut prop = property("prop-8");
        prop.lifecycle = Construction;
        prop.active_processes.push(
            process("c1", kinds::CONSTRUCTION_START, ProcessStatus::Completed, None)
        );

        let next = apply_transition(&prop, Servicing, "agent-002", Some("Certificate issued"), now()).unwrap();

        assert_eq!(prop.lifecycle, Construction);
        assert!(prop.state_history.is_empty());
        assert_eq!(next.lifecycle, Servicing);
        assert_eq!(next.updated_at, now());

        let change = &next.state_history[0];
        assert_eq!(change.id, "prop-8-lifecycle-1");
        assert_eq!(change.previous_value.as_phase(), Some(Construction));
        assert_eq!(change.new_value.as_phase(), Some(Servicing));
        assert_eq!(change.changed_by, "agent-002");
        assert_eq!(lifecycle_path(&next).len(), 2);

        assert!(apply_transition(&next, Closed, "agent-002", None, now()).is_err());
    }

    #[test]
    fn test_archive_process() {
        let mut prop = property("prop-9");
        prop.active_processes.push(process("a", kinds::TITLE_REVIEW, ProcessStatus::InProgress, None));

        assert!(
            matches!(archive_process(&prop, "a", now()), Err(ParcelflowError::ProcessNotCompleted(id)) if id == "a")
        );
        assert!(
            matches!(archive_process(&prop, "missing", now()), Err(ParcelflowError::ProcessNotFound { .. }))
        );

        let done = complete_process(&prop, "a", now()).unwrap();
        let archived = archive_process(&done, "a", now()).unwrap();
        assert!(archived.active_processes.is_empty());
        assert_eq!(archived.process_history.len(), 1);
        assert_eq!(archived.process_history[0].process.completed_at, Some(now()));
    }
}
