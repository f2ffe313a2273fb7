#[cfg(test)]
mod tests {
    use crate::analysis::views::*;
    use crate::models::common::EntitlementStatus;
    use crate::models::correction::{ CorrectionItemStatus, CorrectionSeverity };
    use crate::tests::support::{ item, letter, setup };

    fn set(views: &[ViewMode]) -> ViewSet {
        views.iter().copied().collect()
    }

    #[test]
    fn test_no_letter_only_overview() {
        setup();
        for status in EntitlementStatus::ALL {
            assert_eq!(available_views(*status, None), set(&[ViewMode::Overview]), "status {}", status);
        }
    }

    #[test]
    fn test_overview_always_available() {
        let letter = letter(Vec::new());
        for status in EntitlementStatus::ALL {
            assert!(available_views(*status, Some(&letter)).contains(&ViewMode::Overview));
        }
    }

    #[test]
    fn test_corrections_qa_views() {
        setup();
        let letter = letter(Vec::new());
        let views = available_views(EntitlementStatus::CorrectionsQa, Some(&letter));

        assert_eq!(
            views,
            set(
                &[
                    ViewMode::Overview,
                    ViewMode::Assignment,
                    ViewMode::Progress,
                    ViewMode::Qa,
                    ViewMode::Resubmittal,
                ]
            )
        );
        assert!(!views.contains(&ViewMode::Triage));
    }

    #[test]
    fn test_views_per_status() {
        let letter = letter(Vec::new());
        let views = |status| available_views(status, Some(&letter));

        assert_eq!(views(EntitlementStatus::CorrectionsReceived), set(&[ViewMode::Overview, ViewMode::Triage]));
        assert_eq!(
            views(EntitlementStatus::CorrectionsAssigned),
            set(&[ViewMode::Overview, ViewMode::Assignment, ViewMode::Progress])
        );
        assert_eq!(
            views(EntitlementStatus::AddressingCorrections),
            set(&[ViewMode::Overview, ViewMode::Assignment, ViewMode::Progress])
        );
        assert_eq!(views(EntitlementStatus::Resubmitted), set(&[ViewMode::Overview, ViewMode::Resubmittal]));
        assert_eq!(views(EntitlementStatus::Planning), set(&[ViewMode::Overview]));
        assert_eq!(views(EntitlementStatus::Approved), set(&[ViewMode::Overview]));
    }

    #[test]
    fn test_consultant_submission_unlocks_qa() {
        let letter = letter(
            vec![
                item("1", CorrectionSeverity::Major, CorrectionItemStatus::InProgress, None),
                item("2", CorrectionSeverity::Minor, CorrectionItemStatus::ConsultantSubmitted, None)
            ]
        );

        let views = available_views(EntitlementStatus::CorrectionsReceived, Some(&letter));
        assert_eq!(views, set(&[ViewMode::Overview, ViewMode::Triage, ViewMode::Qa]));
        assert_eq!(available_views(EntitlementStatus::CorrectionsReceived, Some(&letter)), views);
    }

    #[test]
    fn test_navigation_follows_tab_order() {
        let available = set(
            &[ViewMode::Overview, ViewMode::Assignment, ViewMode::Progress, ViewMode::Qa, ViewMode::Resubmittal]
        );

        assert_eq!(next_view(ViewMode::Overview, &available), Some(ViewMode::Assignment));
        assert_eq!(next_view(ViewMode::Qa, &available), Some(ViewMode::Resubmittal));
        assert_eq!(next_view(ViewMode::Resubmittal, &available), None);
        assert_eq!(previous_view(ViewMode::Assignment, &available), Some(ViewMode::Overview));
        assert_eq!(previous_view(ViewMode::Overview, &available), None);
        // navigating from a locked tab still lands on an available one
        assert_eq!(next_view(ViewMode::Triage, &available), Some(ViewMode::Assignment));
    }

    #[test]
    fn test_select_view_ignores_locked_views() {
        let available = set(&[ViewMode::Overview, ViewMode::Triage]);
        assert_eq!(select_view(ViewMode::Overview, ViewMode::Triage, &available), ViewMode::Triage);
        assert_eq!(select_view(ViewMode::Triage, ViewMode::Qa, &available), ViewMode::Triage);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("corrections-qa".parse::<EntitlementStatus>().unwrap(), EntitlementStatus::CorrectionsQa);
        assert_eq!("CORRECTIONS_QA".parse::<EntitlementStatus>().unwrap(), EntitlementStatus::CorrectionsQa);
        assert_eq!("qa".parse::<ViewMode>().unwrap(), ViewMode::Qa);
        assert!("review".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Resubmittal.to_string(), "resubmittal");
    }
}
