//! Lifecycle path reconstruction and transition rules.
//!
//! Regressions are ordinary transitions here. The path view only marks
//! them; it never rejects them.

use chrono::{ DateTime, Utc };
use log::{ debug, info, warn };
use serde::Serialize;

use crate::errors::{ ParcelflowError, ParcelflowResult };
use crate::models::common::{ ApprovalState, LifecyclePhase };
use crate::models::history::{ StateChange, StateType };
use crate::models::process::{ kinds, ProcessHistoryEntry, ProcessStatus };
use crate::models::property::Property;

/// One stop on a property's lifecycle path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathNode {
    pub phase: LifecyclePhase,
    pub entered_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Entered from a later phase
    pub backward: bool,
}

/// Ordered path built from the lifecycle entries of the state history.
/// Entries whose values are not phase tags are skipped.
pub fn lifecycle_path(property: &Property) -> Vec<PathNode> {
    let mut transitions: Vec<&StateChange> = property.state_history
        .iter()
        .filter(|change| change.state_type == StateType::Lifecycle)
        .collect();
    transitions.sort_by_key(|change| change.changed_at);

    let mut path = Vec::with_capacity(transitions.len() + 1);

    if let Some(first) = transitions.first() {
        if let Some(start) = first.previous_value.as_phase() {
            path.push(PathNode {
                phase: start,
                entered_at: first.changed_at,
                reason: Some("Starting point".to_string()),
                backward: false,
            });
        }
    }

    for change in transitions {
        let (previous, next) = match (change.previous_value.as_phase(), change.new_value.as_phase()) {
            (Some(previous), Some(next)) => (previous, next),
            _ => {
                debug!("Skipping lifecycle change {} with non-phase values", change.id);
                continue;
            }
        };
        path.push(PathNode {
            phase: next,
            entered_at: change.changed_at,
            reason: change.reason.clone(),
            backward: next.ordinal() < previous.ordinal(),
        });
    }

    path
}

pub fn has_regression(property: &Property) -> bool {
    lifecycle_path(property).iter().any(|node| node.backward)
}

/// A guarded move between two lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    pub from: LifecyclePhase,
    pub to: LifecyclePhase,
    pub trigger: &'static str,
}

pub const TRANSITION_RULES: &[TransitionRule] = &[
    TransitionRule {
        from: LifecyclePhase::Intake,
        to: LifecyclePhase::Feasibility,
        trigger: "intake-qualification-complete",
    },
    TransitionRule {
        from: LifecyclePhase::Feasibility,
        to: LifecyclePhase::Entitlement,
        trigger: "feasibility-approved",
    },
    TransitionRule {
        from: LifecyclePhase::Entitlement,
        to: LifecyclePhase::Construction,
        trigger: "permit-approved",
    },
    TransitionRule {
        from: LifecyclePhase::Construction,
        to: LifecyclePhase::Servicing,
        trigger: "construction-complete",
    },
    TransitionRule {
        from: LifecyclePhase::Entitlement,
        to: LifecyclePhase::Feasibility,
        trigger: "return-to-feasibility",
    },
];

impl TransitionRule {
    pub fn is_backward(&self) -> bool {
        self.to.ordinal() < self.from.ordinal()
    }

    /// `Err(reason)` naming the first unmet condition
    pub fn check(&self, property: &Property) -> Result<(), String> {
        let has_completed = |kind: &str| {
            property.active_processes
                .iter()
                .any(|p| p.kind == kind && p.status == ProcessStatus::Completed)
        };
        let require = |ok: bool, reason: &str| if ok { Ok(()) } else { Err(reason.to_string()) };

        use LifecyclePhase::*;
        match (self.from, self.to) {
            (Intake, Feasibility) => {
                require(has_completed(kinds::INTAKE_QUALIFICATION), "intake qualification is not complete")?;
                require(property.approval_state != ApprovalState::Rejected, "property was rejected")
            }
            (Feasibility, Entitlement) => {
                let reviews: Vec<_> = property.active_processes
                    .iter()
                    .filter(|p| {
                        [kinds::FEASIBILITY_ANALYSIS, kinds::ZONING_REVIEW, kinds::TITLE_REVIEW]
                            .contains(&p.kind.as_str())
                    })
                    .collect();
                require(!reviews.is_empty(), "no feasibility reviews have been run")?;
                require(reviews.iter().all(|p| p.is_completed()), "feasibility reviews are still open")?;
                require(property.approval_state == ApprovalState::Approved, "property is not approved")
            }
            (Entitlement, Construction) => {
                require(has_completed(kinds::PERMIT_SUBMISSION), "permit submission is not complete")?;
                require(property.approval_state == ApprovalState::Approved, "property is not approved")
            }
            (Construction, Servicing) =>
                require(has_completed(kinds::CONSTRUCTION_START), "construction is not complete"),
            (Entitlement, Feasibility) =>
                require(
                    property.approval_state == ApprovalState::NeedsRevision,
                    "property does not need revision"
                ),
            _ => Err("no conditions defined".to_string()),
        }
    }
}

pub fn find_rule(from: LifecyclePhase, to: LifecyclePhase) -> Option<&'static TransitionRule> {
    TRANSITION_RULES.iter().find(|rule| rule.from == from && rule.to == to)
}

pub fn can_transition(property: &Property, to: LifecyclePhase) -> ParcelflowResult<&'static TransitionRule> {
    let from = property.lifecycle;
    let rule = find_rule(from, to).ok_or(ParcelflowError::TransitionNotDefined { from, to })?;
    rule
        .check(property)
        .map_err(|reason| ParcelflowError::TransitionConditionsUnmet { from, to, reason })?;
    Ok(rule)
}

/// Rules leaving the property's current phase whose conditions hold
pub fn available_transitions(property: &Property) -> Vec<&'static TransitionRule> {
    TRANSITION_RULES
        .iter()
        .filter(|rule| rule.from == property.lifecycle && rule.check(property).is_ok())
        .collect()
}

/// Move the property to `to`, returning the replacement value with a
/// lifecycle entry appended to its history.
pub fn apply_transition(
    property: &Property,
    to: LifecyclePhase,
    actor: &str,
    reason: Option<&str>,
    now: DateTime<Utc>
) -> ParcelflowResult<Property> {
    let rule = match can_transition(property, to) {
        Ok(rule) => rule,
        Err(e) => {
            warn!("Refusing transition for {}: {}", property.id, e);
            return Err(e);
        }
    };

    info!(
        "Property {} transitioning: {} -> {} ({})",
        property.id,
        property.lifecycle,
        to,
        rule.trigger
    );

    let mut next = property.clone();
    next.state_history.push(StateChange {
        id: format!("{}-lifecycle-{}", property.id, property.state_history.len() + 1),
        property_id: property.id.clone(),
        state_type: StateType::Lifecycle,
        previous_value: property.lifecycle.into(),
        new_value: to.into(),
        changed_at: now,
        changed_by: actor.to_string(),
        process_id: None,
        reason: reason.map(str::to_string),
    });
    next.lifecycle = to;
    next.updated_at = now;
    Ok(next)
}

/// Mark an active process completed
pub fn complete_process(property: &Property, process_id: &str, now: DateTime<Utc>) -> ParcelflowResult<Property> {
    let mut next = property.clone();
    let process = next.active_processes
        .iter_mut()
        .find(|p| p.id == process_id)
        .ok_or_else(|| ParcelflowError::ProcessNotFound {
            property_id: property.id.clone(),
            process_id: process_id.to_string(),
        })?;

    process.status = ProcessStatus::Completed;
    process.completed_at = Some(now);
    next.updated_at = now;
    Ok(next)
}

/// Move a completed process from the active list into the history
pub fn archive_process(property: &Property, process_id: &str, now: DateTime<Utc>) -> ParcelflowResult<Property> {
    let mut next = property.clone();
    let index = next.active_processes
        .iter()
        .position(|p| p.id == process_id)
        .ok_or_else(|| ParcelflowError::ProcessNotFound {
            property_id: property.id.clone(),
            process_id: process_id.to_string(),
        })?;

    if !next.active_processes[index].is_completed() {
        return Err(ParcelflowError::ProcessNotCompleted(process_id.to_string()));
    }

    let process = next.active_processes.remove(index);
    next.process_history.push(ProcessHistoryEntry { process, archived_at: now });
    next.updated_at = now;
    Ok(next)
}
