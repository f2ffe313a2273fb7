//! Builders for test fixtures. Every fixture is pinned to `now()`.

use chrono::{ DateTime, Duration, TimeZone, Utc };
use log::info;

use crate::models::common::{ ApprovalState, LifecyclePhase, PropertyStatus, PropertyType };
use crate::models::correction::{
    CorrectionDiscipline,
    CorrectionItem,
    CorrectionItemStatus,
    CorrectionLetter,
    CorrectionLetterStatus,
    CorrectionSeverity,
};
use crate::models::history::{ StateChange, StateType };
use crate::models::process::{ Process, ProcessStatus };
use crate::models::property::Property;

// Initialize logging once; later calls are no-ops
pub fn setup() {
    if env_logger::builder().is_test(true).try_init().is_ok() {
        info!("Logger initialized");
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    now() + Duration::days(days)
}

pub fn property(id: &str) -> Property {
    Property {
        id: id.to_string(),
        property_type: PropertyType::Subdivision,
        lifecycle: LifecyclePhase::Intake,
        status: PropertyStatus::Active,
        approval_state: ApprovalState::Approved,
        risk_level: 2.0,
        entitlement_status: None,
        correction_letters: Vec::new(),
        attributes: None,
        active_processes: Vec::new(),
        process_history: Vec::new(),
        state_history: Vec::new(),
        created_at: days_from_now(-90),
        updated_at: days_from_now(-1),
        created_by: "agent-001".to_string(),
        assigned_to: None,
    }
}

pub fn process(id: &str, kind: &str, status: ProcessStatus, due_in_days: Option<i64>) -> Process {
    Process {
        id: id.to_string(),
        kind: kind.to_string(),
        status,
        property_id: "prop-test".to_string(),
        assigned_to: None,
        started_at: Some(days_from_now(-10)),
        completed_at: None,
        due_date: due_in_days.map(days_from_now),
        outputs: Vec::new(),
        notes: None,
    }
}

pub fn item(
    id: &str,
    severity: CorrectionSeverity,
    status: CorrectionItemStatus,
    due_in_days: Option<i64>
) -> CorrectionItem {
    CorrectionItem {
        id: id.to_string(),
        item_number: id.to_string(),
        discipline: CorrectionDiscipline::Civil,
        description: format!("Correction {}", id),
        severity,
        status,
        due_date: due_in_days.map(days_from_now),
        assigned_to_person: None,
        response_description: None,
        estimated_effort_hours: None,
        sheet_numbers: Vec::new(),
        updated_at: days_from_now(-1),
    }
}

pub fn letter(items: Vec<CorrectionItem>) -> CorrectionLetter {
    CorrectionLetter {
        id: "letter-1".to_string(),
        property_id: "prop-test".to_string(),
        round_number: 1,
        letter_date: days_from_now(-14),
        received_date: days_from_now(-12),
        response_due_date: None,
        internal_target_date: None,
        status: CorrectionLetterStatus::InProgress,
        items,
    }
}

/// `count` items, the first `completed` of them completed
pub fn letter_with_progress(count: usize, completed: usize) -> CorrectionLetter {
    let items = (0..count)
        .map(|i| {
            let status = if i < completed {
                CorrectionItemStatus::Completed
            } else {
                CorrectionItemStatus::InProgress
            };
            item(&format!("C-{:02}", i + 1), CorrectionSeverity::Minor, status, None)
        })
        .collect();
    letter(items)
}

pub fn lifecycle_change(
    id: &str,
    from: LifecyclePhase,
    to: LifecyclePhase,
    days_ago: i64,
    reason: Option<&str>
) -> StateChange {
    StateChange {
        id: id.to_string(),
        property_id: "prop-test".to_string(),
        state_type: StateType::Lifecycle,
        previous_value: from.into(),
        new_value: to.into(),
        changed_at: days_from_now(-days_ago),
        changed_by: "agent-001".to_string(),
        process_id: None,
        reason: reason.map(str::to_string),
    }
}
