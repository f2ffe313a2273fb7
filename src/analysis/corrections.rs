//! Progress and risk derived from correction letters.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{ DateTime, Utc };
use serde::Serialize;

use crate::analysis::due_date::days_until;
use crate::config::Thresholds;
use crate::models::correction::{
    CorrectionDiscipline,
    CorrectionItem,
    CorrectionItemStatus,
    CorrectionLetter,
    CorrectionSeverity,
};

/// Count of items in each of the seven item statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusBreakdown {
    pub not_started: usize,
    pub in_progress: usize,
    pub consultant_submitted: usize,
    pub internal_review: usize,
    pub approved: usize,
    pub needs_revision: usize,
    pub completed: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: CorrectionItemStatus) -> usize {
        match status {
            CorrectionItemStatus::NotStarted => self.not_started,
            CorrectionItemStatus::InProgress => self.in_progress,
            CorrectionItemStatus::ConsultantSubmitted => self.consultant_submitted,
            CorrectionItemStatus::InternalReview => self.internal_review,
            CorrectionItemStatus::Approved => self.approved,
            CorrectionItemStatus::NeedsRevision => self.needs_revision,
            CorrectionItemStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        CorrectionItemStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Everything the progress dashboard shows for one letter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterSummary {
    pub letter_id: String,
    pub round_number: u32,
    pub total_items: usize,
    pub items_completed: usize,
    pub items_in_progress: usize,
    pub items_not_started: usize,
    pub percent_complete: u32,
    pub at_risk: bool,
    pub at_risk_items: usize,
    pub breakdown: StatusBreakdown,
    pub total_effort_hours: f64,
}

/// `round(100 * completed / total)`, 0 for an empty letter
pub fn percent_complete(letter: &CorrectionLetter) -> u32 {
    let total = letter.total_items();
    if total == 0 {
        return 0;
    }
    let completed = letter.items_completed();
    // integer half-up rounding
    ((200 * completed + total) / (2 * total)) as u32
}

/// An incomplete item is at risk when it is overdue, due within the urgent
/// window, or due within the stale window without a recent update. Items
/// without a due date are never at risk.
pub fn is_item_at_risk(item: &CorrectionItem, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    let due = match item.due_date {
        Some(due) => due,
        None => return false,
    };
    if item.is_completed() {
        return false;
    }

    let until_due = days_until(due, now);
    if until_due < 0 || until_due <= thresholds.item_urgent_window_days {
        return true;
    }

    let since_update = days_until(now, item.updated_at);
    until_due <= thresholds.item_stale_window_days && since_update >= thresholds.item_stale_after_days
}

/// A letter is at risk when its response is overdue, due soon with open
/// items, or when any of its items is at risk.
pub fn is_letter_at_risk(letter: &CorrectionLetter, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    if let Some(due) = letter.response_due_date {
        let until_due = days_until(due, now);
        if until_due < 0 {
            return true;
        }
        if until_due <= thresholds.letter_window_days && !letter.is_complete() {
            return true;
        }
    }

    letter.items.iter().any(|item| is_item_at_risk(item, now, thresholds))
}

pub fn severity_priority(severity: CorrectionSeverity) -> u8 {
    match severity {
        CorrectionSeverity::Critical => 3,
        CorrectionSeverity::Major => 2,
        CorrectionSeverity::Minor => 1,
    }
}

/// Priority ordering: at-risk first, then higher severity, then earlier due
/// date with undated items last, then item number and id so the order is
/// total.
pub fn compare_priority(
    a: &CorrectionItem,
    b: &CorrectionItem,
    now: DateTime<Utc>,
    thresholds: &Thresholds
) -> Ordering {
    let a_risk = is_item_at_risk(a, now, thresholds);
    let b_risk = is_item_at_risk(b, now, thresholds);

    b_risk
        .cmp(&a_risk)
        .then_with(|| severity_priority(b.severity).cmp(&severity_priority(a.severity)))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.item_number.cmp(&b.item_number))
        .then_with(|| a.id.cmp(&b.id))
}

/// Items in priority order. The input is left untouched.
pub fn sort_by_priority(
    items: &[CorrectionItem],
    now: DateTime<Utc>,
    thresholds: &Thresholds
) -> Vec<CorrectionItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_priority(a, b, now, thresholds));
    sorted
}

pub fn status_breakdown(letter: &CorrectionLetter) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for item in &letter.items {
        let slot = match item.status {
            CorrectionItemStatus::NotStarted => &mut breakdown.not_started,
            CorrectionItemStatus::InProgress => &mut breakdown.in_progress,
            CorrectionItemStatus::ConsultantSubmitted => &mut breakdown.consultant_submitted,
            CorrectionItemStatus::InternalReview => &mut breakdown.internal_review,
            CorrectionItemStatus::Approved => &mut breakdown.approved,
            CorrectionItemStatus::NeedsRevision => &mut breakdown.needs_revision,
            CorrectionItemStatus::Completed => &mut breakdown.completed,
        };
        *slot += 1;
    }
    breakdown
}

/// Items keyed by status. Every status has an entry, possibly empty.
pub fn group_items_by_status(
    items: &[CorrectionItem]
) -> BTreeMap<CorrectionItemStatus, Vec<&CorrectionItem>> {
    let mut groups: BTreeMap<CorrectionItemStatus, Vec<&CorrectionItem>> = CorrectionItemStatus::ALL
        .iter()
        .map(|status| (*status, Vec::new()))
        .collect();
    for item in items {
        groups.entry(item.status).or_default().push(item);
    }
    groups
}

/// Items keyed by discipline. Only disciplines that occur get an entry.
pub fn group_items_by_discipline(
    items: &[CorrectionItem]
) -> BTreeMap<CorrectionDiscipline, Vec<&CorrectionItem>> {
    let mut groups: BTreeMap<CorrectionDiscipline, Vec<&CorrectionItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.discipline).or_default().push(item);
    }
    groups
}

pub fn total_effort_hours(items: &[CorrectionItem]) -> f64 {
    items
        .iter()
        .map(|item| item.estimated_effort_hours.unwrap_or(0.0))
        .sum()
}

pub fn summarize_letter(letter: &CorrectionLetter, now: DateTime<Utc>, thresholds: &Thresholds) -> LetterSummary {
    LetterSummary {
        letter_id: letter.id.clone(),
        round_number: letter.round_number,
        total_items: letter.total_items(),
        items_completed: letter.items_completed(),
        items_in_progress: letter.items_in_progress(),
        items_not_started: letter.items_not_started(),
        percent_complete: percent_complete(letter),
        at_risk: is_letter_at_risk(letter, now, thresholds),
        at_risk_items: letter.items
            .iter()
            .filter(|item| is_item_at_risk(item, now, thresholds))
            .count(),
        breakdown: status_breakdown(letter),
        total_effort_hours: total_effort_hours(&letter.items),
    }
}
