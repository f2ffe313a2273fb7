//! Dashboard counters derived from a snapshot of properties.

use std::collections::BTreeMap;

use chrono::{ DateTime, Utc };
use serde::Serialize;

use crate::analysis::due_date::{ is_due_within_days, is_overdue };
use crate::config::Thresholds;
use crate::models::common::{ ApprovalState, LifecyclePhase, PropertyStatus };
use crate::models::property::Property;

/// Per-property counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyStats {
    pub total_active: usize,
    /// Blocked processes plus processes due within the attention window
    pub needs_attention: usize,
    pub at_risk: bool,
}

/// Portfolio-level counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_properties: usize,
    pub active_phases: usize,
    pub needs_attention_count: usize,
    pub active_process_count: usize,
    pub on_track_count: usize,
    pub overdue_count: usize,
    pub due_this_week_count: usize,
    pub due_this_month_count: usize,
}

/// Due-date bucket of a property's nearest deadline. The buckets are
/// disjoint: "this month" excludes "this week".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueBucket {
    Overdue,
    ThisWeek,
    ThisMonth,
    Later,
}

/// Traffic-light health of a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyHealth {
    Paused,
    Closed,
    Critical,
    Watch,
    Healthy,
}

impl PropertyHealth {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyHealth::Paused => "paused",
            PropertyHealth::Closed => "closed",
            PropertyHealth::Critical => "needs attention",
            PropertyHealth::Watch => "watch",
            PropertyHealth::Healthy => "on track",
        }
    }
}

pub fn property_stats(property: &Property, now: DateTime<Utc>, thresholds: &Thresholds) -> PropertyStats {
    let blocked = property.active_processes
        .iter()
        .filter(|p| p.is_blocked())
        .count();
    let due_soon = property.active_processes
        .iter()
        .filter_map(|p| p.due_date)
        .filter(|due| is_due_within_days(*due, now, thresholds.attention_window_days))
        .count();

    PropertyStats {
        total_active: property.active_processes.len(),
        needs_attention: blocked + due_soon,
        at_risk: property.risk_level >= thresholds.attention_risk_level,
    }
}

/// Whether a property shows up in the "needs attention" counter. A property
/// is counted once however many of its conditions hold.
pub fn needs_attention(property: &Property, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    let stats = property_stats(property, now, thresholds);
    stats.needs_attention > 0 || stats.at_risk
}

pub fn is_on_track(property: &Property, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    property.approval_state == ApprovalState::Approved &&
        property_stats(property, now, thresholds).needs_attention == 0 &&
        property.risk_level < thresholds.on_track_risk_ceiling &&
        property.status == PropertyStatus::Active
}

/// Earliest due date across the property's active processes
pub fn next_due_date(property: &Property) -> Option<DateTime<Utc>> {
    property.active_processes
        .iter()
        .filter_map(|p| p.due_date)
        .min()
}

/// Bucket for the property's nearest deadline, `None` without one
pub fn due_bucket(property: &Property, now: DateTime<Utc>, thresholds: &Thresholds) -> Option<DueBucket> {
    let next = next_due_date(property)?;
    let bucket = if is_overdue(next, now) {
        DueBucket::Overdue
    } else if is_due_within_days(next, now, thresholds.week_window_days) {
        DueBucket::ThisWeek
    } else if is_due_within_days(next, now, thresholds.month_window_days) {
        DueBucket::ThisMonth
    } else {
        DueBucket::Later
    };
    Some(bucket)
}

pub fn property_health(property: &Property, now: DateTime<Utc>, thresholds: &Thresholds) -> PropertyHealth {
    match property.status {
        PropertyStatus::Paused | PropertyStatus::OnHold => {
            return PropertyHealth::Paused;
        }
        PropertyStatus::Closed => {
            return PropertyHealth::Closed;
        }
        PropertyStatus::Active => {}
    }

    if needs_attention(property, now, thresholds) {
        PropertyHealth::Critical
    } else if property.risk_level >= thresholds.watch_risk_level {
        PropertyHealth::Watch
    } else {
        PropertyHealth::Healthy
    }
}

/// Properties grouped by phase. Every phase has an entry, possibly empty.
pub fn properties_by_lifecycle(properties: &[Property]) -> BTreeMap<LifecyclePhase, Vec<&Property>> {
    let mut groups: BTreeMap<LifecyclePhase, Vec<&Property>> = LifecyclePhase::ALL
        .iter()
        .map(|phase| (*phase, Vec::new()))
        .collect();
    for property in properties {
        groups.entry(property.lifecycle).or_default().push(property);
    }
    groups
}

pub fn dashboard_stats(properties: &[Property], now: DateTime<Utc>, thresholds: &Thresholds) -> DashboardStats {
    let active_phases = properties_by_lifecycle(properties)
        .values()
        .filter(|group| !group.is_empty())
        .count();

    let mut stats = DashboardStats {
        total_properties: properties.len(),
        active_phases,
        ..DashboardStats::default()
    };

    for property in properties {
        stats.active_process_count += property.active_processes.len();
        if needs_attention(property, now, thresholds) {
            stats.needs_attention_count += 1;
        }
        if is_on_track(property, now, thresholds) {
            stats.on_track_count += 1;
        }
        match due_bucket(property, now, thresholds) {
            Some(DueBucket::Overdue) => {
                stats.overdue_count += 1;
            }
            Some(DueBucket::ThisWeek) => {
                stats.due_this_week_count += 1;
            }
            Some(DueBucket::ThisMonth) => {
                stats.due_this_month_count += 1;
            }
            Some(DueBucket::Later) | None => {}
        }
    }

    stats
}
