//! Classification of dates relative to a reference clock.
//!
//! Day counts use `ceil((target - now) / 1 day)`, so anything later today
//! counts as 0 and anything earlier than a full day ago counts as 0 too.

use chrono::{ DateTime, Datelike, Utc };
use serde::Serialize;

use crate::config::Thresholds;
use crate::models::process::{ Process, ProcessStatus };

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Bucket a due date falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueTomorrow,
    DueSoon,
    OnTrack,
}

/// A classified due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueDate {
    /// Signed day count, negative when overdue
    pub days_until: i64,
    pub status: DueStatus,
    /// Compact display string ("2d ago", "Today", "in 3d", "Jan 5")
    pub label: String,
}

impl DueDate {
    pub fn is_overdue(&self) -> bool {
        self.status == DueStatus::Overdue
    }

    /// Days late, zero unless overdue
    pub fn days_late(&self) -> i64 {
        if self.days_until < 0 { -self.days_until } else { 0 }
    }
}

/// Whole days from `now` until `target`, rounded up
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (target - now).num_milliseconds();
    -(-ms).div_euclid(MS_PER_DAY)
}

pub fn classify(target: DateTime<Utc>, now: DateTime<Utc>) -> DueDate {
    let days = days_until(target, now);
    let status = match days {
        d if d < 0 => DueStatus::Overdue,
        0 => DueStatus::DueToday,
        1 => DueStatus::DueTomorrow,
        d if d <= 7 => DueStatus::DueSoon,
        _ => DueStatus::OnTrack,
    };
    DueDate {
        days_until: days,
        status,
        label: format_due_date(target, now),
    }
}

pub fn is_overdue(target: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    days_until(target, now) < 0
}

/// True when the date is today or within the next `days` days
pub fn is_due_within_days(target: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    let until = days_until(target, now);
    until >= 0 && until <= days
}

pub fn is_due_this_week(target: DateTime<Utc>, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    is_due_within_days(target, now, thresholds.week_window_days)
}

pub fn is_due_this_month(target: DateTime<Utc>, now: DateTime<Utc>, thresholds: &Thresholds) -> bool {
    is_due_within_days(target, now, thresholds.month_window_days)
}

/// Compact form used on cards: "2d ago", "Today", "Tomorrow", "in 3d", "Jan 5"
pub fn format_due_date(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_until(target, now) {
        d if d < 0 => format!("{}d ago", -d),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d <= 7 => format!("in {}d", d),
        _ => target.format("%b %-d").to_string(),
    }
}

/// Long form used on correction letters: "3 days overdue", "Due in 4 days"
pub fn format_days_until_due(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_until(target, now) {
        d if d < 0 => {
            let late = -d;
            format!("{} day{} overdue", late, if late == 1 { "" } else { "s" })
        }
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d <= 7 => format!("Due in {} days", d),
        _ => target.format("%-m/%-d/%Y").to_string(),
    }
}

/// "Jan 5", or "Jan 5, 2024" when the year differs from the reference year
pub fn format_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if date.year() != now.year() {
        date.format("%b %-d, %Y").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Calendar-day offset from today, both sides truncated to midnight
pub fn day_offset(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (date.date_naive() - now.date_naive()).num_days()
}

pub fn duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    days_until(end, start)
}

/// How urgently a process needs looking at. Checked in declaration order,
/// so a blocked process reads as `Blocked` even when overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessUrgency {
    NoDueDate,
    Completed,
    Blocked,
    Overdue,
    DueWithinAttention,
    DueWithinWeek,
    OnTrack,
}

pub fn process_urgency(process: &Process, now: DateTime<Utc>, thresholds: &Thresholds) -> ProcessUrgency {
    let due = match process.due_date {
        Some(due) => due,
        None => return ProcessUrgency::NoDueDate,
    };

    match process.status {
        ProcessStatus::Completed => ProcessUrgency::Completed,
        ProcessStatus::Blocked => ProcessUrgency::Blocked,
        _ if is_overdue(due, now) => ProcessUrgency::Overdue,
        _ if is_due_within_days(due, now, thresholds.attention_window_days) =>
            ProcessUrgency::DueWithinAttention,
        _ if is_due_within_days(due, now, thresholds.week_window_days) =>
            ProcessUrgency::DueWithinWeek,
        _ => ProcessUrgency::OnTrack,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    OnTrack,
    AtRisk,
    Overdue,
}

/// Elapsed-time progress of a single process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessProgress {
    /// Share of the scheduled window already elapsed, clamped to 0..=100
    pub percentage: f64,
    pub days_remaining: i64,
    pub status: ScheduleStatus,
}

pub fn process_progress(process: &Process, now: DateTime<Utc>, thresholds: &Thresholds) -> ProcessProgress {
    let (started, due) = match (process.started_at, process.due_date) {
        (Some(started), Some(due)) => (started, due),
        _ => {
            return ProcessProgress {
                percentage: 0.0,
                days_remaining: 0,
                status: ScheduleStatus::OnTrack,
            };
        }
    };

    let total = (due - started).num_milliseconds() as f64;
    let elapsed = (now - started).num_milliseconds() as f64;
    let percentage = if total > 0.0 {
        ((elapsed / total) * 100.0).clamp(0.0, 100.0)
    } else if elapsed >= 0.0 {
        100.0
    } else {
        0.0
    };

    let days_remaining = days_until(due, now);
    let status = if days_remaining < 0 {
        ScheduleStatus::Overdue
    } else if days_remaining <= thresholds.process_at_risk_days {
        ScheduleStatus::AtRisk
    } else {
        ScheduleStatus::OnTrack
    };

    ProcessProgress { percentage, days_remaining, status }
}
