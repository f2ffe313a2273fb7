//! Derived workflow state. Every function here is pure: the same snapshot
//! and reference clock always give the same answer.

pub mod due_date;
pub mod stats;
pub mod corrections;
pub mod views;
pub mod lifecycle;

pub use due_date::{ classify, days_until, DueDate, DueStatus, ProcessUrgency };
pub use stats::{ dashboard_stats, property_stats, DashboardStats, PropertyHealth, PropertyStats };
pub use corrections::{
    is_item_at_risk,
    is_letter_at_risk,
    percent_complete,
    sort_by_priority,
    summarize_letter,
    LetterSummary,
    StatusBreakdown,
};
pub use views::{ available_views, next_view, previous_view, ViewMode, ViewSet };
pub use lifecycle::{ apply_transition, available_transitions, lifecycle_path, PathNode, TransitionRule };
