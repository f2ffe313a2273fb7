pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod analysis;
pub mod fixtures;
pub mod notifications;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ Thresholds, WorkflowApiOptions };
pub use errors::{ ParcelflowError, ParcelflowResult };
pub use fixtures::Portfolio;
pub use models::{
    common::{
        ApprovalState,
        EntitlementStatus,
        LifecyclePhase,
        PropertyStatus,
        PropertyType,
    },
    property::Property,
    process::{ Process, ProcessStatus },
    correction::{
        CorrectionItem,
        CorrectionItemStatus,
        CorrectionLetter,
        CorrectionSeverity,
    },
    history::{ StateChange, StateType },
};
pub use analysis::{
    available_views,
    classify,
    dashboard_stats,
    is_item_at_risk,
    is_letter_at_risk,
    percent_complete,
    sort_by_priority,
    DashboardStats,
    DueStatus,
    ViewMode,
};
pub use notifications::{ Notification, NotificationKind, Notifier, Subscription };
pub use traits::{ Clock, WorkflowClient };
