pub mod common;
pub mod property;
pub mod process;
pub mod correction;
pub mod history;
pub mod workflow;

// Re-export common model types
pub use common::{ ApprovalState, EntitlementStatus, LifecyclePhase, PropertyStatus, PropertyType };
pub use property::{ Property, PropertyAttributes };
pub use process::{ Process, ProcessHistoryEntry, ProcessOutput, ProcessStatus };
pub use correction::{
    CorrectionDiscipline,
    CorrectionItem,
    CorrectionItemStatus,
    CorrectionLetter,
    CorrectionLetterStatus,
    CorrectionSeverity,
};
pub use history::{ StateChange, StateType, StateValue };
