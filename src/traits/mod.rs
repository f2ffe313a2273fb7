pub mod clock;
pub mod workflow_client;

// Re-export traits
pub use clock::{ Clock, FixedClock, SystemClock };
pub use workflow_client::WorkflowClient;
