pub mod config;
pub mod http_workflow_client;
pub mod in_memory_workflow_client;
