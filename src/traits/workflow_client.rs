use async_trait::async_trait;

use crate::errors::ParcelflowResult;
use crate::models::workflow::{
    AddCommentRequest,
    Comment,
    CreateProjectRequest,
    DecisionResponse,
    MakeDecisionRequest,
    Project,
    ProjectListItem,
    WorkflowStepInfo,
};

/// Client for the workflow service that tracks projects through workflow
/// groups. The service owns persistence; callers only see snapshots.
#[async_trait]
pub trait WorkflowClient {
    /// List all projects
    async fn list_projects(&self) -> ParcelflowResult<Vec<ProjectListItem>>;

    /// Fetch one project with its comments, history and transitions
    async fn get_project(&self, project_id: &str) -> ParcelflowResult<Project>;

    /// The workflow groups a project can move through, in order
    async fn workflow_steps(&self) -> ParcelflowResult<Vec<WorkflowStepInfo>>;

    /// Create a project and start its workflow
    async fn create_project(&self, request: &CreateProjectRequest) -> ParcelflowResult<Project>;

    async fn add_comment(&self, project_id: &str, request: &AddCommentRequest) -> ParcelflowResult<Comment>;

    /// Approve, send back, skip ahead or complete the current group
    async fn make_decision(
        &self,
        project_id: &str,
        request: &MakeDecisionRequest,
    ) -> ParcelflowResult<DecisionResponse>;
}
