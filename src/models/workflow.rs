//! Wire types for the workflow proof-of-concept service under
//! `/api/v1/workflow`. Field names follow the service's snake_case JSON.

use serde::{ Deserialize, Serialize };

use crate::models::common::string_tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    Approve,
    SendBack,
    SkipTo,
    CompleteWfg,
}

impl DecisionAction {
    pub const ALL: &'static [DecisionAction] = &[
        DecisionAction::Approve,
        DecisionAction::SendBack,
        DecisionAction::SkipTo,
        DecisionAction::CompleteWfg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Approve => "approve",
            DecisionAction::SendBack => "send_back",
            DecisionAction::SkipTo => "skip_to",
            DecisionAction::CompleteWfg => "complete_wfg",
        }
    }

    /// Whether the action needs a `target_step`
    pub fn requires_target(&self) -> bool {
        matches!(self, DecisionAction::SendBack | DecisionAction::SkipTo)
    }
}

impl std::str::FromStr for DecisionAction {
    type Err = crate::errors::ParcelflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        DecisionAction::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| crate::errors::ParcelflowError::InvalidInput(
                format!("unknown decision action '{}'", s)
            ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

string_tags!(ProjectStatus {
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowItemInfo {
    pub id: String,
    pub name: String,
}

/// A workflow group ("WFG") and the workflow items ("WFI") inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStepInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workflow_items: Vec<WorkflowItemInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailableTransitions {
    pub can_approve: bool,
    #[serde(default)]
    pub approve_target: Option<WorkflowStepInfo>,
    pub can_send_back: bool,
    #[serde(default)]
    pub send_back_targets: Vec<WorkflowStepInfo>,
    pub can_skip_to: bool,
    #[serde(default)]
    pub skip_to_targets: Vec<WorkflowStepInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub workflow_group: String,
    pub user_name: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowHistoryEntry {
    pub id: String,
    #[serde(default)]
    pub from_workflow_group: Option<String>,
    #[serde(default)]
    pub to_workflow_group: Option<String>,
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub decision_maker_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub current_value_stream: String,
    #[serde(default)]
    pub current_workflow_group: Option<String>,
    #[serde(default)]
    pub current_workflow_item: Option<String>,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub current_step: Option<WorkflowStepInfo>,
    #[serde(default)]
    pub current_wfi: Option<WorkflowItemInfo>,
    #[serde(default)]
    pub available_transitions: Option<AvailableTransitions>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub history: Vec<WorkflowHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub current_workflow_group: Option<String>,
    pub status: ProjectStatus,
    pub created_at: String,
    pub comment_count: usize,
}

impl From<&Project> for ProjectListItem {
    fn from(project: &Project) -> Self {
        ProjectListItem {
            id: project.id.clone(),
            name: project.name.clone(),
            current_workflow_group: project.current_workflow_group.clone(),
            status: project.status,
            created_at: project.created_at.clone(),
            comment_count: project.comments.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsResponse {
    pub steps: Vec<WorkflowStepInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub previous_step: Option<String>,
    #[serde(default)]
    pub current_step: Option<String>,
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeDecisionRequest {
    pub action: DecisionAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_wfi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
