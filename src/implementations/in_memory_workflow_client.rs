use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, info };
use tokio::sync::RwLock;

use crate::errors::{ ParcelflowError, ParcelflowResult };
use crate::models::workflow::{
    AddCommentRequest,
    AvailableTransitions,
    Comment,
    CreateProjectRequest,
    DecisionAction,
    DecisionResponse,
    MakeDecisionRequest,
    Project,
    ProjectListItem,
    ProjectStatus,
    WorkflowHistoryEntry,
    WorkflowItemInfo,
    WorkflowStepInfo,
};
use crate::traits::clock::{ Clock, SystemClock };
use crate::traits::workflow_client::WorkflowClient;

const VALUE_STREAM: &str = "VS1";
const ANONYMOUS: &str = "Anonymous";

/// Three workflow groups with two items each, in workflow order
pub fn default_steps() -> Vec<WorkflowStepInfo> {
    let items = |group: &str| {
        vec![
            WorkflowItemInfo { id: "WFI1".to_string(), name: format!("{} intake", group) },
            WorkflowItemInfo { id: "WFI2".to_string(), name: format!("{} sign-off", group) }
        ]
    };
    vec![
        WorkflowStepInfo {
            id: "WFG1".to_string(),
            name: "Site Review".to_string(),
            description: Some("Initial qualification of the site".to_string()),
            workflow_items: items("Site review"),
        },
        WorkflowStepInfo {
            id: "WFG2".to_string(),
            name: "Design Review".to_string(),
            description: Some("Plans checked against zoning and code".to_string()),
            workflow_items: items("Design review"),
        },
        WorkflowStepInfo {
            id: "WFG3".to_string(),
            name: "Final Approval".to_string(),
            description: None,
            workflow_items: items("Final approval"),
        }
    ]
}

#[derive(Default)]
struct Store {
    next_id: u64,
    projects: BTreeMap<String, Project>,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// `WorkflowClient` that keeps projects in memory. Approving walks the
/// groups in order and completes the project after the last one.
pub struct InMemoryWorkflowClient {
    steps: Vec<WorkflowStepInfo>,
    store: RwLock<Store>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl InMemoryWorkflowClient {
    pub fn new(steps: Vec<WorkflowStepInfo>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            steps,
            store: RwLock::new(Store::default()),
            clock,
        }
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339()
    }

    fn step_index(&self, group: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == group)
    }

    fn transitions_for(&self, project: &Project) -> AvailableTransitions {
        let current = match (&project.status, &project.current_workflow_group) {
            (ProjectStatus::Active, Some(group)) => self.step_index(group),
            _ => None,
        };
        let index = match current {
            Some(index) => index,
            None => {
                return AvailableTransitions::default();
            }
        };

        let send_back_targets = self.steps[..index].to_vec();
        let skip_to_targets = self.steps
            .get(index + 2..)
            .map(|s| s.to_vec())
            .unwrap_or_default();

        AvailableTransitions {
            can_approve: true,
            approve_target: self.steps.get(index + 1).cloned(),
            can_send_back: !send_back_targets.is_empty(),
            send_back_targets,
            can_skip_to: !skip_to_targets.is_empty(),
            skip_to_targets,
        }
    }

    /// Point the project at `group` (or at nothing) and refresh derived fields
    fn move_to(&self, project: &mut Project, group: Option<usize>, wfi: Option<&str>) {
        match group.and_then(|index| self.steps.get(index)) {
            Some(step) => {
                let item = wfi
                    .and_then(|id| step.workflow_items.iter().find(|i| i.id == id))
                    .or_else(|| step.workflow_items.first())
                    .cloned();
                project.current_workflow_group = Some(step.id.clone());
                project.current_workflow_item = item.as_ref().map(|i| i.id.clone());
                project.current_step = Some(step.clone());
                project.current_wfi = item;
            }
            None => {
                project.current_workflow_group = None;
                project.current_workflow_item = None;
                project.current_step = None;
                project.current_wfi = None;
            }
        }
        project.available_transitions = Some(self.transitions_for(project));
    }

    fn target_index(&self, request: &MakeDecisionRequest) -> ParcelflowResult<usize> {
        let target = request.target_step
            .as_deref()
            .ok_or_else(|| {
                ParcelflowError::InvalidInput(
                    format!("{} requires a target step", request.action.as_str())
                )
            })?;
        self.step_index(target).ok_or_else(|| {
            ParcelflowError::InvalidInput(format!("unknown workflow group '{}'", target))
        })
    }
}

impl Default for InMemoryWorkflowClient {
    fn default() -> Self {
        Self::new(default_steps(), Arc::new(SystemClock))
    }
}

fn not_found(project_id: &str) -> ParcelflowError {
    ParcelflowError::WorkflowHttpError {
        status: 404,
        message: format!("Project {} not found", project_id),
    }
}

#[async_trait]
impl WorkflowClient for InMemoryWorkflowClient {
    async fn list_projects(&self) -> ParcelflowResult<Vec<ProjectListItem>> {
        let store = self.store.read().await;
        Ok(store.projects.values().map(ProjectListItem::from).collect())
    }

    async fn get_project(&self, project_id: &str) -> ParcelflowResult<Project> {
        let store = self.store.read().await;
        store.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| not_found(project_id))
    }

    async fn workflow_steps(&self) -> ParcelflowResult<Vec<WorkflowStepInfo>> {
        Ok(self.steps.clone())
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> ParcelflowResult<Project> {
        if request.name.trim().is_empty() {
            return Err(ParcelflowError::InvalidInput("project name must not be empty".to_string()));
        }

        let now = self.timestamp();
        let mut store = self.store.write().await;
        let id = store.next_id("proj");
        let history_id = store.next_id("hist");

        let mut project = Project {
            id: id.clone(),
            name: request.name.trim().to_string(),
            description: request.description.clone(),
            current_value_stream: VALUE_STREAM.to_string(),
            current_workflow_group: None,
            current_workflow_item: None,
            status: ProjectStatus::Active,
            created_at: now.clone(),
            updated_at: now.clone(),
            current_step: None,
            current_wfi: None,
            available_transitions: None,
            comments: Vec::new(),
            history: Vec::new(),
        };
        let first = if self.steps.is_empty() { None } else { Some(0) };
        self.move_to(&mut project, first, None);
        project.history.push(WorkflowHistoryEntry {
            id: history_id,
            from_workflow_group: None,
            to_workflow_group: project.current_workflow_group.clone(),
            action: "created".to_string(),
            reason: None,
            decision_maker_name: ANONYMOUS.to_string(),
            created_at: now,
        });

        info!("Created in-memory project {} ({})", project.name, id);
        store.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn add_comment(&self, project_id: &str, request: &AddCommentRequest) -> ParcelflowResult<Comment> {
        if request.content.trim().is_empty() {
            return Err(ParcelflowError::InvalidInput("comment must not be empty".to_string()));
        }

        let now = self.timestamp();
        let mut store = self.store.write().await;
        let id = store.next_id("comment");
        let project = store.projects.get_mut(project_id).ok_or_else(|| not_found(project_id))?;

        let comment = Comment {
            id,
            workflow_group: project.current_workflow_group.clone().unwrap_or_default(),
            user_name: request.user_name.clone().unwrap_or_else(|| ANONYMOUS.to_string()),
            content: request.content.clone(),
            created_at: now.clone(),
        };
        project.comments.push(comment.clone());
        project.updated_at = now;
        Ok(comment)
    }

    async fn make_decision(
        &self,
        project_id: &str,
        request: &MakeDecisionRequest
    ) -> ParcelflowResult<DecisionResponse> {
        let now = self.timestamp();
        let mut store = self.store.write().await;
        let history_id = store.next_id("hist");
        let project = store.projects.get_mut(project_id).ok_or_else(|| not_found(project_id))?;

        if project.status != ProjectStatus::Active {
            return Err(
                ParcelflowError::InvalidInput(format!("project {} is {}", project_id, project.status))
            );
        }

        let previous_step = project.current_workflow_group.clone();
        let current = previous_step.as_deref().and_then(|g| self.step_index(g));

        let (next, message) = match request.action {
            DecisionAction::Approve => {
                let next = current.map(|i| i + 1).filter(|i| *i < self.steps.len());
                let message = match next {
                    Some(i) => format!("Approved, moved to {}", self.steps[i].id),
                    None => "Approved final step, project completed".to_string(),
                };
                (next, message)
            }
            DecisionAction::SendBack => {
                let target = self.target_index(request)?;
                if current.map_or(true, |i| target >= i) {
                    return Err(
                        ParcelflowError::InvalidInput("send_back target must be an earlier step".to_string())
                    );
                }
                (Some(target), format!("Sent back to {}", self.steps[target].id))
            }
            DecisionAction::SkipTo => {
                let target = self.target_index(request)?;
                // the next group is reached by approving; skipping jumps past it
                if current.map_or(false, |i| target <= i + 1) {
                    return Err(
                        ParcelflowError::InvalidInput(
                            "skip_to target must be at least two steps ahead".to_string()
                        )
                    );
                }
                (Some(target), format!("Skipped to {}", self.steps[target].id))
            }
            DecisionAction::CompleteWfg => (None, "Workflow completed".to_string()),
        };

        if next.is_none() {
            project.status = ProjectStatus::Completed;
        }
        self.move_to(project, next, request.target_wfi.as_deref());
        project.updated_at = now.clone();
        project.history.push(WorkflowHistoryEntry {
            id: history_id,
            from_workflow_group: previous_step.clone(),
            to_workflow_group: project.current_workflow_group.clone(),
            action: request.action.as_str().to_string(),
            reason: request.reason.clone(),
            decision_maker_name: ANONYMOUS.to_string(),
            created_at: now,
        });
        debug!("{}: {}", project_id, message);

        Ok(DecisionResponse {
            success: true,
            message,
            previous_step,
            current_step: project.current_workflow_group.clone(),
            project: project.clone(),
        })
    }
}
