use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::WorkflowApiOptions;
use crate::errors::{ ParcelflowError, ParcelflowResult };
use crate::models::workflow::{
    AddCommentRequest,
    Comment,
    CreateProjectRequest,
    DecisionResponse,
    MakeDecisionRequest,
    Project,
    ProjectListItem,
    StepsResponse,
    WorkflowStepInfo,
};
use crate::traits::workflow_client::WorkflowClient;

const API_PREFIX: &str = "/api/v1/workflow";

#[derive(Debug, Error)]
pub enum WorkflowApiError {
    #[error("Network error: {0}")] NetworkError(String),

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to build HTTP client: {0}")] ClientBuildError(String),
}

impl From<WorkflowApiError> for ParcelflowError {
    fn from(err: WorkflowApiError) -> Self {
        match err {
            WorkflowApiError::HttpError { status, message } =>
                ParcelflowError::WorkflowHttpError { status, message },
            other => ParcelflowError::WorkflowApiError(other.to_string()),
        }
    }
}

/// `WorkflowClient` over the service's REST endpoints
#[derive(Clone)]
pub struct HttpWorkflowClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpWorkflowClient {
    pub fn new(options: &WorkflowApiOptions) -> Result<Self, WorkflowApiError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| WorkflowApiError::ClientBuildError(e.to_string()))?;

        Ok(Self {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, WorkflowApiError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await.map_err(|e| Self::network_error(&url, e))?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B
    ) -> Result<T, WorkflowApiError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let response = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send().await
            .map_err(|e| Self::network_error(&url, e))?;
        Self::decode(response).await
    }

    fn network_error(url: &str, e: reqwest::Error) -> WorkflowApiError {
        let error_msg = format!("Request to {} failed: {}", url, e);
        warn!("{}", error_msg);
        if e.is_timeout() {
            warn!("Request timed out");
        }
        if e.is_connect() {
            warn!("Connection error - check that the workflow service is running");
        }
        WorkflowApiError::NetworkError(error_msg)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WorkflowApiError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("Workflow API error: HTTP {} - {}", status, error_text);
            return Err(WorkflowApiError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            WorkflowApiError::ParseError(e.to_string())
        })?;
        debug!("Response length: {} characters", response_text.len());

        serde_json::from_str(&response_text).map_err(|e| {
            warn!("JSON parsing error: {}", e);
            WorkflowApiError::ParseError(e.to_string())
        })
    }
}

#[async_trait]
impl WorkflowClient for HttpWorkflowClient {
    async fn list_projects(&self) -> ParcelflowResult<Vec<ProjectListItem>> {
        Ok(self.get("/projects").await?)
    }

    async fn get_project(&self, project_id: &str) -> ParcelflowResult<Project> {
        Ok(self.get(&format!("/projects/{}", project_id)).await?)
    }

    async fn workflow_steps(&self) -> ParcelflowResult<Vec<WorkflowStepInfo>> {
        let response: StepsResponse = self.get("/steps").await?;
        Ok(response.steps)
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> ParcelflowResult<Project> {
        let project: Project = self.post("/projects", request).await?;
        info!("Created project {} ({})", project.name, project.id);
        Ok(project)
    }

    async fn add_comment(&self, project_id: &str, request: &AddCommentRequest) -> ParcelflowResult<Comment> {
        Ok(self.post(&format!("/projects/{}/comments", project_id), request).await?)
    }

    async fn make_decision(
        &self,
        project_id: &str,
        request: &MakeDecisionRequest
    ) -> ParcelflowResult<DecisionResponse> {
        let response: DecisionResponse = self.post(
            &format!("/projects/{}/decision", project_id),
            request
        ).await?;
        info!(
            "Decision {} on {}: {:?} -> {:?}",
            request.action.as_str(),
            project_id,
            response.previous_step,
            response.current_step
        );
        Ok(response)
    }
}
