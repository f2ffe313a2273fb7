use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::common::string_tags;

/// Process type tags referenced by the lifecycle transition rules.
/// Process types are free-form, these are only the ones with meaning here.
pub mod kinds {
    pub const INTAKE_QUALIFICATION: &str = "intake-qualification";
    pub const FEASIBILITY_ANALYSIS: &str = "feasibility-analysis";
    pub const ZONING_REVIEW: &str = "zoning-review";
    pub const TITLE_REVIEW: &str = "title-review";
    pub const PERMIT_SUBMISSION: &str = "permit-submission";
    pub const CONSTRUCTION_START: &str = "construction-start";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Blocked,
}

string_tags!(ProcessStatus {
    Pending => "pending",
    InProgress => "in-progress",
    Completed => "completed",
    Failed => "failed",
    Blocked => "blocked",
});

/// A unit of work running against a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ProcessStatus,
    pub property_id: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outputs: Vec<ProcessOutput>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Process {
    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    pub fn is_blocked(&self) -> bool {
        self.status == ProcessStatus::Blocked
    }

    /// "feasibility-analysis" -> "Feasibility Analysis"
    pub fn display_kind(&self) -> String {
        self.kind
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
    Data,
    Document,
    Score,
    Recommendation,
}

/// Artifact produced by a process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutput {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub output_type: OutputType,
    pub timestamp: DateTime<Utc>,
}

/// A process moved out of the active list. Processes are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessHistoryEntry {
    #[serde(flatten)]
    pub process: Process,
    pub archived_at: DateTime<Utc>,
}
