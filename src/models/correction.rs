use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::common::string_tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionDiscipline {
    Civil,
    Structural,
    Architectural,
    Landscape,
    Mechanical,
    Electrical,
    Plumbing,
    Fire,
    Zoning,
    Other,
}

string_tags!(CorrectionDiscipline {
    Civil => "civil",
    Structural => "structural",
    Architectural => "architectural",
    Landscape => "landscape",
    Mechanical => "mechanical",
    Electrical => "electrical",
    Plumbing => "plumbing",
    Fire => "fire",
    Zoning => "zoning",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionSeverity {
    Critical,
    Major,
    Minor,
}

string_tags!(CorrectionSeverity {
    Critical => "critical",
    Major => "major",
    Minor => "minor",
});

/// Response state of a single correction item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionItemStatus {
    NotStarted,
    InProgress,
    ConsultantSubmitted,
    InternalReview,
    Approved,
    NeedsRevision,
    Completed,
}

string_tags!(CorrectionItemStatus {
    NotStarted => "not-started",
    InProgress => "in-progress",
    ConsultantSubmitted => "consultant-submitted",
    InternalReview => "internal-review",
    Approved => "approved",
    NeedsRevision => "needs-revision",
    Completed => "completed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionLetterStatus {
    Received,
    Triaging,
    Assigned,
    InProgress,
    InQa,
    ReadyToSubmit,
    Submitted,
}

string_tags!(CorrectionLetterStatus {
    Received => "received",
    Triaging => "triaging",
    Assigned => "assigned",
    InProgress => "in-progress",
    InQa => "in-qa",
    ReadyToSubmit => "ready-to-submit",
    Submitted => "submitted",
});

/// One deficiency cited by a jurisdiction correction letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionItem {
    pub id: String,
    pub item_number: String,
    pub discipline: CorrectionDiscipline,
    pub description: String,
    pub severity: CorrectionSeverity,
    pub status: CorrectionItemStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to_person: Option<String>,
    #[serde(default)]
    pub response_description: Option<String>,
    #[serde(default)]
    pub estimated_effort_hours: Option<f64>,
    #[serde(default)]
    pub sheet_numbers: Vec<String>,
    /// Last status change; drives the staleness rule
    pub updated_at: DateTime<Utc>,
}

impl CorrectionItem {
    pub fn is_completed(&self) -> bool {
        self.status == CorrectionItemStatus::Completed
    }
}

/// A jurisdiction letter listing correction items for one permit round.
///
/// Item counts are derived from `items` on every call. Counters that arrive
/// in serialized input are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionLetter {
    pub id: String,
    pub property_id: String,
    pub round_number: u32,
    pub letter_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,
    #[serde(default)]
    pub response_due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub internal_target_date: Option<DateTime<Utc>>,
    pub status: CorrectionLetterStatus,
    #[serde(default)]
    pub items: Vec<CorrectionItem>,
}

impl CorrectionLetter {
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn items_completed(&self) -> usize {
        self.count_status(CorrectionItemStatus::Completed)
    }

    pub fn items_in_progress(&self) -> usize {
        self.count_status(CorrectionItemStatus::InProgress)
    }

    pub fn items_not_started(&self) -> usize {
        self.count_status(CorrectionItemStatus::NotStarted)
    }

    pub fn is_complete(&self) -> bool {
        self.items_completed() == self.total_items()
    }

    fn count_status(&self, status: CorrectionItemStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }
}
