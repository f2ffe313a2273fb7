use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::common::{
    ApprovalState,
    EntitlementStatus,
    LifecyclePhase,
    PropertyStatus,
    PropertyType,
};
use crate::models::correction::CorrectionLetter;
use crate::models::history::StateChange;
use crate::models::process::{ Process, ProcessHistoryEntry };

/// Descriptive data about the parcel itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub jurisdiction: String,
    #[serde(default)]
    pub lot_size_sf: Option<f64>,
    #[serde(default)]
    pub zoning_district: Option<String>,
}

/// A property moving through the pipeline.
///
/// Properties are replaced wholesale on change; helpers that "mutate" a
/// property return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub lifecycle: LifecyclePhase,
    pub status: PropertyStatus,
    pub approval_state: ApprovalState,
    /// 0-10 score. The upper bound is conventional, not enforced.
    pub risk_level: f64,
    #[serde(default)]
    pub entitlement_status: Option<EntitlementStatus>,
    #[serde(default)]
    pub correction_letters: Vec<CorrectionLetter>,
    #[serde(default)]
    pub attributes: Option<PropertyAttributes>,
    #[serde(default)]
    pub active_processes: Vec<Process>,
    #[serde(default)]
    pub process_history: Vec<ProcessHistoryEntry>,
    #[serde(default)]
    pub state_history: Vec<StateChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl Property {
    /// The most recent correction letter round, if any
    pub fn current_letter(&self) -> Option<&CorrectionLetter> {
        self.correction_letters.iter().max_by_key(|letter| letter.round_number)
    }

    pub fn find_process(&self, process_id: &str) -> Option<&Process> {
        self.active_processes.iter().find(|p| p.id == process_id)
    }

    pub fn display_name(&self) -> &str {
        match &self.attributes {
            Some(attrs) if !attrs.address.is_empty() => &attrs.address,
            _ => &self.id,
        }
    }
}
