use std::fmt;

use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::common::LifecyclePhase;

/// Which dimension of a property a state change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateType {
    Lifecycle,
    Status,
    Approval,
    Risk,
}

/// Previous or new value of a state change. Risk changes carry numbers,
/// everything else carries a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Number(f64),
    Text(String),
}

impl StateValue {
    /// Interpret the value as a lifecycle phase tag
    pub fn as_phase(&self) -> Option<LifecyclePhase> {
        match self {
            StateValue::Text(tag) => tag.parse().ok(),
            StateValue::Number(_) => None,
        }
    }
}

impl From<LifecyclePhase> for StateValue {
    fn from(phase: LifecyclePhase) -> Self {
        StateValue::Text(phase.as_str().to_string())
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Number(n) => write!(f, "{}", n),
            StateValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Append-only record of a single field transition. Display only, never
/// replayed to rebuild current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    pub id: String,
    pub property_id: String,
    pub state_type: StateType,
    pub previous_value: StateValue,
    pub new_value: StateValue,
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}
