use serde::{ Deserialize, Serialize };

/// Numeric rule constants used by the derived-state calculations.
///
/// Day windows are inclusive: a date `n` days out is "within n days".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A process due within this many days flags its property for attention
    pub attention_window_days: i64,
    /// Risk level at or above which a property needs attention
    pub attention_risk_level: f64,
    /// Risk level a property must stay below to count as on track
    pub on_track_risk_ceiling: f64,
    /// Risk level at or above which a healthy property is put on watch
    pub watch_risk_level: f64,
    pub week_window_days: i64,
    pub month_window_days: i64,
    /// Items due within this many days are at risk regardless of activity
    pub item_urgent_window_days: i64,
    /// Items due within this many days are at risk once they go stale
    pub item_stale_window_days: i64,
    /// Days without a status update after which an item is stale
    pub item_stale_after_days: i64,
    /// Letters due within this many days with open items are at risk
    pub letter_window_days: i64,
    /// Processes due within this many days show as at risk on their card
    pub process_at_risk_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            attention_window_days: 3,
            attention_risk_level: 7.0,
            on_track_risk_ceiling: 5.0,
            watch_risk_level: 5.0,
            week_window_days: 7,
            month_window_days: 30,
            item_urgent_window_days: 2,
            item_stale_window_days: 5,
            item_stale_after_days: 3,
            letter_window_days: 3,
            process_at_risk_days: 3,
        }
    }
}

/// Options for the workflow API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowApiOptions {
    /// Service root, without the `/api/v1/workflow` suffix
    pub base_url: String,
    pub timeout_secs: u64,
    /// Name recorded on comments when none is given
    pub default_user: Option<String>,
}

impl Default for WorkflowApiOptions {
    fn default() -> Self {
        WorkflowApiOptions {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            default_user: None,
        }
    }
}
