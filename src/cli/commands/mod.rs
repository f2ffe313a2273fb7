use anyhow::Result;
use chrono::{ DateTime, Utc };
use serde::Serialize;

use parcelflow::config::Thresholds;
use parcelflow::implementations::config::ParcelflowConfig;

pub mod letter;
pub mod path;
pub mod projects;
pub mod stats;
pub mod views;

/// Settings shared by every command
pub struct CommandContext {
    pub config: ParcelflowConfig,
    pub now: DateTime<Utc>,
    pub json: bool,
}

impl CommandContext {
    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
