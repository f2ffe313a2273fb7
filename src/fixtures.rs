use std::fs;
use std::path::Path;

use log::{ debug, info };
use serde::{ Deserialize, Serialize };

use crate::errors::{ ParcelflowError, ParcelflowResult };
use crate::models::property::Property;

/// A snapshot of properties, as stored in JSON sample data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub properties: Vec<Property>,
}

impl Portfolio {
    pub fn from_json(contents: &str) -> ParcelflowResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load a portfolio fixture. A bare JSON array of properties is
    /// accepted as well as `{ "properties": [...] }`.
    pub fn load(path: &Path) -> ParcelflowResult<Self> {
        let fixture_error = |message: String| ParcelflowError::FixtureError {
            path: path.display().to_string(),
            message,
        };

        let contents = fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let value: serde_json::Value = serde_json
            ::from_str(&contents)
            .map_err(|e| fixture_error(e.to_string()))?;

        let portfolio = if value.is_array() {
            debug!("{} is a bare property list", path.display());
            let properties: Vec<Property> = serde_json
                ::from_value(value)
                .map_err(|e| fixture_error(e.to_string()))?;
            Portfolio { properties }
        } else {
            serde_json::from_value(value).map_err(|e| fixture_error(e.to_string()))?
        };

        info!("Loaded {} properties from {}", portfolio.properties.len(), path.display());
        Ok(portfolio)
    }

    pub fn find(&self, property_id: &str) -> ParcelflowResult<&Property> {
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .ok_or_else(|| ParcelflowError::PropertyNotFound(property_id.to_string()))
    }
}
