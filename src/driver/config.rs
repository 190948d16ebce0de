//! Driver configuration.

use super::error::DriverError;
use crate::core::DispatchHistory;
use serde::{Deserialize, Serialize};

/// Tunables for a [`StateDriver`](super::StateDriver).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use stackstate::driver::DriverConfig;
///
/// let config = DriverConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Keep a log of accepted inputs
    pub record_history: bool,

    /// Maximum number of records kept; unbounded when `None`
    pub history_limit: Option<usize>,

    /// Keep the log across `reset`
    pub keep_history_on_reset: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
            keep_history_on_reset: false,
        }
    }
}

impl DriverConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, DriverError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DriverError> {
        if self.history_limit == Some(0) {
            return Err(DriverError::InvalidConfig(
                "history_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn new_history(&self) -> DispatchHistory {
        match self.history_limit {
            Some(limit) => DispatchHistory::with_limit(limit),
            None => DispatchHistory::new(),
        }
    }
}
