//! Builder for constructing state drivers.

use super::config::DriverConfig;
use super::error::DriverError;
use super::machine::{EnterHook, RootFactory, StateDriver};
use crate::core::StateRef;
use std::sync::Arc;

/// Builder for [`StateDriver`] with a fluent API.
#[derive(Default)]
pub struct DriverBuilder {
    root: Option<RootFactory>,
    config: DriverConfig,
    hooks: Vec<EnterHook>,
}

impl DriverBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root factory (required). It runs once now and again on every reset.
    pub fn root<F>(mut self, root: F) -> Self
    where
        F: Fn() -> StateRef + Send + Sync + 'static,
    {
        self.root = Some(Arc::new(root));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep at most `limit` transitions in the history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Turn transition recording on or off.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    /// Register a hook that runs after every accepted input, once the new
    /// state is current.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StateRef) + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Build the driver.
    /// Returns an error if the root is missing or the configuration is invalid.
    pub fn build(self) -> Result<StateDriver, DriverError> {
        let root = self.root.ok_or(DriverError::MissingRoot)?;
        self.config.validate()?;
        Ok(StateDriver::from_parts(root, self.config, self.hooks))
    }
}
