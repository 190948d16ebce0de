//! Driver error types.

use thiserror::Error;

/// Errors surfaced by [`StateDriver`](super::StateDriver) and its builder.
///
/// The dispatch core never fails; these cover driver construction,
/// configuration, and callers that ask for unhandled input to be an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    #[error("Root state not specified. Call .root(factory) before .build()")]
    MissingRoot,

    #[error("No state in the chain of '{state}' accepts input of kind '{input}'")]
    Unhandled { state: String, input: String },

    #[error("Invalid driver configuration: {0}")]
    InvalidConfig(String),
}
