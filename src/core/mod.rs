//! Core of the stackable state machine.
//!
//! This module contains everything a state needs to take part in a chain:
//! - Type-erased input and data envelopes
//! - The `StateNode` / `TypedState` contracts
//! - The shared fallback dispatcher
//! - Chain introspection, iterative chain release and the transition history
//!
//! Nothing here mutates a node after construction and nothing performs I/O.

mod chain;
mod dispatch;
mod envelope;
mod history;
mod node;

pub use chain::{release, shares_history, Chain};
pub use envelope::{DataEnvelope, InputEnvelope, NoInput, StateData, StateInput};
pub use history::{DispatchHistory, TransitionRecord};
pub use node::{IntoStateRef, StateNode, StateRef, TypedState};
