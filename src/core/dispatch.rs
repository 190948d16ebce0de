//! Fallback dispatch shared by every typed state.

use super::envelope::InputEnvelope;
use super::node::{StateNode, StateRef, TypedState};
use std::sync::Arc;
use tracing::trace;

/// Dispatch `input` starting at `node`.
///
/// 1. Narrow the input to the node's declared input kind.
/// 2. On success, return the node's transition for it.
/// 3. Otherwise hand the same envelope to the previous node.
/// 4. At the root, return `None`: nothing in the chain accepted the input.
pub(crate) fn dispatch<S: TypedState>(node: Arc<S>, input: &InputEnvelope) -> Option<StateRef> {
    if let Some(narrowed) = input.narrow::<S::Input>() {
        return Some(node.handle(narrowed));
    }

    match node.previous_state() {
        Some(previous) => {
            trace!(
                input = input.kind(),
                from = node.name(),
                to = previous.name(),
                "falling back to previous state"
            );
            Arc::clone(previous).dispatch(input)
        }
        None => {
            trace!(
                input = input.kind(),
                root = node.name(),
                "input not accepted by any state in the chain"
            );
            None
        }
    }
}
