//! Walking a state chain from a node back to its root.

use super::envelope::InputEnvelope;
use super::node::{StateNode, StateRef};
use std::iter::FusedIterator;
use std::ptr;
use std::sync::Arc;

/// Iterator over a node and all of its ancestors, newest first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a dyn StateNode>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a dyn StateNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.previous().map(|previous| &**previous);
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

impl dyn StateNode {
    /// Iterate from this node back to the root.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The node with no previous state at the end of the chain.
    pub fn root(&self) -> &dyn StateNode {
        // A chain always contains at least `self`.
        self.chain().last().unwrap_or(self)
    }

    /// The nearest node in the chain that accepts `input`, without running
    /// any transition.
    pub fn find_handler(&self, input: &InputEnvelope) -> Option<&dyn StateNode> {
        self.chain().find(|node| node.accepts(input))
    }

    /// Names of the states from this node back to the root.
    pub fn trail(&self) -> Vec<&'static str> {
        self.chain().map(|node| node.name()).collect()
    }
}

/// Drop a chain one node at a time.
///
/// Nodes still referenced elsewhere stop the walk; the rest of the chain
/// stays alive for those owners.
pub fn release(mut next: Option<StateRef>) {
    while let Some(node) = next {
        next = node.detach();
    }
}

/// Whether `ancestor` is `node` itself or one of its previous states.
pub fn shares_history(node: &StateRef, ancestor: &StateRef) -> bool {
    let target = Arc::as_ptr(ancestor);
    node.chain().any(|n| ptr::addr_eq(n, target))
}
