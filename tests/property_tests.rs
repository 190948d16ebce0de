//! Property-based tests for fallback dispatch.
//!
//! Chains are built from four state kinds, each accepting its own input kind.
//! Whatever the chain looks like, an input must be handled by the nearest
//! node of the matching kind, or by nobody.

use proptest::prelude::*;
use stackstate::core::{
    shares_history, InputEnvelope, IntoStateRef, StateData, StateInput, StateRef,
    TypedState,
};
use std::sync::Arc;

#[derive(Debug)]
struct Kind<const K: usize>;

impl<const K: usize> StateInput for Kind<K> {}

/// Position of a node in its chain, counted from the root.
#[derive(Debug, Clone, PartialEq)]
struct Position(usize);

impl StateData for Position {}

/// Data of the node produced by a transition.
#[derive(Debug, Clone, PartialEq)]
struct Handled {
    by_kind: usize,
    by_position: usize,
}

impl StateData for Handled {}

#[derive(Debug)]
struct Link<const K: usize> {
    previous: Option<StateRef>,
    position: Position,
}

impl<const K: usize> TypedState for Link<K> {
    type Input = Kind<K>;
    type Data = Position;

    fn previous_state(&self) -> Option<&StateRef> {
        self.previous.as_ref()
    }

    fn data(&self) -> &Position {
        &self.position
    }

    fn handle(self: Arc<Self>, _input: &Kind<K>) -> StateRef {
        let handled = Handled {
            by_kind: K,
            by_position: self.position.0,
        };
        Outcome {
            previous: Some(self.into_state_ref()),
            handled,
        }
        .into_ref()
    }
}

#[derive(Debug)]
struct Outcome {
    previous: Option<StateRef>,
    handled: Handled,
}

impl TypedState for Outcome {
    type Input = stackstate::core::NoInput;
    type Data = Handled;

    fn previous_state(&self) -> Option<&StateRef> {
        self.previous.as_ref()
    }

    fn data(&self) -> &Handled {
        &self.handled
    }

    fn handle(self: Arc<Self>, input: &stackstate::core::NoInput) -> StateRef {
        match *input {}
    }
}

fn link(kind: usize, previous: Option<StateRef>, position: usize) -> StateRef {
    let position = Position(position);
    match kind {
        0 => Link::<0> { previous, position }.into_ref(),
        1 => Link::<1> { previous, position }.into_ref(),
        2 => Link::<2> { previous, position }.into_ref(),
        _ => Link::<3> { previous, position }.into_ref(),
    }
}

fn input(kind: usize) -> InputEnvelope {
    match kind {
        0 => InputEnvelope::new(Kind::<0>),
        1 => InputEnvelope::new(Kind::<1>),
        2 => InputEnvelope::new(Kind::<2>),
        3 => InputEnvelope::new(Kind::<3>),
        _ => InputEnvelope::new(Kind::<4>),
    }
}

/// Build a chain root-first from a list of state kinds.
fn build(kinds: &[usize]) -> StateRef {
    let mut node: Option<StateRef> = None;
    for (position, kind) in kinds.iter().enumerate() {
        node = Some(link(*kind, node, position));
    }
    node.expect("chains are never empty")
}

prop_compose! {
    fn arbitrary_chain()(kinds in prop::collection::vec(0..4usize, 1..12)) -> Vec<usize> {
        kinds
    }
}

proptest! {
    #[test]
    fn input_is_handled_by_nearest_matching_node(
        kinds in arbitrary_chain(),
        kind in 0..5usize,
    ) {
        let top = build(&kinds);
        let expected = kinds.iter().rposition(|k| *k == kind);

        let result = Arc::clone(&top).dispatch(&input(kind));

        match expected {
            Some(position) => {
                let next = result.expect("a matching node exists");
                let handled = next.extract_data().narrow::<Handled>().cloned();
                prop_assert_eq!(
                    handled,
                    Some(Handled { by_kind: kind, by_position: position })
                );
            }
            None => prop_assert!(result.is_none()),
        }
    }

    #[test]
    fn matching_current_node_resolves_locally(kinds in arbitrary_chain()) {
        let top = build(&kinds);
        let current_kind = *kinds.last().unwrap();

        let next = Arc::clone(&top).dispatch(&input(current_kind)).unwrap();

        prop_assert!(Arc::ptr_eq(next.previous().unwrap(), &top));
        prop_assert_eq!(next.depth(), kinds.len());
    }

    #[test]
    fn find_handler_agrees_with_dispatch(kinds in arbitrary_chain(), kind in 0..5usize) {
        let top = build(&kinds);
        let envelope = input(kind);

        let handler = top
            .find_handler(&envelope)
            .and_then(|n| n.extract_data().narrow::<Position>().map(|p| p.0));
        let dispatched = Arc::clone(&top)
            .dispatch(&envelope)
            .and_then(|n| n.extract_data().narrow::<Handled>().map(|h| h.by_position));

        prop_assert_eq!(handler, dispatched);
    }

    #[test]
    fn dispatch_never_changes_the_chain(kinds in arbitrary_chain(), kind in 0..5usize) {
        let top = build(&kinds);
        let before: Vec<usize> = top
            .chain()
            .filter_map(|n| n.extract_data().narrow::<Position>().map(|p| p.0))
            .collect();

        let _ = Arc::clone(&top).dispatch(&input(kind));

        let after: Vec<usize> = top
            .chain()
            .filter_map(|n| n.extract_data().narrow::<Position>().map(|p| p.0))
            .collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(top.depth(), kinds.len() - 1);
    }

    #[test]
    fn extract_data_is_idempotent(kinds in arbitrary_chain()) {
        let top = build(&kinds);
        let first = top.extract_data().narrow::<Position>().cloned();
        let second = top.extract_data().narrow::<Position>().cloned();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn results_stack_on_an_existing_ancestor(kinds in arbitrary_chain(), kind in 0..4usize) {
        let top = build(&kinds);

        if let Some(next) = Arc::clone(&top).dispatch(&input(kind)) {
            // The handling node is either the top or one of its ancestors.
            let handler = next.previous().unwrap();
            prop_assert!(shares_history(&top, handler));
        }
    }
}

#[test]
fn chains_are_shared_across_threads() {
    let top = build(&[0, 1, 2, 3]);

    std::thread::scope(|scope| {
        for kind in 0..4 {
            let top = Arc::clone(&top);
            scope.spawn(move || {
                let next = top.dispatch(&input(kind)).unwrap();
                let handled = next.extract_data().narrow::<Handled>().cloned().unwrap();
                assert_eq!(handled.by_kind, kind);
                assert_eq!(handled.by_position, kind);
            });
        }
    });

    assert_eq!(top.depth(), 3);
}
