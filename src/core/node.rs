//! State nodes and the typed state contract.
//!
//! A state chain is a backward-linked list of immutable nodes. Each node
//! holds a shared reference to the node it replaced, so a chain is cheap to
//! extend and ancestors can be shared by any number of successors.

use super::dispatch;
use super::envelope::{DataEnvelope, InputEnvelope, StateData, StateInput};
use std::any::type_name;
use std::fmt::Debug;
use std::sync::Arc;

/// Shared handle to a node of any state kind.
pub type StateRef = Arc<dyn StateNode>;

/// Uniform, type-erased view of a state.
///
/// Every [`TypedState`] is a `StateNode` through a blanket implementation;
/// the dispatch behavior is never written by hand.
pub trait StateNode: Debug + Send + Sync + 'static {
    /// The node this one was derived from, `None` at the root.
    fn previous(&self) -> Option<&StateRef>;

    /// This node's data, type-erased. Never fails and has no side effects.
    fn extract_data(&self) -> DataEnvelope<'_>;

    /// Attempt to advance the state machine with `input`.
    ///
    /// Returns `None` when neither this node nor any ancestor accepts the
    /// input's kind.
    fn dispatch(self: Arc<Self>, input: &InputEnvelope) -> Option<StateRef>;

    /// Whether this node itself (ignoring ancestors) accepts the input's kind.
    fn accepts(&self, input: &InputEnvelope) -> bool;

    /// Short name of the state kind, for diagnostics.
    fn name(&self) -> &'static str;

    /// Number of ancestors; zero for the root.
    fn depth(&self) -> usize;

    /// Give up this node, returning its link to the previous node when this
    /// was the last reference to it.
    ///
    /// Used by [`release`](crate::core::release) to drop a chain one node at
    /// a time.
    fn detach(self: Arc<Self>) -> Option<StateRef>;
}

/// A state bound to one input kind and one data kind.
///
/// `handle` is the transition table of the state. It is total over
/// `Self::Input` and is only ever called with input of that kind.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use stackstate::core::{
///     InputEnvelope, IntoStateRef, StateData, StateInput, StateRef, TypedState,
/// };
///
/// #[derive(Debug)]
/// struct Toggle;
///
/// impl StateInput for Toggle {}
///
/// #[derive(Debug, PartialEq)]
/// struct Lamp(bool);
///
/// impl StateData for Lamp {}
///
/// #[derive(Debug)]
/// struct Light {
///     previous: Option<StateRef>,
///     lamp: Lamp,
/// }
///
/// impl TypedState for Light {
///     type Input = Toggle;
///     type Data = Lamp;
///
///     fn previous_state(&self) -> Option<&StateRef> {
///         self.previous.as_ref()
///     }
///
///     fn data(&self) -> &Lamp {
///         &self.lamp
///     }
///
///     fn handle(self: Arc<Self>, _input: &Toggle) -> StateRef {
///         let lamp = Lamp(!self.lamp.0);
///         Light { previous: Some(self.into_state_ref()), lamp }.into_ref()
///     }
/// }
///
/// let light = Light { previous: None, lamp: Lamp(false) }.into_ref();
/// let next = light.dispatch(&InputEnvelope::new(Toggle)).unwrap();
/// assert_eq!(next.extract_data().narrow::<Lamp>(), Some(&Lamp(true)));
/// ```
pub trait TypedState: Debug + Send + Sync + Sized + 'static {
    /// The closed set of inputs this state understands.
    type Input: StateInput;

    /// The data this state carries.
    type Data: StateData;

    /// The node this state was derived from.
    fn previous_state(&self) -> Option<&StateRef>;

    /// Immutable data of this state.
    fn data(&self) -> &Self::Data;

    /// Transition for an input of this state's kind.
    fn handle(self: Arc<Self>, input: &Self::Input) -> StateRef;

    /// Number of ancestors.
    ///
    /// The default walks the chain. States that record their depth when they
    /// are built (as `stackable_state!` does) answer in constant time.
    fn chain_depth(&self) -> usize {
        self.previous_state().map_or(0, |previous| previous.chain().count())
    }

    /// Take the link to the previous node out of the state.
    ///
    /// The default keeps the link, leaving it to the ordinary recursive drop.
    fn into_previous(self) -> Option<StateRef> {
        None
    }

    /// Move the state into a shared node.
    fn into_ref(self) -> StateRef {
        Arc::new(self)
    }
}

impl<T: TypedState> StateNode for T {
    fn previous(&self) -> Option<&StateRef> {
        self.previous_state()
    }

    fn extract_data(&self) -> DataEnvelope<'_> {
        DataEnvelope::new(self.data())
    }

    fn dispatch(self: Arc<Self>, input: &InputEnvelope) -> Option<StateRef> {
        dispatch::dispatch(self, input)
    }

    fn accepts(&self, input: &InputEnvelope) -> bool {
        input.is::<T::Input>()
    }

    fn name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn depth(&self) -> usize {
        self.chain_depth()
    }

    fn detach(self: Arc<Self>) -> Option<StateRef> {
        Arc::try_unwrap(self).ok().and_then(TypedState::into_previous)
    }
}

/// Conversion into a [`StateRef`], used when stacking a new node on a
/// previous one.
pub trait IntoStateRef {
    fn into_state_ref(self) -> StateRef;
}

impl IntoStateRef for StateRef {
    fn into_state_ref(self) -> StateRef {
        self
    }
}

impl<T: StateNode> IntoStateRef for Arc<T> {
    fn into_state_ref(self) -> StateRef {
        self
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
