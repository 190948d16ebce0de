//! Type-erased carriers for inputs and state data.
//!
//! Inputs of any kind travel through dispatch as an [`InputEnvelope`]. Each
//! state narrows the envelope to the one kind it understands; a failed
//! narrowing is not an error, it only decides whether the input falls back
//! to the previous state.

use std::any::{type_name, Any};
use std::fmt::{self, Debug};

/// Marker for values that can be fed to a state machine.
///
/// Implement it on the closed enum (or struct) a state declares as its
/// input kind.
///
/// # Example
///
/// ```rust
/// use stackstate::core::{InputEnvelope, StateInput};
///
/// #[derive(Debug)]
/// enum DoorInput {
///     Open,
///     Close,
/// }
///
/// impl StateInput for DoorInput {}
///
/// let envelope = InputEnvelope::new(DoorInput::Open);
/// assert!(envelope.narrow::<DoorInput>().is_some());
/// ```
pub trait StateInput: Any + Send + Sync + Debug {}

/// Marker for data carried by a state and exposed through [`DataEnvelope`].
pub trait StateData: Any + Send + Sync + Debug {}

impl StateData for () {}

/// Input kind of a terminal state.
///
/// `NoInput` has no values, so narrowing an envelope to it never succeeds and
/// every input sent to a terminal state falls back to its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoInput {}

impl StateInput for NoInput {}

/// Owned, type-erased input value.
///
/// Created by the driver when an event occurs and consumed by a single
/// dispatch. The same envelope is handed up the chain unchanged.
pub struct InputEnvelope {
    value: Box<dyn Any + Send + Sync>,
    kind: &'static str,
}

impl InputEnvelope {
    /// Wrap an input value.
    pub fn new<I: StateInput>(input: I) -> Self {
        Self {
            value: Box::new(input),
            kind: type_name::<I>(),
        }
    }

    /// Try to interpret the envelope as input kind `I`.
    pub fn narrow<I: StateInput>(&self) -> Option<&I> {
        self.value.downcast_ref::<I>()
    }

    /// Check whether the envelope holds an input of kind `I`.
    pub fn is<I: StateInput>(&self) -> bool {
        self.value.is::<I>()
    }

    /// Take the input back out, or return the envelope if the kind differs.
    pub fn into_inner<I: StateInput>(self) -> Result<I, Self> {
        let kind = self.kind;
        self.value
            .downcast::<I>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { value, kind })
    }

    /// Full type name of the wrapped input kind.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl<I: StateInput> From<I> for InputEnvelope {
    fn from(input: I) -> Self {
        Self::new(input)
    }
}

impl Debug for InputEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputEnvelope")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Borrowed, read-only view of a state's data.
///
/// A `DataEnvelope` is never owned state: it lives only as long as the node
/// it was extracted from.
#[derive(Clone, Copy)]
pub struct DataEnvelope<'a> {
    value: &'a (dyn Any + Send + Sync),
    kind: &'static str,
}

impl<'a> DataEnvelope<'a> {
    /// View a state's data.
    pub fn new<D: StateData>(data: &'a D) -> Self {
        Self {
            value: data,
            kind: type_name::<D>(),
        }
    }

    /// Try to interpret the data as kind `D`.
    pub fn narrow<D: StateData>(&self) -> Option<&'a D> {
        self.value.downcast_ref::<D>()
    }

    /// Check whether the data is of kind `D`.
    pub fn is<D: StateData>(&self) -> bool {
        self.value.is::<D>()
    }

    /// Full type name of the data kind.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Debug for DataEnvelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataEnvelope")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
