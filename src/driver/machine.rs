//! Driver that owns the current state of a chain.

use super::config::DriverConfig;
use super::error::DriverError;
use crate::core::{
    release, DataEnvelope, DispatchHistory, InputEnvelope, NoInput, StateData, StateRef,
    TransitionRecord, TypedState,
};
use chrono::Utc;
use std::fmt;
use std::mem;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Produces a fresh root state, on creation and on every reset.
pub type RootFactory = Arc<dyn Fn() -> StateRef + Send + Sync>;

/// Side effect run after the driver has entered a new state.
pub type EnterHook = Box<dyn Fn(&StateRef) + Send + Sync>;

/// Result of feeding one input to the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    /// A state in the chain accepted the input and the current state moved
    Transitioned {
        from: &'static str,
        to: &'static str,
        depth: usize,
    },

    /// Nothing in the chain accepted the input; the current state is unchanged
    Ignored {
        state: &'static str,
        input: &'static str,
    },
}

impl DispatchOutcome {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Owner of the single mutable "current state" cell.
///
/// Every input is dispatched from the current state; when a state in the
/// chain accepts it, the result replaces the current state and only then
/// are history and enter hooks updated. Ignored inputs have no effect.
///
/// The driver needs `&mut self` to advance, so a host that shares one across
/// threads serializes dispatch, swap and hooks behind a single lock.
pub struct StateDriver {
    id: Uuid,
    root: RootFactory,
    current: StateRef,
    history: DispatchHistory,
    config: DriverConfig,
    hooks: Vec<EnterHook>,
}

impl StateDriver {
    /// Create a driver with the default configuration, starting at a fresh root.
    pub fn new<F>(root: F) -> Self
    where
        F: Fn() -> StateRef + Send + Sync + 'static,
    {
        Self::from_parts(Arc::new(root), DriverConfig::default(), Vec::new())
    }

    pub(crate) fn from_parts(
        root: RootFactory,
        config: DriverConfig,
        hooks: Vec<EnterHook>,
    ) -> Self {
        let current = root();
        let history = config.new_history();
        Self {
            id: Uuid::new_v4(),
            root,
            current,
            history,
            config,
            hooks,
        }
    }

    /// Dispatch one input from the current state.
    pub fn send(&mut self, input: impl Into<InputEnvelope>) -> DispatchOutcome {
        let input = input.into();
        let from = self.current.name();

        let Some(next) = Arc::clone(&self.current).dispatch(&input) else {
            debug!(
                driver = %self.id,
                state = from,
                input = input.kind(),
                "input ignored"
            );
            return DispatchOutcome::Ignored {
                state: from,
                input: input.kind(),
            };
        };

        self.current = next;
        let to = self.current.name();
        let depth = self.current.depth();

        if self.config.record_history {
            self.history.push(TransitionRecord {
                from: from.to_string(),
                to: to.to_string(),
                input: input.kind().to_string(),
                depth,
                timestamp: Utc::now(),
            });
        }

        debug!(
            driver = %self.id,
            from,
            to,
            input = input.kind(),
            depth,
            "entered state"
        );

        for hook in &self.hooks {
            hook(&self.current);
        }

        DispatchOutcome::Transitioned { from, to, depth }
    }

    /// Like [`send`](Self::send), but an ignored input is reported as
    /// [`DriverError::Unhandled`].
    pub fn try_send(&mut self, input: impl Into<InputEnvelope>) -> Result<&StateRef, DriverError> {
        match self.send(input) {
            DispatchOutcome::Transitioned { .. } => Ok(&self.current),
            DispatchOutcome::Ignored { state, input } => Err(DriverError::Unhandled {
                state: state.to_string(),
                input: input.to_string(),
            }),
        }
    }

    /// Replace the current state with a fresh root.
    ///
    /// The abandoned chain is released one node at a time.
    pub fn reset(&mut self) {
        let abandoned = mem::replace(&mut self.current, (self.root)());
        release(Some(abandoned));
        if !self.config.keep_history_on_reset {
            self.history.clear();
        }
        debug!(driver = %self.id, root = self.current.name(), "driver reset");
    }

    /// The current state.
    pub fn current(&self) -> &StateRef {
        &self.current
    }

    /// Type-erased data of the current state.
    pub fn extract_data(&self) -> DataEnvelope<'_> {
        self.current.extract_data()
    }

    /// Data of the current state, if it is of kind `D`.
    pub fn data<D: StateData>(&self) -> Option<&D> {
        self.current.extract_data().narrow::<D>()
    }

    /// Transitions recorded so far, oldest first.
    pub fn history(&self) -> &DispatchHistory {
        &self.history
    }

    /// Configuration the driver was built with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Identifier of this driver, attached to its log events.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for StateDriver {
    fn drop(&mut self) {
        let current = mem::replace(&mut self.current, Vacant.into_ref());
        release(Some(current));
    }
}

/// Placeholder left in the current cell while a dropped driver releases its
/// chain.
#[derive(Debug)]
struct Vacant;

impl TypedState for Vacant {
    type Input = NoInput;
    type Data = ();

    fn previous_state(&self) -> Option<&StateRef> {
        None
    }

    fn data(&self) -> &() {
        &()
    }

    fn handle(self: Arc<Self>, input: &NoInput) -> StateRef {
        match *input {}
    }
}

impl fmt::Debug for StateDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDriver")
            .field("id", &self.id)
            .field("current", &self.current.name())
            .field("depth", &self.current.depth())
            .field("history", &self.history.len())
            .field("config", &self.config)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
