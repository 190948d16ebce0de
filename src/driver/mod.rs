//! Driver for a state chain.
//!
//! The core keeps every state immutable. The driver is the one place that
//! changes over time: it holds the current state, swaps it when an input is
//! accepted, and runs enter hooks after the swap.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stackstate::core::{IntoStateRef, StateData, StateInput, StateRef, TypedState};
//! use stackstate::driver::{DispatchOutcome, DriverBuilder};
//!
//! #[derive(Debug)]
//! struct Tick;
//! impl StateInput for Tick {}
//!
//! #[derive(Debug, PartialEq)]
//! struct Count(u32);
//! impl StateData for Count {}
//!
//! #[derive(Debug)]
//! struct Counting {
//!     previous: Option<StateRef>,
//!     count: Count,
//! }
//!
//! impl TypedState for Counting {
//!     type Input = Tick;
//!     type Data = Count;
//!
//!     fn previous_state(&self) -> Option<&StateRef> {
//!         self.previous.as_ref()
//!     }
//!
//!     fn data(&self) -> &Count {
//!         &self.count
//!     }
//!
//!     fn handle(self: Arc<Self>, _input: &Tick) -> StateRef {
//!         let count = Count(self.count.0 + 1);
//!         Counting { previous: Some(self.into_state_ref()), count }.into_ref()
//!     }
//! }
//!
//! let mut driver = DriverBuilder::new()
//!     .root(|| Counting { previous: None, count: Count(0) }.into_ref())
//!     .build()
//!     .unwrap();
//!
//! assert!(driver.send(Tick).is_transition());
//! assert_eq!(driver.data::<Count>(), Some(&Count(1)));
//! ```

mod builder;
mod config;
mod error;
mod machine;

pub use builder::DriverBuilder;
pub use config::DriverConfig;
pub use error::DriverError;
pub use machine::{DispatchOutcome, EnterHook, RootFactory, StateDriver};
