//! Stackstate: stackable immutable states with typed fallback dispatch
//!
//! An application workflow is modelled as a chain ("stack") of immutable
//! states. Each state accepts exactly one kind of input; an input it does not
//! recognize is handed to the state it was derived from, and so on up to the
//! root. Inputs nobody accepts are silently ignored.
//!
//! # Core Concepts
//!
//! - **Envelopes**: `InputEnvelope` and `DataEnvelope` carry values of any kind
//!   through a single untyped entry point
//! - **States**: `TypedState` binds a state to one input kind and one data kind;
//!   every typed state is a `StateNode` and gets fallback dispatch for free
//! - **Driver**: `StateDriver` owns the one mutable "current state" cell
//!
//! # Example
//!
//! ```rust
//! use stackstate::core::{NoInput, StateData, StateInput, TypedState};
//! use stackstate::driver::StateDriver;
//! use stackstate::stackable_state;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Session {
//!     signed_in: bool,
//! }
//! impl StateData for Session {}
//!
//! #[derive(Debug)]
//! enum GuestInput {
//!     SignIn,
//! }
//! impl StateInput for GuestInput {}
//!
//! stackable_state! {
//!     struct Guest {
//!         data: Session,
//!         input: GuestInput,
//!     }
//!     fn handle(this, input) {
//!         match input {
//!             GuestInput::SignIn => Member::on(this, Session { signed_in: true }).into_ref(),
//!         }
//!     }
//! }
//!
//! stackable_state! {
//!     struct Member {
//!         data: Session,
//!         input: NoInput,
//!     }
//!     fn handle(_this, input) {
//!         match *input {}
//!     }
//! }
//!
//! let mut driver = StateDriver::new(|| Guest::new(Session::default()).into_ref());
//! driver.send(GuestInput::SignIn);
//! assert_eq!(driver.data::<Session>(), Some(&Session { signed_in: true }));
//! ```

pub mod core;
pub mod driver;
mod macros;

// Re-export commonly used types
pub use self::core::{
    InputEnvelope, NoInput, StateData, StateInput, StateNode, StateRef, TypedState,
};
pub use self::driver::{DispatchOutcome, DriverBuilder, DriverConfig, DriverError, StateDriver};
