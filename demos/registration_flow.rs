//! Registration Flow
//!
//! This example walks a registration workflow built from stackable states.
//!
//! Key concepts:
//! - Each state accepts exactly one input kind
//! - Unrecognized inputs fall back to the state they came from
//! - The driver owns the only mutable cell and runs hooks after each swap
//!
//! Run with: RUST_LOG=stackstate=trace cargo run --example registration_flow

use stackstate::core::{NoInput, StateData, StateInput, TypedState};
use stackstate::driver::{DriverBuilder, DriverConfig};
use stackstate::stackable_state;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default, PartialEq)]
struct RegistrationSession {
    email: Option<String>,
    name: Option<String>,
    is_login: Option<bool>,
}

impl StateData for RegistrationSession {}

#[derive(Debug)]
enum InitialInput {
    SignUp,
    Login,
}

impl StateInput for InitialInput {}

#[derive(Debug)]
enum SignUpInput {
    SignUp { email: String, name: String },
    SignUpFailed,
}

impl StateInput for SignUpInput {}

stackable_state! {
    struct Initial {
        data: RegistrationSession,
        input: InitialInput,
    }
    fn handle(this, input) {
        let data = this.data.clone();
        match input {
            InitialInput::SignUp => SignUp::on(this, data).into_ref(),
            InitialInput::Login => {
                let data = RegistrationSession { is_login: Some(true), ..data };
                Finish::on(this, data).into_ref()
            }
        }
    }
}

stackable_state! {
    struct SignUp {
        data: RegistrationSession,
        input: SignUpInput,
    }
    fn handle(this, input) {
        let data = this.data.clone();
        match input {
            SignUpInput::SignUp { email, name } => {
                let data = RegistrationSession {
                    email: Some(email.clone()),
                    name: Some(name.clone()),
                    is_login: Some(true),
                };
                Finish::on(this, data).into_ref()
            }
            SignUpInput::SignUpFailed => {
                let data = RegistrationSession { is_login: Some(false), ..data };
                Failed::on(this, data).into_ref()
            }
        }
    }
}

stackable_state! {
    struct Finish {
        data: RegistrationSession,
        input: NoInput,
    }
    fn handle(_this, input) {
        match *input {}
    }
}

stackable_state! {
    struct Failed {
        data: RegistrationSession,
        input: NoInput,
    }
    fn handle(_this, input) {
        match *input {}
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Registration Flow Example ===\n");

    let config = DriverConfig::from_json(r#"{ "history_limit": 32 }"#)?;
    let mut driver = DriverBuilder::new()
        .root(|| Initial::new(RegistrationSession::default()).into_ref())
        .config(config)
        .on_enter(|state| println!("  entered {}", state.name()))
        .build()?;

    println!("Case 1: sign up, then change your mind and log in");
    driver.send(InitialInput::SignUp);
    driver.send(InitialInput::Login);
    println!("  session: {:?}", driver.data::<RegistrationSession>());
    println!("  chain:   {:?}\n", driver.current().trail());

    driver.reset();

    println!("Case 2: sign up with details");
    driver.send(InitialInput::SignUp);
    driver.send(SignUpInput::SignUp {
        email: "test@example.com".to_string(),
        name: "Haniko".to_string(),
    });
    println!("  session: {:?}\n", driver.data::<RegistrationSession>());

    println!("Case 3: a failure reported after finishing falls back to sign-up");
    let outcome = driver.send(SignUpInput::SignUpFailed);
    println!("  outcome: {outcome:?}");
    println!("  session: {:?}\n", driver.data::<RegistrationSession>());

    println!("History: {}", serde_json::to_string_pretty(driver.history())?);

    driver.reset();

    println!("\nCase 4: sign-up details are not understood by the initial state");
    println!("  outcome: {:?}", driver.send(SignUpInput::SignUpFailed));
    if let Err(err) = driver.try_send(SignUpInput::SignUpFailed) {
        println!("  strict:  {err}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
