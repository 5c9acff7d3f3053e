use lichtbild_state::store::{SessionState, StateError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod ui;

const DEFAULT_PROFILE_PIC_URL: &str = "https://via.placeholder.com/50";

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error seeding demo users: {0}")]
    Seed(#[from] StateError),
    #[error("Error reading or writing the terminal: {0}")]
    Terminal(#[from] std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    #[serde(default)]
    profile_pic_url: Option<String>,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lichtbild_app=debug,lichtbild_state=debug,lichtbild_common=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let profile_pic_url = env
        .profile_pic_url
        .unwrap_or_else(|| DEFAULT_PROFILE_PIC_URL.to_owned());
    let mut state = SessionState::new(profile_pic_url);
    ui::seed_demo_users(&mut state)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ui::run(&mut state, stdin.lock(), stdout.lock())?;

    Ok(())
}
