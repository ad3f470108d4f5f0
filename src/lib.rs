pub mod auth;
pub mod common;
mod config;
mod error;
pub mod server;
pub mod store;

pub use common::{Message, Room, Topic, User, UserName};
pub use config::Config;
pub use error::{Error, Result};
pub use server::{AppState, Server};
pub use store::Database;
use tracing::{level_filters::LevelFilter, warn};

/// Initialize the logger and read the .env file to get the configuration
pub fn init(log_level: impl TryInto<LevelFilter>) -> Config {
    setup_tracing(log_level);
    Config::from_env()
}

fn setup_tracing(log_level: impl TryInto<LevelFilter>) {
    let log_level = log_level.try_into().unwrap_or_else(|_| {
        warn!("Invalid log level, using default: WARN");
        LevelFilter::WARN
    });
    tracing_subscriber::fmt().with_max_level(log_level).init();
}
