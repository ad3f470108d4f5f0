use crate::auth::{DEFAULT_ITERATIONS, DEFAULT_SESSION_TTL_SECS};

use chrono::Duration;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub address: String,
    pub database_path: PathBuf,
    pub session_ttl: Duration,
    pub password_iterations: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let host = env_or("HOST", "localhost".to_string());
        let port = env_or("PORT", 8080u16);
        let database_path = env_or("DATABASE_PATH", PathBuf::from("forum.db"));
        let session_ttl_secs = env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS);
        let password_iterations = env_or("PASSWORD_ITERATIONS", DEFAULT_ITERATIONS);

        Self {
            address: format!("{}:{}", host, port),
            database_path,
            session_ttl: Duration::seconds(session_ttl_secs.max(0)),
            password_iterations,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("{} env var is invalid ({:?})!! Using default: {:?}", key, value, default);
            default
        }),
        Err(_) => {
            warn!("{} env var not set!! Using default: {:?}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_missing_or_bad_values() {
        assert_eq!(env_or("FORUM_APP_TEST_UNSET_VAR", 7u16), 7);

        std::env::set_var("FORUM_APP_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("FORUM_APP_TEST_BAD_PORT", 8080u16), 8080);

        std::env::set_var("FORUM_APP_TEST_GOOD_PORT", "9000");
        assert_eq!(env_or("FORUM_APP_TEST_GOOD_PORT", 8080u16), 9000);
    }
}
