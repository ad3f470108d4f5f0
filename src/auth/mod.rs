mod error;
mod password;
mod session;

pub use error::AuthError;
use error::Result;
pub use password::{PasswordHasher, DEFAULT_ITERATIONS};
pub use session::{Sessions, DEFAULT_SESSION_TTL_SECS, SESSION_COOKIE};

/// Hashes on the blocking pool; PBKDF2 at production iteration counts takes a while.
pub async fn hash_password(hasher: PasswordHasher, password: String) -> Result<String> {
    Ok(tokio::task::spawn_blocking(move || hasher.hash(&password)).await?)
}

pub async fn verify_password(
    hasher: PasswordHasher,
    password: String,
    encoded: String,
) -> Result<bool> {
    Ok(tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded)).await?)
}
