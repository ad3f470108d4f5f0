use crate::common::UserName;

use rusqlite::ErrorCode;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, derive_more::From)]
pub enum StoreError {
    #[from]
    Sqlite(rusqlite::Error),
    #[from]
    Join(tokio::task::JoinError),
    Poisoned,
    UsernameTaken(UserName),
}

impl StoreError {
    /// Maps a unique constraint violation on the users table to `UsernameTaken`.
    pub(crate) fn on_username(error: rusqlite::Error, username: &UserName) -> Self {
        match &error {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                StoreError::UsernameTaken(username.clone())
            }
            _ => StoreError::Sqlite(error),
        }
    }
}

//Error boilerplate
impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for StoreError {}
