pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, derive_more::From)]
pub enum AuthError {
    #[from]
    Store(crate::store::StoreError),
    #[from]
    Join(tokio::task::JoinError),
}

//Error boilerplate
impl core::fmt::Display for AuthError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AuthError {}
