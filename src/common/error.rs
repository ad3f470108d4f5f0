pub type Result<T> = std::result::Result<T, CommonError>;

/// Validation failures for user submitted values. The display text is what the
/// client gets back, so keep it readable.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommonError {
    #[display(fmt = "This field is required: {}", _0)]
    Required(&'static str),
    #[display(fmt = "{} must be at most {} characters", field, max)]
    TooLong { field: &'static str, max: usize },
    #[display(
        fmt = "Usernames may only contain letters, digits and @/./+/-/_ (found {:?})",
        _0
    )]
    InvalidUserNameChar(char),
    #[display(fmt = "Enter a valid email address")]
    InvalidEmail,
    #[display(fmt = "The two password fields didn't match")]
    PasswordMismatch,
    #[display(fmt = "This password is too short. It must contain at least {} characters", _0)]
    PasswordTooShort(usize),
    #[display(fmt = "This password is entirely numeric")]
    PasswordNumeric,
    #[display(fmt = "The password is too similar to the username")]
    PasswordTooSimilar,
}

impl std::error::Error for CommonError {}
