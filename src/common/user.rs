use super::{CommonError, Result};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Debug, Display, Formatter};

const MAX_USERNAME_LEN: usize = 150;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PASSWORD_LEN: usize = 8;

/// A validated, lower-cased username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName {
    username: String,
}

impl UserName {
    pub fn parse(username: impl AsRef<str>) -> Result<Self> {
        let username = username.as_ref().trim().to_lowercase();
        if username.is_empty() {
            return Err(CommonError::Required("username"));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CommonError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }
        if let Some(c) = username
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
        {
            return Err(CommonError::InvalidUserNameChar(c));
        }
        Ok(Self { username })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

impl PartialEq<&str> for UserName {
    fn eq(&self, other: &&str) -> bool {
        self.username == *other
    }
}

impl PartialEq<String> for UserName {
    fn eq(&self, other: &String) -> bool {
        self.username == *other
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.username
    }
}

/// Optional email; an empty submission is kept as an empty string.
pub fn parse_email(email: Option<&str>) -> Result<String> {
    let email = email.unwrap_or_default().trim();
    if email.is_empty() {
        return Ok(String::new());
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(CommonError::TooLong {
            field: "email",
            max: MAX_EMAIL_LEN,
        });
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace) =>
        {
            Ok(email.to_string())
        }
        _ => Err(CommonError::InvalidEmail),
    }
}

/// Checks a new password pair against the registration rules.
pub fn validate_new_password(username: &UserName, password1: &str, password2: &str) -> Result<()> {
    if password1.is_empty() {
        return Err(CommonError::Required("password1"));
    }
    if password1 != password2 {
        return Err(CommonError::PasswordMismatch);
    }
    if password1.chars().count() < MIN_PASSWORD_LEN {
        return Err(CommonError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    if password1.chars().all(|c| c.is_ascii_digit()) {
        return Err(CommonError::PasswordNumeric);
    }
    let lowered = password1.to_lowercase();
    if lowered.contains(username.username()) || username.username().contains(&lowered) {
        return Err(CommonError::PasswordTooSimilar);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

/// The slice of a user other records embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
