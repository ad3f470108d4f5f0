use super::{CommonError, Result, RoomRef, User, UserRef};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(body: Option<&str>) -> Result<Self> {
        match body.map(str::trim) {
            Some(body) if !body.is_empty() => Ok(Self(body.to_string())),
            _ => Err(CommonError::Required("message")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: i64,
    pub user: UserRef,
    pub room: RoomRef,
    pub body: String,
    pub updated: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

impl Message {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.user.id == user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_must_have_content() {
        assert_eq!(MessageBody::parse(Some(" hi ")).unwrap().as_str(), "hi");
        assert_eq!(
            MessageBody::parse(Some("  \n")),
            Err(CommonError::Required("message"))
        );
        assert_eq!(MessageBody::parse(None), Err(CommonError::Required("message")));
    }
}
