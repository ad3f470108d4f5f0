use super::{CommonError, Result, Topic, User, UserRef};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

const MAX_ROOM_NAME_LEN: usize = 200;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomName {
    room_name: String,
}

impl RoomName {
    pub fn parse(room_name: impl AsRef<str>) -> Result<Self> {
        let room_name = room_name.as_ref().trim();
        if room_name.is_empty() {
            return Err(CommonError::Required("room_name"));
        }
        if room_name.chars().count() > MAX_ROOM_NAME_LEN {
            return Err(CommonError::TooLong {
                field: "room_name",
                max: MAX_ROOM_NAME_LEN,
            });
        }
        Ok(Self {
            room_name: room_name.to_string(),
        })
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }
}

impl Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.room_name)
    }
}

impl PartialEq<&str> for RoomName {
    fn eq(&self, other: &&str) -> bool {
        self.room_name == *other
    }
}

/// A blank description is stored as no description.
pub fn parse_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: i64,
    pub host: Option<UserRef>,
    pub topic: Option<Topic>,
    pub name: String,
    pub description: Option<String>,
    pub updated: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

impl Room {
    pub fn is_hosted_by(&self, user: &User) -> bool {
        self.host.as_ref().is_some_and(|host| host.id == user.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRef {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_name_is_trimmed_and_required() {
        assert_eq!(RoomName::parse("  Rust  ").unwrap(), "Rust");
        assert_eq!(RoomName::parse(""), Err(CommonError::Required("room_name")));
        assert!(RoomName::parse("x".repeat(201)).is_err());
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(parse_description(Some("   ")), None);
        assert_eq!(parse_description(None), None);
        assert_eq!(
            parse_description(Some(" about ")),
            Some("about".to_string())
        );
    }

    #[test]
    fn host_check_compares_ids() {
        let now = Utc::now();
        let user = User {
            id: 7,
            username: "dana".into(),
            email: String::new(),
            date_joined: now,
        };
        let mut room = Room {
            id: 1,
            host: Some(UserRef::from(&user)),
            topic: None,
            name: "r".into(),
            description: None,
            updated: now,
            created: now,
        };
        assert!(room.is_hosted_by(&user));
        room.host = None;
        assert!(!room.is_hosted_by(&user));
    }
}
