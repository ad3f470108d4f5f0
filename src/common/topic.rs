use super::{CommonError, Result};

use serde::Serialize;
use std::fmt::Display;

const MAX_TOPIC_NAME_LEN: usize = 200;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopicName {
    topic_name: String,
}

impl TopicName {
    pub fn parse(topic_name: impl AsRef<str>) -> Result<Self> {
        let topic_name = topic_name.as_ref().trim();
        if topic_name.is_empty() {
            return Err(CommonError::Required("topic"));
        }
        if topic_name.chars().count() > MAX_TOPIC_NAME_LEN {
            return Err(CommonError::TooLong {
                field: "topic",
                max: MAX_TOPIC_NAME_LEN,
            });
        }
        Ok(Self {
            topic_name: topic_name.to_string(),
        })
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }
}

impl Display for TopicName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.topic_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

/// A topic annotated with how many rooms use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub id: i64,
    pub name: String,
    pub num_rooms: i64,
}
