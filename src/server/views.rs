//! JSON page contexts returned by the GET handlers.
use crate::common::{Message, Room, Topic, TopicSummary, User, UserRef};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub rooms: Vec<Room>,
    pub topics: Vec<TopicSummary>,
    pub total_rooms: i64,
    pub room_count: usize,
    pub room_messages: Vec<Message>,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub page: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: User,
    pub rooms: Vec<Room>,
    pub topics: Vec<TopicSummary>,
    pub room_messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct RoomPage {
    pub room: Room,
    pub room_messages: Vec<Message>,
    pub participants: Vec<UserRef>,
}

#[derive(Debug, Serialize)]
pub struct RoomFormPage {
    pub topics: Vec<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    pub update: bool,
}

/// Confirmation page shown before deleting `object`.
#[derive(Debug, Serialize)]
pub struct DeletePage<T> {
    pub object: T,
}

#[derive(Debug, Serialize)]
pub struct UserFormPage {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct TopicsPage {
    pub topics: Vec<TopicSummary>,
    pub total_rooms: i64,
}

#[derive(Debug, Serialize)]
pub struct ActivityPage {
    pub room_messages: Vec<Message>,
}
