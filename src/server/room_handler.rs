use super::extract::CurrentUser;
use super::views::{DeletePage, RoomFormPage, RoomPage};
use super::{AppState, Result, ServerError};
use crate::common::{
    parse_description, CommonError, MessageBody, Room, RoomName, TopicName, User,
};
use crate::store::{messages, rooms, topics};

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoomForm {
    topic: Option<String>,
    room_name: Option<String>,
    room_about: Option<String>,
}

struct ValidRoom {
    topic: TopicName,
    name: RoomName,
    description: Option<String>,
}

impl RoomForm {
    fn validate(self) -> std::result::Result<ValidRoom, CommonError> {
        Ok(ValidRoom {
            topic: TopicName::parse(self.topic.unwrap_or_default())?,
            name: RoomName::parse(self.room_name.unwrap_or_default())?,
            description: parse_description(self.room_about.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageForm {
    message: Option<String>,
}

/// Loads room `id` and checks that `user` hosts it.
async fn hosted_room(state: &AppState, id: i64, user: &User) -> Result<Room> {
    let room = state
        .db
        .call(move |conn| rooms::get_room(conn, id))
        .await?
        .ok_or(ServerError::NotFound("Room"))?;
    if !room.is_hosted_by(user) {
        warn!("{} tried to modify room {} they do not host", user.username, id);
        return Err(ServerError::NotAllowed);
    }
    Ok(room)
}

pub async fn room(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<RoomPage>> {
    let page = state
        .db
        .call(move |conn| {
            let Some(room) = rooms::get_room(conn, id)? else {
                return Ok(None);
            };
            Ok(Some(RoomPage {
                room_messages: messages::room_messages(conn, id)?,
                participants: rooms::participants(conn, id)?,
                room,
            }))
        })
        .await?;
    page.map(Json).ok_or(ServerError::NotFound("Room"))
}

/// Posts a message and makes the author a participant of the room.
#[instrument(skip_all)]
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<MessageForm>,
) -> Result<Redirect> {
    let body = MessageBody::parse(form.message.as_deref())?;
    let user_id = user.id;

    let posted = state
        .db
        .call(move |conn| {
            let tx = conn.transaction()?;
            if rooms::get_room(&tx, id)?.is_none() {
                return Ok(None);
            }
            let message = messages::create_message(&tx, user_id, id, &body)?;
            rooms::add_participant(&tx, id, user_id)?;
            tx.commit()?;
            Ok(Some(message))
        })
        .await?
        .ok_or(ServerError::NotFound("Room"))?;

    info!("{} posted message {}", user.username, posted.id);
    Ok(Redirect::to(&format!("/room/{}", id)))
}

pub async fn create_room_page(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Result<Json<RoomFormPage>> {
    let topics = state.db.call(|conn| topics::list_topics(conn)).await?;
    Ok(Json(RoomFormPage {
        topics,
        room: None,
        update: false,
    }))
}

#[instrument(skip_all)]
pub async fn create_room(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<RoomForm>,
) -> Result<Redirect> {
    let ValidRoom {
        topic,
        name,
        description,
    } = form.validate()?;
    let host_id = user.id;

    let room = state
        .db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let topic = topics::get_or_create_topic(&tx, &topic)?;
            let room = rooms::create_room(&tx, host_id, &topic, &name, description.as_deref())?;
            tx.commit()?;
            Ok(room)
        })
        .await?;

    info!("{} created room {} ({})", user.username, room.id, room.name);
    Ok(Redirect::to(&format!("/room/{}", room.id)))
}

pub async fn update_room_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<RoomFormPage>> {
    let room = hosted_room(&state, id, &user).await?;
    let topics = state.db.call(|conn| topics::list_topics(conn)).await?;
    Ok(Json(RoomFormPage {
        topics,
        room: Some(room),
        update: true,
    }))
}

#[instrument(skip_all)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<RoomForm>,
) -> Result<Redirect> {
    hosted_room(&state, id, &user).await?;
    let ValidRoom {
        topic,
        name,
        description,
    } = form.validate()?;

    state
        .db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let topic = topics::get_or_create_topic(&tx, &topic)?;
            let room = rooms::update_room(&tx, id, &topic, &name, description.as_deref())?;
            tx.commit()?;
            Ok(room)
        })
        .await?
        .ok_or(ServerError::NotFound("Room"))?;

    info!("{} updated room {}", user.username, id);
    Ok(Redirect::to(&format!("/room/{}", id)))
}

pub async fn delete_room_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DeletePage<Room>>> {
    let room = hosted_room(&state, id, &user).await?;
    Ok(Json(DeletePage { object: room }))
}

#[instrument(skip_all)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<Redirect> {
    hosted_room(&state, id, &user).await?;
    state
        .db
        .call(move |conn| rooms::delete_room(conn, id))
        .await?;
    info!("{} deleted room {}", user.username, id);
    Ok(Redirect::to("/"))
}
