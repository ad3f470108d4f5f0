use super::extract::CurrentUser;
use super::views::DeletePage;
use super::{AppState, Result, ServerError};
use crate::common::{Message, User};
use crate::store::messages;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use tracing::{info, warn};

async fn authored_message(state: &AppState, id: i64, user: &User) -> Result<Message> {
    let message = state
        .db
        .call(move |conn| messages::get_message(conn, id))
        .await?
        .ok_or(ServerError::NotFound("Message"))?;
    if !message.is_authored_by(user) {
        warn!("{} tried to delete message {} by {}", user.username, id, message.user.username);
        return Err(ServerError::NotAllowed);
    }
    Ok(message)
}

pub async fn delete_message_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DeletePage<Message>>> {
    let message = authored_message(&state, id, &user).await?;
    Ok(Json(DeletePage { object: message }))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> Result<Redirect> {
    authored_message(&state, id, &user).await?;
    state
        .db
        .call(move |conn| messages::delete_message(conn, id))
        .await?;
    info!("{} deleted message {}", user.username, id);
    Ok(Redirect::to("/"))
}
