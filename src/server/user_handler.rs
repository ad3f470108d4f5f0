use super::extract::CurrentUser;
use super::views::{ProfilePage, UserFormPage};
use super::{AppState, Result, ServerError};
use crate::common::{parse_email, UserName};
use crate::store::{messages, rooms, topics, users};

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    username: String,
    email: Option<String>,
}

pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProfilePage>> {
    let page = state
        .db
        .call(move |conn| {
            let Some(user) = users::get_user(conn, id)? else {
                return Ok(None);
            };
            Ok(Some(ProfilePage {
                rooms: rooms::rooms_hosted_by(conn, id)?,
                topics: topics::topic_summaries(conn, None, None)?,
                room_messages: messages::messages_by_user(conn, id)?,
                user,
            }))
        })
        .await?;
    page.map(Json).ok_or(ServerError::NotFound("User"))
}

pub async fn update_user_page(CurrentUser(user): CurrentUser) -> Json<UserFormPage> {
    Json(UserFormPage { user })
}

#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<UserForm>,
) -> Result<Redirect> {
    let username = UserName::parse(&form.username)?;
    let email = parse_email(form.email.as_deref())?;
    let id = user.id;

    let updated = state
        .db
        .call(move |conn| users::update_user(conn, id, &username, &email))
        .await?
        .ok_or(ServerError::NotFound("User"))?;

    info!("{} updated their profile (now {})", user.username, updated.username);
    Ok(Redirect::to(&format!("/profile/{}", id)))
}
