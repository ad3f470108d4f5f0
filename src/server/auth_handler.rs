use super::extract::{expired_session_cookie, session_cookie, MaybeUser};
use super::views::AuthPage;
use super::{AppState, Result, ServerError};
use crate::auth::{hash_password, verify_password, SESSION_COOKIE};
use crate::common::{parse_email, validate_new_password, UserName};
use crate::store::users;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    username: String,
    email: Option<String>,
    password1: String,
    password2: String,
}

pub async fn login_page(MaybeUser(user): MaybeUser) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Json(AuthPage { page: "login" }).into_response()
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let username = UserName::parse(&form.username).map_err(|_| ServerError::UserNotFound)?;
    let credentials = {
        let username = username.clone();
        state
            .db
            .call(move |conn| users::find_credentials(conn, &username))
            .await?
    };
    let Some((user, password_hash)) = credentials else {
        warn!("Login attempt for unknown user {}", username);
        return Err(ServerError::UserNotFound);
    };

    if !verify_password(state.hasher, form.password, password_hash).await? {
        warn!("Incorrect password for {}", username);
        return Err(ServerError::InvalidCredentials);
    }

    let token = state.sessions.start(&user).await?;
    info!("{} logged in", username);
    Ok((jar.add(session_cookie(token)), Redirect::to("/")).into_response())
}

pub async fn register_page() -> Json<AuthPage> {
    Json(AuthPage { page: "register" })
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect)> {
    let username = UserName::parse(&form.username)?;
    let email = parse_email(form.email.as_deref())?;
    validate_new_password(&username, &form.password1, &form.password2)?;

    let password_hash = hash_password(state.hasher, form.password1).await?;
    let user = state
        .db
        .call(move |conn| users::create_user(conn, &username, &email, &password_hash))
        .await?;
    info!("Registered {}", user.username);

    let token = state.sessions.start(&user).await?;
    Ok((jar.add(session_cookie(token)), Redirect::to("/")))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.end(cookie.value()).await?;
    }
    Ok((jar.remove(expired_session_cookie()), Redirect::to("/")))
}
