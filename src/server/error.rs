use crate::auth::AuthError;
use crate::common::CommonError;
use crate::store::StoreError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, derive_more::From)]
pub enum ServerError {
    #[from]
    Io(std::io::Error),
    #[from]
    Store(StoreError),
    #[from]
    Auth(AuthError),
    #[from]
    Invalid(CommonError),
    NotFound(&'static str),
    NotAllowed,
    UserNotFound,
    InvalidCredentials,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Invalid(e) => {
                warn!("Invalid submission: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid submission!", "detail": e.to_string() }),
                )
            }
            ServerError::Store(StoreError::UsernameTaken(name)) => {
                warn!("Username already taken: {}", name);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Invalid submission!",
                        "detail": "A user with that username already exists."
                    }),
                )
            }
            ServerError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} not found", what) }),
            ),
            ServerError::NotAllowed => (
                StatusCode::FORBIDDEN,
                json!({ "error": "You are not allowed here!" }),
            ),
            ServerError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "User not found!" }),
            ),
            ServerError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Incorrect Username or Password !" }),
            ),
            ServerError::Io(_) | ServerError::Store(_) | ServerError::Auth(_) => {
                error!("Error handling request: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

//Error boilerplate
impl core::fmt::Display for ServerError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ServerError {}
