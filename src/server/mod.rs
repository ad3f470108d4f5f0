mod auth_handler;
mod browse_handler;
mod error;
mod extract;
mod message_handler;
mod room_handler;
mod user_handler;
pub mod views;

pub use error::{Result, ServerError};
pub use extract::{CurrentUser, MaybeUser};

use crate::auth::{PasswordHasher, Sessions};
use crate::config::Config;
use crate::store::Database;

use axum::routing::get;
use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info};

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: Sessions,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            sessions: Sessions::new(db.clone(), config.session_ttl),
            hasher: PasswordHasher::new(config.password_iterations),
            db,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Server {
    state: AppState,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(browse_handler::home))
            .route("/topics", get(browse_handler::topics_page))
            .route("/activity", get(browse_handler::activity))
            .route(
                "/login",
                get(auth_handler::login_page).post(auth_handler::login),
            )
            .route(
                "/register",
                get(auth_handler::register_page).post(auth_handler::register),
            )
            .route(
                "/logout",
                get(auth_handler::logout).post(auth_handler::logout),
            )
            .route("/profile/:id", get(user_handler::profile))
            .route(
                "/update-user",
                get(user_handler::update_user_page).post(user_handler::update_user),
            )
            .route(
                "/room/:id",
                get(room_handler::room).post(room_handler::post_message),
            )
            .route(
                "/create-room",
                get(room_handler::create_room_page).post(room_handler::create_room),
            )
            .route(
                "/update-room/:id",
                get(room_handler::update_room_page).post(room_handler::update_room),
            )
            .route(
                "/delete-room/:id",
                get(room_handler::delete_room_page).post(room_handler::delete_room),
            )
            .route(
                "/delete-message/:id",
                get(message_handler::delete_message_page).post(message_handler::delete_message),
            )
            .with_state(self.state.clone())
    }

    pub async fn run(self, addr: impl ToSocketAddrs) -> Result<()> {
        info!("Server started");
        if let Err(e) = self.state.sessions.purge_expired().await {
            error!("Unable to purge expired sessions: {}", e);
        }

        let listener = TcpListener::bind(addr).await?;
        info!("Listening on: {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
