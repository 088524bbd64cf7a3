pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use config::Config;
pub use db::DbPool;

use handlers::{auth_handlers, message_handlers, user_handlers};

pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
}

/// Build the application router: thin routes delegating to the model layer.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/users", get(user_handlers::list_users))
        .route("/users/:username", get(user_handlers::get_user))
        .route("/users/:username/from", get(user_handlers::messages_from))
        .route("/users/:username/to", get(user_handlers::messages_to))
        .route("/messages", post(message_handlers::create_message))
        .route("/messages/:id", get(message_handlers::get_message))
        .route("/messages/:id/read", post(message_handlers::mark_read))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .expose_headers([axum::http::header::CONTENT_TYPE]),
        )
        .with_state(state)
}
