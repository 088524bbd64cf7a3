use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth,
    errors::AppError,
    models::{RegisterRequest, User},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let conn = &mut state.pool.get()?;

    let user = User::register(conn, req)?;
    let token = auth::create_token(&user.username, &state.config.jwt_secret)?;

    tracing::info!(username = %user.username, "registered new user");

    Ok(Json(json!({ "token": token })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let conn = &mut state.pool.get()?;

    if !User::authenticate(conn, &req.username, &req.password)? {
        return Err(AppError::InvalidCredentials);
    }

    User::update_login_timestamp(conn, &req.username)?;
    let token = auth::create_token(&req.username, &state.config.jwt_secret)?;

    Ok(Json(json!({ "token": token })))
}
