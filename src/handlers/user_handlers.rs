use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    errors::AppError,
    models::{ReceivedMessage, SentMessage, User, UserSummary},
    AppState,
};

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let conn = &mut state.pool.get()?;
    Ok(Json(User::all(conn)?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<User>, AppError> {
    let conn = &mut state.pool.get()?;
    Ok(Json(User::get(conn, &username)?))
}

pub async fn messages_from(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<SentMessage>>, AppError> {
    let conn = &mut state.pool.get()?;
    Ok(Json(User::messages_from(conn, &username)?))
}

pub async fn messages_to(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<ReceivedMessage>>, AppError> {
    let conn = &mut state.pool.get()?;
    Ok(Json(User::messages_to(conn, &username)?))
}
