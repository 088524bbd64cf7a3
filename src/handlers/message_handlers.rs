use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::{
    errors::AppError,
    models::{Message, NewMessageRequest},
    AppState,
};

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let conn = &mut state.pool.get()?;

    let message = Message::create(conn, &req.from_username, &req.to_username, &req.body)?;

    Ok(Json(message))
}

pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, AppError> {
    let conn = &mut state.pool.get()?;
    Ok(Json(Message::get(conn, id)?))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let conn = &mut state.pool.get()?;

    let read_at = Message::mark_read(conn, id)?;

    Ok(Json(json!({ "id": id, "read_at": read_at })))
}
