use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::schema::messages;

diesel::sql_function! {
    fn last_insert_rowid() -> Integer;
}

/// A message between two users.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Message {
    pub id: i32,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = messages)]
struct NewMessage<'a> {
    from_username: &'a str,
    to_username: &'a str,
    body: &'a str,
    sent_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct NewMessageRequest {
    pub from_username: String,
    pub to_username: String,
    pub body: String,
}

impl Message {
    /// Store a new message and return the stored row.
    pub fn create(
        conn: &mut SqliteConnection,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<Message, AppError> {
        let new_message = NewMessage {
            from_username,
            to_username,
            body,
            sent_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(messages::table)
            .values(&new_message)
            .execute(conn)?;

        let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

        Self::get(conn, id)
    }

    /// Get a message by id.
    pub fn get(conn: &mut SqliteConnection, id: i32) -> Result<Message, AppError> {
        messages::table
            .find(id)
            .select(Message::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::not_found_message(id))
    }

    /// Mark a message as read and return the read timestamp.
    pub fn mark_read(conn: &mut SqliteConnection, id: i32) -> Result<NaiveDateTime, AppError> {
        let now = Utc::now().naive_utc();

        let updated = diesel::update(messages::table.find(id))
            .set(messages::read_at.eq(now))
            .execute(conn)?;

        if updated == 0 {
            return Err(AppError::not_found_message(id));
        }

        Ok(now)
    }
}
