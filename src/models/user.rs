use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::BCRYPT_WORK_FACTOR;
use crate::errors::AppError;
use crate::schema::{messages, users};

/// A registered user of the site.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUser {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: String,
    join_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Basic info on a user, as returned by listings.
#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// A message row scoped to its sender.
#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SentMessage {
    pub id: i32,
    pub to_username: String,
    pub body: String,
    pub sent_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

/// A message row scoped to its recipient.
#[derive(Debug, Queryable, Selectable, Serialize)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReceivedMessage {
    pub id: i32,
    pub from_username: String,
    pub body: String,
    pub sent_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

impl User {
    /// Register a new user and return the stored record. The password is
    /// stored as a bcrypt hash, never as plaintext.
    pub fn register(conn: &mut SqliteConnection, input: RegisterRequest) -> Result<User, AppError> {
        let password_hash = bcrypt::hash(&input.password, BCRYPT_WORK_FACTOR)?;

        let new_user = NewUser {
            username: input.username,
            password: password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            join_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(users::table)
            .values(&new_user)
            .execute(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => AppError::UsernameTaken,
                e => e.into(),
            })?;

        Self::get(conn, &new_user.username)
    }

    /// Is this username/password combination valid?
    pub fn authenticate(
        conn: &mut SqliteConnection,
        username: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        let stored_hash: Option<String> = users::table
            .find(username)
            .select(users::password)
            .first(conn)
            .optional()?;

        match stored_hash {
            Some(hash) => Ok(bcrypt::verify(password, &hash)?),
            None => Ok(false),
        }
    }

    /// Set `last_login_at` to now and return the new timestamp.
    pub fn update_login_timestamp(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<NaiveDateTime, AppError> {
        let now = Utc::now().naive_utc();

        let updated = diesel::update(users::table.find(username))
            .set(users::last_login_at.eq(now))
            .execute(conn)?;

        if updated == 0 {
            return Err(AppError::not_found_user(username));
        }

        Ok(now)
    }

    /// Basic info on all users.
    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<UserSummary>, AppError> {
        let users_list = users::table
            .select(UserSummary::as_select())
            .order(users::username.asc())
            .load(conn)?;

        Ok(users_list)
    }

    /// Get a user by username.
    pub fn get(conn: &mut SqliteConnection, username: &str) -> Result<User, AppError> {
        users::table
            .find(username)
            .select(User::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| AppError::not_found_user(username))
    }

    /// Messages sent by this user.
    pub fn messages_from(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Vec<SentMessage>, AppError> {
        let rows = messages::table
            .filter(messages::from_username.eq(username))
            .select(SentMessage::as_select())
            .order(messages::id.asc())
            .load(conn)?;

        Ok(rows)
    }

    /// Messages sent to this user.
    pub fn messages_to(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Vec<ReceivedMessage>, AppError> {
        let rows = messages::table
            .filter(messages::to_username.eq(username))
            .select(ReceivedMessage::as_select())
            .order(messages::id.asc())
            .load(conn)?;

        Ok(rows)
    }
}
