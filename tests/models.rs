use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use messagely::db;
use messagely::errors::AppError;
use messagely::models::{Message, RegisterRequest, User};

fn test_conn() -> SqliteConnection {
    let mut conn =
        SqliteConnection::establish(":memory:").expect("Failed to open in-memory database");
    db::run_migrations(&mut conn);
    conn
}

fn register(conn: &mut SqliteConnection, username: &str, password: &str) -> User {
    User::register(
        conn,
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: "+14155550000".to_string(),
        },
    )
    .expect("Failed to register user")
}

#[test]
fn register_stores_hash_and_join_timestamp() {
    let mut conn = test_conn();

    let user = register(&mut conn, "whiskey", "secret");

    assert_eq!(user.username, "whiskey");
    assert_ne!(user.password, "secret");
    assert!(user.password.starts_with("$2"), "expected a bcrypt hash");
    assert!(user.last_login_at.is_none());
}

#[test]
fn register_rejects_duplicate_username() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");

    let result = User::register(
        &mut conn,
        RegisterRequest {
            username: "whiskey".to_string(),
            password: "other".to_string(),
            first_name: "Other".to_string(),
            last_name: "User".to_string(),
            phone: "+14155550001".to_string(),
        },
    );

    assert!(matches!(result, Err(AppError::UsernameTaken)));
}

#[test]
fn authenticate_accepts_correct_password_only() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");

    assert!(User::authenticate(&mut conn, "whiskey", "secret").unwrap());
    assert!(!User::authenticate(&mut conn, "whiskey", "wrong").unwrap());
    assert!(!User::authenticate(&mut conn, "whiskey", "").unwrap());
}

#[test]
fn authenticate_unknown_username_is_false_not_error() {
    let mut conn = test_conn();

    assert!(!User::authenticate(&mut conn, "nobody", "secret").unwrap());
}

#[test]
fn get_missing_user_is_not_found() {
    let mut conn = test_conn();

    let result = User::get(&mut conn, "nobody");

    match result {
        Err(err @ AppError::NotFound(_)) => {
            assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
            assert_eq!(err.to_string(), "User not found: nobody");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn update_login_timestamp_sets_and_returns_it() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");

    let ts = User::update_login_timestamp(&mut conn, "whiskey").unwrap();

    let user = User::get(&mut conn, "whiskey").unwrap();
    assert_eq!(user.last_login_at, Some(ts));
}

#[test]
fn update_login_timestamp_missing_user_is_not_found() {
    let mut conn = test_conn();

    let result = User::update_login_timestamp(&mut conn, "nobody");

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn all_lists_basic_fields_for_every_user() {
    let mut conn = test_conn();
    register(&mut conn, "bulldog", "secret");
    register(&mut conn, "whiskey", "secret");

    let users = User::all(&mut conn).unwrap();

    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["bulldog", "whiskey"]);
    assert_eq!(users[0].first_name, "Test");
}

#[test]
fn messages_from_returns_exactly_the_sent_rows() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");
    register(&mut conn, "bulldog", "secret");

    let m1 = Message::create(&mut conn, "whiskey", "bulldog", "hello bulldog").unwrap();
    let m2 = Message::create(&mut conn, "bulldog", "whiskey", "hello whiskey").unwrap();

    let sent = User::messages_from(&mut conn, "whiskey").unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, m1.id);
    assert_eq!(sent[0].to_username, "bulldog");
    assert_eq!(sent[0].body, "hello bulldog");
    assert!(sent[0].read_at.is_none());

    let received = User::messages_to(&mut conn, "whiskey").unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, m2.id);
    assert_eq!(received[0].from_username, "bulldog");

    assert!(User::messages_from(&mut conn, "bulldog")
        .unwrap()
        .iter()
        .all(|m| m.id == m2.id));
}

#[test]
fn messages_for_user_with_none_are_empty() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");

    assert!(User::messages_from(&mut conn, "whiskey").unwrap().is_empty());
    assert!(User::messages_to(&mut conn, "whiskey").unwrap().is_empty());
}

#[test]
fn create_message_assigns_ids_in_order() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");
    register(&mut conn, "bulldog", "secret");

    let m1 = Message::create(&mut conn, "whiskey", "bulldog", "first").unwrap();
    let m2 = Message::create(&mut conn, "whiskey", "bulldog", "second").unwrap();

    assert!(m2.id > m1.id);
    assert_eq!(m1.from_username, "whiskey");
    assert_eq!(m1.to_username, "bulldog");
    assert_eq!(m2.body, "second");
}

#[test]
fn mark_read_sets_read_timestamp() {
    let mut conn = test_conn();
    register(&mut conn, "whiskey", "secret");
    register(&mut conn, "bulldog", "secret");

    let message = Message::create(&mut conn, "whiskey", "bulldog", "hello").unwrap();
    assert!(message.read_at.is_none());

    let read_at = Message::mark_read(&mut conn, message.id).unwrap();

    let fetched = Message::get(&mut conn, message.id).unwrap();
    assert_eq!(fetched.read_at, Some(read_at));
}

#[test]
fn missing_message_is_not_found() {
    let mut conn = test_conn();

    assert!(matches!(
        Message::get(&mut conn, 999),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        Message::mark_read(&mut conn, 999),
        Err(AppError::NotFound(_))
    ));
}
