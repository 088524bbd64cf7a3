diesel::table! {
    users (username) {
        username -> Text,
        password -> Text,
        first_name -> Text,
        last_name -> Text,
        phone -> Text,
        join_at -> Timestamp,
        last_login_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    messages (id) {
        id -> Integer,
        from_username -> Text,
        to_username -> Text,
        body -> Text,
        sent_at -> Timestamp,
        read_at -> Nullable<Timestamp>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, messages);
