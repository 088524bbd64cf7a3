use std::env;

/// Bcrypt work factor for password hashing.
pub const BCRYPT_WORK_FACTOR: u32 = 12;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment. `JWT_SECRET_KEY` is
    /// required; everything else has a default.
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "messagely.db".to_string());
        let jwt_secret =
            env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set in environment");
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Config {
            database_url,
            jwt_secret,
            port,
        }
    }
}
