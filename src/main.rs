use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::Level;

use messagely::{app, db, AppState, Config};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env();

    // Set up database connection pool
    let pool = db::build_pool(&config.database_url);
    {
        let conn = &mut pool.get().expect("Failed to get DB connection");
        db::run_migrations(conn);
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Listening on {}", addr);

    let router = app(Arc::new(AppState { pool, config }));

    // Start server
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .unwrap();
}
