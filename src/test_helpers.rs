use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};

use crate::{db, state::AppState};

/// App state over a fresh in-memory SQLite database with tables created.
/// A single pooled connection keeps every query on the same database.
pub async fn test_state() -> Arc<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("connect to in-memory sqlite");
    db::create_tables(&db).await.expect("create tables");
    AppState::new(db)
}
