#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use warnlink::application::services::ShortUrlService;
use warnlink::infrastructure::persistence::SqliteShortUrlRepository;
use warnlink::routes::app_router;
use warnlink::state::{AppState, LinkSettings};

/// In-memory database; a single connection keeps every query on the same database.
pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub async fn create_test_repository() -> (Arc<SqliteShortUrlRepository>, SqlitePool) {
    let pool = create_test_pool().await;
    let repo = SqliteShortUrlRepository::new(Arc::new(pool.clone()));
    repo.init_schema().await.unwrap();
    (Arc::new(repo), pool)
}

pub fn create_test_state(repo: Arc<SqliteShortUrlRepository>, links: LinkSettings) -> AppState {
    AppState::new(Arc::new(ShortUrlService::new(repo)), links)
}

/// Full application router over a fresh database.
pub async fn create_test_app() -> (Router, SqlitePool) {
    create_test_app_with(LinkSettings::default()).await
}

pub async fn create_test_app_with(links: LinkSettings) -> (Router, SqlitePool) {
    let (repo, pool) = create_test_repository().await;
    (app_router(create_test_state(repo, links)), pool)
}

pub async fn create_test_server() -> (TestServer, SqlitePool) {
    let (app, pool) = create_test_app().await;
    (TestServer::new(app).unwrap(), pool)
}

pub async fn insert_url(
    pool: &SqlitePool,
    code: &str,
    url: &str,
    warning_type: Option<&str>,
    custom_warning: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO urls (short_code, original_url, warning_type, custom_warning, created_at, access_count)
         VALUES (?, ?, ?, ?, 1700000000, 0)",
    )
    .bind(code)
    .bind(url)
    .bind(warning_type)
    .bind(custom_warning)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn access_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM urls WHERE short_code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn original_url(pool: &SqlitePool, code: &str) -> String {
    sqlx::query_scalar("SELECT original_url FROM urls WHERE short_code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_urls(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}
