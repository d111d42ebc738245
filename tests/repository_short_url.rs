mod common;

use warnlink::domain::entities::{NewShortUrl, WarningType};
use warnlink::domain::repositories::ShortUrlRepository;
use warnlink::error::AppError;

fn new_url(code: &str, warning_type: Option<WarningType>) -> NewShortUrl {
    NewShortUrl {
        short_code: code.to_string(),
        original_url: "https://example.com".to_string(),
        warning_type,
        custom_warning: None,
        created_at: 1_700_000_000,
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let (repo, _pool) = common::create_test_repository().await;

    let inserted = repo.insert(new_url("abc", Some(WarningType::Nsfw))).await.unwrap();
    assert_eq!(inserted.access_count, 0);

    let found = repo.find_by_code("abc").await.unwrap().unwrap();
    assert_eq!(found.short_code, "abc");
    assert_eq!(found.original_url, "https://example.com");
    assert_eq!(found.warning_type, Some(WarningType::Nsfw));
    assert_eq!(found.created_at, 1_700_000_000);
    assert_eq!(found.access_count, 0);
}

#[tokio::test]
async fn test_find_missing() {
    let (repo, _pool) = common::create_test_repository().await;

    assert!(repo.find_by_code("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_is_conflict() {
    let (repo, pool) = common::create_test_repository().await;

    repo.insert(new_url("dup", None)).await.unwrap();
    let result = repo.insert(new_url("dup", Some(WarningType::Trigger))).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(common::count_urls(&pool).await, 1);
}

#[tokio::test]
async fn test_increment_access_count() {
    let (repo, pool) = common::create_test_repository().await;
    repo.insert(new_url("hit", None)).await.unwrap();

    assert!(repo.increment_access_count("hit").await.unwrap());
    assert!(repo.increment_access_count("hit").await.unwrap());
    assert_eq!(common::access_count(&pool, "hit").await, 2);

    assert!(!repo.increment_access_count("miss").await.unwrap());
}

#[tokio::test]
async fn test_increment_null_counter() {
    let (repo, pool) = common::create_test_repository().await;
    sqlx::query(
        "INSERT INTO urls (short_code, original_url, created_at, access_count)
         VALUES ('legacy', 'https://example.com', 1, NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();

    assert_eq!(repo.find_by_code("legacy").await.unwrap().unwrap().access_count, 0);

    repo.increment_access_count("legacy").await.unwrap();
    assert_eq!(common::access_count(&pool, "legacy").await, 1);
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let (repo, pool) = common::create_test_repository().await;
    repo.insert(new_url("keep", None)).await.unwrap();

    repo.init_schema().await.unwrap();

    assert_eq!(common::count_urls(&pool).await, 1);
}

#[tokio::test]
async fn test_summary() {
    let (repo, _pool) = common::create_test_repository().await;

    let empty = repo.summary().await.unwrap();
    assert_eq!(empty.total_urls, 0);
    assert_eq!(empty.total_accesses, 0);

    repo.insert(new_url("a", None)).await.unwrap();
    repo.insert(new_url("b", None)).await.unwrap();
    repo.increment_access_count("a").await.unwrap();
    repo.increment_access_count("a").await.unwrap();
    repo.increment_access_count("b").await.unwrap();

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.total_urls, 2);
    assert_eq!(summary.total_accesses, 3);
}

#[tokio::test]
async fn test_ping() {
    let (repo, _pool) = common::create_test_repository().await;

    assert!(repo.ping().await.is_ok());

    repo.close().await;
    assert!(matches!(repo.ping().await, Err(AppError::Internal { .. })));
}

#[tokio::test]
async fn test_unknown_stored_warning_type_is_kept() {
    let (repo, pool) = common::create_test_repository().await;
    common::insert_url(&pool, "legacy", "https://example.com", Some("NSFW"), None).await;

    let found = repo.find_by_code("legacy").await.unwrap().unwrap();

    assert_eq!(found.warning_type, Some(WarningType::Other("NSFW".to_string())));
    assert!(found.has_warning());
}

#[tokio::test]
async fn test_empty_stored_warning_type_is_absent() {
    let (repo, pool) = common::create_test_repository().await;
    common::insert_url(&pool, "blank", "https://example.com", Some(""), None).await;

    let found = repo.find_by_code("blank").await.unwrap().unwrap();

    assert_eq!(found.warning_type, None);
    assert!(!found.has_warning());
}
