mod common;

#[tokio::test]
async fn test_lookup_returns_record_without_counting() {
    let (server, pool) = common::create_test_server().await;
    common::insert_url(&pool, "look", "https://example.com", Some("trigger"), None).await;

    // One real visit first.
    server.get("/look").await;

    let response = server.get("/api/urls/look").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortCode"], "look");
    assert_eq!(json["originalUrl"], "https://example.com");
    assert_eq!(json["warningType"], "trigger");
    assert_eq!(json["createdAt"], 1_700_000_000);
    assert_eq!(json["accessCount"], 1);

    assert_eq!(common::access_count(&pool, "look").await, 1);
}

#[tokio::test]
async fn test_lookup_not_found() {
    let (server, _pool) = common::create_test_server().await;

    let response = server.get("/api/urls/nothing").await;

    response.assert_status_not_found();
}
