use crate::helpers::spawn_app;

#[tokio::test]
async fn a_valid_request_returns_both_tokens() {
    let app = spawn_app().await;

    let response = app
        .get_with_query(
            "/api/rte",
            &[
                ("channelName", "room1"),
                ("role", "publisher"),
                ("tokentype", "uid"),
                ("uid", "1234"),
                ("expiry", "3600"),
            ],
        )
        .await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["rtcToken"].is_string());
    assert!(body["rtmToken"].is_string());
    assert_eq!(2, body.as_object().unwrap().len());
}

#[tokio::test]
async fn malformed_expiry_is_a_400() {
    let app = spawn_app().await;

    let response = app
        .get_with_query(
            "/api/rte",
            &[
                ("channelName", "room1"),
                ("tokentype", "uid"),
                ("uid", "1234"),
                ("expiry", "notanumber"),
            ],
        )
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn a_failed_media_credential_fails_the_whole_request() {
    let app = spawn_app().await;

    // Unknown tokentype dooms the media credential; no partial body with
    // only an rtmToken may come back.
    let response = app
        .get_with_query(
            "/api/rte",
            &[
                ("channelName", "room1"),
                ("tokentype", "bogus"),
                ("uid", "1234"),
                ("expiry", "3600"),
            ],
        )
        .await;

    assert_eq!(500, response.status().as_u16());
    let body = response.text().await.unwrap();
    assert!(!body.contains("rtmToken"));
}
