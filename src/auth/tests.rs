//! Tests for the auth module

use super::*;

fn authenticator() -> Authenticator {
    Authenticator::new(Credentials::new("app_123", "key_456"))
}

#[tokio::test]
async fn test_apply_without_session() {
    let auth = authenticator();
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api")).await;

    let built = req.build().unwrap();
    assert_eq!(built.headers().get(APPLICATION_ID_HEADER).unwrap(), "app_123");
    assert_eq!(built.headers().get(API_KEY_HEADER).unwrap(), "key_456");
    assert!(built.headers().get(TOKEN_HEADER).is_none());
}

#[tokio::test]
async fn test_apply_with_session() {
    let auth = authenticator();
    auth.set_token("tok_1").await;

    let client = reqwest::Client::new();
    let built = auth
        .apply(client.get("https://example.com/api"))
        .await
        .build()
        .unwrap();

    assert_eq!(built.headers().get(TOKEN_HEADER).unwrap(), "tok_1");
    assert_eq!(built.headers().get(APPLICATION_ID_HEADER).unwrap(), "app_123");
}

#[tokio::test]
async fn test_last_token_wins() {
    let auth = authenticator();
    auth.set_token("first").await;
    auth.set_token("second").await;
    assert_eq!(auth.token().await.as_deref(), Some("second"));
}

#[tokio::test]
async fn test_clones_share_session() {
    let auth = authenticator();
    let clone = auth.clone();
    clone.set_token("shared").await;
    assert_eq!(auth.token().await.as_deref(), Some("shared"));

    auth.clear().await;
    assert!(clone.token().await.is_none());
}

#[test]
fn test_debug_hides_api_key() {
    let debug = format!("{:?}", authenticator());
    assert!(debug.contains("app_123"));
    assert!(!debug.contains("key_456"));
}
