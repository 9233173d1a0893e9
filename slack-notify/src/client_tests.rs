//! Unit tests for SlackClient using wiremock.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::blocks::{Block, SlackMessage};
use crate::client::{SlackClient, SlackConfig};
use crate::errors::SlackError;

fn client_for(server: &MockServer) -> SlackClient {
    SlackClient::from_config(SlackConfig {
        bot_token: "xoxb-test".to_string(),
        signing_secret: "shhh".to_string(),
        channel_id: "C012345".to_string(),
        api_base: Some(server.uri()),
    })
    .unwrap()
}

#[tokio::test]
async fn post_message_sends_channel_text_and_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(header("authorization", "Bearer xoxb-test"))
        .respond_with(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            assert_eq!(body["channel"], "C012345");
            assert_eq!(body["text"], "🙏 리뷰 요청");
            assert_eq!(body["blocks"][0]["type"], "header");
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": true, "ts": "1700000000.000100" }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let message = SlackMessage {
        text: "🙏 리뷰 요청".to_string(),
        blocks: vec![Block::header("🙏 리뷰 요청"), Block::Divider],
    };
    let receipt = client_for(&server).post_message(&message).await.unwrap();
    assert_eq!(receipt.ts, "1700000000.000100");
}

#[tokio::test]
async fn not_ok_response_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": false,
            "error": "channel_not_found"
        })))
        .mount(&server)
        .await;

    let message = SlackMessage {
        text: "x".to_string(),
        blocks: vec![],
    };
    let err = client_for(&server).post_message(&message).await.unwrap_err();
    match err {
        SlackError::Api { method, error } => {
            assert_eq!(method, "chat.postMessage");
            assert_eq!(error, "channel_not_found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn auth_test_returns_bot_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "user_id": "U0BOT",
            "team": "acme"
        })))
        .mount(&server)
        .await;

    let info = client_for(&server).auth_test().await.unwrap();
    assert_eq!(info.user_id, "U0BOT");
    assert_eq!(info.team, "acme");
}

#[tokio::test]
async fn auth_test_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth.test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ok": false, "error": "invalid_auth" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).auth_test().await.unwrap_err();
    assert!(matches!(err, SlackError::Api { .. }));
}

#[test]
fn empty_token_is_rejected() {
    let err = SlackClient::from_config(SlackConfig {
        bot_token: "  ".to_string(),
        signing_secret: String::new(),
        channel_id: "C1".to_string(),
        api_base: None,
    })
    .unwrap_err();
    assert!(matches!(err, SlackError::Config(_)));
}
