use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ai_review::anthropic::AnthropicClient;
use ai_review::{AiEngineConfig, AiReviewOrchestrator};
use gitlab_api::{GitLabClient, GitLabConfig};
use slack_notify::{SlackClient, SlackConfig};

use crate::dispatch::{DispatchOutcome, WebhookDispatcher};
use crate::errors::FlowError;
use crate::mention::MentionTable;
use crate::notification::NotificationBuilder;
use crate::triggers::TriggerKind;
use crate::types::{MERGE_REQUEST_HOOK_EVENT, NOTE_HOOK_EVENT, NoteHook};

const SECRET: &str = "hook-secret";

fn dispatcher(gitlab: &MockServer, slack: &MockServer, ai: &MockServer) -> WebhookDispatcher {
    let gitlab_client = GitLabClient::from_config(GitLabConfig {
        base_api: gitlab.uri(),
        token: "glpat-test".into(),
        proxy_url: None,
    })
    .unwrap();

    let slack_client = SlackClient::from_config(SlackConfig {
        bot_token: "xoxb-test".into(),
        signing_secret: "sig".into(),
        channel_id: "C123".into(),
        api_base: Some(slack.uri()),
    })
    .unwrap();

    let engine = AnthropicClient::new(AiEngineConfig {
        api_key: "sk-test".into(),
        model: "claude-3-5-sonnet-20241022".into(),
        endpoint: ai.uri(),
        max_input_tokens: 100_000,
        max_output_tokens: 4_000,
        timeout_secs: Some(5),
    })
    .unwrap();

    let mentions = MentionTable::parse_spec("17:jelee,28:dohkim", "ds.jeon").unwrap();
    let reviewer = AiReviewOrchestrator::new(gitlab_client.clone(), engine);

    WebhookDispatcher::new(SECRET, gitlab_client, slack_client, mentions, reviewer)
}

fn note_payload(note: &str) -> Value {
    json!({
        "user": { "id": 28, "name": "Dohyun Kim", "username": "dohkim" },
        "project": { "id": 42, "name": "app", "path_with_namespace": "team/app" },
        "object_attributes": {
            "note": note,
            "noteable_type": "MergeRequest",
            "url": "https://gitlab.example/mr/5#note_1"
        },
        "merge_request": {
            "iid": 5,
            "title": "Add login",
            "url": "https://gitlab.example/mr/5",
            "author_id": 17,
            "author": { "name": "Jaeeun Lee" },
            "source_branch": "feat/login",
            "target_branch": "main",
            "state": "opened"
        }
    })
}

fn merge_payload(action: &str) -> Value {
    json!({
        "user": { "id": 28, "name": "Dohyun Kim", "username": "dohkim" },
        "project": { "id": 42, "name": "app", "path_with_namespace": "team/app" },
        "object_attributes": {
            "iid": 9,
            "title": "Ship it",
            "url": "https://gitlab.example/mr/9",
            "source_branch": "feat",
            "target_branch": "main",
            "description": "adds things",
            "action": action
        },
        "reviewers": [ { "id": 17, "name": "Jaeeun Lee" } ]
    })
}

async fn mock_slack_ok(slack: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "ts": "1724500000.000100"
        })))
        .expect(expected_calls)
        .mount(slack)
        .await;
}

#[tokio::test]
async fn review_request_note_posts_one_slack_message_and_no_ai_call() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ai)
        .await;

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(
            Some(SECRET),
            NOTE_HOOK_EVENT,
            note_payload("[리뷰 요청] please check"),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::NotificationSent {
            kind: TriggerKind::Request
        }
    );
}

#[tokio::test]
async fn ai_trigger_posts_gitlab_note_and_no_slack_message() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/42/merge_requests/5/changes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Add login",
            "description": "adds a login form",
            "author": { "username": "jelee" },
            "changes": [{
                "old_path": "src/login.rs",
                "new_path": "src/login.rs",
                "new_file": false,
                "deleted_file": false,
                "renamed_file": false,
                "diff": "@@ -1 +1 @@\n-old\n+new"
            }]
        })))
        .expect(1)
        .mount(&gitlab)
        .await;

    let model_text = concat!(
        "검토 결과입니다.\n",
        r#"{"summary":"전반적으로 좋습니다","suggestions":["에러 처리 보강"],"#,
        r#""highlights":["명확한 구조"],"risks":[]}"#,
    );
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [ { "type": "text", "text": model_text } ]
        })))
        .expect(1)
        .mount(&ai)
        .await;

    Mock::given(method("POST"))
        .and(path("/projects/42/merge_requests/5/notes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1001,
            "body": "## AI 리뷰 결과 🤖",
            "author": { "id": 99, "username": "review-bot", "name": "Review Bot" },
            "created_at": "2025-08-24T12:00:00Z",
            "system": false
        })))
        .expect(1)
        .mount(&gitlab)
        .await;

    mock_slack_ok(&slack, 0).await;

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(Some(SECRET), NOTE_HOOK_EVENT, note_payload("[AI 리뷰]"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::AiReviewCompleted);
}

#[tokio::test]
async fn note_without_trigger_phrase_is_skipped() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 0).await;

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(Some(SECRET), NOTE_HOOK_EVENT, note_payload("LGTM!"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Skipped {
            reason: "no trigger phrase in note"
        }
    );
}

#[tokio::test]
async fn note_on_an_issue_is_skipped() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 0).await;

    let mut payload = note_payload("[리뷰 요청]");
    payload["object_attributes"]["noteable_type"] = json!("Issue");

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(Some(SECRET), NOTE_HOOK_EVENT, payload)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Skipped {
            reason: "note is not on a merge request"
        }
    );
}

#[tokio::test]
async fn merge_action_posts_merge_notification() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 1).await;

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(Some(SECRET), MERGE_REQUEST_HOOK_EVENT, merge_payload("merge"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::MergeNotified);
}

#[tokio::test]
async fn non_merge_actions_are_skipped_without_any_outbound_call() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 0).await;

    for action in ["open", "update", "close", "reopen"] {
        let outcome = dispatcher(&gitlab, &slack, &ai)
            .handle(Some(SECRET), MERGE_REQUEST_HOOK_EVENT, merge_payload(action))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: "merge request action is not a merge"
            }
        );
    }
}

#[tokio::test]
async fn wrong_secret_is_rejected_before_the_payload_is_read() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    mock_slack_ok(&slack, 0).await;

    let err = dispatcher(&gitlab, &slack, &ai)
        .handle(Some("not-the-secret"), NOTE_HOOK_EVENT, json!({ "bogus": true }))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Unauthorized));

    let err = dispatcher(&gitlab, &slack, &ai)
        .handle(None, NOTE_HOOK_EVENT, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Unauthorized));
}

fn gitlab_client(gitlab: &MockServer) -> GitLabClient {
    GitLabClient::from_config(GitLabConfig {
        base_api: gitlab.uri(),
        token: "glpat-test".into(),
        proxy_url: None,
    })
    .unwrap()
}

#[tokio::test]
async fn response_notification_carries_first_and_last_thread_authors() {
    let gitlab = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/42/merge_requests/5/discussions/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "notes": [
                {
                    "id": 1,
                    "body": "first",
                    "author": { "id": 17, "username": "jelee", "name": "Jaeeun Lee" },
                    "system": false
                },
                {
                    "id": 2,
                    "body": "last",
                    "author": { "id": 28, "username": "dohkim", "name": "Dohyun Kim" },
                    "system": false
                }
            ]
        })))
        .expect(1)
        .mount(&gitlab)
        .await;

    let mut payload = note_payload("[리뷰 응답] 수정했습니다");
    payload["object_attributes"]["discussion_id"] = json!("abc");
    let hook: NoteHook = serde_json::from_value(payload).unwrap();
    let mr = hook.actionable_merge_request().unwrap();

    let client = gitlab_client(&gitlab);
    let notification = NotificationBuilder::new(&client)
        .build_review_notification(TriggerKind::Response, &hook, mr)
        .await;

    let discussion = notification.discussion.expect("thread context attached");
    assert_eq!(discussion.original_author.id, 17);
    assert_eq!(discussion.last_reply_author.id, 28);
}

#[tokio::test]
async fn failed_discussion_fetch_still_yields_a_notification() {
    let gitlab = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/42/merge_requests/5/discussions/abc"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&gitlab)
        .await;

    let mut payload = note_payload("[리뷰 응답] 수정했습니다");
    payload["object_attributes"]["discussion_id"] = json!("abc");
    let hook: NoteHook = serde_json::from_value(payload).unwrap();
    let mr = hook.actionable_merge_request().unwrap();

    let client = gitlab_client(&gitlab);
    let notification = NotificationBuilder::new(&client)
        .build_review_notification(TriggerKind::Response, &hook, mr)
        .await;

    assert!(notification.discussion.is_none());
    assert_eq!(notification.kind, TriggerKind::Response);
    assert_eq!(notification.merge_request.title, "Add login");
}

#[tokio::test]
async fn non_response_kinds_never_fetch_the_discussion() {
    let gitlab = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/42/merge_requests/5/discussions/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gitlab)
        .await;

    let mut payload = note_payload("[리뷰 시작]");
    payload["object_attributes"]["discussion_id"] = json!("abc");
    let hook: NoteHook = serde_json::from_value(payload).unwrap();
    let mr = hook.actionable_merge_request().unwrap();

    let client = gitlab_client(&gitlab);
    let notification = NotificationBuilder::new(&client)
        .build_review_notification(TriggerKind::Start, &hook, mr)
        .await;

    assert!(notification.discussion.is_none());
}

#[tokio::test]
async fn unknown_event_type_is_acknowledged_as_ignored() {
    let gitlab = MockServer::start().await;
    let slack = MockServer::start().await;
    let ai = MockServer::start().await;

    let outcome = dispatcher(&gitlab, &slack, &ai)
        .handle(Some(SECRET), "Pipeline Hook", json!({ "object_kind": "pipeline" }))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Ignored {
            event_type: "Pipeline Hook".to_string()
        }
    );
}
