//! Router-level tests against the scripted mock upstream.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ragchat::assistants::{FileCounts, Message, RunStatus, VectorStore};
use ragchat::{create_router, AppState, Config, MockAssistants};

fn test_config() -> Config {
    Config {
        api_key: "sk-test".to_string(),
        base_url: "http://127.0.0.1:0".to_string(),
        model: "gpt-4o-mini".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        run_timeout: Duration::from_secs(5),
    }
}

fn app(mock: Arc<MockAssistants>) -> Router {
    create_router(AppState::new(test_config(), mock))
}

fn app_with_timeout(mock: Arc<MockAssistants>, run_timeout: Duration) -> Router {
    let mut config = test_config();
    config.run_timeout = run_timeout;
    create_router(AppState::new(config, mock))
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(app(Arc::new(MockAssistants::new())), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn chat_missing_fields_are_rejected_before_any_upstream_call() {
    let cases = [
        (
            serde_json::json!({"threadId": "t", "message": "hi"}),
            "assistantId",
        ),
        (
            serde_json::json!({"assistantId": "a", "message": "hi"}),
            "threadId",
        ),
        (
            serde_json::json!({"assistantId": "a", "threadId": "t"}),
            "message",
        ),
    ];
    for (body, field) in cases {
        let mock = Arc::new(MockAssistants::new());
        let (status, json) = send(app(mock.clone()), "POST", "/chat", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"].as_str().unwrap().contains(field),
            "error should name the missing field {field}: {json}"
        );
        assert_eq!(mock.calls.create_message.load(Ordering::SeqCst), 0);
        assert_eq!(mock.calls.create_run.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn chat_returns_the_assistant_reply() {
    let mock = Arc::new(
        MockAssistants::new().with_messages(vec![Message::assistant_text("Hello!")]),
    );
    let body = serde_json::json!({"assistantId": "a", "threadId": "t", "message": "hi"});
    let (status, json) = send(app(mock), "POST", "/chat", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "Hello!");
}

#[tokio::test]
async fn chat_with_no_assistant_reply_returns_empty_string() {
    let mock = Arc::new(MockAssistants::new());
    let body = serde_json::json!({"assistantId": "a", "threadId": "t", "message": "hi"});
    let (status, json) = send(app(mock), "POST", "/chat", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "");
}

#[tokio::test]
async fn failed_run_maps_to_500_with_status_text() {
    let mock = Arc::new(
        MockAssistants::new().with_status_script(vec![RunStatus::Failed]),
    );
    let body = serde_json::json!({"assistantId": "a", "threadId": "t", "message": "hi"});
    let (status, json) = send(app(mock), "POST", "/chat", Some(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("failed"));
}

#[tokio::test]
async fn timed_out_run_maps_to_504() {
    let mock = Arc::new(MockAssistants::new().with_final_status(RunStatus::InProgress));
    let body = serde_json::json!({"assistantId": "a", "threadId": "t", "message": "hi"});
    let (status, json) = send(
        app_with_timeout(mock, Duration::from_millis(200)),
        "POST",
        "/chat",
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(json["error"].as_str().unwrap().contains("did not complete"));
}

#[tokio::test]
async fn session_requires_vector_store_id() {
    let mock = Arc::new(MockAssistants::new());
    let (status, json) = send(
        app(mock.clone()),
        "POST",
        "/session",
        Some(serde_json::json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("vectorStoreId"));
    assert_eq!(mock.calls.create_assistant.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn session_returns_assistant_thread_and_model() {
    let mock = Arc::new(MockAssistants::new());
    let body = serde_json::json!({"vectorStoreId": "vs_1", "vectorStoreName": "Handbook"});
    let (status, json) = send(app(mock), "POST", "/session", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["assistantId"], "asst_mock_1");
    assert_eq!(json["threadId"], "thread_mock_1");
    assert_eq!(json["model"], "gpt-4o-mini");
}

#[tokio::test]
async fn knowledge_bases_are_listed_with_camel_case_fields() {
    let stores = vec![
        VectorStore {
            id: "vs_1".to_string(),
            name: Some("Handbook".to_string()),
            status: "completed".to_string(),
            file_counts: FileCounts {
                total: 3,
                completed: 2,
                in_progress: 1,
                ..Default::default()
            },
            created_at: 1_700_000_000,
        },
        VectorStore {
            id: "vs_2".to_string(),
            name: None,
            status: "in_progress".to_string(),
            file_counts: FileCounts::default(),
            created_at: 1_700_000_001,
        },
    ];
    let mock = Arc::new(MockAssistants::new().with_vector_stores(stores));
    let (status, json) = send(app(mock), "GET", "/knowledge-bases", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], "vs_1");
    assert_eq!(data[0]["name"], "Handbook");
    assert_eq!(data[0]["fileCounts"]["total"], 3);
    assert_eq!(data[0]["fileCounts"]["inProgress"], 1);
    assert!(data[0]["createdAt"].as_str().unwrap().starts_with("2023-"));
    // A store without a name falls back to its id.
    assert_eq!(data[1]["name"], "vs_2");
}
