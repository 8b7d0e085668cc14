//! Exercises the OpenAI client against a local stub of the chat-completions API.

use axum::{
    extract::State,
    http::{ header::AUTHORIZATION, HeaderMap, StatusCode },
    routing::post,
    Json,
    Router,
};
use axum::body::Body;
use axum::http::Request;
use serde_json::{ json, Value };
use shop_assistant::agent::SalesAgent;
use shop_assistant::llm::chat::{ new_client, ChatClient, GatewayError };
use shop_assistant::llm::LlmConfig;
use shop_assistant::models::product::{ Price, Product };
use shop_assistant::server::api::{ router, AppState };
use shop_assistant::store::MemoryProductStore;
use std::sync::{ Arc, Mutex };
use std::time::Duration;
use tower::ServiceExt;

#[derive(Clone)]
struct StubApi {
    status: StatusCode,
    body: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(stub): State<StubApi>,
    headers: HeaderMap,
    Json(request): Json<Value>
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    stub.seen.lock().unwrap().push((auth, request));
    (stub.status, Json(stub.body.clone()))
}

/// Serves the stub on an ephemeral port and returns its base URL.
async fn spawn_stub(stub: StubApi) -> String {
    let app = Router::new().route("/v1/chat/completions", post(completions)).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}", addr)
}

fn stub(status: StatusCode, body: Value) -> StubApi {
    StubApi { status, body, seen: Arc::new(Mutex::new(Vec::new())) }
}

fn config(base_url: String) -> LlmConfig {
    LlmConfig {
        api_key: Some("sk-test".into()),
        base_url: Some(base_url),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }]
    })
}

#[tokio::test]
async fn sends_two_messages_with_bearer_auth() {
    let api = stub(StatusCode::OK, reply("  Yes! <link>\n"));
    let base_url = spawn_stub(api.clone()).await;
    let client = new_client(&config(base_url)).unwrap();

    let completion = client.complete("catalog", "do you have red shoes?").await.unwrap();

    assert_eq!(completion.response, "Yes! <link>");
    let seen = api.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (auth, request) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(request["model"], "gpt-3.5-turbo");
    assert_eq!(request["max_tokens"], 300);
    assert_eq!(request["temperature"].as_f64(), Some(1.0));
    assert_eq!(
        request["messages"],
        json!([
            { "role": "system", "content": "catalog" },
            { "role": "user", "content": "do you have red shoes?" }
        ])
    );
}

#[tokio::test]
async fn non_success_status_keeps_upstream_body() {
    let api = stub(
        StatusCode::UNAUTHORIZED,
        json!({ "error": { "message": "Incorrect API key provided" } })
    );
    let base_url = spawn_stub(api).await;
    let client = new_client(&config(base_url)).unwrap();

    let err = client.complete("catalog", "hola").await.unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Incorrect API key provided"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn body_without_choices_is_malformed() {
    let base_url = spawn_stub(stub(StatusCode::OK, json!({ "choices": [] }))).await;
    let client = new_client(&config(base_url)).unwrap();

    let err = client.complete("catalog", "hola").await.unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_api_is_an_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = new_client(&config(format!("http://{}", addr))).unwrap();

    let err = client.complete("catalog", "hola").await.unwrap_err();

    assert!(matches!(err, GatewayError::Http(_)));
}

#[tokio::test]
async fn relays_a_chat_end_to_end() {
    let api = stub(StatusCode::OK, reply("Yes! <link>"));
    let base_url = spawn_stub(api.clone()).await;
    let store = MemoryProductStore::new(
        vec![Product {
            domain: "shop.example".into(),
            slug: "red-shoes".into(),
            title: "Red Shoes".into(),
            description_short: "Comfy".into(),
            image_default: "https://cdn/img.png".into(),
            price: Some(Price { sale: Some(19.99), regular: None }),
        }]
    );
    let agent = SalesAgent::from_parts(new_client(&config(base_url)).unwrap(), Arc::new(store));

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"domain":"shop.example","userMessage":"do you have red shoes?"}"#))
        .unwrap();
    let resp = router(AppState { agent }).oneshot(req).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({ "assistantMessage": "Yes! <link>" }));

    let seen = api.seen.lock().unwrap().clone();
    let system_prompt = seen[0].1["messages"][0]["content"].as_str().unwrap().to_string();
    assert!(system_prompt.contains("https://shop.example/product/red-shoes"));
    assert!(system_prompt.contains("Red Shoes"));
    assert!(system_prompt.contains("$19.99"));
}
