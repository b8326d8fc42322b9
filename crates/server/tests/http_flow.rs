use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use conventions::{Container, Service, ServiceValidator};
use serde_json::{json, Value};
use tower::Service as _;

use server::startup::{build_app, build_container};

struct FakeService;
conventions::injectable!(FakeService);

struct UserHelper;

#[async_trait]
impl Service for UserHelper {
    async fn handle(&self, _args: Vec<Value>) -> anyhow::Result<Value> {
        Ok(json!("helped"))
    }
}
conventions::injectable!(UserHelper);

struct EchoService;

#[async_trait]
impl Service for EchoService {
    async fn handle(&self, args: Vec<Value>) -> anyhow::Result<Value> {
        Ok(Value::Array(args))
    }
}
conventions::injectable!(EchoService);

fn build() -> anyhow::Result<(Router, Arc<Container>)> {
    let container = build_container();
    let app = build_app(Arc::clone(&container), ServiceValidator::default())?;
    Ok((app, container))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp: Response = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let (app, _) = build()?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn register_show_and_list_users() -> anyhow::Result<()> {
    let (app, _) = build()?;

    let (status, created) = send(&app, "POST", "/users", Some(json!({"email": "ann@example.com", "name": "Ann"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, shown) = send(&app, "GET", &format!("/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["email"], "ann@example.com");

    send(&app, "POST", "/users", Some(json!({"email": "bob@example.com", "name": "Bob"}))).await?;
    let (status, listed) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    let (_, page) = send(&app, "GET", "/users?page=2&per_page=1", None).await?;
    assert_eq!(page.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn user_errors_map_to_status_codes() -> anyhow::Result<()> {
    let (app, _) = build()?;

    let (status, body) = send(&app, "POST", "/users", Some(json!({"email": "nope", "name": "X"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    send(&app, "POST", "/users", Some(json!({"email": "dup@example.com", "name": "D"}))).await?;
    let (status, body) = send(&app, "POST", "/users", Some(json!({"email": "dup@example.com", "name": "D"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1002);

    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, body) = send(&app, "GET", &format!("/users/{missing}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1003);
    Ok(())
}

#[tokio::test]
async fn dispatch_through_handle() -> anyhow::Result<()> {
    let (app, container) = build()?;
    container.bind_instance("echo", Arc::new(EchoService));

    let (status, keys) = send(&app, "GET", "/services", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keys, json!(["app.version", "echo", "users"]));

    let (status, out) = send(&app, "POST", "/services/echo/handle", Some(json!({"args": [1, "two"]}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out, json!([1, "two"]));

    let (status, created) = send(
        &app,
        "POST",
        "/services/users/handle",
        Some(json!({"args": ["register", {"email": "h@example.com", "name": "H"}]})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["email"], "h@example.com");

    let (status, body) = send(&app, "POST", "/services/users/handle", Some(json!({"args": ["drop"]}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1004);
    Ok(())
}

#[tokio::test]
async fn dispatch_rejects_bindings_that_break_the_convention() -> anyhow::Result<()> {
    let (app, container) = build()?;
    container.bind_instance("fake", Arc::new(FakeService));
    container.bind_instance("helper", Arc::new(UserHelper));

    let (status, body) = send(&app, "POST", "/services/app.version/handle", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 2001);

    let (status, body) = send(&app, "POST", "/services/helper/handle", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 2002);

    let (status, body) = send(&app, "POST", "/services/fake/handle", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 2003);

    let (status, _) = send(&app, "POST", "/services/ghost/handle", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[test]
fn app_refuses_to_start_with_bad_users_binding() {
    let container = build_container();
    container.bind_instance("users", Arc::new(FakeService));
    let err = build_app(container, ServiceValidator::default()).err();
    assert!(err.is_some_and(|e| e.to_string().contains("FakeService")));
}
