//! Router tests with mock collaborators.

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cicero_core::{
    GenerationParams, ImagePayload, ModelCandidates, RetryPolicy, SearchOutcome, SearchResult,
    SearchResultBuilder, UserIdentity,
};
use cicero_error::{AuthError, GenerationError, GenerationErrorKind};
use cicero_interface::{
    GenerationBackend, HistoryStore, IdentityVerifier, ProfileStore, SearchBackend,
};
use cicero_models::{HealthProber, Orchestrator};
use cicero_rate_limit::{ClientLimiter, RateLimitConfig};
use cicero_server::{create_router, AppState};
use cicero_storage::{MemoryHistoryStore, MemoryProfileStore};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

const GOOD_TOKEN: &str = "valid-token";

/// Backend that always answers with the same text.
struct FixedBackend(&'static str);

#[async_trait]
impl GenerationBackend for FixedBackend {
    async fn complete(
        &self,
        _model: &str,
        _prompt: &str,
        _params: &GenerationParams,
        _image: Option<&ImagePayload>,
    ) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

/// Backend that always reports quota exhaustion.
struct QuotaBackend;

#[async_trait]
impl GenerationBackend for QuotaBackend {
    async fn complete(
        &self,
        _model: &str,
        _prompt: &str,
        _params: &GenerationParams,
        _image: Option<&ImagePayload>,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::new(GenerationErrorKind::Quota(
            "quota exceeded".to_string(),
        )))
    }
}

/// Verifier that accepts exactly one token.
struct FixedVerifier;

#[async_trait]
impl IdentityVerifier for FixedVerifier {
    async fn verify(&self, token: &str) -> Result<UserIdentity, AuthError> {
        if token == GOOD_TOKEN {
            Ok(UserIdentity::bare("alice"))
        } else {
            Err(AuthError::new("Unknown token"))
        }
    }
}

struct FixedSearch(Vec<SearchResult>);

#[async_trait]
impl SearchBackend for FixedSearch {
    async fn search(&self, _query: &str, _count: u32) -> SearchOutcome {
        SearchOutcome::new(self.0.clone())
    }
}

struct DownSearch;

#[async_trait]
impl SearchBackend for DownSearch {
    async fn search(&self, query: &str, _count: u32) -> SearchOutcome {
        SearchOutcome::unavailable(query)
    }
}

struct Harness {
    router: Router,
    history: Arc<MemoryHistoryStore>,
}

fn harness(
    backend: Arc<dyn GenerationBackend>,
    search: Arc<dyn SearchBackend>,
    limit: u32,
) -> Harness {
    let orchestrator = Arc::new(Orchestrator::new(
        backend,
        ModelCandidates::default(),
        RetryPolicy::default(),
    ));
    let prober = Arc::new(HealthProber::new(orchestrator.clone(), true));
    let history = Arc::new(MemoryHistoryStore::new());
    let profiles: Arc<dyn ProfileStore> = Arc::new(MemoryProfileStore::new());
    let limiter = Arc::new(ClientLimiter::new(RateLimitConfig::new(
        limit,
        std::time::Duration::from_secs(900),
    )));

    let state = AppState {
        orchestrator,
        prober,
        verifier: Arc::new(FixedVerifier),
        history: history.clone() as Arc<dyn HistoryStore>,
        profiles,
        search,
        limiter,
    };
    let router = create_router(state, &["http://localhost:3000".to_string()]);
    Harness { router, history }
}

fn default_harness() -> Harness {
    harness(
        Arc::new(FixedBackend("a fine answer")),
        Arc::new(DownSearch),
        100,
    )
}

fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let mut request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));
    request
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn banner_and_liveness_respond() -> anyhow::Result<()> {
    let harness = default_harness();

    let response = harness
        .router
        .clone()
        .oneshot(request(Method::GET, "/", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Cicero AI Backend API");

    let response = harness
        .router
        .oneshot(request(Method::GET, "/health", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "OK");
    Ok(())
}

#[tokio::test]
async fn backend_health_reports_model_lineup() -> anyhow::Result<()> {
    let harness = harness(Arc::new(FixedBackend("OK")), Arc::new(DownSearch), 100);

    let response = harness
        .router
        .oneshot(request(Method::GET, "/api/ask/health", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_key_configured"], true);
    Ok(())
}

#[tokio::test]
async fn ask_requires_authentication() -> anyhow::Result<()> {
    let harness = default_harness();
    let payload = serde_json::json!({ "prompt": "hello" });

    let response = harness
        .router
        .clone()
        .oneshot(request(Method::POST, "/api/ask", Some(payload.clone()), None))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask",
            Some(payload),
            Some("wrong-token"),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "Invalid authentication credentials");
    Ok(())
}

#[tokio::test]
async fn ask_generates_and_persists_history() -> anyhow::Result<()> {
    let harness = default_harness();
    let payload = serde_json::json!({ "prompt": "hello", "type": "text" });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["response"], "a fine answer");
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "text");

    let records = harness.history.list("alice", 50).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].prompt(), "hello");
    assert!(records[0].success());
    Ok(())
}

#[tokio::test]
async fn ask_rejects_empty_prompt() -> anyhow::Result<()> {
    let harness = default_harness();
    let payload = serde_json::json!({ "prompt": "   " });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "Prompt is required");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn ask_failure_maps_status_and_persists_error_record() -> anyhow::Result<()> {
    let harness = harness(Arc::new(QuotaBackend), Arc::new(DownSearch), 100);
    let payload = serde_json::json!({ "prompt": "hello" });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let records = harness.history.list("alice", 50).await?;
    assert_eq!(records.len(), 1);
    assert!(!records[0].success());
    assert!(records[0].response().starts_with("Error:"));
    Ok(())
}

#[tokio::test]
async fn ask_enforces_rate_limit_per_client() -> anyhow::Result<()> {
    let harness = harness(Arc::new(FixedBackend("hi")), Arc::new(DownSearch), 2);
    let payload = serde_json::json!({ "prompt": "hello" });

    for _ in 0..2 {
        let response = harness
            .router
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/ask",
                Some(payload.clone()),
                Some(GOOD_TOKEN),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_endpoint_never_errors() -> anyhow::Result<()> {
    let harness = harness(Arc::new(QuotaBackend), Arc::new(DownSearch), 100);
    let payload = serde_json::json!({ "prompt": "ping" });

    let response = harness
        .router
        .oneshot(request(Method::POST, "/api/ask/test", Some(payload), None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["model"], "fallback");
    assert!(body["response"]
        .as_str()
        .expect("response text")
        .contains("ping"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stream_emits_sse_frames() -> anyhow::Result<()> {
    let harness = harness(Arc::new(FixedBackend("one two three")), Arc::new(DownSearch), 100);
    let payload = serde_json::json!({ "prompt": "count" });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/ask/stream",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .expect("content type")
        .starts_with("text/event-stream"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = String::from_utf8(bytes.to_vec())?;
    assert!(body.contains(r#""type":"start""#));
    assert!(body.contains(r#""type":"complete""#));
    assert!(body.contains("one two three"));
    Ok(())
}

#[tokio::test]
async fn search_returns_sources_and_grounds_generation() -> anyhow::Result<()> {
    let results = vec![SearchResultBuilder::default()
        .title("Rust")
        .link("https://www.rust-lang.org")
        .snippet("A language empowering everyone.")
        .build()?];
    let harness = harness(
        Arc::new(FixedBackend("summarized")),
        Arc::new(FixedSearch(results)),
        100,
    );
    let payload = serde_json::json!({ "query": "rust language" });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/search",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["response"], "summarized");
    assert_eq!(body["sources"][0]["title"], "Rust");

    let records = harness.history.list("alice", 50).await?;
    assert_eq!(records.len(), 1);
    assert!(records[0].search_results().is_some());
    Ok(())
}

#[tokio::test]
async fn search_degrades_to_empty_sources() -> anyhow::Result<()> {
    let harness = default_harness();
    let payload = serde_json::json!({ "query": "anything" });

    let response = harness
        .router
        .oneshot(request(
            Method::POST,
            "/api/search",
            Some(payload),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["sources"].as_array().expect("sources").len(), 0);
    Ok(())
}

#[tokio::test]
async fn profile_is_created_on_first_fetch() -> anyhow::Result<()> {
    let harness = default_harness();

    let response = harness
        .router
        .clone()
        .oneshot(request(
            Method::GET,
            "/api/user/profile",
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["uid"], "alice");

    let update = serde_json::json!({ "displayName": "Alice" });
    let response = harness
        .router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/user/profile",
            Some(update),
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = harness
        .router
        .oneshot(request(
            Method::GET,
            "/api/user/profile",
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    let body = json_body(response).await;
    assert_eq!(body["displayName"], "Alice");
    Ok(())
}

#[tokio::test]
async fn history_delete_maps_ownership_errors() -> anyhow::Result<()> {
    let harness = default_harness();

    // seed a record owned by someone else
    let foreign = cicero_core::HistoryRecordBuilder::default()
        .user_id("bob")
        .prompt("his prompt")
        .response("his answer")
        .kind(cicero_core::RequestKind::Text)
        .timestamp(chrono::Utc::now())
        .success(true)
        .build()?;
    let id = harness.history.append(foreign).await?;

    let response = harness
        .router
        .clone()
        .oneshot(request(
            Method::DELETE,
            &format!("/api/history/{}", id),
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = harness
        .router
        .oneshot(request(
            Method::DELETE,
            "/api/history/missing-id",
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn history_list_and_clear() -> anyhow::Result<()> {
    let harness = default_harness();
    let payload = serde_json::json!({ "prompt": "hello" });

    for _ in 0..3 {
        let response = harness
            .router
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/ask",
                Some(payload.clone()),
                Some(GOOD_TOKEN),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = harness
        .router
        .clone()
        .oneshot(request(
            Method::GET,
            "/api/history?limit=2",
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["history"].as_array().expect("history").len(), 2);

    let response = harness
        .router
        .oneshot(request(
            Method::DELETE,
            "/api/history",
            None,
            Some(GOOD_TOKEN),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Cleared 3 chat history entries");
    Ok(())
}
