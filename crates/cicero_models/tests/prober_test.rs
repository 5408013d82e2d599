//! Tests for the fallback/health prober.

mod common;

use cicero_core::{ModelCandidatesBuilder, RetryPolicy};
use cicero_error::GenerationErrorKind;
use cicero_models::{HealthProber, Orchestrator, HEALTH_PROMPT};
use common::{quota, ScriptedBackend};
use std::sync::Arc;

fn prober_over(backend: Arc<ScriptedBackend>) -> HealthProber {
    let models = ModelCandidatesBuilder::default()
        .text("primary")
        .vision("vision")
        .code("coder")
        .fallback("fallback")
        .alternatives(Vec::new())
        .build()
        .expect("Valid ModelCandidates");
    let orchestrator = Arc::new(Orchestrator::new(backend, models, RetryPolicy::default()));
    HealthProber::new(orchestrator, true)
}

#[tokio::test]
async fn healthy_when_response_contains_ok() {
    let backend = Arc::new(ScriptedBackend::new(vec![Ok("OK, all good".into())]));
    let prober = prober_over(backend.clone());

    assert!(prober.check().await);
    assert_eq!(backend.calls()[0].1, HEALTH_PROMPT);
}

#[tokio::test]
async fn ok_match_is_case_insensitive() {
    let backend = Arc::new(ScriptedBackend::new(vec![Ok("everything is ok here".into())]));
    let prober = prober_over(backend);
    assert!(prober.check().await);
}

#[tokio::test]
async fn unhealthy_when_response_lacks_ok() {
    let backend = Arc::new(ScriptedBackend::new(vec![Ok("hello there".into())]));
    let prober = prober_over(backend);
    assert!(!prober.check().await);
}

#[tokio::test(start_paused = true)]
async fn failure_returns_false_instead_of_propagating() {
    // The probe runs the full orchestrator path: three attempts plus the
    // rescue call, all failing.
    let backend = Arc::new(ScriptedBackend::new(vec![
        quota(),
        quota(),
        quota(),
        Err(GenerationErrorKind::HttpError {
            status_code: 500,
            message: "down".into(),
        }),
    ]));
    let prober = prober_over(backend.clone());

    assert!(!prober.check().await);
    assert_eq!(backend.call_count(), 4);
}

#[tokio::test]
async fn model_report_exposes_configuration() {
    let backend = Arc::new(ScriptedBackend::new(vec![]));
    let prober = prober_over(backend);

    let report = prober.model_report();
    assert!(*report.api_key_configured());
    assert_eq!(report.models().fallback(), "fallback");
}
