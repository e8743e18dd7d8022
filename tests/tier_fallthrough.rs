// tests/tier_fallthrough.rs
//
// Tier ordering guarantees, exercised over the real local classifier and the
// shipped scam_db.json, with the remote tiers mocked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use scam_triage::classifier::{LocalClassifier, SubstringMatch};
use scam_triage::errors::AdapterError;
use scam_triage::heuristic_adapter::HeuristicClient;
use scam_triage::model_adapter::ModelClient;
use scam_triage::triage::TriageEngine;
use scam_triage::verdict::{Label, SourceTier};

struct ScriptedModel {
    calls: Arc<AtomicUsize>,
    reply: Option<String>,
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn invoke_model(&self, _text: &str) -> Result<String, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| AdapterError::transport("scripted outage"))
    }
    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

struct ScriptedHeuristic {
    calls: Arc<AtomicUsize>,
    reply: Option<String>,
}

#[async_trait]
impl HeuristicClient for ScriptedHeuristic {
    async fn invoke_heuristic(&self, _text: &str) -> Result<String, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| AdapterError::transport("scripted outage"))
    }
    fn function_name(&self) -> &'static str {
        "scripted"
    }
}

struct Harness {
    engine: TriageEngine,
    model_calls: Arc<AtomicUsize>,
    heuristic_calls: Arc<AtomicUsize>,
}

fn harness(model_reply: Option<&str>, heuristic_reply: Option<&str>) -> Harness {
    let model_calls = Arc::new(AtomicUsize::new(0));
    let heuristic_calls = Arc::new(AtomicUsize::new(0));
    let engine = TriageEngine::new(
        Arc::new(ScriptedModel {
            calls: model_calls.clone(),
            reply: model_reply.map(String::from),
        }),
        Arc::new(ScriptedHeuristic {
            calls: heuristic_calls.clone(),
            reply: heuristic_reply.map(String::from),
        }),
        LocalClassifier::new("scam_db.json", Box::new(SubstringMatch)),
    );
    Harness {
        engine,
        model_calls,
        heuristic_calls,
    }
}

#[tokio::test]
async fn model_verdict_wins_and_heuristic_is_never_called() {
    let h = harness(
        Some("DANGEROUS\nThis is a lottery advance-fee scam. यह एक धोखाधड़ी है।"),
        Some("SAFE\nAnalysis: unreachable"),
    );
    let v = h.engine.resolve("You won 25 lakh, pay the release fee").await;
    assert_eq!(v.source_tier, SourceTier::RemoteModel);
    assert_eq!(v.label, Label::Dangerous);
    assert_eq!(h.model_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.heuristic_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn heuristic_serves_when_model_is_down() {
    let h = harness(None, Some("SAFE\nAnalysis: no known pattern."));
    let v = h.engine.resolve("see you at the station").await;
    assert_eq!(v.source_tier, SourceTier::RemoteHeuristic);
    assert_eq!(h.model_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.heuristic_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn local_tier_serves_dangerous_when_both_remotes_are_down() {
    let h = harness(None, None);
    let v = h
        .engine
        .resolve("Your electricity connection will be disconnected due to unpaid bill")
        .await;
    assert_eq!(v.source_tier, SourceTier::LocalFallback);
    assert_eq!(v.label, Label::Dangerous);
    assert!(v.explanation.contains("disconnected"));
    // Each remote tier was attempted exactly once, in order, never retried.
    assert_eq!(h.model_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.heuristic_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn local_tier_serves_safe_default_when_both_remotes_are_down() {
    let h = harness(None, None);
    let v = h.engine.resolve("Let's meet for lunch tomorrow").await;
    assert_eq!(v.source_tier, SourceTier::LocalFallback);
    assert_eq!(v.label, Label::Safe);
    assert_eq!(v.explanation, "No immediate patterns detected.");
}

#[tokio::test]
async fn resolve_is_total_over_awkward_inputs() {
    let h = harness(None, None);
    let long = "x".repeat(10_000);
    let inputs: [&str; 6] = ["", " ", "\n", "🛡️", "a]b[c{d}", long.as_str()];
    for input in inputs {
        let v = h.engine.resolve(input).await;
        assert!(
            !v.explanation.is_empty(),
            "empty explanation for input {input:?}"
        );
    }
}
