// tests/bootstrap_factory.rs
// Run single-threaded because we mutate process env:
//   cargo test -- --test-threads=1

use std::env;

use scam_triage::bootstrap::{build_heuristic_client, build_model_client};
use scam_triage::config::TriageConfig;
use scam_triage::errors::AdapterError;

/// Small RAII helper to snapshot & restore env vars in each test.
struct EnvSnapshot {
    saved: Vec<(String, Option<String>)>,
}
impl EnvSnapshot {
    /// Provide a list of (KEY, Some(VALUE)) to set, or (KEY, None) to remove.
    fn set(pairs: &[(&str, Option<&str>)]) -> Self {
        let mut saved = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            let key = k.to_string();
            let prev = env::var(k).ok();
            saved.push((key.clone(), prev));
            match v {
                Some(val) => env::set_var(&key, val),
                None => env::remove_var(&key),
            }
        }
        Self { saved }
    }
}
impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for (k, maybe_v) in self.saved.drain(..) {
            match maybe_v {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}

// Single test so the two TRIAGE_TEST_MODE states cannot race each other
// when the harness runs tests in parallel anyway.
#[tokio::test]
async fn factory_honors_disabled_config_and_mock_mode() {
    let _env = EnvSnapshot::set(&[("TRIAGE_TEST_MODE", None)]);
    let cfg = TriageConfig::default();

    let model = build_model_client(&cfg);
    assert_eq!(model.provider_name(), "disabled");
    assert!(matches!(
        model.invoke_model("hello").await.unwrap_err(),
        AdapterError::Auth(_)
    ));

    let heuristic = build_heuristic_client(&cfg);
    assert_eq!(heuristic.function_name(), "disabled");
    assert!(heuristic.invoke_heuristic("hello").await.is_err());

    let _mock = EnvSnapshot::set(&[("TRIAGE_TEST_MODE", Some("mock"))]);
    let model = build_model_client(&cfg);
    assert_eq!(model.provider_name(), "mock");
    let first = model.invoke_model("anything").await.unwrap();
    let second = model.invoke_model("something else").await.unwrap();
    assert_eq!(first, second, "mock must be deterministic");
    assert!(first.contains("SAFE"));
}
