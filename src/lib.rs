// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod bootstrap;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod triage;
pub mod verdict;

// Remote adapter pipeline (model + serverless heuristic clients)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{heuristic_adapter, model_adapter};
pub use crate::api::router;
pub use crate::triage::TriageEngine;
pub use crate::verdict::{Label, SourceTier, Verdict};

use tracing::info;

/// Call this from your Shuttle entrypoint (after tracing init) to perform a
/// one-off smoke test of the tier chain. It won't panic on failure; it just
/// logs which tier answered.
pub async fn run_triage_quick_probe() -> anyhow::Result<()> {
    let runtime = bootstrap::TriageRuntime::from_env();
    runtime.quick_probe().await;
    info!("triage quick probe finished");
    Ok(())
}
