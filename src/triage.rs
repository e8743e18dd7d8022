//! # Tier Dispatcher
//! Orders the analysis strategies — remote model, remote heuristic, local
//! classifier — and falls through on each typed failure. Exactly one tier
//! produces the returned verdict; an earlier tier is never retried and a
//! later tier is never attempted after a success.
//!
//! The engine holds its adapters explicitly (constructed once at startup and
//! passed in), keeps no state across calls, and never lets an adapter error
//! escape to the caller.

use std::sync::Arc;

use tracing::{debug, info};

use crate::analyze::{HeuristicClient, ModelClient};
use crate::classifier::LocalClassifier;
use crate::verdict::{SourceTier, Verdict};

/// Anonymized id for log lines. Raw message text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub struct TriageEngine {
    model: Arc<dyn ModelClient>,
    heuristic: Arc<dyn HeuristicClient>,
    local: LocalClassifier,
}

impl TriageEngine {
    pub fn new(
        model: Arc<dyn ModelClient>,
        heuristic: Arc<dyn HeuristicClient>,
        local: LocalClassifier,
    ) -> Self {
        Self {
            model,
            heuristic,
            local,
        }
    }

    /// Resolve `raw_text` to a verdict. Total: every input terminates in a
    /// verdict with a non-empty explanation, including empty input.
    pub async fn resolve(&self, raw_text: &str) -> Verdict {
        let id = anon_hash(raw_text);

        match self
            .model
            .invoke_model(raw_text)
            .await
            .and_then(|out| Verdict::from_remote_text(&out, SourceTier::RemoteModel))
        {
            Ok(verdict) => {
                debug!(%id, provider = self.model.provider_name(), tier = "REMOTE_MODEL", "verdict served");
                return verdict;
            }
            Err(err) => {
                info!(%id, error = %err, "model tier failed; trying heuristic");
            }
        }

        match self
            .heuristic
            .invoke_heuristic(raw_text)
            .await
            .and_then(|out| Verdict::from_remote_text(&out, SourceTier::RemoteHeuristic))
        {
            Ok(verdict) => {
                debug!(%id, tier = "REMOTE_HEURISTIC", "verdict served");
                return verdict;
            }
            Err(err) => {
                info!(%id, error = %err, "heuristic tier failed; using local classifier");
            }
        }

        let verdict = self.local.classify(raw_text);
        debug!(%id, tier = verdict.source_tier.as_str(), "verdict served");
        verdict
    }
}
