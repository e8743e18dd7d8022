//! Verdict types shared by every triage tier.
//!
//! A `Verdict` is produced fresh per analysis request, serialized once to the
//! consumer, and discarded. `source_tier` names the tier that actually served
//! the result, not the tiers that were attempted along the way.

use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;

/// Classification outcome for an analyzed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Dangerous,
    Safe,
    Error,
}

impl Label {
    /// Canonical marker token the presentation layer substring-checks for.
    pub fn marker(&self) -> &'static str {
        match self {
            Label::Dangerous => "DANGEROUS",
            Label::Safe => "SAFE",
            Label::Error => "ERROR",
        }
    }

    /// Detect a marker inside remote output. DANGEROUS takes precedence so a
    /// model explaining "this is not SAFE, it is DANGEROUS" still flags.
    pub fn detect(text: &str) -> Option<Label> {
        if text.contains("DANGEROUS") {
            Some(Label::Dangerous)
        } else if text.contains("SAFE") {
            Some(Label::Safe)
        } else {
            None
        }
    }
}

/// Which analysis tier produced the final verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTier {
    RemoteModel,
    RemoteHeuristic,
    LocalFallback,
    Error,
}

impl SourceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTier::RemoteModel => "REMOTE_MODEL",
            SourceTier::RemoteHeuristic => "REMOTE_HEURISTIC",
            SourceTier::LocalFallback => "LOCAL_FALLBACK",
            SourceTier::Error => "ERROR",
        }
    }
}

/// Final result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    /// Human-readable explanation, possibly bilingual. Marker-free; use
    /// [`Verdict::render`] for the marker-prefixed presentation string.
    pub explanation: String,
    pub source_tier: SourceTier,
}

impl Verdict {
    pub fn new(label: Label, explanation: impl Into<String>, source_tier: SourceTier) -> Self {
        Self {
            label,
            explanation: explanation.into(),
            source_tier,
        }
    }

    pub fn dangerous(explanation: impl Into<String>, source_tier: SourceTier) -> Self {
        Self::new(Label::Dangerous, explanation, source_tier)
    }

    pub fn safe(explanation: impl Into<String>, source_tier: SourceTier) -> Self {
        Self::new(Label::Safe, explanation, source_tier)
    }

    /// Terminal failure verdict (no further fallback exists).
    pub fn error(explanation: impl Into<String>) -> Self {
        Self::new(Label::Error, explanation, SourceTier::Error)
    }

    /// Interpret raw text returned by a remote tier.
    ///
    /// Output without a recognizable DANGEROUS/SAFE marker is a parse failure,
    /// so the dispatcher treats it like any other adapter failure instead of
    /// guessing a label.
    pub fn from_remote_text(text: &str, source_tier: SourceTier) -> Result<Self, AdapterError> {
        let trimmed = text.trim();
        let label = Label::detect(trimmed)
            .ok_or_else(|| AdapterError::parse("no DANGEROUS/SAFE marker in remote output"))?;

        // Keep `explanation` marker-free: strip a leading marker line if the
        // remote already emitted one (render() puts it back).
        let explanation = trimmed
            .strip_prefix(label.marker())
            .map(|rest| rest.trim_start_matches([':', '-', ' ', '\n']).to_string())
            .unwrap_or_else(|| trimmed.to_string());
        if explanation.is_empty() {
            return Err(AdapterError::parse("remote output carried no explanation"));
        }

        Ok(Self::new(label, explanation, source_tier))
    }

    /// Presentation string with the canonical marker token up front, so the
    /// consumer's substring check (`DANGEROUS` vs `SAFE`) is reliable.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.label.marker(), self.explanation)
    }
}
