//! Local fallback classifier over the scam-signature database.
//!
//! The database is a JSON file (`scam_db.json`) mapping each scam category to
//! its trigger keywords (Latin, Devanagari, and Bengali variants) and a
//! human-readable technical reason. It is hot-reloaded on mtime change at each
//! `classify()` call, so edits land without a restart and load failures
//! surface per request.
//!
//! This tier never fails: a broken or missing database yields an ERROR-labeled
//! verdict, and input that matches nothing yields the default-safe verdict.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::SystemTime;
use std::{env, fs};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::errors::DbError;
use crate::verdict::{SourceTier, Verdict};

// --- env defaults & names ---
pub const DEFAULT_SCAM_DB_PATH: &str = "scam_db.json";
pub const ENV_SCAM_DB_PATH: &str = "SCAM_DB_PATH";

/// Reason used when a category carries no technical reason of its own.
pub const GENERIC_REASON: &str = "Social engineering tactics detected.";
/// Exact explanation of the default-safe verdict.
pub const NO_MATCH_EXPLANATION: &str = "No immediate patterns detected.";
/// Explanation of the terminal database-failure verdict.
pub const DB_UNAVAILABLE_EXPLANATION: &str = "Could not load the scam signature database.";

/* ----------------------------
Database schema (from JSON)
---------------------------- */

/// One scam category: unique name, trigger keywords, stored reason.
///
/// Keywords live in the database schema itself (not in a separate literal
/// table) so the trigger index cannot drift from the category list.
#[derive(Debug, Clone, Deserialize)]
pub struct ScamCategory {
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub technical_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScamDatabase {
    pub scams: Vec<ScamCategory>,
}

impl ScamDatabase {
    pub fn load(path: &Path) -> Result<Self, DbError> {
        let bytes = fs::read(path)?;
        let db: ScamDatabase = serde_json::from_slice(&bytes)?;
        Ok(db)
    }

    /// Linear search by category name, first match wins; generic reason when
    /// the category carries none.
    pub fn reason_for(&self, category: &str) -> &str {
        self.scams
            .iter()
            .find(|s| s.category == category)
            .and_then(|s| s.technical_reason.as_deref())
            .unwrap_or(GENERIC_REASON)
    }
}

/* ----------------------------
Matching strategies
---------------------------- */

/// How a trigger keyword is matched against the normalized input.
///
/// The tier structure never depends on the strategy, so matching can be
/// tightened (word boundaries, proximity) without touching the dispatcher.
pub trait MatchStrategy: Send + Sync {
    /// Both sides arrive lower-cased; no other normalization is applied.
    fn matches(&self, haystack: &str, keyword: &str) -> bool;
    fn name(&self) -> &'static str;
}

/// Pure substring containment. Short fragments can false-positive inside
/// unrelated words; that tradeoff is intentional and preserved.
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn matches(&self, haystack: &str, keyword: &str) -> bool {
        !keyword.is_empty() && haystack.contains(keyword)
    }
    fn name(&self) -> &'static str {
        "substring"
    }
}

// Compiled \b-anchored patterns, keyed by keyword. The vocabulary is small
// and fixed, so the cache stays bounded.
static WORD_PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Unicode word-boundary matching; the tightened alternative to
/// [`SubstringMatch`].
pub struct WordBoundaryMatch;

impl MatchStrategy for WordBoundaryMatch {
    fn matches(&self, haystack: &str, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }
        if let Ok(cache) = WORD_PATTERNS.read() {
            if let Some(re) = cache.get(keyword) {
                return re.is_match(haystack);
            }
        }
        let pattern = format!(r"(?u)\b{}\b", regex::escape(keyword));
        match Regex::new(&pattern) {
            Ok(re) => {
                let hit = re.is_match(haystack);
                if let Ok(mut cache) = WORD_PATTERNS.write() {
                    cache.insert(keyword.to_string(), re);
                }
                hit
            }
            Err(_) => false,
        }
    }
    fn name(&self) -> &'static str {
        "word-boundary"
    }
}

/* ----------------------------
Classifier with hot reload
---------------------------- */

pub struct LocalClassifier {
    path: PathBuf,
    strategy: Box<dyn MatchStrategy>,
    inner: RwLock<State>,
}

struct State {
    db: Option<ScamDatabase>,
    last_modified: Option<SystemTime>,
}

impl LocalClassifier {
    pub fn new(path: impl Into<PathBuf>, strategy: Box<dyn MatchStrategy>) -> Self {
        Self {
            path: path.into(),
            strategy,
            inner: RwLock::new(State {
                db: None,
                last_modified: None,
            }),
        }
    }

    /// Path from `SCAM_DB_PATH` or the repo default; substring matching.
    pub fn from_env() -> Self {
        let path = env::var(ENV_SCAM_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCAM_DB_PATH));
        Self::new(path, Box::new(SubstringMatch))
    }

    pub fn db_path(&self) -> &Path {
        &self.path
    }

    /// Current database, reloading when the file's mtime changed.
    fn current_db(&self) -> Result<ScamDatabase, DbError> {
        let mtime = fs::metadata(&self.path).and_then(|m| m.modified())?;

        {
            let guard = self.inner.read().expect("classifier lock poisoned");
            if guard.last_modified == Some(mtime) {
                if let Some(db) = &guard.db {
                    return Ok(db.clone());
                }
            }
        }

        let db = ScamDatabase::load(&self.path)?;
        let mut guard = self.inner.write().expect("classifier lock poisoned");
        guard.db = Some(db.clone());
        guard.last_modified = Some(mtime);
        Ok(db)
    }

    /// Classify `text` against the database. Never raises to the caller.
    pub fn classify(&self, text: &str) -> Verdict {
        let db = match self.current_db() {
            Ok(db) => db,
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "scam database unavailable");
                return Verdict::error(DB_UNAVAILABLE_EXPLANATION);
            }
        };
        classify_with(&db, self.strategy.as_ref(), text)
    }
}

/// Same logic as `LocalClassifier::classify` but purely functional: no I/O,
/// suitable for unit tests and offline evaluation.
pub fn classify_with(db: &ScamDatabase, strategy: &dyn MatchStrategy, text: &str) -> Verdict {
    // Lower-case only; no accent folding, no stemming.
    let normalized = text.to_lowercase();

    for scam in &db.scams {
        let found: Vec<&str> = scam
            .keywords
            .iter()
            .filter(|kw| strategy.matches(&normalized, &kw.to_lowercase()))
            .map(|kw| kw.as_str())
            .collect();

        if !found.is_empty() {
            // First matching category wins; no aggregation across categories.
            let reason = db.reason_for(&scam.category);
            let explanation = format!(
                "Reason: High-pressure keywords ({}) detected locally. Analysis: {}",
                found.join(", "),
                reason
            );
            return Verdict::dangerous(explanation, SourceTier::LocalFallback);
        }
    }

    Verdict::safe(NO_MATCH_EXPLANATION, SourceTier::LocalFallback)
}

/* ----------------------------
Tests
---------------------------- */
