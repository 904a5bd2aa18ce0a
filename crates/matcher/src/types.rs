use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs for a match run.
///
/// `MatchConfig` is serde-friendly so it can be embedded in the top-level
/// YAML configuration; every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Weight of the title term in title relevance, in `[0.0, 1.0]`.
    /// The token term receives `1.0 - title_bias`.
    pub title_bias: f64,
    /// Capacity of the per-document candidate channel.
    pub candidate_queue_capacity: usize,
    /// Invoke the checkpoint callback every N newly recorded matches.
    /// `0` disables checkpoints.
    pub checkpoint_every: usize,
}

impl MatchConfig {
    pub const DEFAULT_TITLE_BIAS: f64 = 0.5;
    pub const DEFAULT_CANDIDATE_QUEUE_CAPACITY: usize = 100;
    pub const DEFAULT_CHECKPOINT_EVERY: usize = 100;

    /// Validate the configuration, returning a descriptive error on failure.
    pub fn validate(&self) -> Result<(), MatchError> {
        validate_title_bias(self.title_bias)?;
        if self.candidate_queue_capacity == 0 {
            return Err(MatchError::InvalidConfig(
                "candidate_queue_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            title_bias: Self::DEFAULT_TITLE_BIAS,
            candidate_queue_capacity: Self::DEFAULT_CANDIDATE_QUEUE_CAPACITY,
            checkpoint_every: Self::DEFAULT_CHECKPOINT_EVERY,
        }
    }
}

pub(crate) fn validate_title_bias(bias: f64) -> Result<(), MatchError> {
    if !(0.0..=1.0).contains(&bias) {
        return Err(MatchError::InvalidConfig(format!(
            "title_bias must lie in [0, 1], got {bias}"
        )));
    }
    Ok(())
}

/// Errors surfaced by the matcher layer.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("at least one feature source is required")]
    NoFeatureSources,
}

/// A catalog identifier paired with its averaged relevance for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub id: String,
    pub score: f64,
}

/// Best document recorded so far for a catalog identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub score: f64,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Result of offering a scored document to the [`MatchTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offer {
    /// No entry existed for the identifier.
    Inserted,
    /// The offer beat the existing entry.
    Replaced { previous: f64 },
    /// The existing entry scored at least as high; nothing changed.
    Kept { current: f64 },
    /// Score was not strictly positive.
    Rejected,
}

/// What happened to a single document during a match run.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    /// No feature source proposed a candidate.
    NoCandidates,
    /// Every candidate scored zero.
    ZeroScore,
    /// The best candidate already holds a match at least as good.
    Kept { id: String, score: f64 },
    /// The document became the best match for `id`.
    Recorded {
        id: String,
        score: f64,
        replaced: Option<f64>,
    },
}

impl DocumentOutcome {
    /// Short label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentOutcome::NoCandidates => "no_candidates",
            DocumentOutcome::ZeroScore => "zero_score",
            DocumentOutcome::Kept { .. } => "kept",
            DocumentOutcome::Recorded { replaced: None, .. } => "recorded",
            DocumentOutcome::Recorded { .. } => "replaced",
        }
    }
}

/// Mapping from catalog identifier to its best-scoring document.
///
/// Scores for an identifier only ever increase: an offer overwrites the entry
/// only when strictly greater than the stored score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTable {
    entries: HashMap<String, MatchEntry>,
}

impl MatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a document for `id`.
    pub fn offer(&mut self, id: &str, score: f64, url: &str, abstract_text: &str) -> Offer {
        // NaN fails this comparison as well.
        if !(score > 0.0) {
            return Offer::Rejected;
        }
        let entry = MatchEntry {
            score,
            url: url.to_string(),
            abstract_text: abstract_text.to_string(),
        };
        match self.entries.get_mut(id) {
            Some(existing) if existing.score >= score => Offer::Kept {
                current: existing.score,
            },
            Some(existing) => {
                let previous = existing.score;
                *existing = entry;
                Offer::Replaced { previous }
            }
            None => {
                self.entries.insert(id.to_string(), entry);
                Offer::Inserted
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&MatchEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Entries sorted by identifier, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &MatchEntry)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Consume the table, returning entries sorted by identifier.
    pub fn into_sorted(self) -> Vec<(String, MatchEntry)> {
        let mut rows: Vec<_> = self.entries.into_iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}

/// Per-outcome counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub documents: usize,
    pub no_candidates: usize,
    pub zero_score: usize,
    pub kept: usize,
    pub recorded: usize,
    pub replaced: usize,
}

impl RunStats {
    pub(crate) fn observe(&mut self, outcome: &DocumentOutcome) {
        self.documents += 1;
        match outcome {
            DocumentOutcome::NoCandidates => self.no_candidates += 1,
            DocumentOutcome::ZeroScore => self.zero_score += 1,
            DocumentOutcome::Kept { .. } => self.kept += 1,
            DocumentOutcome::Recorded { replaced: None, .. } => self.recorded += 1,
            DocumentOutcome::Recorded { .. } => self.replaced += 1,
        }
    }
}

/// Final table plus counters returned by [`Orchestrator::run`](crate::Orchestrator::run).
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub table: MatchTable,
    pub stats: RunStats,
}
