// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`],
// then the `Orchestrator` reports per-document latency, candidate counts and
// outcomes. This keeps instrumentation decoupled from any specific backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::DocumentOutcome;

/// Metrics observer for document matching.
pub trait MatchMetrics: Send + Sync {
    /// Record one processed document.
    ///
    /// `latency` covers candidate generation and scoring, `candidates` is the
    /// size of the deduplicated candidate set, and `outcome` is what happened
    /// to the match table.
    fn record_document(&self, latency: Duration, candidates: usize, outcome: &DocumentOutcome);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Typically called once at startup so every orchestrator shares the same
/// backend.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
