use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use ingest::Document;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::features::FeatureSource;
use crate::metrics::metrics_recorder;
use crate::types::{
    DocumentOutcome, MatchConfig, MatchError, MatchReport, MatchTable, Offer, RunStats, Scored,
};


/// Drives feature sources over a stream of documents and keeps the best
/// document per catalog identifier.
///
/// Documents are processed one at a time. Within a document, candidate
/// generation fans out to one task per source; scoring starts only after
/// every source has finished.
pub struct Orchestrator {
    sources: Arc<[FeatureSource]>,
    config: MatchConfig,
}

impl Orchestrator {
    /// Build an orchestrator over `sources`, which must not be empty.
    pub fn new(sources: Vec<FeatureSource>, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        if sources.is_empty() {
            return Err(MatchError::NoFeatureSources);
        }
        Ok(Self {
            sources: Arc::from(sources),
            config,
        })
    }

    pub fn sources(&self) -> &[FeatureSource] {
        &self.sources
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Union of the identifiers proposed by every source for `doc`.
    ///
    /// Each source runs on its own task and streams identifiers into a
    /// bounded channel; dropping its sender is the task's completion signal.
    /// The channel is drained until every sender is gone, then all tasks are
    /// joined before returning. A task that panics is logged and contributes
    /// whatever it sent before failing.
    pub async fn candidates(&self, doc: Arc<Document>) -> HashSet<String> {
        let (tx, mut rx) = mpsc::channel::<String>(self.config.candidate_queue_capacity);
        let mut tasks = JoinSet::new();

        for slot in 0..self.sources.len() {
            let sources = Arc::clone(&self.sources);
            let doc = Arc::clone(&doc);
            let tx = tx.clone();
            tasks.spawn(async move {
                let source = &sources[slot];
                for id in source.most_relevant(&doc) {
                    if tx.send(id).await.is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut candidates = HashSet::new();
        while let Some(id) = rx.recv().await {
            candidates.insert(id);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, title = %doc.title, "candidate_task_failed");
            }
        }

        candidates
    }

    /// Mean relevance of `id` across every source.
    pub fn score(&self, doc: &Document, id: &str) -> f64 {
        let total: f64 = self
            .sources
            .iter()
            .map(|source| source.relevance(doc, id))
            .sum();
        total / self.sources.len() as f64
    }

    /// Highest-scoring candidate. Ties go to the smallest identifier so the
    /// result does not depend on set iteration order.
    pub fn best_candidate<'a, I>(&self, doc: &Document, candidates: I) -> Option<Scored>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut best: Option<Scored> = None;
        for id in candidates {
            let score = self.score(doc, id);
            let better = match &best {
                None => true,
                Some(current) => {
                    score > current.score || (score == current.score && *id < current.id)
                }
            };
            if better {
                best = Some(Scored {
                    id: id.clone(),
                    score,
                });
            }
        }
        best
    }

    /// Normalize one document, match it and apply the result to `table`.
    pub async fn process(&self, doc: Document, table: &mut MatchTable) -> DocumentOutcome {
        let started = Instant::now();
        let doc = Arc::new(doc.normalized());
        let candidates = self.candidates(Arc::clone(&doc)).await;

        let outcome = match self.best_candidate(&doc, &candidates) {
            None => DocumentOutcome::NoCandidates,
            Some(best) if best.score <= 0.0 => DocumentOutcome::ZeroScore,
            Some(Scored { id, score }) => {
                match table.offer(&id, score, &doc.url, &doc.abstract_text) {
                    Offer::Inserted => DocumentOutcome::Recorded {
                        id,
                        score,
                        replaced: None,
                    },
                    Offer::Replaced { previous } => DocumentOutcome::Recorded {
                        id,
                        score,
                        replaced: Some(previous),
                    },
                    Offer::Kept { .. } => DocumentOutcome::Kept { id, score },
                    Offer::Rejected => DocumentOutcome::ZeroScore,
                }
            }
        };

        debug!(
            title = %doc.title,
            candidates = candidates.len(),
            outcome = outcome.label(),
            "document_processed"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_document(started.elapsed(), candidates.len(), &outcome);
        }

        outcome
    }

    /// Consume `documents` until the channel closes.
    ///
    /// `checkpoint` receives the table each time the number of recorded
    /// identifiers reaches a multiple of `checkpoint_every`.
    pub async fn run<F>(
        &self,
        mut documents: mpsc::Receiver<Document>,
        mut checkpoint: F,
    ) -> MatchReport
    where
        F: FnMut(&MatchTable),
    {
        let mut table = MatchTable::new();
        let mut stats = RunStats::default();
        let every = self.config.checkpoint_every;

        while let Some(doc) = documents.recv().await {
            let outcome = self.process(doc, &mut table).await;
            stats.observe(&outcome);

            if let DocumentOutcome::Recorded { replaced: None, .. } = outcome {
                if every > 0 && table.len() % every == 0 {
                    info!(
                        matched = table.len(),
                        documents = stats.documents,
                        "match_checkpoint"
                    );
                    checkpoint(&table);
                }
            }
        }

        info!(
            documents = stats.documents,
            matched = table.len(),
            replaced = stats.replaced,
            no_candidates = stats.no_candidates,
            "match_complete"
        );
        MatchReport { table, stats }
    }
}
