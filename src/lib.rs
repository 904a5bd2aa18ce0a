//! Workspace umbrella crate for filmlink.
//!
//! This crate wires the stages together: it loads the catalog tables into
//! feature sources, streams movie documents out of the encyclopedia dump on a
//! blocking producer thread, drives the matcher over them and writes the
//! resulting match table.

pub mod config;
mod output;
mod pipeline;

pub use canonical::normalize;
pub use index::PrefixIndex;
pub use ingest::{
    read_catalog, read_credits, CatalogRecord, CreditRecord, Document, IngestConfig, IngestError,
    ReaderStats, TableStats, WikiReader,
};
pub use matcher::{
    set_match_metrics, CreditFeatures, DocumentOutcome, FeatureSource, MatchConfig, MatchEntry,
    MatchError, MatchMetrics, MatchReport, MatchTable, Orchestrator, RunStats, TitleFeatures,
};

pub use crate::config::{ConfigLoadError, FilmlinkConfig, OutputConfig};
pub use crate::output::{write_matches, write_results, OUTPUT_HEADER};
pub use crate::pipeline::{
    load_sources, run_match, spawn_document_producer, InputPaths, MatchSummary,
};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a match run.
///
/// Per-document and per-row problems never reach this type; they are logged
/// and counted where they happen.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),

    #[error("match setup failed: {0}")]
    Match(#[from] MatchError),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("failed to write results: {0}")]
    Output(#[from] csv::Error),

    #[error("document producer stopped unexpectedly: {0}")]
    Producer(String),
}
