//! # filmlink Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides which catalog movie an encyclopedia document describes.
//! It sits on top of `ingest` (records and documents) and `index` (the title
//! prefix index). For each document it gathers candidate identifiers from
//! every feature source, averages their relevance scores, and keeps the best
//! document seen so far for each catalog identifier.
//!
//! ## Core Types
//!
//! - [`FeatureSource`]: closed set of evidence providers:
//!   - `Title` ([`TitleFeatures`]): prefix-index candidates, scored by token
//!     containment in the abstract blended with title coverage.
//!   - `Credits` ([`CreditFeatures`]): scores cast/crew containment only.
//! - [`MatchConfig`]: `title_bias`, candidate channel capacity, checkpoint
//!   interval.
//! - [`Orchestrator`]: per-document fan-out/fan-in over the sources and
//!   sequential scoring into a [`MatchTable`].
//! - [`MatchTable`]: identifier to best [`MatchEntry`]; scores per
//!   identifier never decrease.
//! - [`DocumentOutcome`] / [`RunStats`]: what happened to each document.
//!
//! ## Example Usage
//!
//! ```
//! use ingest::{CatalogRecord, Document};
//! use matcher::{MatchConfig, MatchTable, Orchestrator, TitleFeatures};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let records = vec![CatalogRecord::new("862", "Toy Story", "", ["Pixar"], Some(1995))];
//! let config = MatchConfig::default();
//! let title = TitleFeatures::build(records, config.title_bias).unwrap();
//! let orchestrator = Orchestrator::new(vec![title.into()], config).unwrap();
//!
//! let doc = Document {
//!     title: "toy story (film)".into(),
//!     abstract_text: "toy story is a 1995 american computer-animated film".into(),
//!     anchors: vec![],
//!     url: "https://en.wikipedia.org/wiki/Toy_Story".into(),
//! };
//! let mut table = MatchTable::new();
//! orchestrator.process(doc, &mut table).await;
//! assert!(table.get("862").is_some());
//! # });
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] recorder with [`set_match_metrics`] to receive
//! per-document latency, candidate counts and outcomes. `tracing` events are
//! emitted for each document (`debug`) and for checkpoints and run
//! completion (`info`).

pub mod engine;
pub mod features;
pub mod metrics;
pub mod types;

pub use crate::engine::Orchestrator;
pub use crate::features::{CreditFeatures, FeatureSource, TitleFeatures};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    DocumentOutcome, MatchConfig, MatchEntry, MatchError, MatchReport, MatchTable, Offer,
    RunStats, Scored,
};
