//! filmlink Ingest Layer
//!
//! This is where both datasets enter the pipeline. We read the encyclopedia
//! abstract dump as a lazy stream of [`Document`]s, classify the movie-like
//! ones, and load the movie catalog tables into immutable records that the
//! matcher builds its feature sources from.
//!
//! ## What we do here
//!
//! - **Stream the corpus** - [`WikiReader`] pulls one `<doc>` at a time from
//!   any `BufRead`; [`WikiReader::movies`] normalizes and keeps movie-like
//!   documents only.
//! - **Classify** - [`Document::is_movie`]: a `(film)` title marker, or more
//!   than three of the five usual film-article sections among the anchors.
//! - **Load tables** - [`read_catalog`] and [`read_credits`] resolve columns
//!   by header name and never abandon a load over a bad row; problems are
//!   counted in [`TableStats`].
//! - **Repair embedded lists** - [`decode_names`] salvages names from the
//!   Python-literal lists stored in catalog cells.
//! - **Log everything** - structured logs via tracing.
//!
//! ## Example
//!
//! ```
//! use ingest::{WikiReader, IngestConfig};
//!
//! let feed = "<feed><doc><title>Wikipedia: Heat (film)</title>\
//!             <abstract>Heat is a 1995 crime film.</abstract></doc></feed>";
//! let config = IngestConfig::default();
//!
//! let movies: Vec<_> = WikiReader::new(feed.as_bytes(), config.title_prefix)
//!     .movies()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(movies[0].title, "heat (film)");
//! ```
mod classify;
mod config;
mod error;
mod names;
mod tabular;
mod types;
mod wiki;

pub use crate::classify::{AnchorScore, ANCHOR_THRESHOLD, FILM_MARKER, SECTION_MARKERS};
pub use crate::config::IngestConfig;
pub use crate::error::IngestError;
pub use crate::names::decode_names;
pub use crate::tabular::{read_catalog, read_credits, TableStats, CATALOG_COLUMNS, CREDIT_COLUMNS};
pub use crate::types::{CatalogRecord, CreditRecord, Document};
pub use crate::wiki::{Movies, ReaderStats, WikiReader};
