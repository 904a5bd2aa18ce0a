//! Error types produced by the ingest crate.
//!
//! Only structural failures surface here: an unreadable stream, a corpus that
//! is not well-formed XML, or a table missing a column the readers need.
//! Row-level problems in the tables are counted in
//! [`TableStats`](crate::TableStats) and never abort a load.
//!
//! | Error | Fatal for | Description |
//! |-------|-----------|-------------|
//! | [`Xml`](IngestError::Xml) | document stream | corpus is not well-formed |
//! | [`Io`](IngestError::Io) | any reader | underlying read failed |
//! | [`EmptyTable`](IngestError::EmptyTable) | table load | no header row |
//! | [`MissingColumn`](IngestError::MissingColumn) | table load | required header absent |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | startup | bad [`IngestConfig`](crate::IngestConfig) |
use thiserror::Error;

/// Errors that can occur while reading the corpus or the catalog tables.
///
/// All variants carry owned strings so the error stays `Clone + PartialEq`
/// and can cross the producer thread boundary.
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::MissingColumn {
///     input: "movies_metadata.csv".into(),
///     column: "title".into(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "movies_metadata.csv: required column \"title\" not found in header"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The document corpus could not be tokenized as XML.
    #[error("malformed corpus xml: {0}")]
    Xml(String),

    /// The underlying reader failed.
    #[error("read failure: {0}")]
    Io(String),

    /// A table had no header row at all.
    #[error("{0}: table is empty")]
    EmptyTable(String),

    /// A column the reader depends on is not present in the header.
    #[error("{input}: required column {column:?} not found in header")]
    MissingColumn { input: String, column: String },

    /// Ingest configuration rejected by [`IngestConfig::validate`](crate::IngestConfig::validate).
    #[error("invalid ingest configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}
