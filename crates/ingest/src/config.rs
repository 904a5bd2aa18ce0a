//! Configuration for the document stream reader and its queue.
//!
//! [`IngestConfig`] is cheap to clone and deserializes from the `ingest`
//! section of the YAML configuration file; every field has a default.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! assert_eq!(config.queue_capacity, 1000);
//! assert_eq!(config.title_prefix, "Wikipedia: ");
//! config.validate().expect("defaults are valid");
//! ```
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Runtime configuration for reading the encyclopedia corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestConfig {
    /// Capacity of the bounded queue between the stream reader and the
    /// matcher. The reader blocks when the queue is full.
    ///
    /// Default: `1000`
    pub queue_capacity: usize,

    /// Literal prefix stripped from every document title before it is
    /// stored (abstract dumps title pages as `"Wikipedia: Heat (1995 film)"`).
    ///
    /// Default: `"Wikipedia: "`
    pub title_prefix: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1000,
            title_prefix: "Wikipedia: ".to_string(),
        }
    }
}

impl IngestConfig {
    /// Validate the configuration. A zero-capacity queue could never hand a
    /// document to the matcher.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.queue_capacity == 0 {
            return Err(IngestError::InvalidConfig(
                "queue_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
