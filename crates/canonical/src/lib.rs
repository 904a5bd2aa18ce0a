//! filmlink canonical text layer.
//!
//! Every comparison in the matcher is a substring or prefix test over
//! normalized text, so catalog titles, document titles, abstracts, anchors and
//! auxiliary tokens all pass through [`normalize`] before they meet.
//!
//! ## What we do
//!
//! - Unicode NFKC composition (precomposed and decomposed accents compare equal)
//! - Locale-free lowercasing
//! - Trimming of leading/trailing whitespace
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same input, same output,
//! on any machine. Normalization is idempotent, so re-normalizing an already
//! normalized document is harmless.

mod normalize;

pub use crate::normalize::{normalize, normalize_all};
