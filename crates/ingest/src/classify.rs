//! Heuristic movie classifier for encyclopedia documents.
//!
//! A document is a movie if its title carries the `(film)` disambiguation
//! marker, or if its section anchors cover more than three of the five
//! sections a film article usually has.
use crate::types::Document;

/// Literal title marker that classifies a document as a movie on its own.
pub const FILM_MARKER: &str = "(film)";

/// Section markers searched for in anchor labels, in scoring order.
pub const SECTION_MARKERS: [&str; 5] = ["plot", "cast", "production", "reception", "release"];

/// Anchor scores strictly greater than this classify as a movie.
pub const ANCHOR_THRESHOLD: usize = 3;

/// Which of the [`SECTION_MARKERS`] occur in at least one anchor label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnchorScore {
    present: [bool; SECTION_MARKERS.len()],
}

impl AnchorScore {
    /// Score a set of normalized anchor labels. Each marker counts at most
    /// once however many anchors contain it.
    pub fn from_anchors<S: AsRef<str>>(anchors: &[S]) -> Self {
        let mut score = Self::default();
        for anchor in anchors {
            let anchor = anchor.as_ref();
            for (slot, marker) in score.present.iter_mut().zip(SECTION_MARKERS) {
                if anchor.contains(marker) {
                    *slot = true;
                }
            }
        }
        score
    }

    pub fn score(&self) -> usize {
        self.present.iter().filter(|present| **present).count()
    }
}

impl Document {
    /// Classify a normalized document as movie-like.
    ///
    /// ```rust
    /// use ingest::Document;
    ///
    /// let doc = Document {
    ///     title: "anarchism (film)".into(),
    ///     ..Default::default()
    /// };
    /// assert!(doc.is_movie());
    /// ```
    pub fn is_movie(&self) -> bool {
        if self.title.contains(FILM_MARKER) {
            return true;
        }
        AnchorScore::from_anchors(&self.anchors).score() > ANCHOR_THRESHOLD
    }
}
