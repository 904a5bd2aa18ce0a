//! Record and document types shared by the ingest and match stages.
//!
//! Every constructor here normalizes its text fields, so a value of these
//! types is always comparable as-is. Records are immutable once built.
use canonical::{normalize, normalize_all};
use serde::{Deserialize, Serialize};

/// A movie entry from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Catalog key, assumed unique across the catalog.
    pub id: String,
    /// Normalized title.
    pub title: String,
    /// Normalized alternate (original-language) title. May equal `title`.
    pub alternate_title: String,
    /// Normalized auxiliary tokens: production company names, then the
    /// release year when known.
    pub tokens: Vec<String>,
}

impl CatalogRecord {
    /// Build a record, normalizing every text field.
    ///
    /// ```rust
    /// use ingest::CatalogRecord;
    ///
    /// let record = CatalogRecord::new(
    ///     "862",
    ///     "Toy Story",
    ///     "Toy Story",
    ///     ["Pixar Animation Studios"],
    ///     Some(1995),
    /// );
    /// assert_eq!(record.title, "toy story");
    /// assert_eq!(record.tokens, vec!["pixar animation studios", "1995"]);
    /// ```
    pub fn new<I, S>(
        id: impl Into<String>,
        title: &str,
        alternate_title: &str,
        companies: I,
        release_year: Option<i32>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = normalize_all(companies);
        if let Some(year) = release_year {
            tokens.push(year.to_string());
        }

        Self {
            id: id.into(),
            title: normalize(title),
            alternate_title: normalize(alternate_title),
            tokens,
        }
    }

    /// Titles to index for this record: the title, plus the alternate title
    /// when it is non-empty and differs.
    pub fn index_titles(&self) -> impl Iterator<Item = &str> {
        let alternate = (!self.alternate_title.is_empty() && self.alternate_title != self.title)
            .then_some(self.alternate_title.as_str());
        std::iter::once(self.title.as_str()).chain(alternate)
    }
}

/// Cast and crew names attached to a catalog identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRecord {
    pub id: String,
    /// Normalized cast names followed by normalized crew names.
    pub tokens: Vec<String>,
}

impl CreditRecord {
    pub fn new<C, W, S, T>(id: impl Into<String>, cast: C, crew: W) -> Self
    where
        C: IntoIterator<Item = S>,
        W: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut tokens = normalize_all(cast);
        tokens.extend(normalize_all(crew));
        Self {
            id: id.into(),
            tokens,
        }
    }
}

/// One parsed unit of the encyclopedia corpus.
///
/// Documents come out of [`WikiReader`](crate::WikiReader) with their text
/// exactly as found in the corpus; [`Document::normalized`] produces the
/// comparable form used by the classifier and the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub abstract_text: String,
    /// Section labels taken from the document's link anchors.
    pub anchors: Vec<String>,
    pub url: String,
}

impl Document {
    /// Normalize title, abstract and anchors. The URL is left untouched.
    ///
    /// Idempotent: normalizing a normalized document returns it unchanged.
    pub fn normalized(self) -> Self {
        Self {
            title: normalize(&self.title),
            abstract_text: normalize(&self.abstract_text),
            anchors: normalize_all(&self.anchors),
            url: self.url,
        }
    }
}
