//! Feature sources: independent evidence providers over the catalog.
//!
//! Each source can propose candidate identifiers for a document and score a
//! `(document, identifier)` pair in `[0.0, 1.0]`. The set of sources is
//! closed, so dispatch goes through [`FeatureSource`] rather than a trait
//! object.

use std::collections::HashMap;

use index::PrefixIndex;
use ingest::{CatalogRecord, CreditRecord, Document};
use tracing::{debug, warn};

use crate::types::{validate_title_bias, MatchError};

/// Fraction of `tokens` that occur as substrings of `haystack`.
///
/// Returns `0.0` when there are no tokens.
fn containment(tokens: &[String], haystack: &str) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens
        .iter()
        .filter(|token| haystack.contains(token.as_str()))
        .count();
    hits as f64 / tokens.len() as f64
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
struct TitleEntry {
    title: String,
    alternate_title: String,
    tokens: Vec<String>,
}

/// Title-based evidence from the movie metadata table.
///
/// Candidates come from the prefix index built over every record's title and
/// alternate title. Relevance blends token containment in the abstract with
/// how much of the document title the matched catalog title covers.
#[derive(Debug, Clone)]
pub struct TitleFeatures {
    records: HashMap<String, TitleEntry>,
    index: PrefixIndex,
    title_bias: f64,
}

impl TitleFeatures {
    /// Build the source and its prefix index. Duplicate identifiers keep the
    /// first record seen.
    pub fn build<I>(records: I, title_bias: f64) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        validate_title_bias(title_bias)?;

        let mut entries = HashMap::new();
        let mut index = PrefixIndex::new();
        let mut duplicates = 0usize;
        for record in records {
            if entries.contains_key(&record.id) {
                duplicates += 1;
                continue;
            }
            for title in record.index_titles() {
                index.insert(title, record.id.clone());
            }
            entries.insert(
                record.id,
                TitleEntry {
                    title: record.title,
                    alternate_title: record.alternate_title,
                    tokens: record.tokens,
                },
            );
        }
        if duplicates > 0 {
            warn!(duplicates, "title_features_duplicate_ids");
        }
        debug!(
            records = entries.len(),
            nodes = index.node_count(),
            "title_features_built"
        );

        Ok(Self {
            records: entries,
            index,
            title_bias,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn title_bias(&self) -> f64 {
        self.title_bias
    }

    /// Identifiers whose indexed titles are prefixes of the document title.
    pub fn most_relevant(&self, doc: &Document) -> Vec<String> {
        self.index
            .candidates(&doc.title)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn relevance(&self, doc: &Document, id: &str) -> f64 {
        let Some(entry) = self.records.get(id) else {
            return 0.0;
        };
        let token_term = containment(&entry.tokens, &doc.abstract_text);
        let title_term = title_term(entry, &doc.title);
        clamp_unit((1.0 - self.title_bias) * token_term + self.title_bias * title_term)
    }
}

/// Share of the document title covered by the catalog title, or by the
/// alternate title when the primary one is not contained.
fn title_term(entry: &TitleEntry, doc_title: &str) -> f64 {
    let doc_len = doc_title.chars().count();
    if doc_len == 0 {
        return 0.0;
    }
    let contained = |candidate: &str| !candidate.is_empty() && doc_title.contains(candidate);
    let matched = if contained(&entry.title) {
        &entry.title
    } else if contained(&entry.alternate_title) {
        &entry.alternate_title
    } else {
        return 0.0;
    };
    matched.chars().count() as f64 / doc_len as f64
}

/// Cast and crew evidence from the credits table.
///
/// Never proposes candidates; only scores pairs proposed by other sources.
#[derive(Debug, Clone, Default)]
pub struct CreditFeatures {
    records: HashMap<String, Vec<String>>,
}

impl CreditFeatures {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CreditRecord>,
    {
        let mut entries = HashMap::new();
        for record in records {
            entries.entry(record.id).or_insert(record.tokens);
        }
        debug!(records = entries.len(), "credit_features_built");
        Self { records: entries }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn most_relevant(&self, _doc: &Document) -> Vec<String> {
        Vec::new()
    }

    pub fn relevance(&self, doc: &Document, id: &str) -> f64 {
        self.records
            .get(id)
            .map(|tokens| clamp_unit(containment(tokens, &doc.abstract_text)))
            .unwrap_or(0.0)
    }
}

/// The closed set of evidence providers the orchestrator consults.
#[derive(Debug, Clone)]
pub enum FeatureSource {
    Title(TitleFeatures),
    Credits(CreditFeatures),
}

impl FeatureSource {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureSource::Title(_) => "title",
            FeatureSource::Credits(_) => "credits",
        }
    }

    /// Number of catalog records backing this source.
    pub fn len(&self) -> usize {
        match self {
            FeatureSource::Title(source) => source.len(),
            FeatureSource::Credits(source) => source.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn most_relevant(&self, doc: &Document) -> Vec<String> {
        match self {
            FeatureSource::Title(source) => source.most_relevant(doc),
            FeatureSource::Credits(source) => source.most_relevant(doc),
        }
    }

    /// Relevance in `[0.0, 1.0]`; unknown identifiers score `0.0`.
    pub fn relevance(&self, doc: &Document, id: &str) -> f64 {
        match self {
            FeatureSource::Title(source) => source.relevance(doc, id),
            FeatureSource::Credits(source) => source.relevance(doc, id),
        }
    }
}

impl From<TitleFeatures> for FeatureSource {
    fn from(source: TitleFeatures) -> Self {
        FeatureSource::Title(source)
    }
}

impl From<CreditFeatures> for FeatureSource {
    fn from(source: CreditFeatures) -> Self {
        FeatureSource::Credits(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, abstract_text: &str) -> Document {
        Document {
            title: title.into(),
            abstract_text: abstract_text.into(),
            anchors: Vec::new(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
        }
    }

    fn record(id: &str, title: &str, alt: &str, tokens: &[&str]) -> CatalogRecord {
        CatalogRecord {
            id: id.into(),
            title: title.into(),
            alternate_title: alt.into(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn title_candidates_are_prefixes_of_document_title() {
        let source = TitleFeatures::build(
            vec![
                record("1", "alien", "", &[]),
                record("2", "aliens", "", &[]),
                record("3", "heat", "", &[]),
            ],
            0.5,
        )
        .unwrap();
        let mut ids = source.most_relevant(&doc("aliens (film)", ""));
        ids.sort();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn alternate_title_is_indexed() {
        let source =
            TitleFeatures::build(vec![record("7", "les diaboliques", "diabolique", &[])], 0.5)
                .unwrap();
        assert_eq!(source.most_relevant(&doc("diabolique (1955 film)", "")), vec!["7"]);
    }

    #[test]
    fn title_relevance_blends_tokens_and_title_coverage() {
        let source = TitleFeatures::build(
            vec![record("1", "heat", "", &["1995", "warner bros"])],
            0.5,
        )
        .unwrap();
        let d = doc("heat (1995 film)", "heat is a 1995 american crime film");
        // token term 1/2, title term 4/16
        let expected = 0.5 * 0.5 + 0.5 * (4.0 / 16.0);
        assert!((source.relevance(&d, "1") - expected).abs() < 1e-9);
    }

    #[test]
    fn title_term_falls_back_to_alternate_title() {
        let source =
            TitleFeatures::build(vec![record("1", "der himmel", "wings", &["x"])], 1.0).unwrap();
        let d = doc("wings", "");
        assert!((source.relevance(&d, "1") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tokens_and_empty_title_do_not_divide_by_zero() {
        let source = TitleFeatures::build(vec![record("1", "heat", "", &[])], 0.5).unwrap();
        let score = source.relevance(&doc("", "anything"), "1");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn unknown_id_scores_zero() {
        let source = TitleFeatures::build(vec![record("1", "heat", "", &["a"])], 0.5).unwrap();
        assert_eq!(source.relevance(&doc("heat", "a"), "404"), 0.0);
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let source = TitleFeatures::build(
            vec![record("1", "heat", "", &[]), record("1", "ronin", "", &[])],
            0.5,
        )
        .unwrap();
        assert_eq!(source.len(), 1);
        assert!(source.most_relevant(&doc("ronin", "")).is_empty());
    }

    #[test]
    fn invalid_bias_is_rejected() {
        assert!(TitleFeatures::build(Vec::new(), 1.5).is_err());
    }

    #[test]
    fn credits_never_propose_candidates() {
        let source = CreditFeatures::build(vec![CreditRecord {
            id: "1".into(),
            tokens: vec!["al pacino".into()],
        }]);
        assert!(source.most_relevant(&doc("heat", "al pacino")).is_empty());
    }

    #[test]
    fn credit_relevance_is_token_fraction() {
        let source = CreditFeatures::build(vec![
            CreditRecord {
                id: "1".into(),
                tokens: vec!["al pacino".into(), "robert de niro".into(), "michael mann".into()],
            },
            CreditRecord {
                id: "2".into(),
                tokens: Vec::new(),
            },
        ]);
        let d = doc("heat", "starring al pacino and robert de niro");
        assert!((source.relevance(&d, "1") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(source.relevance(&d, "2"), 0.0);
        assert_eq!(source.relevance(&d, "3"), 0.0);
    }

    #[test]
    fn feature_source_dispatches() {
        let source: FeatureSource = CreditFeatures::default().into();
        assert_eq!(source.name(), "credits");
        assert!(source.is_empty());
    }
}
