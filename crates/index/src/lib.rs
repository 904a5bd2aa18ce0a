//! # filmlink Index
//!
//! A character-keyed trie that maps normalized catalog titles to record
//! identifiers, queried by walking a (usually longer) document title.
//!
//! ## Why a trie
//!
//! Encyclopedia titles are long and decorated (`"anarchism (film)"`) while
//! catalog titles are short (`"anarchism"`). Asking "which catalog titles are
//! a prefix of this document title?" is a single walk of at most
//! `len(query)` steps, instead of a containment test against every record.
//!
//! ## Key Concepts
//!
//! - [`PrefixIndex::insert`] stores an identifier at the terminal node of the
//!   full title path only. Intermediate nodes are created but hold nothing.
//! - [`PrefixIndex::candidates`] walks the query from the root and collects
//!   identifiers at every visited node, stopping as soon as the next character
//!   has no child. The result is exactly the identifiers whose title is a
//!   prefix of the query.
//!
//! Nodes live in an arena (`Vec`) and refer to children by index, so the
//! structure is strictly tree-shaped with no back-references.
//!
//! The index is built once before matching and is read-only afterwards; it is
//! `Send + Sync` and is shared behind an `Arc` by the matcher.
//!
//! ## Example Usage
//!
//! ```
//! use index::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert("anarchism", "862");
//! index.insert("anarchy", "1001");
//!
//! let hits = index.candidates("anarchism (film)");
//! assert_eq!(hits, vec!["862"]);
//! ```

mod trie;

pub use crate::trie::PrefixIndex;

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut ids: Vec<&str>) -> Vec<&str> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn walk_returns_prefix_titles() {
        let mut index = PrefixIndex::new();
        index.insert("film", "0");

        let ids = index.candidates("films");
        assert!(ids.contains(&"0"));
    }

    #[test]
    fn collects_every_prefix_length() {
        let index = PrefixIndex::from_titles([
            ("a", "1"),
            ("an", "2"),
            ("ana", "3"),
            ("anarchism", "4"),
            ("anarchism (film)", "5"),
        ]);

        assert_eq!(
            sorted(index.candidates("anarchism (film)")),
            vec!["1", "2", "3", "4", "5"]
        );
        assert_eq!(sorted(index.candidates("anarchy")), vec!["1", "2", "3"]);
    }

    #[test]
    fn excludes_non_prefix_titles() {
        let index = PrefixIndex::from_titles([
            ("anarchism", "1"),
            ("archism", "2"),
            ("anarchism (film) extended", "3"),
            ("b", "4"),
        ]);

        // "archism" is a substring but not a prefix; the longer title is not
        // contained in the query at all.
        assert_eq!(index.candidates("anarchism (film)"), vec!["1"]);
    }

    #[test]
    fn stops_at_first_missing_child() {
        let index = PrefixIndex::from_titles([("abc", "1"), ("abd", "2")]);
        assert!(index.candidates("axc").is_empty());
        assert!(index.candidates("ab").is_empty());
        assert_eq!(index.candidates("abcdef"), vec!["1"]);
    }

    #[test]
    fn coinciding_titles_share_a_node() {
        let mut index = PrefixIndex::new();
        index.insert("heat", "949");
        index.insert("heat", "11234");

        assert_eq!(sorted(index.candidates("heat (1995 film)")), vec!["11234", "949"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.node_count(), 5);
    }

    #[test]
    fn empty_title_is_ignored() {
        let mut index = PrefixIndex::new();
        index.insert("", "1");
        assert!(index.is_empty());
        assert!(index.candidates("anything").is_empty());
        assert!(index.candidates("").is_empty());
    }

    #[test]
    fn multibyte_characters_walk_by_char() {
        let index = PrefixIndex::from_titles([("amélie", "194"), ("amel", "7")]);
        assert_eq!(index.candidates("amélie (film)"), vec!["194"]);
        assert_eq!(index.candidates("amelia"), vec!["7"]);
    }

    #[test]
    fn same_id_may_appear_twice() {
        let index = PrefixIndex::from_titles([("léon", "101"), ("léon: the professional", "101")]);
        assert_eq!(index.candidates("léon: the professional (film)"), vec!["101", "101"]);
    }

    #[test]
    fn matches_linear_scan() {
        let titles = [
            ("the", "1"),
            ("the matrix", "2"),
            ("the matrix reloaded", "3"),
            ("matrix", "4"),
            ("them!", "5"),
            ("t", "6"),
        ];
        let index = PrefixIndex::from_titles(titles);

        for query in [
            "the matrix (film)",
            "the matrix reloaded",
            "them! (1954 film)",
            "matrix",
            "x",
            "",
        ] {
            let mut expected: Vec<&str> = titles
                .iter()
                .filter(|(title, _)| query.starts_with(title))
                .map(|(_, id)| *id)
                .collect();
            expected.sort_unstable();
            assert_eq!(sorted(index.candidates(query)), expected, "query {query:?}");
        }
    }
}
