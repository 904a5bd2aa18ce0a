use hashbrown::HashMap;

const ROOT: usize = 0;

#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<char, usize>,
    ids: Vec<String>,
}

/// Character trie from normalized titles to record identifiers.
///
/// Titles are expected to be normalized by the caller (see the `canonical`
/// crate); the index itself compares characters verbatim.
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    nodes: Vec<Node>,
    entries: usize,
}

impl PrefixIndex {
    /// Create an empty index holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            entries: 0,
        }
    }

    /// Bulk-build an index from `(title, id)` pairs.
    pub fn from_titles<I, T, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: AsRef<str>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (title, id) in titles {
            index.insert(title.as_ref(), id);
        }
        index
    }

    /// Append `id` at the terminal node of `title`, creating the path as
    /// needed. An empty title is ignored since the root is never collected.
    pub fn insert(&mut self, title: &str, id: impl Into<String>) {
        if title.is_empty() {
            return;
        }

        let mut current = ROOT;
        for ch in title.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(ch, child);
                    child
                }
            };
        }

        self.nodes[current].ids.push(id.into());
        self.entries += 1;
    }

    /// Identifiers of every inserted title that is a prefix of `query`.
    ///
    /// Identifiers are returned in walk order (shorter titles first). The
    /// same identifier may appear more than once if it was inserted under
    /// several titles that are all prefixes of `query`.
    pub fn candidates(&self, query: &str) -> Vec<&str> {
        let mut ids = Vec::new();
        let mut current = ROOT;

        for ch in query.chars() {
            let Some(&child) = self.nodes[current].children.get(&ch) else {
                return ids;
            };
            ids.extend(self.nodes[child].ids.iter().map(String::as_str));
            current = child;
        }

        ids
    }

    /// Number of `(title, id)` pairs inserted.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}
