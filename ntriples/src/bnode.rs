use ntio_api::model::BlankNode;
use std::collections::HashMap;

/// Maps document blank node labels to [`BlankNode`]s.
///
/// Each distinct label resolves to a fresh blank node the first time it is
/// seen and to the same node on every later occurrence. Sharing a map between
/// parsers makes equal labels from different documents resolve to the same
/// node, while separate maps keep them apart.
///
/// ```
/// use ntio_ntriples::BlankNodeMap;
///
/// let mut bnodes = BlankNodeMap::new();
/// let a = bnodes.resolve("a");
/// assert_eq!(a, bnodes.resolve("a"));
/// assert_ne!(a, bnodes.resolve("b"));
/// assert_eq!(2, bnodes.len());
/// ```
#[derive(Debug, Default)]
pub struct BlankNodeMap {
    ids: HashMap<String, BlankNode>,
}

impl BlankNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the blank node for `label`, allocating one on first use.
    pub fn resolve(&mut self, label: &str) -> BlankNode {
        if let Some(node) = self.ids.get(label) {
            return *node;
        }
        let node = BlankNode::fresh();
        self.ids.insert(label.to_owned(), node);
        node
    }

    /// Number of distinct labels seen so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
