//! Edge queries over the accumulated graph

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::graph::model::{Edge, EdgeKey};

/// Edges emphasized because they touch the selected node
pub type HighlightSet = BTreeSet<EdgeKey>;

/// Collect every edge incident to `node` in a single pass.
/// `None` yields the empty set.
pub fn highlight_edges(edges: &IndexMap<EdgeKey, Edge>, node: Option<&str>) -> HighlightSet {
    let Some(node) = node else {
        return HighlightSet::new();
    };

    edges
        .keys()
        .filter(|key| key.touches(node))
        .cloned()
        .collect()
}

/// Incoming and outgoing edge counts for a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionCounts {
    /// Edges pointing at the node (what influenced it)
    pub incoming: usize,

    /// Edges leaving the node (what it influenced)
    pub outgoing: usize,
}

/// Count the edges on either side of `node`
pub fn expansion_counts(edges: &IndexMap<EdgeKey, Edge>, node: &str) -> ExpansionCounts {
    edges.keys().fold(ExpansionCounts::default(), |mut counts, key| {
        if key.target == node {
            counts.incoming += 1;
        }
        if key.source == node {
            counts.outgoing += 1;
        }
        counts
    })
}
