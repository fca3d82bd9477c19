//! Turns one fetch result into a node/edge delta

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::cluster::RESEARCH_FOCUS;
use crate::data::{FetchResult, Item, Relation};
use crate::graph::model::{clamp_confidence, Category, Edge, Node};
use crate::graph::store::AccumulatedGraph;

/// Maps a relation category to cluster tags for relations without explicit tags
pub type CategoryMapper = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Nodes and edges to upsert for one fetch result
#[derive(Debug, Clone, PartialEq)]
pub struct GraphDelta {
    /// Id of the fetched item
    pub focal: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Builds deltas from fetch results without touching existing layout state
#[derive(Clone)]
pub struct IngestionMerger {
    category_to_clusters: CategoryMapper,
}

impl Default for IngestionMerger {
    fn default() -> Self {
        Self {
            category_to_clusters: Arc::new(identity_clusters),
        }
    }
}

impl fmt::Debug for IngestionMerger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionMerger").finish_non_exhaustive()
    }
}

/// The category itself is the tag; blank categories give no tags
pub fn identity_clusters(category: &str) -> Vec<String> {
    let category = category.trim();
    if category.is_empty() {
        Vec::new()
    } else {
        vec![category.to_string()]
    }
}

impl IngestionMerger {
    /// Use a custom category → tags mapping
    pub fn with_category_mapper<F>(mapper: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            category_to_clusters: Arc::new(mapper),
        }
    }

    pub fn clusters_for(&self, category: &str) -> Vec<String> {
        (self.category_to_clusters)(category)
    }

    /// Compute the delta for `fetch` against the current graph.
    ///
    /// The focal node keeps an existing category and is tagged "Research
    /// Focus". Neighbors already in the graph are left alone; new ones become
    /// influence nodes. Every relation touching the focal item yields an edge.
    pub fn merge(&self, graph: &AccumulatedGraph, fetch: &FetchResult) -> GraphDelta {
        let focal = &fetch.main_item;

        let category = graph
            .node(&focal.id)
            .map(|existing| existing.category)
            .unwrap_or(Category::Main);

        let mut focal_node = node_from_item(focal, category, vec![RESEARCH_FOCUS.to_string()]);
        focal_node.creators = fetch.creators.clone();

        let mut nodes = vec![focal_node];
        let mut edges = Vec::with_capacity(fetch.relations.len());
        let mut created: HashSet<&str> = HashSet::new();

        for relation in &fetch.relations {
            let Some(neighbor) = fetch.neighbor(relation) else {
                log::warn!(
                    "Skipping relation {} -> {}: it does not connect to {}",
                    relation.from.id,
                    relation.to.id,
                    focal.id
                );
                continue;
            };

            if !graph.contains_node(&neighbor.id) && created.insert(neighbor.id.as_str()) {
                let tags = relation
                    .clusters
                    .clone()
                    .filter(|tags| !tags.is_empty())
                    .unwrap_or_else(|| self.clusters_for(&relation.category));
                nodes.push(node_from_item(neighbor, Category::Influence, tags));
            }

            edges.push(edge_from_relation(relation));
        }

        log::debug!(
            "Delta for {}: {} nodes, {} edges",
            focal.id,
            nodes.len(),
            edges.len()
        );

        GraphDelta {
            focal: focal.id.clone(),
            nodes,
            edges,
        }
    }
}

fn node_from_item(item: &Item, category: Category, clusters: Vec<String>) -> Node {
    Node {
        id: item.id.clone(),
        name: item.name.clone(),
        category,
        year: item.year,
        position: None,
        clusters,
        description: item.description.clone(),
        item_type: item.item_type.clone(),
        creators: Vec::new(),
    }
}

fn edge_from_relation(relation: &Relation) -> Edge {
    Edge {
        source: relation.from.id.clone(),
        target: relation.to.id.clone(),
        confidence: clamp_confidence(relation.confidence),
        influence_type: relation.influence_type.clone(),
        category: relation.category.clone(),
        explanation: relation.explanation.clone(),
        scope: relation.scope.clone(),
        reference: relation.source.clone(),
        year_of_influence: relation.year_of_influence,
    }
}
