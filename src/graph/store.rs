//! The accumulated graph and its single-writer store

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rand::Rng;

use crate::cluster::{ClusterAssigner, ClusterMode, CustomClusters};
use crate::data::FetchResult;
use crate::error::ClusterError;
use crate::graph::highlight::{self, ExpansionCounts, HighlightSet};
use crate::graph::merge::IngestionMerger;
use crate::graph::model::{Edge, EdgeKey, Node, Position};
use crate::layout::{ClusterLookup, LayoutEngine, LayoutRequest};

/// Immutable snapshot of everything fetched so far.
///
/// Every transition borrows `self` and returns a new snapshot. The large
/// collections sit behind `Arc` and are copied on write, so older snapshots
/// stay valid and cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedGraph {
    nodes: Arc<IndexMap<String, Node>>,
    edges: Arc<IndexMap<EdgeKey, Edge>>,
    selected: Option<String>,
    expanded: Arc<IndexSet<String>>,
    highlight: HighlightSet,
    focus: Option<String>,
    clusters: ClusterAssigner,
}

impl AccumulatedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &IndexMap<EdgeKey, Edge> {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    pub fn expanded(&self) -> &IndexSet<String> {
        &self.expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Most recently ingested focal item
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn clusters(&self) -> &ClusterAssigner {
        &self.clusters
    }

    /// Custom groups while custom mode is active
    pub fn custom_clusters(&self) -> Option<&CustomClusters> {
        self.clusters.custom()
    }

    pub fn visible_clusters(&self) -> Vec<String> {
        self.clusters.visible_clusters(&self.nodes)
    }

    pub fn expansion_counts(&self, id: &str) -> ExpansionCounts {
        highlight::expansion_counts(&self.edges, id)
    }

    /// Select a node, or clear the selection with `None`. Unknown ids are ignored.
    pub fn select(&self, id: Option<&str>) -> Self {
        let mut next = self.clone();
        match id {
            None => {
                next.selected = None;
                next.highlight.clear();
            }
            Some(id) if self.contains_node(id) => {
                next.selected = Some(id.to_string());
                next.refresh_highlight();
            }
            Some(_) => {}
        }
        next
    }

    /// Upsert nodes and edges by id.
    ///
    /// Existing nodes keep their position and category; only the remaining
    /// fields refresh. New nodes are filed under "Uncategorized" while custom
    /// clustering is active. Edges overwrite any edge with the same
    /// (source, target) and are dropped when an endpoint is missing.
    pub fn add_nodes_and_edges(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut next = self.clone();

        for node in nodes {
            next.upsert_node(node);
        }

        for edge in edges {
            if !(next.contains_node(&edge.source) && next.contains_node(&edge.target)) {
                log::debug!("Dropping edge {} with a missing endpoint", edge.key());
                continue;
            }
            let key = edge.key();
            let existing = next.edges.get(&key);
            if existing != Some(&edge) {
                Arc::make_mut(&mut next.edges).insert(key, edge);
            }
        }

        next.refresh_highlight();
        next
    }

    /// Merge a fetch result and remember its focal item
    pub fn ingest(&self, merger: &IngestionMerger, fetch: &FetchResult) -> Self {
        let delta = merger.merge(self, fetch);
        let (nodes_before, edges_before) = (self.node_count(), self.edge_count());

        let mut next = self.add_nodes_and_edges(delta.nodes, delta.edges);
        next.focus = Some(delta.focal);

        log::info!(
            "Merged {}: +{} nodes, +{} edges ({} nodes, {} edges total)",
            fetch.main_item.id,
            next.node_count() - nodes_before,
            next.edge_count() - edges_before,
            next.node_count(),
            next.edge_count()
        );
        next
    }

    /// Remove a node with every edge touching it, its cluster membership and,
    /// when selected, the selection. Unknown ids are ignored.
    pub fn remove_node(&self, id: &str) -> Self {
        if !self.contains_node(id) {
            return self.clone();
        }

        let mut next = self.clone();
        Arc::make_mut(&mut next.nodes).shift_remove(id);
        Arc::make_mut(&mut next.edges).retain(|key, _| !key.touches(id));
        if next.expanded.contains(id) {
            Arc::make_mut(&mut next.expanded).shift_remove(id);
        }
        next.clusters.forget(id);

        if next.selected.as_deref() == Some(id) {
            next.selected = None;
        }
        if next.focus.as_deref() == Some(id) {
            next.focus = None;
        }
        next.refresh_highlight();
        next
    }

    /// Reset to the empty graph, including clusters and highlight
    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// Record that a node's neighbors were fetched. Unknown ids are ignored.
    pub fn mark_expanded(&self, id: &str) -> Self {
        let mut next = self.clone();
        if self.contains_node(id) && !self.is_expanded(id) {
            Arc::make_mut(&mut next.expanded).insert(id.to_string());
        }
        next
    }

    pub fn set_cluster_mode(&self, mode: ClusterMode) -> Self {
        let mut next = self.clone();
        next.clusters.set_mode(mode, &self.nodes, self.focus());
        next
    }

    /// Add an empty custom cluster, returning the new snapshot and cluster id
    pub fn create_cluster(&self, name: &str) -> Result<(Self, String), ClusterError> {
        let mut next = self.clone();
        let id = next.clusters.custom_for_update()?.create(name)?;
        Ok((next, id))
    }

    pub fn rename_cluster(&self, cluster_id: &str, name: &str) -> Result<Self, ClusterError> {
        let mut next = self.clone();
        next.clusters.custom_for_update()?.rename(cluster_id, name)?;
        Ok(next)
    }

    pub fn delete_cluster(&self, cluster_id: &str) -> Result<Self, ClusterError> {
        let mut next = self.clone();
        next.clusters.custom_for_update()?.delete(cluster_id)?;
        Ok(next)
    }

    /// Move a node between custom clusters; unknown nodes are ignored
    pub fn move_node(&self, node_id: &str, cluster_id: &str) -> Result<Self, ClusterError> {
        let mut next = self.clone();
        let custom = next.clusters.custom_for_update()?;
        if self.contains_node(node_id) {
            custom.move_node(node_id, cluster_id);
        }
        Ok(next)
    }

    /// Write positions for the listed ids; unknown ids are ignored
    pub fn apply_positions(&self, positions: &IndexMap<String, Position>) -> Self {
        let mut next = self.clone();
        let nodes = Arc::make_mut(&mut next.nodes);
        for (id, position) in positions {
            if let Some(node) = nodes.get_mut(id) {
                node.position = Some(*position);
            }
        }
        next
    }

    /// Layout request for the current cluster mode
    pub fn layout_request(
        &self,
        width: f64,
        height: f64,
        clustering: bool,
        chronological: bool,
    ) -> LayoutRequest<'_> {
        let clusters = match self.custom_clusters() {
            Some(custom) => ClusterLookup::Custom(custom),
            None => ClusterLookup::Tags,
        };
        LayoutRequest {
            width,
            height,
            clustering,
            chronological,
            clusters,
        }
    }

    /// Recompute every node's position for the given canvas and view mode
    pub fn laid_out<R: Rng>(
        &self,
        engine: &mut LayoutEngine<R>,
        width: f64,
        height: f64,
        clustering: bool,
        chronological: bool,
    ) -> Self {
        let mut nodes: Vec<Node> = self.nodes.values().cloned().collect();
        let request = self.layout_request(width, height, clustering, chronological);
        engine.position_nodes(&mut nodes, &request);

        let positions: IndexMap<String, Position> = nodes
            .into_iter()
            .filter_map(|node| node.position.map(|position| (node.id, position)))
            .collect();
        self.apply_positions(&positions)
    }

    fn upsert_node(&mut self, node: Node) {
        match self.nodes.get(&node.id) {
            Some(existing) => {
                let mut refreshed = existing.clone();
                refreshed.refresh_from(node);
                if &refreshed != existing {
                    let id = refreshed.id.clone();
                    Arc::make_mut(&mut self.nodes).insert(id, refreshed);
                }
            }
            None => {
                self.clusters.place_new(&node.id);
                Arc::make_mut(&mut self.nodes).insert(node.id.clone(), node);
            }
        }
    }

    fn refresh_highlight(&mut self) {
        self.highlight = highlight::highlight_edges(&self.edges, self.selected.as_deref());
    }
}

/// Commands accepted by [`GraphStore`]
#[derive(Debug, Clone)]
pub enum GraphCommand {
    Select(Option<String>),
    AddNodesAndEdges { nodes: Vec<Node>, edges: Vec<Edge> },
    Ingest(FetchResult),
    RemoveNode(String),
    Clear,
    MarkExpanded(String),
    SetClusterMode(ClusterMode),
    CreateCluster(String),
    RenameCluster { cluster: String, name: String },
    DeleteCluster(String),
    MoveNode { node: String, cluster: String },
    ApplyPositions(IndexMap<String, Position>),
}

/// Single writer over the accumulated graph.
///
/// Commands run to completion one at a time; readers take cheap snapshots.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    state: AccumulatedGraph,
    merger: IngestionMerger,
}

impl GraphStore {
    pub fn new(merger: IngestionMerger) -> Self {
        Self {
            state: AccumulatedGraph::default(),
            merger,
        }
    }

    pub fn state(&self) -> &AccumulatedGraph {
        &self.state
    }

    pub fn snapshot(&self) -> AccumulatedGraph {
        self.state.clone()
    }

    pub fn merger(&self) -> &IngestionMerger {
        &self.merger
    }

    /// Apply one command. A rejected cluster mutation leaves the state unchanged.
    pub fn apply(&mut self, command: GraphCommand) -> Result<(), ClusterError> {
        let next = match command {
            GraphCommand::Select(id) => self.state.select(id.as_deref()),
            GraphCommand::AddNodesAndEdges { nodes, edges } => {
                self.state.add_nodes_and_edges(nodes, edges)
            }
            GraphCommand::Ingest(fetch) => self.state.ingest(&self.merger, &fetch),
            GraphCommand::RemoveNode(id) => self.state.remove_node(&id),
            GraphCommand::Clear => self.state.clear(),
            GraphCommand::MarkExpanded(id) => self.state.mark_expanded(&id),
            GraphCommand::SetClusterMode(mode) => self.state.set_cluster_mode(mode),
            GraphCommand::CreateCluster(name) => self.state.create_cluster(&name)?.0,
            GraphCommand::RenameCluster { cluster, name } => {
                self.state.rename_cluster(&cluster, &name)?
            }
            GraphCommand::DeleteCluster(cluster) => self.state.delete_cluster(&cluster)?,
            GraphCommand::MoveNode { node, cluster } => self.state.move_node(&node, &cluster)?,
            GraphCommand::ApplyPositions(positions) => self.state.apply_positions(&positions),
        };
        self.state = next;
        Ok(())
    }

    /// Apply commands in order, stopping at the first rejection
    pub fn apply_all<I>(&mut self, commands: I) -> Result<(), ClusterError>
    where
        I: IntoIterator<Item = GraphCommand>,
    {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Run the layout engine over the current state and keep the result
    pub fn layout<R: Rng>(
        &mut self,
        engine: &mut LayoutEngine<R>,
        width: f64,
        height: f64,
        clustering: bool,
        chronological: bool,
    ) {
        self.state = self
            .state
            .laid_out(engine, width, height, clustering, chronological);
    }
}
