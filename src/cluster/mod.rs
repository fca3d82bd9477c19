//! Cluster membership: automatic (tag-derived) or custom (user-authored)

pub mod automatic;
pub mod custom;
pub mod metrics;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ClusterError;
use crate::graph::Node;

pub use custom::{CustomCluster, CustomClusters};

/// Tag and name of the cluster holding the originating main node
pub const RESEARCH_FOCUS: &str = "Research Focus";

/// Name of the catch-all cluster
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Reserved custom cluster ids
pub const RESEARCH_FOCUS_ID: &str = "research-focus";
pub const UNCATEGORIZED_ID: &str = "uncategorized";

/// Active clustering mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMode {
    #[default]
    Automatic,
    Custom,
}

/// Owns the clustering mode and, once custom mode has been used, the custom groups.
///
/// Custom groups survive a switch back to automatic mode and are reconciled
/// against the node set when custom mode is enabled again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterAssigner {
    mode: ClusterMode,
    custom: Option<CustomClusters>,
}

impl ClusterAssigner {
    pub fn mode(&self) -> ClusterMode {
        self.mode
    }

    pub fn is_custom(&self) -> bool {
        self.mode == ClusterMode::Custom
    }

    /// Custom groups, only while custom mode is active
    pub fn custom(&self) -> Option<&CustomClusters> {
        match self.mode {
            ClusterMode::Custom => self.custom.as_ref(),
            ClusterMode::Automatic => None,
        }
    }

    /// Switch to custom mode, initializing the reserved groups on first use
    pub fn enable_custom(&mut self, nodes: &IndexMap<String, Node>, focus: Option<&str>) {
        match self.custom.as_mut() {
            Some(custom) => custom.reconcile(nodes),
            None => self.custom = Some(CustomClusters::initialize(nodes, focus)),
        }
        self.mode = ClusterMode::Custom;
    }

    pub fn enable_automatic(&mut self) {
        self.mode = ClusterMode::Automatic;
    }

    pub fn set_mode(&mut self, mode: ClusterMode, nodes: &IndexMap<String, Node>, focus: Option<&str>) {
        match mode {
            ClusterMode::Custom => self.enable_custom(nodes, focus),
            ClusterMode::Automatic => self.enable_automatic(),
        }
    }

    /// File a genuinely new node; a no-op outside custom mode
    pub fn place_new(&mut self, node_id: &str) {
        if let Some(custom) = self.custom_mut() {
            custom.place_new(node_id);
        }
    }

    /// Strip a removed node from every custom group, active or dormant
    pub fn forget(&mut self, node_id: &str) {
        if let Some(custom) = self.custom.as_mut() {
            custom.remove_member(node_id);
        }
    }

    /// Names of the clusters currently visible
    pub fn visible_clusters(&self, nodes: &IndexMap<String, Node>) -> Vec<String> {
        match self.custom() {
            Some(custom) => custom.iter().map(|cluster| cluster.name.clone()).collect(),
            None => automatic::visible_clusters(nodes.values()),
        }
    }

    pub(crate) fn custom_for_update(&mut self) -> Result<&mut CustomClusters, ClusterError> {
        self.custom_mut().ok_or(ClusterError::NotCustomMode)
    }

    fn custom_mut(&mut self) -> Option<&mut CustomClusters> {
        match self.mode {
            ClusterMode::Custom => self.custom.as_mut(),
            ClusterMode::Automatic => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;

    fn nodes() -> IndexMap<String, Node> {
        [
            Node::new("m", "Main", Category::Main).with_clusters([RESEARCH_FOCUS]),
            Node::new("a", "A", Category::Influence).with_clusters(["Cinema"]),
        ]
        .into_iter()
        .map(|node| (node.id.clone(), node))
        .collect()
    }

    #[test]
    fn automatic_is_the_default() {
        let assigner = ClusterAssigner::default();
        assert_eq!(assigner.mode(), ClusterMode::Automatic);
        assert!(assigner.custom().is_none());
        assert_eq!(assigner.visible_clusters(&nodes()), vec![RESEARCH_FOCUS, "Cinema"]);
    }

    #[test]
    fn custom_groups_survive_a_round_trip_through_automatic() {
        let nodes = nodes();
        let mut assigner = ClusterAssigner::default();
        assigner.enable_custom(&nodes, Some("m"));
        let id = assigner.custom_for_update().unwrap().create("Films").unwrap();
        assigner.custom_for_update().unwrap().move_node("a", &id);

        assigner.enable_automatic();
        assert!(assigner.custom().is_none());
        assert!(matches!(
            assigner.custom_for_update(),
            Err(ClusterError::NotCustomMode)
        ));

        assigner.enable_custom(&nodes, Some("m"));
        let custom = assigner.custom().unwrap();
        assert_eq!(custom.cluster_of("a").map(|c| c.name.as_str()), Some("Films"));
    }

    #[test]
    fn new_nodes_are_not_filed_in_automatic_mode() {
        let nodes = nodes();
        let mut assigner = ClusterAssigner::default();
        assigner.enable_custom(&nodes, Some("m"));
        assigner.enable_automatic();
        assigner.place_new("late");
        assigner.enable_custom(&nodes, Some("m"));

        // "late" is not in the node map, so reconciliation leaves it out
        assert!(assigner.custom().unwrap().cluster_of("late").is_none());
    }
}
