//! User-authored, disjoint clusters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cluster::{RESEARCH_FOCUS, RESEARCH_FOCUS_ID, UNCATEGORIZED, UNCATEGORIZED_ID};
use crate::error::ClusterError;
use crate::graph::{Category, Node};

/// A named group of node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCluster {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}

impl CustomCluster {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved(&self.id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.members.iter().any(|member| member == node_id)
    }
}

pub fn is_reserved(cluster_id: &str) -> bool {
    cluster_id == RESEARCH_FOCUS_ID || cluster_id == UNCATEGORIZED_ID
}

/// Ordered set of disjoint custom clusters.
///
/// Every node id appears in exactly one cluster, and the two reserved
/// clusters can be renamed but never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomClusters {
    clusters: Vec<CustomCluster>,
    next_id: u64,
}

impl CustomClusters {
    /// Seed the reserved clusters from an existing node set: the focal node
    /// (or, failing that, the first main node) goes to "Research Focus",
    /// everyone else to "Uncategorized".
    pub fn initialize(nodes: &IndexMap<String, Node>, focus: Option<&str>) -> Self {
        let focus = focus
            .filter(|id| nodes.contains_key(*id))
            .or_else(|| {
                nodes
                    .values()
                    .find(|node| node.category == Category::Main)
                    .map(|node| node.id.as_str())
            });

        let mut research = CustomCluster::new(RESEARCH_FOCUS_ID, RESEARCH_FOCUS);
        let mut uncategorized = CustomCluster::new(UNCATEGORIZED_ID, UNCATEGORIZED);

        for id in nodes.keys() {
            if Some(id.as_str()) == focus {
                research.members.push(id.clone());
            } else {
                uncategorized.members.push(id.clone());
            }
        }

        log::debug!(
            "Custom clusters initialized: {} in focus, {} uncategorized",
            research.members.len(),
            uncategorized.members.len()
        );

        Self {
            clusters: vec![research, uncategorized],
            next_id: 1,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomCluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, cluster_id: &str) -> Option<&CustomCluster> {
        self.clusters.iter().find(|cluster| cluster.id == cluster_id)
    }

    /// The cluster currently holding `node_id`
    pub fn cluster_of(&self, node_id: &str) -> Option<&CustomCluster> {
        self.clusters.iter().find(|cluster| cluster.contains(node_id))
    }

    /// Add an empty cluster and return its id
    pub fn create(&mut self, name: &str) -> Result<String, ClusterError> {
        let name = validate_name(name)?;

        let id = format!("cluster-{}", self.next_id);
        self.next_id += 1;
        self.clusters.push(CustomCluster::new(id.clone(), name));

        log::debug!("Created custom cluster {id}");
        Ok(id)
    }

    /// Rename a cluster; unknown ids are ignored
    pub fn rename(&mut self, cluster_id: &str, name: &str) -> Result<(), ClusterError> {
        let name = validate_name(name)?;

        if let Some(cluster) = self.get_mut(cluster_id) {
            cluster.name = name;
        }
        Ok(())
    }

    /// Delete a cluster, handing its members to "Uncategorized"
    pub fn delete(&mut self, cluster_id: &str) -> Result<(), ClusterError> {
        if is_reserved(cluster_id) {
            log::warn!("Refusing to delete reserved cluster {cluster_id}");
            return Err(ClusterError::ReservedCluster(cluster_id.to_string()));
        }

        let Some(index) = self.clusters.iter().position(|c| c.id == cluster_id) else {
            return Ok(());
        };

        let removed = self.clusters.remove(index);
        if let Some(uncategorized) = self.get_mut(UNCATEGORIZED_ID) {
            uncategorized.members.extend(removed.members);
        }
        Ok(())
    }

    /// Move a node into `target`, removing it from wherever it was.
    /// Unknown targets leave everything untouched.
    pub fn move_node(&mut self, node_id: &str, target: &str) {
        if self.get(target).is_none() {
            return;
        }

        self.remove_member(node_id);
        if let Some(cluster) = self.get_mut(target) {
            cluster.members.push(node_id.to_string());
        }
    }

    /// File a node that is not yet in any cluster under "Uncategorized"
    pub fn place_new(&mut self, node_id: &str) {
        if self.cluster_of(node_id).is_some() {
            return;
        }
        if let Some(uncategorized) = self.get_mut(UNCATEGORIZED_ID) {
            uncategorized.members.push(node_id.to_string());
        }
    }

    pub fn remove_member(&mut self, node_id: &str) {
        for cluster in &mut self.clusters {
            cluster.members.retain(|member| member != node_id);
        }
    }

    /// Bring membership back in line with `nodes`: drop ids that no longer
    /// exist and file unplaced nodes under "Uncategorized".
    pub fn reconcile(&mut self, nodes: &IndexMap<String, Node>) {
        for cluster in &mut self.clusters {
            cluster.members.retain(|member| nodes.contains_key(member));
        }
        for id in nodes.keys() {
            self.place_new(id);
        }
    }

    fn get_mut(&mut self, cluster_id: &str) -> Option<&mut CustomCluster> {
        self.clusters.iter_mut().find(|cluster| cluster.id == cluster_id)
    }
}

fn validate_name(name: &str) -> Result<String, ClusterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClusterError::EmptyName);
    }
    Ok(name.to_string())
}
