//! Cluster statistics

use indexmap::IndexMap;

use crate::cluster::{automatic, ClusterAssigner};
use crate::graph::Node;

/// Member count for each visible cluster, in display order.
///
/// Automatic clusters may overlap, so the counts can sum to more than the
/// node count; custom counts always sum to it.
pub fn cluster_sizes(
    assigner: &ClusterAssigner,
    nodes: &IndexMap<String, Node>,
) -> Vec<(String, usize)> {
    match assigner.custom() {
        Some(custom) => custom
            .iter()
            .map(|cluster| (cluster.name.clone(), cluster.members.len()))
            .collect(),
        None => automatic::visible_clusters(nodes.values())
            .into_iter()
            .map(|name| {
                let size = automatic::members(nodes.values(), &name).len();
                (name, size)
            })
            .collect(),
    }
}

/// Size of the largest visible cluster
pub fn largest_cluster(sizes: &[(String, usize)]) -> usize {
    sizes.iter().map(|(_, size)| *size).max().unwrap_or(0)
}
