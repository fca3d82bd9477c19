//! Tag-derived clusters

use indexmap::IndexSet;

use crate::cluster::{RESEARCH_FOCUS, UNCATEGORIZED};
use crate::graph::Node;

/// Union of every tag present, always led by "Research Focus"
pub fn visible_clusters<'a, I>(nodes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut visible: IndexSet<&str> = IndexSet::new();
    visible.insert(RESEARCH_FOCUS);

    for node in nodes {
        for tag in &node.clusters {
            visible.insert(tag.as_str());
        }
    }

    visible.into_iter().map(str::to_string).collect()
}

/// Ids of nodes tagged with `cluster`. A node may belong to several.
pub fn members<'a, I>(nodes: I, cluster: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes
        .into_iter()
        .filter(|node| node.clusters.iter().any(|tag| tag == cluster))
        .map(|node| node.id.as_str())
        .collect()
}

/// The cluster that decides a node's layout band
pub fn primary_cluster(node: &Node) -> &str {
    node.clusters
        .first()
        .map(String::as_str)
        .unwrap_or(UNCATEGORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;

    #[test]
    fn research_focus_is_always_visible() {
        let nodes: Vec<Node> = Vec::new();
        assert_eq!(visible_clusters(&nodes), vec![RESEARCH_FOCUS]);
    }

    #[test]
    fn multi_tag_nodes_join_every_cluster() {
        let nodes = vec![
            Node::new("a", "A", Category::Influence).with_clusters(["Cinema", "Music"]),
            Node::new("b", "B", Category::Influence).with_clusters(["Music"]),
        ];

        assert_eq!(visible_clusters(&nodes), vec![RESEARCH_FOCUS, "Cinema", "Music"]);
        assert_eq!(members(&nodes, "Music"), vec!["a", "b"]);
        assert_eq!(members(&nodes, "Cinema"), vec!["a"]);
        assert_eq!(primary_cluster(&nodes[0]), "Cinema");
    }

    #[test]
    fn untagged_nodes_fall_into_uncategorized() {
        let node = Node::new("x", "X", Category::Influence);
        assert_eq!(primary_cluster(&node), UNCATEGORIZED);
    }
}
