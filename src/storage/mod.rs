//! Snapshot export for the command-line tool

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty, Value};

use crate::cluster::metrics;
use crate::graph::AccumulatedGraph;

/// Build the JSON document describing a positioned snapshot
pub fn snapshot_json(graph: &AccumulatedGraph) -> Value {
    let sizes = metrics::cluster_sizes(graph.clusters(), graph.nodes());

    json!({
        "summary": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "cluster_mode": graph.clusters().mode(),
            "largest_cluster_size": metrics::largest_cluster(&sizes),
            "focus": graph.focus(),
            "selected": graph.selected(),
        },
        "nodes": graph.nodes().values().collect::<Vec<_>>(),
        "edges": graph.edges().values().map(|edge| {
            json!({
                "id": edge.key().to_string(),
                "edge": edge,
                "highlighted": graph.highlight().contains(&edge.key()),
            })
        }).collect::<Vec<_>>(),
        "clusters": sizes.iter().map(|(name, size)| json!({ "name": name, "size": size })).collect::<Vec<_>>(),
        "custom_clusters": graph.custom_clusters(),
        "expanded": graph.expanded(),
        "highlight": graph.highlight().iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

/// Write the snapshot to `path`, creating parent directories as needed
pub fn save_snapshot(graph: &AccumulatedGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    log::info!(
        "Saving snapshot with {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&snapshot_json(graph))?.as_bytes())?;

    Ok(())
}
