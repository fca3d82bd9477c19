//! Core library for the influence graph explorer: an accumulated graph built
//! across incremental fetches, cluster assignment, and deterministic layout.

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod layout;
pub mod storage;

pub use anyhow::{Result, anyhow};

pub use cluster::{ClusterAssigner, ClusterMode, CustomCluster, CustomClusters};
pub use config::LayoutConfig;
pub use data::{Creator, FetchDirection, FetchResult, Item, Relation};
pub use error::{ClusterError, DataError};
pub use graph::{
    AccumulatedGraph, Category, Edge, EdgeKey, GraphCommand, GraphStore, IngestionMerger, Node, Position,
};
pub use layout::{ClusterLookup, LayoutEngine, LayoutRequest};
