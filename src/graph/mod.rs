//! Accumulated graph model, ingestion and edge queries

pub mod highlight;
pub mod merge;
pub mod model;
pub mod store;

pub use highlight::{ExpansionCounts, HighlightSet};
pub use merge::{GraphDelta, IngestionMerger};
pub use model::{Category, Edge, EdgeKey, Node, Position};
pub use store::{AccumulatedGraph, GraphCommand, GraphStore};
