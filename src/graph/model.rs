//! Node and edge records held by the accumulated graph

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Creator;

/// Role of a node in the exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Queried directly at some point
    Main,
    /// Reached through a relation
    Influence,
}

/// Canvas coordinates assigned by the layout engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A creative item in the accumulated graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: String,

    pub name: String,

    pub category: Category,

    /// Release year, when known
    pub year: Option<i32>,

    /// Unset until the first layout pass; preserved across merges
    pub position: Option<Position>,

    /// Automatic cluster tags, first tag decides the layout band
    pub clusters: Vec<String>,

    pub description: Option<String>,

    /// Auto-detected kind of item (song, film, technique, ...)
    pub item_type: Option<String>,

    /// Known only for items that have been fetched as the main item
    #[serde(default)]
    pub creators: Vec<Creator>,
}

impl Node {
    /// Create an unplaced node without tags or metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            year: None,
            position: None,
            clusters: Vec::new(),
            description: None,
            item_type: None,
            creators: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_clusters<I, S>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clusters = clusters.into_iter().map(Into::into).collect();
        self
    }

    /// Take every non-positional field from `update`, keeping this node's
    /// position and category. An update without creators keeps the known ones.
    pub fn refresh_from(&mut self, update: Node) {
        self.name = update.name;
        self.year = update.year;
        self.clusters = update.clusters;
        self.description = update.description;
        self.item_type = update.item_type;
        if !update.creators.is_empty() {
            self.creators = update.creators;
        }
    }
}

/// Identity of a directed edge: the ordered (source, target) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when `node` is either endpoint
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.source, self.target)
    }
}

/// A directed influence relation between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,

    /// Always within [0, 1]
    pub confidence: f64,

    pub influence_type: String,
    pub category: String,
    pub explanation: String,

    /// macro / micro / nano
    pub scope: Option<String>,

    /// Where the claim comes from
    pub reference: Option<String>,

    pub year_of_influence: Option<i32>,
}

impl Edge {
    /// Create an edge with the given confidence clamped into [0, 1]
    pub fn new(source: impl Into<String>, target: impl Into<String>, confidence: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            confidence: clamp_confidence(confidence),
            influence_type: String::new(),
            category: String::new(),
            explanation: String::new(),
            scope: None,
            reference: None,
            year_of_influence: None,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source.clone(), self.target.clone())
    }
}

/// NaN counts as no confidence at all
pub(crate) fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
