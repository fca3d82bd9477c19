//! Deterministic 2D placement of graph nodes.
//!
//! Four geometric strategies cover the view-mode combinations; banded
//! strategies resolve membership either from node tags or from custom
//! clusters. Randomness (natural-mode jitter, radial phase) comes from an
//! injectable [`rand::Rng`], so a fixed seed reproduces coordinates exactly.

pub mod bands;
pub mod chronological;
pub mod radial;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cluster::{automatic, CustomClusters, RESEARCH_FOCUS, RESEARCH_FOCUS_ID, UNCATEGORIZED_ID};
use crate::config::LayoutConfig;
use crate::graph::{Node, Position};

/// How banded layouts find a node's cluster
#[derive(Debug, Clone, Copy)]
pub enum ClusterLookup<'a> {
    /// First tag on the node (automatic clustering)
    Tags,
    /// Explicit membership (custom clustering)
    Custom(&'a CustomClusters),
}

impl<'a> ClusterLookup<'a> {
    /// Key of the band holding `node`
    pub fn band_key<'n>(&self, node: &'n Node) -> &'n str
    where
        'a: 'n,
    {
        match *self {
            ClusterLookup::Tags => automatic::primary_cluster(node),
            ClusterLookup::Custom(custom) => custom
                .cluster_of(&node.id)
                .map(|cluster| cluster.id.as_str())
                .unwrap_or(UNCATEGORIZED_ID),
        }
    }

    /// Key of the band that sits at the horizontal median
    pub fn focus_key(&self) -> &'static str {
        match *self {
            ClusterLookup::Tags => RESEARCH_FOCUS,
            ClusterLookup::Custom(_) => RESEARCH_FOCUS_ID,
        }
    }
}

/// Canvas size and view mode for one layout pass
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub width: f64,
    pub height: f64,
    pub clustering: bool,
    pub chronological: bool,
    pub clusters: ClusterLookup<'a>,
}

impl<'a> LayoutRequest<'a> {
    /// Unclustered request with tag lookup
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            clustering: false,
            chronological: false,
            clusters: ClusterLookup::Tags,
        }
    }

    pub fn clustered(mut self, clustering: bool) -> Self {
        self.clustering = clustering;
        self
    }

    pub fn chronological(mut self, chronological: bool) -> Self {
        self.chronological = chronological;
        self
    }

    pub fn with_clusters(mut self, clusters: ClusterLookup<'a>) -> Self {
        self.clusters = clusters;
        self
    }

    pub fn strategy(&self) -> Strategy {
        match (self.clustering, self.chronological) {
            (true, true) => Strategy::BandedChronological,
            (true, false) => Strategy::BandedNatural,
            (false, true) => Strategy::Chronological,
            (false, false) => Strategy::Radial,
        }
    }

    /// Zero-area or non-finite canvases get no positions
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Placement strategy selected by the view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BandedChronological,
    BandedNatural,
    Chronological,
    Radial,
}

/// Computes node positions; owns the random source used for jitter
#[derive(Debug, Clone)]
pub struct LayoutEngine<R = StdRng> {
    config: LayoutConfig,
    rng: R,
}

impl LayoutEngine<StdRng> {
    /// Engine seeded from system entropy
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose output is fully determined by `seed`
    pub fn seeded(config: LayoutConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LayoutEngine<R> {
    pub fn with_rng(config: LayoutConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Assign a finite position to every node.
    ///
    /// Empty input and degenerate canvases return without touching anything.
    pub fn position_nodes(&mut self, nodes: &mut [Node], request: &LayoutRequest<'_>) {
        if nodes.is_empty() || request.is_degenerate() {
            log::debug!(
                "Skipping layout: {} nodes on a {}x{} canvas",
                nodes.len(),
                request.width,
                request.height
            );
            return;
        }

        let strategy = request.strategy();
        log::debug!("Laying out {} nodes with {:?}", nodes.len(), strategy);

        let positions = self.compute(nodes, request, strategy);
        for (node, position) in nodes.iter_mut().zip(positions) {
            node.position = Some(position);
        }
    }

    /// Positions aligned with `nodes`, without writing them back
    pub fn compute(&mut self, nodes: &[Node], request: &LayoutRequest<'_>, strategy: Strategy) -> Vec<Position> {
        match strategy {
            Strategy::BandedChronological => bands::banded_chronological(nodes, request, &self.config),
            Strategy::BandedNatural => bands::banded_natural(nodes, request, &self.config, &mut self.rng),
            Strategy::Chronological => {
                chronological::chronological(nodes, request, &self.config, &mut self.rng)
            }
            Strategy::Radial => radial::radial(nodes, request, &self.config, &mut self.rng),
        }
    }
}

/// Symmetric uniform offset in `[-bound, bound]`; zero when the bound is not positive
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}
