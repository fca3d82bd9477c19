//! Vertical band partitioning for clustered layouts

use indexmap::IndexMap;
use rand::Rng;

use crate::cluster::{automatic, UNCATEGORIZED};
use crate::config::LayoutConfig;
use crate::graph::{Node, Position};
use crate::layout::chronological::{spread, YearScale};
use crate::layout::{jitter, ClusterLookup, LayoutRequest};

/// One cluster's vertical slice of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub key: String,
    pub left: f64,
    pub right: f64,
}

impl Band {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }

    /// Largest horizontal offset from the center that stays clear of the edges
    pub fn half_room(&self, margin: f64) -> f64 {
        (self.width() / 2.0 - margin).max(0.0)
    }
}

/// Equal-width bands, left to right, keyed by cluster
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    bands: IndexMap<String, Band>,
}

impl BandLayout {
    /// Partition `width` into one band per cluster present in `nodes`, with
    /// the focus band moved to the horizontal median.
    pub fn new(nodes: &[Node], request: &LayoutRequest<'_>) -> Self {
        let keys = band_keys(nodes, &request.clusters);
        Self::partition(keys, request.clusters.focus_key(), request.width)
    }

    pub fn partition(mut keys: Vec<String>, focus_key: &str, width: f64) -> Self {
        match keys.iter().position(|key| key == focus_key) {
            Some(index) => {
                let focus = keys.remove(index);
                let median = (keys.len() + 1) / 2;
                keys.insert(median, focus);
            }
            None if keys.is_empty() => keys.push(focus_key.to_string()),
            None => {}
        }

        let band_width = width / keys.len() as f64;
        let bands = keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| {
                let band = Band {
                    key: key.clone(),
                    left: band_width * i as f64,
                    right: band_width * (i + 1) as f64,
                };
                (key, band)
            })
            .collect();

        Self { bands }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.values()
    }

    pub fn get(&self, key: &str) -> Option<&Band> {
        self.bands.get(key)
    }

    /// Index of the band holding `node`; unknown keys land in the first band
    pub fn index_of(&self, node: &Node, lookup: &ClusterLookup<'_>) -> usize {
        self.bands.get_index_of(lookup.band_key(node)).unwrap_or(0)
    }

    fn band(&self, index: usize) -> &Band {
        &self.bands[index]
    }
}

/// Band keys in display order before the focus band is moved
pub fn band_keys(nodes: &[Node], lookup: &ClusterLookup<'_>) -> Vec<String> {
    match lookup {
        ClusterLookup::Tags => {
            let mut keys = automatic::visible_clusters(nodes);
            let untagged = nodes.iter().any(|node| node.clusters.is_empty());
            if untagged && !keys.iter().any(|key| key == UNCATEGORIZED) {
                keys.push(UNCATEGORIZED.to_string());
            }
            keys
        }
        ClusterLookup::Custom(custom) => custom.iter().map(|cluster| cluster.id.clone()).collect(),
    }
}

/// Nodes with a year on the shared year scale inside their band, fanned out
/// around the band center when they share a year; yearless nodes spread
/// across their band's slice of the bottom strip.
pub fn banded_chronological(
    nodes: &[Node],
    request: &LayoutRequest<'_>,
    config: &LayoutConfig,
) -> Vec<Position> {
    let layout = BandLayout::new(nodes, request);
    let scale = YearScale::from_nodes(nodes, config, request.height);
    let strip_y = config.strip_y(request.height);

    let mut same_year: IndexMap<(i32, usize), Vec<usize>> = IndexMap::new();
    let mut yearless: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for (i, node) in nodes.iter().enumerate() {
        let band = layout.index_of(node, &request.clusters);
        match node.year {
            Some(year) => same_year.entry((year, band)).or_default().push(i),
            None => yearless.entry(band).or_default().push(i),
        }
    }

    let mut positions = vec![Position::new(0.0, 0.0); nodes.len()];

    for ((year, band), members) in &same_year {
        let band = layout.band(*band);
        let y = scale.map(|scale| scale.y(*year)).unwrap_or(strip_y);
        let spacing = fan_spacing(members.len(), config.fan_spacing, band.half_room(config.band_margin));
        let middle = (members.len() as f64 - 1.0) / 2.0;

        for (j, &i) in members.iter().enumerate() {
            positions[i] = Position::new(band.center() + (j as f64 - middle) * spacing, y);
        }
    }

    for (band, members) in &yearless {
        let band = layout.band(*band);
        let half_room = band.half_room(config.band_margin);
        let xs = spread(members.len(), band.center() - half_room, band.center() + half_room);

        for (&i, x) in members.iter().zip(xs) {
            positions[i] = Position::new(x, strip_y);
        }
    }

    positions
}

/// Nodes spread evenly down their band in encounter order, each with a
/// bounded horizontal jitter that never crosses the band edge.
pub fn banded_natural<R: Rng + ?Sized>(
    nodes: &[Node],
    request: &LayoutRequest<'_>,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Position> {
    let layout = BandLayout::new(nodes, request);
    let band_of: Vec<usize> = nodes
        .iter()
        .map(|node| layout.index_of(node, &request.clusters))
        .collect();

    let (mut top, mut bottom) = (config.padding_top, request.height - config.padding_bottom);
    if bottom <= top {
        (top, bottom) = (0.0, request.height);
    }

    let mut counts = vec![0usize; layout.len()];
    for &band in &band_of {
        counts[band] += 1;
    }
    let rows: Vec<Vec<f64>> = counts.iter().map(|&count| spread(count, top, bottom)).collect();

    let mut placed = vec![0usize; layout.len()];
    band_of
        .iter()
        .map(|&index| {
            let band = layout.band(index);
            let y = rows[index][placed[index]];
            placed[index] += 1;

            let bound = config.natural_jitter.min(band.half_room(config.band_margin));
            Position::new(band.center() + jitter(rng, bound), y)
        })
        .collect()
}

/// Gap between fanned-out nodes, shrunk so the outermost stay within `half_room`
fn fan_spacing(count: usize, preferred: f64, half_room: f64) -> f64 {
    if count < 2 {
        return preferred;
    }
    let widest = 2.0 * half_room / (count as f64 - 1.0);
    preferred.min(widest).max(0.0)
}
