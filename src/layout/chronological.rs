//! Shared year scale and the unclustered chronological layout

use rand::Rng;

use crate::config::LayoutConfig;
use crate::graph::{Node, Position};
use crate::layout::{jitter, LayoutRequest};

/// Vertical scale shared by every node with a year: newest at the top,
/// oldest at the bottom, so equal years line up across bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearScale {
    newest: i32,
    oldest: i32,
    top: f64,
    bottom: f64,
}

impl YearScale {
    /// `None` when no node has a year
    pub fn from_nodes(nodes: &[Node], config: &LayoutConfig, height: f64) -> Option<Self> {
        let mut years = nodes.iter().filter_map(|node| node.year);
        let first = years.next()?;
        let (oldest, newest) = years.fold((first, first), |(lo, hi), year| (lo.min(year), hi.max(year)));

        Some(Self {
            newest,
            oldest,
            top: config.scale_top(height),
            bottom: config.scale_bottom(height),
        })
    }

    /// A single distinct year sits halfway down the scale
    pub fn y(&self, year: i32) -> f64 {
        let span = i64::from(self.newest) - i64::from(self.oldest);
        if span == 0 {
            return (self.top + self.bottom) / 2.0;
        }

        let offset = (i64::from(self.newest) - i64::from(year)) as f64 / span as f64;
        self.top + offset.clamp(0.0, 1.0) * (self.bottom - self.top)
    }
}

/// `count` evenly spaced x coordinates strictly inside `[left, right]`
pub fn spread(count: usize, left: f64, right: f64) -> Vec<f64> {
    let step = (right - left) / (count as f64 + 1.0);
    (1..=count).map(|i| left + step * i as f64).collect()
}

/// Nodes with a year on the shared scale around the canvas center, each with
/// a bounded random horizontal offset; yearless nodes evenly spaced along the
/// bottom strip.
pub fn chronological<R: Rng + ?Sized>(
    nodes: &[Node],
    request: &LayoutRequest<'_>,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Position> {
    let scale = YearScale::from_nodes(nodes, config, request.height);
    let center_x = request.width / 2.0;
    let offset_bound = config.chronological_offset.min(center_x - config.padding_x);

    let (mut left, mut right) = (config.padding_x, request.width - config.padding_x);
    if right <= left {
        (left, right) = (0.0, request.width);
    }
    let yearless = nodes.iter().filter(|node| node.year.is_none()).count();
    let mut strip = spread(yearless, left, right).into_iter();
    let strip_y = config.strip_y(request.height);

    nodes
        .iter()
        .map(|node| match (node.year, scale) {
            (Some(year), Some(scale)) => Position::new(center_x + jitter(rng, offset_bound), scale.y(year)),
            _ => Position::new(strip.next().unwrap_or(center_x), strip_y),
        })
        .collect()
}
