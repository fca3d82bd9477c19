//! Ring search around the canvas center for the unclustered natural view

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::LayoutConfig;
use crate::graph::{Node, Position};
use crate::layout::LayoutRequest;

/// Place nodes one at a time on rings of growing radius.
///
/// Ring 0 is the center itself. On each later ring a fixed number of
/// angular slots, rotated by a random phase, is tried in order; the first
/// slot inside the canvas margins and at least `min_separation` away from
/// every placed node wins. Nodes that find no slot within `max_rings` go on
/// an even angular distribution at the fallback radius.
pub fn radial<R: Rng + ?Sized>(
    nodes: &[Node],
    request: &LayoutRequest<'_>,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Position> {
    let center = Position::new(request.width / 2.0, request.height / 2.0);
    let slots = config.angular_slots.max(1);
    let fallback_radius = config
        .fallback_radius
        .min(request.width.min(request.height) / 2.0 - config.canvas_margin)
        .max(0.0);
    let fallback_phase = rng.gen::<f64>() * TAU;

    let mut placed: Vec<Position> = Vec::with_capacity(nodes.len());
    let mut fallbacks = 0usize;

    for (index, _) in nodes.iter().enumerate() {
        let phase = rng.gen::<f64>() * TAU;
        let free = (0..config.max_rings).find_map(|ring| {
            let radius = ring as f64 * config.ring_step;
            let ring_slots = if ring == 0 { 1 } else { slots };

            (0..ring_slots)
                .map(|slot| {
                    let angle = phase + TAU * slot as f64 / ring_slots as f64;
                    Position::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                })
                .find(|candidate| {
                    within_margins(candidate, request, config.canvas_margin)
                        && placed
                            .iter()
                            .all(|other| other.distance(candidate) > config.min_separation)
                })
        });

        let position = free.unwrap_or_else(|| {
            fallbacks += 1;
            let angle = fallback_phase + TAU * index as f64 / nodes.len() as f64;
            Position::new(
                center.x + fallback_radius * angle.cos(),
                center.y + fallback_radius * angle.sin(),
            )
        });
        placed.push(position);
    }

    if fallbacks > 0 {
        log::debug!("{} of {} nodes used the radial fallback", fallbacks, nodes.len());
    }

    placed
}

fn within_margins(position: &Position, request: &LayoutRequest<'_>, margin: f64) -> bool {
    position.x >= margin
        && position.x <= request.width - margin
        && position.y >= margin
        && position.y <= request.height - margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nodes(count: usize) -> Vec<Node> {
        (0..count)
            .map(|i| Node::new(format!("n{i}"), "n", Category::Influence))
            .collect()
    }

    #[test]
    fn first_node_takes_the_center() {
        let mut rng = StdRng::seed_from_u64(0);
        let request = LayoutRequest::new(800.0, 600.0);
        let positions = radial(&nodes(1), &request, &LayoutConfig::default(), &mut rng);
        assert_eq!(positions, vec![Position::new(400.0, 300.0)]);
    }

    #[test]
    fn ring_placements_respect_separation() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let request = LayoutRequest::new(1200.0, 900.0);
        let positions = radial(&nodes(20), &request, &config, &mut rng);

        assert_eq!(positions.len(), 20);
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(b) > config.min_separation);
            }
        }
    }

    #[test]
    fn crowded_canvas_falls_back_but_places_everyone() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let request = LayoutRequest::new(200.0, 200.0);
        let positions = radial(&nodes(40), &request, &config, &mut rng);

        assert_eq!(positions.len(), 40);
        assert!(positions.iter().all(Position::is_finite));
    }

    #[test]
    fn canvas_smaller_than_margins_stays_finite() {
        let mut rng = StdRng::seed_from_u64(2);
        let request = LayoutRequest::new(10.0, 10.0);
        let positions = radial(&nodes(3), &request, &LayoutConfig::default(), &mut rng);

        assert!(positions.iter().all(|p| *p == Position::new(5.0, 5.0)));
    }
}
