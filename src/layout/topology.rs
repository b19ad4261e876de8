//! Anchor placement for each topology mode

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::Config;
use crate::layout::{Anchor, TopologyMode};

/// Compute one anchor per cluster according to the configured topology.
///
/// Grid and ring placement is a pure function of the cluster ordinal; disk
/// and unconstrained placement draw from `rng`, so reproducibility there is
/// up to the caller seeding it.
pub fn place_anchors(cluster_count: usize, config: &Config, rng: &mut impl Rng) -> Vec<Anchor> {
    let anchors = match config.topology {
        TopologyMode::Grid => place_grid(cluster_count, config.grid_cell_span),
        TopologyMode::Ring => place_rings(cluster_count, config.ring_spacing),
        TopologyMode::Disk => place_disk(cluster_count, config.disk_radius, rng),
        TopologyMode::Unconstrained => {
            place_unconstrained(cluster_count, config.bounding_square_size, rng)
        }
    };

    log::debug!(
        "Placed {} anchors using {} topology",
        anchors.len(),
        config.topology
    );

    anchors
}

/// Square grid of side ceil(sqrt(n)), cell centers, grid centered on origin
fn place_grid(cluster_count: usize, cell_span: f64) -> Vec<Anchor> {
    let side = (cluster_count as f64).sqrt().ceil() as usize;
    let center = (side.saturating_sub(1)) as f64 / 2.0;

    (0..cluster_count)
        .map(|i| {
            let row = (i / side.max(1)) as f64;
            let col = (i % side.max(1)) as f64;
            Anchor {
                x: (col - center) * cell_span,
                y: (row - center) * cell_span,
            }
        })
        .collect()
}

/// Concentric rings: ring index floor(log2(i/4 + 1)), angular step halving
/// per ring so same-ring spacing stays roughly constant as population grows
fn place_rings(cluster_count: usize, ring_spacing: f64) -> Vec<Anchor> {
    (0..cluster_count)
        .map(|i| {
            let ring = (i as f64 / 4.0 + 1.0).log2().floor();
            let step = TAU / 2f64.powf(ring + 2.0);
            let radius = ring * ring_spacing;
            let angle = i as f64 * step;
            Anchor {
                x: angle.cos() * radius,
                y: angle.sin() * radius,
            }
        })
        .collect()
}

/// Uniform points in a disk; sqrt on the radial draw avoids center bias
fn place_disk(cluster_count: usize, max_radius: f64, rng: &mut impl Rng) -> Vec<Anchor> {
    (0..cluster_count)
        .map(|_| {
            let radius = rng.gen::<f64>().sqrt() * max_radius;
            let angle = rng.gen::<f64>() * TAU;
            Anchor {
                x: angle.cos() * radius,
                y: angle.sin() * radius,
            }
        })
        .collect()
}

/// Independent uniform points in a square centered on the origin
fn place_unconstrained(cluster_count: usize, square_size: f64, rng: &mut impl Rng) -> Vec<Anchor> {
    (0..cluster_count)
        .map(|_| Anchor {
            x: (rng.gen::<f64>() - 0.5) * square_size,
            y: (rng.gen::<f64>() - 0.5) * square_size,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config_with(topology: TopologyMode) -> Config {
        Config {
            topology,
            ..Config::default()
        }
    }

    #[test]
    fn four_clusters_form_a_two_by_two_grid() {
        let mut config = config_with(TopologyMode::Grid);
        config.grid_cell_span = 100.0;
        let mut rng = StdRng::seed_from_u64(0);

        let anchors = place_anchors(4, &config, &mut rng);

        assert_eq!(
            anchors,
            [
                Anchor { x: -50.0, y: -50.0 },
                Anchor { x: 50.0, y: -50.0 },
                Anchor { x: -50.0, y: 50.0 },
                Anchor { x: 50.0, y: 50.0 },
            ]
        );
    }

    #[test]
    fn grid_cells_are_distinct() {
        let config = config_with(TopologyMode::Grid);
        let mut rng = StdRng::seed_from_u64(0);

        let anchors = place_anchors(9, &config, &mut rng);

        for (i, a) in anchors.iter().enumerate() {
            for b in &anchors[i + 1..] {
                assert!(a != b);
            }
        }
    }

    #[test]
    fn first_four_ring_clusters_sit_at_the_origin() {
        let config = config_with(TopologyMode::Ring);
        let mut rng = StdRng::seed_from_u64(0);

        let anchors = place_anchors(4, &config, &mut rng);

        for anchor in &anchors {
            assert_eq!(anchor.x, 0.0);
            assert_eq!(anchor.y, 0.0);
        }
    }

    #[test]
    fn fifth_ring_cluster_lands_on_the_first_ring() {
        let mut config = config_with(TopologyMode::Ring);
        config.ring_spacing = 300.0;
        let mut rng = StdRng::seed_from_u64(0);

        let anchors = place_anchors(5, &config, &mut rng);

        // Cluster 4: ring 1, step 2pi/8, angle 4 * step = pi
        let anchor = anchors[4];
        let radius = (anchor.x * anchor.x + anchor.y * anchor.y).sqrt();
        assert!((radius - 300.0).abs() < 1e-9);
        assert!((anchor.x + 300.0).abs() < 1e-9);
        assert!(anchor.y.abs() < 1e-9);
    }

    #[test]
    fn non_random_topologies_are_deterministic() {
        for topology in [TopologyMode::Grid, TopologyMode::Ring] {
            let config = config_with(topology);
            let mut rng_a = StdRng::seed_from_u64(1);
            let mut rng_b = StdRng::seed_from_u64(2);

            // Different rng states must not matter for these modes
            let first = place_anchors(12, &config, &mut rng_a);
            let second = place_anchors(12, &config, &mut rng_b);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn disk_anchors_stay_within_the_radius() {
        let mut config = config_with(TopologyMode::Disk);
        config.disk_radius = 50.0;
        let mut rng = StdRng::seed_from_u64(7);

        for anchor in place_anchors(200, &config, &mut rng) {
            let radius = (anchor.x * anchor.x + anchor.y * anchor.y).sqrt();
            assert!(radius <= 50.0 + 1e-9);
        }
    }

    #[test]
    fn unconstrained_anchors_stay_within_the_square() {
        let mut config = config_with(TopologyMode::Unconstrained);
        config.bounding_square_size = 80.0;
        let mut rng = StdRng::seed_from_u64(7);

        for anchor in place_anchors(200, &config, &mut rng) {
            assert!(anchor.x.abs() <= 40.0);
            assert!(anchor.y.abs() <= 40.0);
        }
    }

    #[test]
    fn seeded_random_topologies_reproduce() {
        let config = config_with(TopologyMode::Disk);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let first = place_anchors(20, &config, &mut rng_a);
        let second = place_anchors(20, &config, &mut rng_b);
        assert_eq!(first, second);
    }
}
