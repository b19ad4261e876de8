//! Configuration for the clustering & layout engine

use crate::color::ColorScheme;
use crate::layout::TopologyMode;

/// All options recognized by a layout pass
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum members per cluster; oversized components are chunked
    pub max_cluster_size: usize,

    /// Minimum cluster size to keep after chunking (1 keeps singletons)
    pub min_cluster_size: usize,

    /// Spatial topology used to place cluster anchors
    pub topology: TopologyMode,

    /// Gradient or palette used to color topics
    pub color_scheme: ColorScheme,

    /// Sort distinct topics lexically instead of first-seen order
    pub sort_topics: bool,

    /// Edge length of one grid cell
    pub grid_cell_span: f64,

    /// Radial distance between consecutive rings
    pub ring_spacing: f64,

    /// Radius of the disk for disk topology
    pub disk_radius: f64,

    /// Side length of the square for unconstrained topology
    pub bounding_square_size: f64,

    /// Seed for the random topologies; None draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cluster_size: 10,
            min_cluster_size: 1,
            topology: TopologyMode::Grid,
            color_scheme: ColorScheme::default(),
            sort_topics: false,
            grid_cell_span: 400.0,
            ring_spacing: 300.0,
            disk_radius: 800.0,
            bounding_square_size: 1000.0,
            seed: None,
        }
    }
}
