//! Cluster anchor placement and graph assembly

pub mod topology;
pub mod assemble;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use assemble::{assemble, LayoutEdge, LayoutGraph, LayoutNode};
pub use topology::place_anchors;

/// Geometric scheme used to distribute cluster anchors in the plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyMode {
    /// Square grid of cell centers, centered on the origin
    Grid,

    /// Concentric rings with logarithmically growing population
    Ring,

    /// Uniform random points inside a disk
    Disk,

    /// Independent uniform random points inside a bounding square
    Unconstrained,
}

impl FromStr for TopologyMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grid" => Ok(TopologyMode::Grid),
            "ring" => Ok(TopologyMode::Ring),
            "disk" => Ok(TopologyMode::Disk),
            "unconstrained" => Ok(TopologyMode::Unconstrained),
            other => Err(format!(
                "unknown topology '{}' (expected grid, ring, disk or unconstrained)",
                other
            )),
        }
    }
}

impl fmt::Display for TopologyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopologyMode::Grid => "grid",
            TopologyMode::Ring => "ring",
            TopologyMode::Disk => "disk",
            TopologyMode::Unconstrained => "unconstrained",
        };
        f.write_str(name)
    }
}

/// Fixed target coordinate assigned to one cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}
