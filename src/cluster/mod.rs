//! Cluster discovery module

pub mod builder;

use serde::{Serialize, Deserialize};

pub use builder::build_clusters;

/// One connected component of the citation graph, or a bounded-size chunk
/// of an oversized component, treated as a single spatial unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Ordinal of this cluster within the pass
    pub index: usize,

    /// Members as indices into the pass's record list, in discovery order
    pub members: Vec<usize>,

    /// Size of the cluster
    pub size: usize,
}
