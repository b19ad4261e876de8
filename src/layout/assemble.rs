//! Final graph assembly

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::cluster::Cluster;
use crate::color::ColorAssignment;
use crate::data::PublicationRecord;
use crate::layout::Anchor;

/// A publication record enriched with its anchor, cluster and color.
/// Owned by the pass output; the rendering layer consumes it read-only.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub topics: Vec<String>,

    /// Anchor coordinate handed to the physics layer as the target position
    pub x: f64,
    pub y: f64,

    /// Ordinal of the cluster this node belongs to
    pub cluster: usize,

    /// Representative color derived from the first topic
    pub color: String,
}

/// A rendered edge; both endpoints always resolve to nodes in the same cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

/// The full output of one pass, consumed by the rendering collaborator
#[derive(Debug, Clone, Serialize)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Combine clusters, anchors and colors into the final node and edge sets.
///
/// Every cluster member becomes one node carrying the cluster's anchor.
/// Edges are emitted in two passes: reference edges restricted to pairs in
/// the same cluster (cross-cluster references are dropped, by design), then
/// a star of fallback edges from each member to its cluster's first member
/// so every multi-node cluster renders as a connected subgraph even where
/// chunking severed its references. Duplicate same-direction edges are
/// emitted once.
pub fn assemble(
    records: &[PublicationRecord],
    clusters: &[Cluster],
    anchors: &[Anchor],
    colors: &ColorAssignment,
) -> LayoutGraph {
    let position_of: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id.as_str(), position))
        .collect();

    // Record position -> cluster ordinal, for members of surviving clusters
    let mut cluster_of: HashMap<usize, usize> = HashMap::new();
    for cluster in clusters {
        for &member in &cluster.members {
            cluster_of.insert(member, cluster.index);
        }
    }

    let mut nodes = Vec::new();
    for cluster in clusters {
        let anchor = anchors[cluster.index];

        for &member in &cluster.members {
            let record = &records[member];
            nodes.push(LayoutNode {
                id: record.id.clone(),
                title: record.title.clone(),
                authors: record.authors.clone(),
                date: record.date.clone(),
                url: record.url.clone(),
                topics: record.topics.clone(),
                x: anchor.x,
                y: anchor.y,
                cluster: cluster.index,
                color: colors.color_of_record(record).to_string(),
            });
        }
    }

    let mut edges = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    // Pass 1: reference edges between same-cluster pairs
    for cluster in clusters {
        for &member in &cluster.members {
            let record = &records[member];

            for reference in &record.references {
                let Some(&target) = position_of.get(reference.as_str()) else {
                    continue;
                };
                if target == member {
                    continue;
                }
                if cluster_of.get(&target) != Some(&cluster.index) {
                    continue;
                }
                if seen.insert((member, target)) {
                    edges.push(LayoutEdge {
                        source: record.id.clone(),
                        target: records[target].id.clone(),
                    });
                }
            }
        }
    }

    // Pass 2: fallback star keeping each cluster visually connected
    for cluster in clusters {
        let Some((&first, rest)) = cluster.members.split_first() else {
            continue;
        };

        for &member in rest {
            if seen.insert((member, first)) {
                edges.push(LayoutEdge {
                    source: records[member].id.clone(),
                    target: records[first].id.clone(),
                });
            }
        }
    }

    log::info!(
        "Assembled layout graph with {} nodes and {} edges",
        nodes.len(),
        edges.len()
    );

    LayoutGraph { nodes, edges }
}
