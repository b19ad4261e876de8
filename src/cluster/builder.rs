//! Connected component discovery and chunking

use std::collections::{HashMap, VecDeque};

use crate::cluster::Cluster;
use crate::data::PublicationRecord;
use crate::graph::ReferenceIndex;

/// Discover clusters over the citation graph.
///
/// References are treated as undirected for connectivity: two records are
/// connected if either cites the other. Components are found by BFS starting
/// from the first unvisited record in input order, so discovery order (and
/// cluster numbering) is reproducible for identical input. Each component is
/// then split into consecutive chunks of at most `max_cluster_size` members;
/// chunks smaller than `min_cluster_size` are filtered out.
///
/// References to ids not present in `records` are skipped silently.
pub fn build_clusters(
    records: &[PublicationRecord],
    index: &ReferenceIndex,
    max_cluster_size: usize,
    min_cluster_size: usize,
) -> Vec<Cluster> {
    let id_to_position: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id.as_str(), position))
        .collect();

    let mut visited = vec![false; records.len()];
    let mut clusters = Vec::new();

    for start in 0..records.len() {
        if visited[start] {
            continue;
        }

        // One BFS discovers one connected component; members are collected
        // in the order they enter the visited set.
        let mut component = Vec::new();
        let mut queue = VecDeque::new();

        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(current);

            for neighbor_id in index.neighbors_of(&records[current].id) {
                // Dangling references resolve to nothing and are ignored
                let Some(&neighbor) = id_to_position.get(neighbor_id.as_str()) else {
                    continue;
                };

                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        // Chunking is a presentation compromise: boundaries follow discovery
        // order and make no attempt to preserve sub-cluster connectivity.
        for chunk in component.chunks(max_cluster_size) {
            if chunk.len() < min_cluster_size {
                continue;
            }

            clusters.push(Cluster {
                index: clusters.len(),
                members: chunk.to_vec(),
                size: chunk.len(),
            });
        }
    }

    log::info!(
        "Built {} clusters from {} records (max size {}, min size {})",
        clusters.len(),
        records.len(),
        max_cluster_size,
        min_cluster_size
    );

    clusters
}
