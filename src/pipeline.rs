//! Pass driver: fetch, cluster, place, colorize, assemble

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use crate::cluster::build_clusters;
use crate::color::assign_colors;
use crate::config::Config;
use crate::data::{normalize_records, RecordRepository, RecordSource};
use crate::graph::ReferenceIndex;
use crate::layout::{assemble, place_anchors, LayoutGraph};

/// Pass-level failure surfaced to the caller.
///
/// Structural anomalies inside the graph (dangling references, malformed
/// records, empty input) are absorbed during the pass; only total data
/// unavailability reaches this type.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("failed to fetch publication records")]
    Fetch(#[source] anyhow::Error),
}

/// Counters describing what one pass did
#[derive(Debug, Clone, Serialize)]
pub struct PassStats {
    pub record_count: usize,
    pub dropped_records: usize,
    pub cluster_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub topic_count: usize,
}

/// The immutable result of one pass
#[derive(Debug, Clone)]
pub struct PassOutput {
    /// Monotonically increasing pass number
    pub pass: u64,

    pub graph: LayoutGraph,
    pub stats: PassStats,
}

/// Runs the full pipeline, one synchronous pass at a time.
///
/// Every pass recomputes all state from the current record set; there is no
/// incremental path, so re-invocation after a topology or dataset change is
/// idempotent by construction.
pub struct Pipeline {
    config: Config,
    next_pass: u64,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            next_pass: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration used by subsequent passes
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Run one full pass against the given source
    pub fn run_pass(&mut self, source: &dyn RecordSource) -> Result<PassOutput, PassError> {
        let pass = self.next_pass;
        self.next_pass += 1;

        log::info!("Starting layout pass {}", pass);

        let raw = source.fetch().map_err(PassError::Fetch)?;
        let (valid, dropped) = normalize_records(raw);
        let repository = RecordRepository::new(valid);
        let records = repository.records();

        let index = ReferenceIndex::build(records);
        let clusters = build_clusters(
            records,
            &index,
            self.config.max_cluster_size,
            self.config.min_cluster_size,
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let anchors = place_anchors(clusters.len(), &self.config, &mut rng);

        let colors = assign_colors(records, &self.config.color_scheme, self.config.sort_topics);

        let graph = assemble(records, &clusters, &anchors, &colors);

        let stats = PassStats {
            record_count: records.len(),
            dropped_records: dropped,
            cluster_count: clusters.len(),
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            topic_count: colors.topics.len(),
        };

        log::info!(
            "Pass {} complete: {} clusters, {} nodes, {} edges",
            pass,
            stats.cluster_count,
            stats.node_count,
            stats.edge_count
        );

        Ok(PassOutput { pass, graph, stats })
    }
}

/// Holder for the currently applied pass result.
///
/// Publication is last-writer-wins by pass number: a pass that was
/// superseded before finishing can never clobber a newer result, which
/// keeps application of results exactly-once from the renderer's view.
#[derive(Default)]
pub struct OutputSlot {
    applied: Option<(u64, LayoutGraph)>,
}

impl OutputSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pass result; returns false (and drops it) when stale
    pub fn publish(&mut self, output: PassOutput) -> bool {
        if let Some((applied_pass, _)) = &self.applied {
            if output.pass <= *applied_pass {
                log::debug!(
                    "Discarding stale pass {} (pass {} already applied)",
                    output.pass,
                    applied_pass
                );
                return false;
            }
        }

        self.applied = Some((output.pass, output.graph));
        true
    }

    /// The most recently applied graph, if any
    pub fn current(&self) -> Option<&LayoutGraph> {
        self.applied.as_ref().map(|(_, graph)| graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;
    use crate::layout::TopologyMode;
    use anyhow::Result;

    struct StaticSource(Vec<RawRecord>);

    impl RecordSource for StaticSource {
        fn fetch(&self) -> Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl RecordSource for FailingSource {
        fn fetch(&self) -> Result<Vec<RawRecord>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn raw(id: Option<&str>, topics: &[&str], references: &[&str]) -> RawRecord {
        RawRecord {
            id: id.map(String::from),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            references: references.iter().map(|r| r.to_string()).collect(),
            title: None,
            authors: vec![],
            date: None,
            url: None,
        }
    }

    fn grid_config() -> Config {
        Config {
            topology: TopologyMode::Grid,
            seed: Some(9),
            ..Config::default()
        }
    }

    #[test]
    fn full_pass_produces_nodes_and_edges() {
        let source = StaticSource(vec![
            raw(Some("a"), &["AI"], &["b"]),
            raw(Some("b"), &["ML"], &[]),
            raw(Some("c"), &[], &[]),
        ]);
        let mut pipeline = Pipeline::new(grid_config());

        let output = pipeline.run_pass(&source).unwrap();

        assert_eq!(output.stats.record_count, 3);
        assert_eq!(output.stats.cluster_count, 2);
        assert_eq!(output.stats.node_count, 3);
        assert_eq!(output.stats.topic_count, 2);
        assert!(output.stats.edge_count >= 1);
    }

    #[test]
    fn fetch_failure_is_the_only_surfaced_error() {
        let mut pipeline = Pipeline::new(grid_config());
        let error = pipeline.run_pass(&FailingSource).unwrap_err();
        assert!(matches!(error, PassError::Fetch(_)));
    }

    #[test]
    fn malformed_records_are_counted_not_fatal() {
        let source = StaticSource(vec![raw(None, &[], &[]), raw(Some("a"), &[], &[])]);
        let mut pipeline = Pipeline::new(grid_config());

        let output = pipeline.run_pass(&source).unwrap();

        assert_eq!(output.stats.dropped_records, 1);
        assert_eq!(output.stats.record_count, 1);
    }

    #[test]
    fn empty_input_is_an_empty_graph() {
        let source = StaticSource(vec![]);
        let mut pipeline = Pipeline::new(grid_config());

        let output = pipeline.run_pass(&source).unwrap();

        assert!(output.graph.nodes.is_empty());
        assert!(output.graph.edges.is_empty());
    }

    #[test]
    fn consecutive_passes_are_identical_for_non_random_topology() {
        let source = StaticSource(vec![
            raw(Some("a"), &["AI"], &["b"]),
            raw(Some("b"), &["NLP"], &[]),
            raw(Some("c"), &["AI"], &[]),
        ]);
        let mut pipeline = Pipeline::new(grid_config());

        let first = pipeline.run_pass(&source).unwrap();
        let second = pipeline.run_pass(&source).unwrap();

        let positions = |output: &PassOutput| -> Vec<(String, usize, String, f64, f64)> {
            output
                .graph
                .nodes
                .iter()
                .map(|n| (n.id.clone(), n.cluster, n.color.clone(), n.x, n.y))
                .collect()
        };
        assert_eq!(positions(&first), positions(&second));
        assert_eq!(first.graph.edges, second.graph.edges);
    }

    #[test]
    fn output_slot_rejects_stale_passes() {
        let source = StaticSource(vec![raw(Some("a"), &[], &[])]);
        let mut pipeline = Pipeline::new(grid_config());

        let older = pipeline.run_pass(&source).unwrap();
        let newer = pipeline.run_pass(&source).unwrap();

        let mut slot = OutputSlot::new();
        assert!(slot.publish(newer));
        // The older pass finished late; it must not replace the newer result
        assert!(!slot.publish(older));
        assert!(slot.current().is_some());
    }
}
