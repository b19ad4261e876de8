//! Results persistence module

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

use crate::config::Config;
use crate::pipeline::PassOutput;

/// Save a pass result to the specified directory
pub fn save_results(output: &PassOutput, config: &Config, output_dir: &str) -> Result<()> {
    log::info!("Saving pass {} results to {}", output.pass, output_dir);

    fs::create_dir_all(output_dir)?;

    save_layout(output, output_dir)?;
    save_summary(output, config, output_dir)?;
    save_clusters(output, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the {nodes, edges} structure consumed by the rendering layer
fn save_layout(output: &PassOutput, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("layout.json");
    let mut file = File::create(path)?;

    file.write_all(to_string_pretty(&output.graph)?.as_bytes())?;

    Ok(())
}

/// Save summary statistics for the pass
fn save_summary(output: &PassOutput, config: &Config, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = json!({
        "pass": output.pass,
        "stats": output.stats,
        "config": {
            "topology": config.topology,
            "max_cluster_size": config.max_cluster_size,
            "min_cluster_size": config.min_cluster_size,
            "sort_topics": config.sort_topics,
            "seed": config.seed,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save one member listing per cluster
fn save_clusters(output: &PassOutput, output_dir: &str) -> Result<()> {
    let clusters_dir = Path::new(output_dir).join("clusters");
    fs::create_dir_all(&clusters_dir)?;

    // Group node ids by cluster ordinal
    let mut members: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for node in &output.graph.nodes {
        members.entry(node.cluster).or_default().push(&node.id);
    }

    for (cluster, ids) in &members {
        let path = clusters_dir.join(format!("cluster_{}.json", cluster));
        let mut file = File::create(path)?;

        let cluster_json = json!({
            "index": cluster,
            "size": ids.len(),
            "members": ids,
        });

        file.write_all(to_string_pretty(&cluster_json)?.as_bytes())?;
    }

    Ok(())
}
