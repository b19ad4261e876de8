use anyhow::Result;
use clap::Parser;

mod color;
mod config;
mod data;
mod graph;
mod cluster;
mod layout;
mod pipeline;
mod storage;

use color::ColorScheme;
use config::Config;
use data::json::JsonFileSource;
use layout::TopologyMode;
use pipeline::Pipeline;

#[derive(Parser, Debug)]
#[clap(
    name = "citation-layout",
    about = "Clustering and layout engine for citation network visualization"
)]
struct Cli {
    /// Path to input JSON file with publication records
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "layout_results")]
    output_dir: String,

    /// Topology used to place cluster anchors
    #[clap(long, default_value = "grid")]
    topology: TopologyMode,

    /// Maximum members per cluster; larger components are chunked
    #[clap(long, default_value = "10")]
    max_cluster_size: usize,

    /// Minimum cluster size to keep (1 keeps singletons)
    #[clap(long, default_value = "1")]
    min_cluster_size: usize,

    /// Gradient stops for topic colors, e.g. "#0000FF,#800080"
    #[clap(long, value_delimiter = ',')]
    gradient: Option<Vec<String>>,

    /// Fixed topic palette; overrides --gradient when given
    #[clap(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// Sort topics lexically before assigning colors
    #[clap(long)]
    sort_topics: bool,

    /// Edge length of one grid cell
    #[clap(long, default_value = "400")]
    grid_cell_span: f64,

    /// Radial distance between consecutive rings
    #[clap(long, default_value = "300")]
    ring_spacing: f64,

    /// Disk radius for the disk topology
    #[clap(long, default_value = "800")]
    disk_radius: f64,

    /// Square side length for the unconstrained topology
    #[clap(long, default_value = "1000")]
    bounding_square_size: f64,

    /// Seed for the random topologies (reproducible output)
    #[clap(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Starting citation layout pass");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);
    log::info!("Topology: {}", args.topology);

    let color_scheme = if let Some(palette) = args.palette {
        ColorScheme::Palette(palette)
    } else if let Some(stops) = args.gradient {
        ColorScheme::Gradient(stops)
    } else {
        ColorScheme::default()
    };

    let config = Config {
        max_cluster_size: args.max_cluster_size,
        min_cluster_size: args.min_cluster_size,
        topology: args.topology,
        color_scheme,
        sort_topics: args.sort_topics,
        grid_cell_span: args.grid_cell_span,
        ring_spacing: args.ring_spacing,
        disk_radius: args.disk_radius,
        bounding_square_size: args.bounding_square_size,
        seed: args.seed,
    };

    let source = JsonFileSource::new(&args.input);
    let mut pipeline = Pipeline::new(config);

    let output = pipeline.run_pass(&source)?;

    if output.stats.dropped_records > 0 {
        log::warn!(
            "{} malformed records were excluded from this pass",
            output.stats.dropped_records
        );
    }

    storage::save_results(&output, pipeline.config(), &args.output_dir)?;

    log::info!("Layout complete. Results saved to {}", args.output_dir);

    Ok(())
}
