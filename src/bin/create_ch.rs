use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use ch_routing::{prepare, ContractionParams, RoadGraph, WeightingKind};
use clap::Parser;
use log::info;

/// Builds a contraction hierarchy for a road graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in the text graph format
    #[arg(short, long)]
    graph: PathBuf,
    /// Outfile in .bincode format
    #[arg(short, long)]
    contracted_graph: PathBuf,
    #[arg(short, long, value_enum, default_value_t = WeightingKind::Shortest)]
    weighting: WeightingKind,
    /// Contraction parameters in .json format
    #[arg(short, long)]
    params: Option<PathBuf>,
    /// Overrides the priority function of the parameters, e.g. E:10_O:50_N:1
    #[arg(long)]
    priority_function: Option<String>,
    #[arg(long)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => ContractionParams::from_json_file(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?,
        None => ContractionParams::default(),
    };
    if let Some(priority_function) = args.priority_function {
        params.priority_function = priority_function;
    }
    params.show_progress |= args.progress;

    info!("loading graph");
    let start = Instant::now();
    let graph = RoadGraph::from_file(&args.graph)
        .with_context(|| format!("reading graph from {}", args.graph.display()))?;
    info!("it took {:?} to load graph", start.elapsed());

    let weighting = args.weighting.weighting();
    let prepared = prepare(&graph, weighting.as_ref(), &params)?;
    info!("{} shortcuts", prepared.number_of_shortcuts());

    info!("writing contracted graph to file");
    prepared
        .write_to_file(&args.contracted_graph)
        .with_context(|| format!("writing {}", args.contracted_graph.display()))?;

    Ok(())
}
