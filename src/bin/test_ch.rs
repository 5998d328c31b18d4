use std::{
    path::PathBuf,
    sync::atomic::{AtomicU32, Ordering},
};

use anyhow::{bail, Context};
use ch_routing::{
    read_prepared,
    search::{dijkstra::Dijkstra, weights_equal},
    LevelGraph, PathFinding, RoadGraph, ShortestPathRequest,
};
use clap::Parser;
use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rand::prelude::*;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Compares random contraction hierarchy queries against Dijkstra
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in the text graph format
    #[arg(short, long)]
    graph: PathBuf,
    /// Infile in .bincode format
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Number of random queries
    #[arg(short, long, default_value_t = 1_000)]
    number_of_queries: u32,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let road_graph = RoadGraph::from_file(&args.graph)
        .with_context(|| format!("reading graph from {}", args.graph.display()))?;
    let prepared = read_prepared(&args.contracted_graph, true)?;
    let weighting = match prepared.weighting() {
        "fastest" => ch_routing::WeightingKind::Fastest,
        _ => ch_routing::WeightingKind::Shortest,
    }
    .weighting();
    let dijkstra = Dijkstra {
        graph: LevelGraph::from_road_graph(&road_graph, weighting.as_ref())?,
    };
    if dijkstra.number_of_vertices() != prepared.number_of_vertices() {
        bail!("graph and contracted graph have a different number of vertices");
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let requests: Vec<_> = (0..args.number_of_queries)
        .map(|_| {
            ShortestPathRequest::new(
                rng.gen_range(0..prepared.number_of_vertices()),
                rng.gen_range(0..prepared.number_of_vertices()),
            )
        })
        .collect();

    let failed = AtomicU32::new(0);
    requests
        .into_par_iter()
        .progress()
        .for_each(|request| match (prepared.shortest_path(&request), dijkstra.shortest_path_weight(&request)) {
            (Ok(path), Ok(expected)) => {
                let valid = match (&path, expected) {
                    (Some(path), Some(expected)) => {
                        weights_equal(path.weight, expected)
                            && path.is_chained()
                            && weights_equal(path.edge_weight(), path.weight)
                    }
                    (None, None) => true,
                    _ => false,
                };
                if !valid {
                    failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        "{} -> {} failed: ch {:?}, dijkstra {:?}",
                        request.source(),
                        request.target(),
                        path.map(|path| path.weight),
                        expected
                    );
                }
            }
            (ch, dijkstra) => {
                failed.fetch_add(1, Ordering::Relaxed);
                warn!("{:?} failed: {:?} {:?}", request, ch.err(), dijkstra.err());
            }
        });

    let failed = failed.into_inner();
    info!("{} of {} queries failed", failed, args.number_of_queries);
    if failed > 0 {
        bail!("{} queries failed", failed);
    }
    Ok(())
}
