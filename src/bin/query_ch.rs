use std::path::PathBuf;

use ch_routing::read_prepared;
use clap::Parser;

/// Answers a single query on a contraction hierarchy and prints the path as json
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .bincode format
    #[arg(short, long)]
    contracted_graph: PathBuf,
    #[arg(short, long)]
    source: u32,
    #[arg(short, long)]
    target: u32,
    /// Abort the query after settling this many vertices
    #[arg(short, long, default_value_t = usize::MAX)]
    max_visited_nodes: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let prepared = read_prepared(&args.contracted_graph, false)?;
    let path = prepared.query(args.source, args.target, args.max_visited_nodes)?;
    println!("{}", serde_json::to_string_pretty(&path)?);

    Ok(())
}
