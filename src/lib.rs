use std::path::Path;

use clap::ValueEnum;
use graphs::weighting::{FastestWeighting, ShortestWeighting, Weighting};
use search::ch::contracted_graph::PreparedCh;
use utility::get_progressspinner;

pub mod error;
pub mod graphs;
pub mod queue;
pub mod search;
pub mod utility;

pub use error::ChError;
pub use graphs::{level_graph::LevelGraph, RoadGraph};
pub use search::{
    ch::{contracted_graph::prepare, params::ContractionParams},
    path::ShortestPathRequest,
    PathFinding,
};

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum WeightingKind {
    Shortest,
    Fastest,
}

impl WeightingKind {
    pub fn weighting(&self) -> Box<dyn Weighting> {
        match self {
            WeightingKind::Shortest => Box::new(ShortestWeighting),
            WeightingKind::Fastest => Box::new(FastestWeighting::default()),
        }
    }
}

pub fn read_prepared(path: &Path, show_progress: bool) -> Result<PreparedCh, ChError> {
    let spinner = get_progressspinner("Reading contracted graph", show_progress);
    let prepared = PreparedCh::read_from_file(path);
    spinner.finish_and_clear();
    prepared
}
