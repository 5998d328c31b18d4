use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    time::Instant,
};

use log::info;
use serde::{Deserialize, Serialize};

use super::{
    contraction::ContractionContext, params::ContractionParams, priority_function::decode_function,
};
use crate::{
    error::ChError,
    graphs::{level_graph::LevelGraph, weighting::Weighting, RoadGraph},
};

/// Result of the preparation: the leveled graph holding original edges and shortcuts.
/// Immutable and shared by all queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreparedCh {
    graph: LevelGraph,
    /// Name of the weighting the edge weights were computed with.
    weighting: String,
}

/// Weights the road graph with `weighting` and builds the contraction hierarchy.
pub fn prepare(
    road_graph: &RoadGraph,
    weighting: &dyn Weighting,
    params: &ContractionParams,
) -> Result<PreparedCh, ChError> {
    let start = Instant::now();
    let priority_terms = decode_function(&params.priority_function)?;
    let graph = LevelGraph::from_road_graph(road_graph, weighting)?;
    info!(
        "preparing {} vertices and {} edges with weighting '{}'",
        graph.number_of_vertices(),
        graph.number_of_edges(),
        weighting.name()
    );

    let graph = ContractionContext::new(graph, priority_terms, params).contract();
    info!("preparation took {:.2?}", start.elapsed());

    Ok(PreparedCh {
        graph,
        weighting: weighting.name().to_string(),
    })
}

impl PreparedCh {
    /// Wraps an already leveled graph.
    pub fn from_level_graph(graph: LevelGraph, weighting: &str) -> Result<PreparedCh, ChError> {
        graph.validate()?;
        Ok(PreparedCh {
            graph,
            weighting: weighting.to_string(),
        })
    }

    pub fn graph(&self) -> &LevelGraph {
        &self.graph
    }

    pub fn weighting(&self) -> &str {
        &self.weighting
    }

    /// Shortcuts that can still be traversed in at least one direction.
    pub fn number_of_shortcuts(&self) -> usize {
        self.graph
            .edges()
            .iter()
            .filter(|edge| edge.is_shortcut() && !edge.is_dead())
            .count()
    }

    pub fn write_to(&self, writer: impl Write) -> Result<(), ChError> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn read_from(reader: impl Read) -> Result<PreparedCh, ChError> {
        let prepared: PreparedCh = bincode::deserialize_from(reader)?;
        prepared.graph.validate()?;
        Ok(prepared)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ChError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<PreparedCh, ChError> {
        Self::read_from(bytes)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), ChError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from_file(path: &Path) -> Result<PreparedCh, ChError> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}
