use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::ChError;

pub mod edge;
pub mod level_graph;
pub mod weighting;

pub type VertexId = u32;
pub type EdgeId = u32;
pub type Weight = f64;
pub type Distance = f64;
pub type Level = u32;

/// A road segment as delivered by the import pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadEdge {
    pub tail: VertexId,
    pub head: VertexId,
    /// Length in meters.
    pub distance: Distance,
    /// Maximum speed in km/h, zero if unknown.
    pub max_speed: f64,
    /// If set the segment can also be traversed from head to tail.
    pub bidirectional: bool,
}

/// Finalized node and edge set handed over by the import pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoadGraph {
    number_of_vertices: u32,
    edges: Vec<RoadEdge>,
}

impl RoadGraph {
    pub fn new(number_of_vertices: u32) -> Self {
        RoadGraph {
            number_of_vertices,
            edges: Vec::new(),
        }
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.number_of_vertices
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    pub fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        distance: Distance,
        max_speed: f64,
        bidirectional: bool,
    ) -> Result<EdgeId, ChError> {
        for vertex in [tail, head] {
            if vertex >= self.number_of_vertices {
                return Err(ChError::VertexOutOfRange {
                    vertex,
                    number_of_vertices: self.number_of_vertices,
                });
            }
        }
        if tail == head {
            return Err(ChError::SelfLoop { tail });
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(ChError::InvalidDistance {
                tail,
                head,
                distance,
            });
        }

        self.edges.push(RoadEdge {
            tail,
            head,
            distance,
            max_speed,
            bidirectional,
        });
        Ok(self.edges.len() as EdgeId - 1)
    }

    /// Shorthand for a segment without speed information.
    pub fn add_road(
        &mut self,
        tail: VertexId,
        head: VertexId,
        distance: Distance,
        bidirectional: bool,
    ) -> Result<EdgeId, ChError> {
        self.add_edge(tail, head, distance, 0.0, bidirectional)
    }

    /// Reads a graph in the text format used by the tooling.
    ///
    /// After optional `#` comment lines the file contains the number of vertices, the
    /// number of edges, one line per vertex and one line per edge of the form
    /// `tail head cost type max_speed`. Every edge line is a one-way segment.
    pub fn from_file(path: &Path) -> Result<RoadGraph, ChError> {
        let reader = BufReader::new(File::open(path)?);
        let mut lines = reader
            .lines()
            .map(|line| line.map(|line| line.trim().to_string()))
            .filter(|line| {
                line.as_ref()
                    .map_or(true, |line| !line.is_empty() && !line.starts_with('#'))
            });

        let mut next_count = |what: &str| -> Result<usize, ChError> {
            let line = lines
                .next()
                .ok_or_else(|| ChError::InvalidGraphFile(format!("missing {}", what)))??;
            line.parse()
                .map_err(|_| ChError::InvalidGraphFile(format!("unable to parse {}: {}", what, line)))
        };
        let number_of_vertices = next_count("number of vertices")?;
        let number_of_edges = next_count("number of edges")?;

        let mut graph = RoadGraph::new(number_of_vertices as u32);
        let mut lines = lines.skip(number_of_vertices);
        for _ in 0..number_of_edges {
            let line = lines
                .next()
                .ok_or_else(|| ChError::InvalidGraphFile("missing edge line".to_string()))??;
            let values: Vec<&str> = line.split_whitespace().collect();
            let field = |index: usize, name: &str| -> Result<f64, ChError> {
                values
                    .get(index)
                    .and_then(|value| value.parse::<f64>().ok())
                    .ok_or_else(|| {
                        ChError::InvalidGraphFile(format!("unable to parse {} in line {}", name, line))
                    })
            };
            let tail = field(0, "tail")? as VertexId;
            let head = field(1, "head")? as VertexId;
            let cost = field(2, "cost")?;
            let max_speed = field(4, "max speed").unwrap_or(0.0);

            // the format contains self loops for some data sets, they never shorten a path
            if tail == head {
                continue;
            }
            graph.add_edge(tail, head, cost, max_speed, false)?;
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rejects_invalid_edges() {
        let mut graph = RoadGraph::new(3);
        assert!(graph.add_road(0, 1, 5.0, true).is_ok());
        assert!(matches!(
            graph.add_road(0, 3, 5.0, true),
            Err(ChError::VertexOutOfRange { vertex: 3, .. })
        ));
        assert!(matches!(
            graph.add_road(2, 2, 1.0, false),
            Err(ChError::SelfLoop { tail: 2 })
        ));
        assert!(matches!(
            graph.add_road(1, 2, f64::NAN, false),
            Err(ChError::InvalidDistance { .. })
        ));
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn reads_graph_file() {
        let path = std::env::temp_dir().join(format!("ch_routing_{}.txt", std::process::id()));
        let mut file = File::create(&path).unwrap();
        writeln!(file, "# generated").unwrap();
        writeln!(file, "3").unwrap();
        writeln!(file, "3").unwrap();
        writeln!(file, "0 0 48.0 9.0 0").unwrap();
        writeln!(file, "1 1 48.1 9.1 0").unwrap();
        writeln!(file, "2 2 48.2 9.2 0").unwrap();
        writeln!(file, "0 1 10 1 50").unwrap();
        writeln!(file, "1 2 20 1 30").unwrap();
        writeln!(file, "2 2 5 1 30").unwrap();
        drop(file);

        let graph = RoadGraph::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.edges()[1].distance, 20.0);
        assert_eq!(graph.edges()[1].max_speed, 30.0);
        assert!(!graph.edges()[0].bidirectional);
    }
}
