use crate::{
    error::ChError,
    graphs::Weight,
};
use path::{Path, ShortestPathRequest};

pub mod ch;
pub mod collections;
pub mod dijkstra;
pub mod path;

/// Relative tolerance for comparing weights that were summed up in different orders.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Returns true if both weights are equal up to rounding errors.
pub fn weights_equal(a: Weight, b: Weight) -> bool {
    (a - b).abs() <= WEIGHT_EPSILON * a.abs().max(b.abs()).max(1.0)
}

pub trait PathFinding: Send + Sync {
    /// Returns `Ok(None)` if the target can not be reached.
    fn shortest_path(&self, request: &ShortestPathRequest) -> Result<Option<Path>, ChError>;

    fn shortest_path_weight(&self, request: &ShortestPathRequest) -> Result<Option<Weight>, ChError> {
        Ok(self.shortest_path(request)?.map(|path| path.weight))
    }

    fn number_of_vertices(&self) -> u32;
}
