use self::{
    contracted_neighbors::ContractedNeighbors, edge_difference::EdgeDifference,
    original_edges::OriginalEdges,
};
use super::shortcuts::ShortcutCandidate;
use crate::{
    error::ChError,
    graphs::{level_graph::LevelGraph, VertexId},
};

pub mod contracted_neighbors;
pub mod edge_difference;
pub mod original_edges;

/// Weighted terms of a priority function, as returned by [`decode_function`].
pub type PriorityTerms = Vec<(i32, Box<dyn PriorityFunction + Send + Sync>)>;

pub trait PriorityFunction {
    fn initialize(&mut self, graph: &LevelGraph);

    /// Gets the priority of `vertex` given the shortcuts its contraction would create.
    /// Must not depend on the current priority of `vertex` itself.
    fn priority(&self, vertex: VertexId, graph: &LevelGraph, shortcuts: &[ShortcutCandidate]) -> i32;

    /// Gets called just BEFORE a vertex is contracted. Gives priority terms the opportunity
    /// to update state of neighboring vertices.
    fn update(&mut self, vertex: VertexId, graph: &LevelGraph);
}

/// Decodes a description like `E:10_O:50_N:1` into weighted priority terms.
///
/// Known letters are `E` (edge difference), `O` (original edges of the shortcuts) and `N`
/// (contracted neighbors).
pub fn decode_function(priority_functions_letters: &str) -> Result<PriorityTerms, ChError> {
    let mut terms = Vec::new();
    let invalid = || ChError::InvalidPriorityFunction(priority_functions_letters.to_string());

    for letter in priority_functions_letters.split('_') {
        let (priority_function, coefficent) = letter.split_once(':').ok_or_else(invalid)?;
        let coefficent = coefficent.trim().parse::<i32>().map_err(|_| invalid())?;
        match priority_function.trim() {
            "E" => register(&mut terms, coefficent, EdgeDifference::new()),
            "O" => register(&mut terms, coefficent, OriginalEdges::new()),
            "N" => register(&mut terms, coefficent, ContractedNeighbors::new()),
            _ => return Err(invalid()),
        }
    }

    Ok(terms)
}

fn register(
    priority_terms: &mut PriorityTerms,
    coefficent: i32,
    priority_function: impl PriorityFunction + 'static + Send + Sync,
) {
    priority_terms.push((coefficent, Box::new(priority_function)));
}
