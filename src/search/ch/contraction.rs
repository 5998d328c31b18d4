use std::{
    collections::BinaryHeap,
    time::{Duration, Instant},
};

use indicatif::ParallelProgressIterator;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::{
    ch_priority_element::ChPriorityElement,
    params::ContractionParams,
    priority_function::PriorityTerms,
    shortcuts::{add_shortcut, find_shortcuts, ShortcutCandidate},
};
use crate::{
    graphs::{level_graph::LevelGraph, Level, VertexId},
    utility::get_progressbar,
};

/// Priority of `vertex` and the shortcuts its contraction would create. Pure function of
/// the current graph state.
fn priority_and_shortcuts(
    graph: &LevelGraph,
    priority_terms: &PriorityTerms,
    vertex: VertexId,
) -> (i32, Vec<ShortcutCandidate>) {
    let shortcuts = find_shortcuts(graph, vertex);
    let priority = priority_terms
        .iter()
        .map(|(coefficent, priority_function)| {
            coefficent * priority_function.priority(vertex, graph, &shortcuts)
        })
        .sum();

    (priority, shortcuts)
}

/// State of one contraction run: the graph, the lazy priority queue and the current
/// priority of every uncontracted vertex.
pub struct ContractionContext {
    graph: LevelGraph,
    queue: BinaryHeap<ChPriorityElement>,
    /// Queue entries whose priority differs from this one are outdated.
    priorities: Vec<i32>,
    priority_terms: PriorityTerms,
    params: ContractionParams,
    next_level: Level,
    shortcuts_created: usize,
}

impl ContractionContext {
    pub fn new(
        graph: LevelGraph,
        priority_terms: PriorityTerms,
        params: &ContractionParams,
    ) -> Self {
        let number_of_vertices = graph.number_of_vertices() as usize;
        ContractionContext {
            graph,
            queue: BinaryHeap::new(),
            priorities: vec![0; number_of_vertices],
            priority_terms,
            params: params.clone(),
            next_level: 1,
            shortcuts_created: 0,
        }
    }

    pub fn shortcuts_created(&self) -> usize {
        self.shortcuts_created
    }

    /// Contracts every vertex and returns the leveled graph.
    pub fn contract(mut self) -> LevelGraph {
        let number_of_vertices = self.graph.number_of_vertices();
        if number_of_vertices == 0 {
            warn!("nothing to contract");
            return self.graph;
        }

        info!("initializing priorities of {} vertices", number_of_vertices);
        self.initialize();

        let update_size = std::cmp::max(10, self.queue.len() / 10);
        let mut counter = 0;
        let mut update_counter = 0;
        let mut remaining = number_of_vertices as usize;
        let mut update_all_time = Duration::ZERO;

        info!("start contracting");
        let bar = get_progressbar(
            "contracting",
            number_of_vertices as u64,
            self.params.show_progress,
        );
        while remaining > 0 {
            if counter % update_size == 0 {
                if self.params.periodic_updates && update_counter > 0 && update_counter % 2 == 0 {
                    let start = Instant::now();
                    self.update_all_priorities();
                    update_all_time += start.elapsed();
                }
                update_counter += 1;
                info!(
                    "{}, vertices: {}, shortcuts: {}, update all time: {:.2?}",
                    counter, remaining, self.shortcuts_created, update_all_time
                );
            }
            counter += 1;

            let Some((vertex, shortcuts)) = self.pop() else {
                break;
            };
            self.contract_vertex(vertex, shortcuts);
            remaining -= 1;
            bar.inc(1);
        }
        bar.finish_and_clear();

        info!(
            "contracted {} vertices, {} new shortcuts",
            number_of_vertices, self.shortcuts_created
        );
        self.graph
    }

    fn initialize(&mut self) {
        let graph = &self.graph;
        self.priority_terms
            .iter_mut()
            .for_each(|(_, function)| function.initialize(graph));

        let priority_terms = &self.priority_terms;
        let bar = get_progressbar(
            "initializing priorities",
            graph.number_of_vertices() as u64,
            self.params.show_progress,
        );
        let priorities: Vec<i32> = (0..graph.number_of_vertices())
            .into_par_iter()
            .progress_with(bar)
            .map(|vertex| priority_and_shortcuts(graph, priority_terms, vertex).0)
            .collect();

        self.queue = priorities
            .iter()
            .enumerate()
            .map(|(vertex, &priority)| ChPriorityElement::new(priority, vertex as VertexId))
            .collect();
        self.priorities = priorities;
    }

    /// Recomputes the priority of every uncontracted vertex.
    fn update_all_priorities(&mut self) {
        let graph = &self.graph;
        let priority_terms = &self.priority_terms;
        let updated: Vec<(VertexId, i32)> = (0..graph.number_of_vertices())
            .into_par_iter()
            .filter(|&vertex| graph.level(vertex) == 0)
            .map(|vertex| (vertex, priority_and_shortcuts(graph, priority_terms, vertex).0))
            .collect();

        for (vertex, priority) in updated {
            self.set_priority(vertex, priority);
        }
    }

    fn set_priority(&mut self, vertex: VertexId, priority: i32) {
        if self.priorities[vertex as usize] != priority {
            self.priorities[vertex as usize] = priority;
            self.queue.push(ChPriorityElement::new(priority, vertex));
        }
    }

    fn is_outdated(&self, element: &ChPriorityElement) -> bool {
        self.graph.level(element.vertex) != 0
            || self.priorities[element.vertex as usize] != element.priority
    }

    /// Priority of the current minimum, outdated entries are dropped on the way.
    fn peek_priority(&mut self) -> Option<i32> {
        while let Some(element) = self.queue.peek() {
            if !self.is_outdated(element) {
                return Some(element.priority);
            }
            self.queue.pop();
        }
        None
    }

    // Lazy popping of the vertex with minimum priority.
    fn pop(&mut self) -> Option<(VertexId, Vec<ShortcutCandidate>)> {
        while let Some(element) = self.queue.pop() {
            if self.is_outdated(&element) {
                continue;
            }

            // If the fresh priority is greater than the minimum priority, then repush the
            // vertex with the updated priority.
            let (priority, shortcuts) =
                priority_and_shortcuts(&self.graph, &self.priority_terms, element.vertex);
            if let Some(minimum) = self.peek_priority() {
                if priority > minimum {
                    debug!(
                        "deferring vertex {}, priority {} -> {}",
                        element.vertex, element.priority, priority
                    );
                    self.priorities[element.vertex as usize] = priority;
                    self.queue
                        .push(ChPriorityElement::new(priority, element.vertex));
                    continue;
                }
            }

            return Some((element.vertex, shortcuts));
        }
        None
    }

    fn contract_vertex(&mut self, vertex: VertexId, shortcuts: Vec<ShortcutCandidate>) {
        // Gets called just before a vertex is contracted. Gives priority terms the
        // opportunity to update neighboring vertices.
        let graph = &self.graph;
        self.priority_terms
            .iter_mut()
            .for_each(|(_, function)| function.update(vertex, graph));

        for shortcut in shortcuts.iter() {
            add_shortcut(&mut self.graph, shortcut);
        }
        self.shortcuts_created += shortcuts.len();

        self.graph.set_level(vertex, self.next_level);
        self.next_level += 1;

        let mut neighbors: Vec<VertexId> = self
            .graph
            .prep_incident_edges(vertex)
            .map(|id| self.graph.edge(id).other(vertex))
            .filter(|&neighbor| self.graph.level(neighbor) == 0)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();

        let incident = self.graph.incident_edges(vertex).to_vec();
        for id in incident {
            self.graph.exclude_edge(id);
        }

        for neighbor in neighbors {
            let (priority, _) =
                priority_and_shortcuts(&self.graph, &self.priority_terms, neighbor);
            self.set_priority(neighbor, priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ch::priority_function::decode_function;

    fn contract(graph: LevelGraph) -> LevelGraph {
        let params = ContractionParams::default();
        let terms = decode_function(&params.priority_function).unwrap();
        ContractionContext::new(graph, terms, &params).contract()
    }

    #[test]
    fn every_vertex_gets_a_distinct_level() {
        let mut graph = LevelGraph::new(5);
        for (tail, head) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (2, 0)] {
            graph.add_directed_edge(tail, head, 1.0);
        }
        let graph = contract(graph);

        let mut levels = graph.levels().to_vec();
        levels.sort_unstable();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn star_center_is_contracted_last() {
        // contracting the center of a star first would need a shortcut between every
        // pair of leaves
        let mut graph = LevelGraph::new(5);
        for leaf in 1..5 {
            graph.add_directed_edge(0, leaf, 1.0);
            graph.add_directed_edge(leaf, 0, 1.0);
        }
        let graph = contract(graph);
        assert!(graph.level(0) >= 4);
        assert!(graph.edges().iter().all(|edge| !edge.is_shortcut()));
    }

    #[test]
    fn empty_graph() {
        let graph = contract(LevelGraph::new(0));
        assert_eq!(graph.number_of_vertices(), 0);
    }
}
