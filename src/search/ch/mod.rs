pub mod ch_priority_element;
pub mod contracted_graph;
pub mod contraction;
pub mod params;
pub mod pathfinding;
pub mod priority_function;
pub mod shortcut_replacer;
pub mod shortcuts;
pub mod witness;
