use super::{RoadEdge, Weight};

/// Turns a road segment into the scalar all shortest path computations run on.
///
/// The weighting is evaluated exactly once per edge before contraction. Returned weights
/// have to be finite and non-negative.
pub trait Weighting: Send + Sync {
    fn name(&self) -> &str;

    fn weight(&self, edge: &RoadEdge) -> Weight;
}

/// Weight is the length of the segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestWeighting;

impl Weighting for ShortestWeighting {
    fn name(&self) -> &str {
        "shortest"
    }

    fn weight(&self, edge: &RoadEdge) -> Weight {
        edge.distance
    }
}

/// Weight is the travel time in seconds at the maximum speed of the segment.
#[derive(Clone, Copy, Debug)]
pub struct FastestWeighting {
    /// Speed in km/h used for segments without speed information.
    pub default_speed: f64,
}

impl Default for FastestWeighting {
    fn default() -> Self {
        FastestWeighting {
            default_speed: 50.0,
        }
    }
}

impl Weighting for FastestWeighting {
    fn name(&self) -> &str {
        "fastest"
    }

    fn weight(&self, edge: &RoadEdge) -> Weight {
        let speed = if edge.max_speed > 0.0 {
            edge.max_speed
        } else {
            self.default_speed
        };
        edge.distance / (speed / 3.6)
    }
}

/// Wraps a closure as weighting.
pub struct FnWeighting<F> {
    name: String,
    function: F,
}

impl<F> FnWeighting<F>
where
    F: Fn(&RoadEdge) -> Weight + Send + Sync,
{
    pub fn new(name: &str, function: F) -> Self {
        FnWeighting {
            name: name.to_string(),
            function,
        }
    }
}

impl<F> Weighting for FnWeighting<F>
where
    F: Fn(&RoadEdge) -> Weight + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self, edge: &RoadEdge) -> Weight {
        (self.function)(edge)
    }
}
