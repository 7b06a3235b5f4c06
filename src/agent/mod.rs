//! Path-following agents.
//!
//! A [`PathAgent`] owns a continuous position and walks an adopted node
//! sequence waypoint by waypoint. All mutation happens on the tick thread
//! through [`PathAgent::update`]; background searches never touch agent
//! state directly (see [`crate::scheduler`]).

mod wanderer;

pub use wanderer::Wanderer;

use log::warn;

use crate::core::WorldPoint;
use crate::graph::{NavGraph, NodeId};
use crate::search::{astar, PathResult};

/// An agent that follows computed paths at a fixed speed.
///
/// The agent tracks the node it currently occupies (or last departed
/// from). While traversing, `current_node` is deliberately left stale; a
/// path adopted with `adopt_as_current` records its goal as a deferred
/// node that becomes current on arrival, so later requests originate from
/// where the agent actually is.
#[derive(Clone, Debug)]
pub struct PathAgent {
    position: WorldPoint,
    current_node: Option<NodeId>,
    speed: f32,
    radius: f32,
    path: Vec<NodeId>,
    cursor: usize,
    adopt_on_arrival: Option<NodeId>,
}

impl PathAgent {
    /// Default visual radius in world units.
    const DEFAULT_RADIUS: f32 = 8.0;

    /// Create an agent with no position, no path, zero speed.
    pub fn new() -> Self {
        Self {
            position: WorldPoint::ZERO,
            current_node: None,
            speed: 0.0,
            radius: Self::DEFAULT_RADIUS,
            path: Vec::new(),
            cursor: 0,
            adopt_on_arrival: None,
        }
    }

    /// Teleport the agent to sit at `node`, clearing any active path.
    pub fn set_node(&mut self, node: NodeId, graph: &NavGraph) {
        self.current_node = Some(node);
        self.position = graph.position(node);
        self.path.clear();
        self.cursor = 0;
        self.adopt_on_arrival = None;
    }

    /// Set movement speed in world units per time unit.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Set the visual radius reported to rendering collaborators.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Request a path to `goal` synchronously and adopt it.
    ///
    /// With `adopt_as_current`, `goal` becomes the agent's resting node
    /// once the path is fully traversed. Returns false (diagnostic, state
    /// unchanged) when the agent has no current node or no path exists.
    pub fn go_to(&mut self, goal: NodeId, graph: &NavGraph, adopt_as_current: bool) -> bool {
        let Some(start) = self.current_node else {
            warn!("go_to: agent has no current node to start from");
            return false;
        };

        let result = astar(graph, start, goal);
        if !result.complete {
            warn!(
                "go_to: no path from {:?} to {:?}",
                graph.coord(start),
                graph.coord(goal)
            );
            return false;
        }
        self.adopt_path(result, adopt_as_current)
    }

    /// Replace the active path wholesale with a completed search result.
    ///
    /// Incomplete (degenerate) results are refused and the prior path, if
    /// any, stays intact. Used for the scheduler hand-off and by
    /// [`PathAgent::go_to`].
    pub fn adopt_path(&mut self, result: PathResult, adopt_as_current: bool) -> bool {
        if !result.complete {
            warn!("adopt_path: discarding incomplete path result");
            return false;
        }
        let Some(&goal) = result.nodes.last() else {
            warn!("adopt_path: discarding empty path result");
            return false;
        };

        self.path = result.nodes;
        self.cursor = 0;
        self.adopt_on_arrival = adopt_as_current.then_some(goal);
        true
    }

    /// Advance along the active path by `speed * dt` worth of travel.
    ///
    /// Arrival at a waypoint snaps to it and spends the leftover travel on
    /// the next segment, so the agent never pauses at interior nodes and
    /// never loses distance across waypoint boundaries. Arrival at the
    /// final waypoint stops exactly on it.
    pub fn update(&mut self, dt: f32, graph: &NavGraph) {
        if self.path.is_empty() {
            return;
        }
        let Some(&next) = self.path.get(self.cursor) else {
            self.finish_path();
            return;
        };

        let target = graph.position(next);
        let to_target = target - self.position;
        let distance = to_target.length();
        let step = self.speed * dt;

        if distance > step {
            self.position = self.position + to_target.normalize() * step;
            return;
        }

        // Arrived at (or overshot) the waypoint
        let overshoot = step - distance;
        self.position = target;
        self.cursor += 1;

        match self.path.get(self.cursor) {
            Some(&upcoming) => {
                let direction = (graph.position(upcoming) - target).normalize();
                self.position = self.position + direction * overshoot;
            }
            None => self.finish_path(),
        }
    }

    fn finish_path(&mut self) {
        self.path.clear();
        self.cursor = 0;
        if let Some(node) = self.adopt_on_arrival.take() {
            self.current_node = Some(node);
        }
    }

    /// Current continuous position.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Node the agent occupies or last departed from.
    #[inline]
    pub fn current_node(&self) -> Option<NodeId> {
        self.current_node
    }

    /// Active path as an ordered node sequence (for line overlays).
    #[inline]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Whether a path is currently being traversed.
    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Visual radius (for a position marker).
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for PathAgent {
    fn default() -> Self {
        Self::new()
    }
}
