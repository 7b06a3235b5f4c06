//! Autonomous wandering driver.
//!
//! Issues a new random-goal path request whenever its agent has no active
//! path and no search pending. The random source is injected rather than
//! process-global, and goal selection is bounded by the graph's own
//! walkable region.

use log::debug;
use rand::Rng;

use crate::graph::{NavGraph, NodeId};
use crate::scheduler::{AgentId, PathScheduler, RequestState};

use super::PathAgent;

/// Driver that keeps an agent wandering between random walkable nodes.
#[derive(Clone, Debug)]
pub struct Wanderer<R: Rng> {
    rng: R,
    enabled: bool,
}

impl<R: Rng> Wanderer<R> {
    /// Create a disabled wanderer around an injected random source.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            enabled: false,
        }
    }

    /// Whether wandering is active.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable wandering.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the wandering state and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!(
            "wandering {}",
            if self.enabled { "started" } else { "stopped" }
        );
        self.enabled
    }

    /// Pick a uniformly random cell until it holds a walkable node.
    ///
    /// Returns `None` only for a graph with no nodes at all. Sampling is
    /// capped to keep termination unconditional; the fallback is the first
    /// node in the arena.
    pub fn random_goal(&mut self, graph: &NavGraph) -> Option<NodeId> {
        if graph.node_count() == 0 {
            return None;
        }

        let (width, height) = (graph.width(), graph.height());
        let attempts = (width * height * 16).max(16);
        for _ in 0..attempts {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            if let Some(node) = graph.node_at(x, y) {
                return Some(node);
            }
        }
        graph.node_ids().next()
    }

    /// Issue a new random-goal request when the agent is idle.
    ///
    /// An agent that was never placed gets seated on a random node first.
    /// The request carries adopt-on-arrival so the next wander leg starts
    /// from the node actually reached.
    pub fn tick(
        &mut self,
        id: AgentId,
        agent: &mut PathAgent,
        scheduler: &mut PathScheduler,
        graph: &NavGraph,
    ) {
        if !self.enabled || agent.has_path() {
            return;
        }
        if scheduler.state(id) != RequestState::Idle {
            return;
        }

        if agent.current_node().is_none() {
            match self.random_goal(graph) {
                Some(node) => agent.set_node(node, graph),
                None => return,
            }
        }
        let Some(start) = agent.current_node() else {
            return;
        };
        let Some(goal) = self.random_goal(graph) else {
            return;
        };

        debug!(
            "wanderer: requesting path {:?} -> {:?}",
            graph.coord(start),
            graph.coord(goal)
        );
        scheduler.try_request(id, start, goal, true);
    }
}
