//! A* path search over a [`NavGraph`].
//!
//! Search scratch state (g/h/f scores and predecessor links) lives in
//! per-search dense arrays indexed by node id, not on the nodes themselves,
//! so any number of searches can run concurrently over the same graph.
//!
//! The open list is a plain insertion-ordered vector scanned linearly for
//! the lowest f score. That makes selection deterministic on score ties and
//! keeps the relaxation rule exact, at the price of an O(V·(V+E)) worst
//! case. Acceptable for the small grids this crate targets; a known
//! scalability ceiling, not a feature.

use log::{debug, trace};

use crate::graph::{NavGraph, NodeId};

/// Result of a path search.
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Node sequence from start to goal, inclusive of both endpoints.
    ///
    /// When the goal is unreachable this is the degenerate predecessor
    /// chain from the goal (a single node); check [`PathResult::complete`]
    /// before following it.
    pub nodes: Vec<NodeId>,
    /// Total traversal cost, or `f32::INFINITY` when incomplete.
    pub cost: f32,
    /// Number of nodes expanded during the search.
    pub nodes_expanded: usize,
    /// Whether the sequence actually begins at the requested start node.
    pub complete: bool,
}

impl PathResult {
    /// Path length in nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Per-node search scratch, reset for every search.
#[derive(Clone, Copy)]
struct NodeScore {
    g: f32,
    f: f32,
    predecessor: Option<NodeId>,
}

impl NodeScore {
    const UNVISITED: NodeScore = NodeScore {
        g: f32::INFINITY,
        f: f32::INFINITY,
        predecessor: None,
    };
}

/// Heuristic estimate: squared Euclidean distance between node positions.
///
/// Only admissible here because edge costs are uniform unit weights; do not
/// reuse with weighted edges without revisiting it.
#[inline]
fn heuristic(graph: &NavGraph, from: NodeId, goal: NodeId) -> f32 {
    graph.position(from).distance_squared(&graph.position(goal))
}

/// Find a path from `start` to `goal`.
///
/// An unreachable goal is not an error: the result carries whatever
/// predecessor chain exists from the goal (a single node) with
/// `complete == false`, and the caller decides what to do with it.
/// `start == goal` yields the single-node path `[start]`.
pub fn astar(graph: &NavGraph, start: NodeId, goal: NodeId) -> PathResult {
    trace!(
        "astar: start={:?} goal={:?}",
        graph.coord(start),
        graph.coord(goal)
    );

    let node_count = graph.node_count();
    let mut scores = vec![NodeScore::UNVISITED; node_count];
    let mut in_open = vec![false; node_count];
    let mut closed = vec![false; node_count];

    scores[start.index()] = NodeScore {
        g: 0.0,
        f: heuristic(graph, start, goal),
        predecessor: None,
    };

    // Insertion-ordered open list; selection scans for the lowest f and
    // keeps the earliest entry on ties.
    let mut open: Vec<NodeId> = vec![start];
    in_open[start.index()] = true;

    let mut nodes_expanded = 0;

    while !open.is_empty() {
        let mut best = 0;
        for i in 1..open.len() {
            if scores[open[i].index()].f < scores[open[best].index()].f {
                best = i;
            }
        }

        let current = open[best];
        if current == goal {
            break;
        }

        open.remove(best);
        in_open[current.index()] = false;
        closed[current.index()] = true;
        nodes_expanded += 1;

        for edge in graph.edges(current) {
            let target = edge.target;
            if closed[target.index()] {
                continue;
            }

            let tentative_g = scores[current.index()].g + edge.cost;
            let tentative_f = tentative_g + heuristic(graph, target, goal);

            if !in_open[target.index()] {
                scores[target.index()] = NodeScore {
                    g: tentative_g,
                    f: tentative_f,
                    predecessor: Some(current),
                };
                open.push(target);
                in_open[target.index()] = true;
            } else if tentative_f < scores[target.index()].f {
                scores[target.index()] = NodeScore {
                    g: tentative_g,
                    f: tentative_f,
                    predecessor: Some(current),
                };
            }
        }
    }

    // Backtrack from the goal unconditionally: if it was never reached the
    // chain is just the goal node and the result is marked incomplete.
    let mut nodes = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        nodes.push(node);
        current = scores[node.index()].predecessor;
    }
    nodes.reverse();

    let complete = nodes.first() == Some(&start);
    let cost = if complete {
        scores[goal.index()].g
    } else {
        f32::INFINITY
    };

    if complete {
        trace!(
            "astar: path of {} nodes, cost {:.1}, {} expanded",
            nodes.len(),
            cost,
            nodes_expanded
        );
    } else {
        debug!(
            "astar: goal {:?} unreachable after expanding {} nodes",
            graph.coord(goal),
            nodes_expanded
        );
    }

    PathResult {
        nodes,
        cost,
        nodes_expanded,
        complete,
    }
}
