//! Navigation graph built from a tile map.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]; edges store target
//! indices rather than references, so the graph needs no lifetime plumbing
//! and is trivially shared across threads. The graph is immutable after
//! [`NavGraph::build`], which makes concurrent searches over it race-free
//! without locking.

use log::warn;

use crate::core::{GridCoord, WorldPoint};
use crate::tilemap::TileMap;

/// Stable index of a node in the graph's arena.
///
/// Ids are only meaningful for the [`NavGraph`] that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Directed connection to a target node with a traversal cost.
///
/// Adjacency is stored as two directed edges, so the graph is undirected
/// in effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Destination node
    pub target: NodeId,
    /// Traversal cost (non-negative)
    pub cost: f32,
}

/// Grid navigation graph.
///
/// One node per walkable cell, centered in that cell in world space.
/// Orthogonally adjacent walkable cells are connected by reciprocal
/// unit-cost edges.
#[derive(Clone, Debug)]
pub struct NavGraph {
    width: i32,
    height: i32,
    cell_size: f32,
    /// Dense cell lookup: `None` where there is no node (blocked cell).
    cells: Vec<Option<NodeId>>,
    /// Per-node grid coordinate.
    coords: Vec<GridCoord>,
    /// Per-node world position (cell center).
    positions: Vec<WorldPoint>,
    /// Per-node outgoing edges.
    edges: Vec<Vec<Edge>>,
}

impl NavGraph {
    /// Default cost for orthogonal adjacency.
    const UNIT_COST: f32 = 1.0;

    /// Build a graph from a parsed tile map.
    ///
    /// Each walkable cell gets a node centered at
    /// `(x + 0.5, y + 0.5) * cell_size`. Each node is connected to its
    /// west and south neighbors (when those exist) with reciprocal edges
    /// of cost 1.
    pub fn build(map: &TileMap) -> Self {
        let width = map.width();
        let height = map.height();
        let cell_size = map.cell_size();

        let mut cells = vec![None; (width * height).max(0) as usize];
        let mut coords = Vec::new();
        let mut positions = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if map.is_walkable(x, y) {
                    let id = NodeId(coords.len() as u32);
                    cells[(y * width + x) as usize] = Some(id);
                    coords.push(GridCoord::new(x, y));
                    positions.push(WorldPoint::new(
                        (x as f32 + 0.5) * cell_size,
                        (y as f32 + 0.5) * cell_size,
                    ));
                }
            }
        }

        let mut edges = vec![Vec::new(); coords.len()];
        let mut graph = Self {
            width,
            height,
            cell_size,
            cells,
            coords,
            positions,
            edges: Vec::new(),
        };

        for y in 0..height {
            for x in 0..width {
                let Some(node) = graph.node_at(x, y) else {
                    continue;
                };

                if let Some(west) = graph.node_at(x - 1, y) {
                    edges[node.index()].push(Edge {
                        target: west,
                        cost: Self::UNIT_COST,
                    });
                    edges[west.index()].push(Edge {
                        target: node,
                        cost: Self::UNIT_COST,
                    });
                }

                if let Some(south) = graph.node_at(x, y - 1) {
                    edges[node.index()].push(Edge {
                        target: south,
                        cost: Self::UNIT_COST,
                    });
                    edges[south.index()].push(Edge {
                        target: node,
                        cost: Self::UNIT_COST,
                    });
                }
            }
        }

        graph.edges = edges;
        graph
    }

    /// Node at grid cell (x, y), or `None` if out of bounds or blocked.
    #[inline]
    pub fn node_at(&self, x: i32, y: i32) -> Option<NodeId> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.cells[(y * self.width + x) as usize]
    }

    /// Node under a world-space position, or `None` if the position is
    /// outside the grid or over a blocked cell.
    pub fn nearest_node(&self, world: WorldPoint) -> Option<NodeId> {
        if world.x < 0.0 || world.y < 0.0 {
            warn!(
                "position ({:.1}, {:.1}) is outside the grid",
                world.x, world.y
            );
            return None;
        }

        let x = (world.x / self.cell_size) as i32;
        let y = (world.y / self.cell_size) as i32;
        if x >= self.width || y >= self.height {
            warn!(
                "position ({:.1}, {:.1}) is outside the grid",
                world.x, world.y
            );
            return None;
        }

        let node = self.node_at(x, y);
        if node.is_none() {
            warn!("no walkable node at cell ({}, {})", x, y);
        }
        node
    }

    /// World position of a node (cell center).
    #[inline]
    pub fn position(&self, node: NodeId) -> WorldPoint {
        self.positions[node.index()]
    }

    /// Grid coordinate of a node.
    #[inline]
    pub fn coord(&self, node: NodeId) -> GridCoord {
        self.coords[node.index()]
    }

    /// Outgoing edges of a node.
    #[inline]
    pub fn edges(&self, node: NodeId) -> &[Edge] {
        &self.edges[node.index()]
    }

    /// Number of nodes in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Iterate over all node ids.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.coords.len() as u32).map(NodeId)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cell size in world units.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
}
