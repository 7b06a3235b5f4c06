//! # Marga: Interactive Grid Pathfinding
//!
//! A grid-pathfinding core: an immutable navigation graph built from an
//! ASCII tile map, an A* search engine, a background path-request
//! scheduler, and path-following agents driven from a single tick thread.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga::{NavGraph, PathAgent, TileMap};
//!
//! let map = TileMap::parse(&["111", "101", "111"], 50.0);
//! let graph = NavGraph::build(&map);
//!
//! let start = graph.node_at(0, 0).expect("walkable cell");
//! let goal = graph.node_at(2, 2).expect("walkable cell");
//!
//! let mut agent = PathAgent::new();
//! agent.set_node(start, &graph);
//! agent.set_speed(64.0);
//! agent.go_to(goal, &graph, true);
//!
//! loop {
//!     agent.update(1.0 / 120.0, &graph);
//!     if !agent.has_path() {
//!         break;
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: coordinate types ([`core::GridCoord`], [`core::WorldPoint`])
//! - [`tilemap`]: ASCII map parsing with best-effort malformed-input handling
//! - [`graph`]: node arena + edges, cell and world-position lookups
//! - [`search`]: A* with per-search scratch state
//! - [`scheduler`]: background searches with guarded per-agent hand-off slots
//! - [`agent`]: path following with overshoot carry, plus the wandering driver
//! - [`config`]: TOML configuration for the demo binary
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────┐  parse   ┌─────────┐  build   ┌──────────────┐
//! │ ASCII map├─────────►│ TileMap ├─────────►│   NavGraph   │ (immutable,
//! └──────────┘          └─────────┘          └──────┬───────┘  Arc-shared)
//!                                                   │
//!                          requests                 │ concurrent reads
//!                   ┌───────────────────┐           ▼
//!     tick thread ──┤   PathScheduler   ├──► worker thread: astar()
//!                   └─────────┬─────────┘           │
//!                             │ poll()              │ publish under
//!                             ▼                     ▼ slot guard
//!                   ┌───────────────────┐   ┌───────────────┐
//!                   │     PathAgent     │◄──┤  result slot  │
//!                   │ (update per tick) │   │ (mutex+flag)  │
//!                   └───────────────────┘   └───────────────┘
//! ```
//!
//! ## Concurrency
//!
//! The graph is never mutated after construction, so any number of worker
//! searches read it concurrently without locking. The only mutable state
//! shared with a worker is its result slot; agents are owned and mutated
//! exclusively by the tick thread.

pub mod agent;
pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod scheduler;
pub mod search;
pub mod tilemap;

// Re-export main types at crate root
pub use agent::{PathAgent, Wanderer};
pub use config::MargaConfig;
pub use self::core::{GridCoord, WorldPoint};
pub use error::{MargaError, Result};
pub use graph::{Edge, NavGraph, NodeId};
pub use scheduler::{AgentId, CompletedSearch, PathScheduler, RequestState};
pub use search::{astar, PathResult};
pub use tilemap::TileMap;
