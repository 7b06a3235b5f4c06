//! Marga demo: headless drive of the pathfinding core.
//!
//! Builds the navigation graph from the configured ASCII map, then runs a
//! fixed-timestep tick loop with two agents:
//!
//! - a **player** agent that walks an initial path and gets retargeted
//!   mid-flight through a superseding background request
//! - a **wanderer** agent that keeps issuing random-goal requests whenever
//!   it is idle
//!
//! Rendering and input are external collaborators; here their role is
//! played by scripted events and log output.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use marga::{AgentId, MargaConfig, NavGraph, PathAgent, PathScheduler, TileMap, Wanderer};

const PLAYER: AgentId = AgentId(0);
const WANDERER: AgentId = AgentId(1);

fn main() -> marga::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if let Some(path) = args.get(1) {
        info!("Loading configuration from {}", path);
        MargaConfig::load(Path::new(path))?
    } else if Path::new("marga.toml").exists() {
        info!("Loading configuration from marga.toml");
        MargaConfig::load(Path::new("marga.toml"))?
    } else {
        info!("Using default configuration");
        MargaConfig::default()
    };

    info!("Marga v{}", env!("CARGO_PKG_VERSION"));

    // Build the navigation graph
    let map = TileMap::parse(&config.map.rows, config.map.cell_size);
    let graph = Arc::new(NavGraph::build(&map));
    info!(
        "Graph: {} nodes on a {}x{} grid, cell size {}",
        graph.node_count(),
        graph.width(),
        graph.height(),
        graph.cell_size()
    );

    if graph.node_count() == 0 {
        return Err(marga::MargaError::Config(
            "map has no walkable cells".into(),
        ));
    }

    let mut scheduler = PathScheduler::new(Arc::clone(&graph));

    // Player agent with an initial path
    let start = graph
        .node_at(1, 1)
        .or_else(|| graph.node_ids().next())
        .expect("graph is non-empty");
    let goal = graph
        .node_at(22, 2)
        .or_else(|| graph.node_ids().last())
        .expect("graph is non-empty");

    let mut player = PathAgent::new();
    player.set_speed(config.agent.speed);
    player.set_radius(config.agent.radius);
    player.set_node(start, &graph);
    if player.go_to(goal, &graph, true) {
        info!(
            "player: initial path {:?} -> {:?} ({} nodes)",
            graph.coord(start),
            graph.coord(goal),
            player.path().len()
        );
    }

    // Wandering agent
    let mut wander_agent = PathAgent::new();
    wander_agent.set_speed(config.agent.speed);
    wander_agent.set_radius(config.agent.radius);
    let mut wanderer = Wanderer::new(StdRng::seed_from_u64(config.wander.seed));
    wanderer.set_enabled(config.wander.enabled);

    // Tick loop
    let dt = 1.0 / config.sim.tick_hz;
    let tick_period = Duration::from_secs_f32(dt);
    let total_ticks = (config.sim.duration_secs * config.sim.tick_hz) as u32;
    let retarget_tick = total_ticks / 3;

    let retarget_goal = graph
        .node_at(graph.width() - 2, graph.height() - 2)
        .or_else(|| graph.node_ids().last());

    info!(
        "Running {} ticks at {} Hz",
        total_ticks, config.sim.tick_hz
    );

    for tick in 0..total_ticks {
        let player_was_moving = player.has_path();
        let wanderer_was_moving = wander_agent.has_path();

        player.update(dt, &graph);
        wander_agent.update(dt, &graph);

        if player_was_moving && !player.has_path() {
            info!(
                "player arrived at ({:.0}, {:.0})",
                player.position().x,
                player.position().y
            );
        }
        if wanderer_was_moving && !wander_agent.has_path() {
            info!(
                "wanderer arrived at ({:.0}, {:.0})",
                wander_agent.position().x,
                wander_agent.position().y
            );
        }

        // Scripted retarget: stands in for an input collaborator click.
        // Supersedes whatever search may still be pending for the player.
        if tick == retarget_tick {
            if let (Some(from), Some(to)) = (graph.nearest_node(player.position()), retarget_goal)
            {
                info!(
                    "retargeting player: {:?} -> {:?}",
                    graph.coord(from),
                    graph.coord(to)
                );
                scheduler.request_superseding(PLAYER, from, to, true);
            }
        }

        // Drain finished background searches
        if let Some(done) = scheduler.poll(PLAYER) {
            info!(
                "player path ready: {} nodes to {:?}",
                done.result.len(),
                graph.coord(done.goal)
            );
            if !player.adopt_path(done.result, done.adopt_as_current) {
                warn!("player rejected path to {:?}", graph.coord(done.goal));
            }
        }
        if let Some(done) = scheduler.poll(WANDERER) {
            if !wander_agent.adopt_path(done.result, done.adopt_as_current) {
                warn!("wanderer rejected path to {:?}", graph.coord(done.goal));
            }
        }

        // Let the wanderer queue its next leg
        wanderer.tick(WANDERER, &mut wander_agent, &mut scheduler, &graph);

        std::thread::sleep(tick_period);
    }

    info!("Shutting down, joining outstanding workers");
    scheduler.shutdown();
    info!("Done");
    Ok(())
}
