//! Configuration loading for the demo simulation.

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub wander: WanderSettings,
    #[serde(default)]
    pub sim: SimSettings,
}

/// Tile map input
#[derive(Clone, Debug, Deserialize)]
pub struct MapSettings {
    /// ASCII rows, '0' blocked, anything else walkable
    #[serde(default = "default_map_rows")]
    pub rows: Vec<String>,

    /// Cell size in world units (default: 50)
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

/// Agent movement parameters
#[derive(Clone, Debug, Deserialize)]
pub struct AgentSettings {
    /// Movement speed in world units per second (default: 64)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Visual marker radius in world units (default: 8)
    #[serde(default = "default_radius")]
    pub radius: f32,
}

/// Wandering agent parameters
#[derive(Clone, Debug, Deserialize)]
pub struct WanderSettings {
    /// Start with the wanderer active (default: true)
    #[serde(default = "default_wander_enabled")]
    pub enabled: bool,

    /// Seed for the wanderer's random goal selection (default: 17)
    #[serde(default = "default_wander_seed")]
    pub seed: u64,
}

/// Tick loop parameters
#[derive(Clone, Debug, Deserialize)]
pub struct SimSettings {
    /// Tick rate in Hz (default: 120)
    #[serde(default = "default_tick_hz")]
    pub tick_hz: f32,

    /// How long to run the simulation, in seconds (default: 8)
    #[serde(default = "default_duration")]
    pub duration_secs: f32,
}

impl MargaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MargaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for MargaConfig {
    fn default() -> Self {
        Self {
            map: MapSettings::default(),
            agent: AgentSettings::default(),
            wander: WanderSettings::default(),
            sim: SimSettings::default(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            rows: default_map_rows(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            radius: default_radius(),
        }
    }
}

impl Default for WanderSettings {
    fn default() -> Self {
        Self {
            enabled: default_wander_enabled(),
            seed: default_wander_seed(),
        }
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            duration_secs: default_duration(),
        }
    }
}

/// Default demo maze: a 24x17 grid with a border of blocked cells.
fn default_map_rows() -> Vec<String> {
    [
        "000000000000000000000000",
        "011111101111111011111110",
        "010001001000001010000010",
        "011101111011101011101110",
        "010100000010001010100010",
        "011101111111101011101110",
        "010000100000001010000010",
        "011110101111111011111110",
        "010000101000000010000010",
        "011111101011111111101110",
        "010000001000000000001010",
        "011111111111111111111110",
        "010000100000001000000010",
        "011101101111101011101110",
        "010001001000001010000010",
        "011111111011111011111110",
        "000000000000000000000000",
    ]
    .iter()
    .map(|row| row.to_string())
    .collect()
}

fn default_cell_size() -> f32 {
    50.0
}

fn default_speed() -> f32 {
    64.0
}

fn default_radius() -> f32 {
    8.0
}

fn default_wander_enabled() -> bool {
    true
}

fn default_wander_seed() -> u64 {
    17
}

fn default_tick_hz() -> f32 {
    120.0
}

fn default_duration() -> f32 {
    8.0
}
