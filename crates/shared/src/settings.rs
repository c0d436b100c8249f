use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::HEADLESS_SPEEDUP;

pub const DEFAULT_MARKER_COUNT: usize = 12;
pub const DEFAULT_SEED: u64 = 42;

/// Runtime knobs for one simulation run. Filled from the launcher CLI.
#[derive(Resource, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationSettings {
    /// Multiplier on the virtual clock
    pub speedup: f32,
    /// Seed for marker placement
    pub seed: u64,
    pub marker_count: usize,
    pub asset_path: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speedup: HEADLESS_SPEEDUP,
            seed: DEFAULT_SEED,
            marker_count: DEFAULT_MARKER_COUNT,
            asset_path: "assets".to_string(),
        }
    }
}
