pub mod arena;
pub mod constants;
pub mod entity_data;
pub mod module;
pub mod object_type;
pub mod settings;

#[cfg(test)]
mod tests;

use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::{App, Fixed, Plugin, Time};

pub use constants::FIXED_TIMESTEP_HZ;
pub use module::{AlgorithmState, ModError, ModHandle, RoombaMod};
pub use settings::SimulationSettings;

/// Simulation-side plugins shared by the client and the headless runner.
pub struct SharedPlugin;
impl Plugin for SharedPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));
        app.init_resource::<SimulationSettings>();
        app.add_plugins(PhysicsPlugins::default());
        app.add_plugins((
            module::ModulePlugin,
            entity_data::EntityDataPlugin,
            arena::ArenaPlugin,
        ));
    }
}
