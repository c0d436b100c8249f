use bevy::diagnostic::FrameCount;
use bevy::log::LogPlugin;
use bevy::prelude::{
    App, AppExit, IntoScheduleConfigs, MessageWriter, MinimalPlugins, Res, Resource, Update,
    default, info, resource_exists,
};

use shared::constants::HEADLESS_SPEEDUP;
use shared::{ModError, ModHandle, RoombaMod, SharedPlugin, SimulationSettings};

use crate::LaunchError;

/// Frames to run before the headless app exits on its own.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameBudget(pub u32);

/// Window-less app running the shared simulation plugins. No logger is
/// installed so tests can build several of these in one process.
pub fn create_headless_app(settings: SimulationSettings, frames: Option<u32>) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::state::app::StatesPlugin,
        bevy::diagnostic::DiagnosticsPlugin,
        bevy::asset::AssetPlugin::default(),
        bevy::scene::ScenePlugin,
        bevy::mesh::MeshPlugin,
    ));

    app.insert_resource(settings);
    app.add_plugins(SharedPlugin);

    if let Some(frames) = frames {
        app.insert_resource(FrameBudget(frames));
    }
    app.add_systems(
        Update,
        exit_when_budget_spent.run_if(resource_exists::<FrameBudget>),
    );

    app
}

/// Headless startup hook: full speed, then start sarsa.
pub fn start_me(module: &mut impl ModHandle) -> Result<(), ModError> {
    module.set_speedup(HEADLESS_SPEEDUP)?;
    module.start_sarsa()
}

pub fn run_headless(
    settings: SimulationSettings,
    frames: Option<u32>,
    log_filter: &str,
) -> Result<(), LaunchError> {
    let mut app = create_headless_app(settings, frames);
    app.add_plugins(LogPlugin {
        filter: log_filter.to_string(),
        ..default()
    });

    start_me(&mut RoombaMod::new(app.world_mut()))?;

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(LaunchError::AppExit(code.get())),
    }
}

fn exit_when_budget_spent(
    frames: Res<FrameCount>,
    budget: Res<FrameBudget>,
    mut exit: MessageWriter<AppExit>,
) {
    if frames.0 + 1 >= budget.0 {
        info!("Frame budget of {} spent, exiting", budget.0);
        exit.write(AppExit::Success);
    }
}
