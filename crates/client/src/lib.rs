pub mod camera;
pub mod render;

use bevy::prelude::{
    App, AppExit, AssetPlugin, DefaultPlugins, PluginGroup, Window, WindowPlugin, default,
};
use bevy::window::PresentMode;

use shared::{SharedPlugin, SimulationSettings};

use crate::camera::ClientCameraPlugin;
use crate::render::ArenaVisualsPlugin;

pub fn create_client_app(settings: SimulationSettings) -> App {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Roomba".to_string(),
                    resolution: (1280, 720).into(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: settings.asset_path.clone(),
                ..Default::default()
            }),
    );

    app.insert_resource(settings);
    app.add_plugins(SharedPlugin);
    app.add_plugins((ClientCameraPlugin, ArenaVisualsPlugin));

    app
}

/// Loader hook: starts the graphical client with default settings.
pub fn mod_main() -> AppExit {
    run_client(SimulationSettings::default())
}

pub fn run_client(settings: SimulationSettings) -> AppExit {
    create_client_app(settings).run()
}
