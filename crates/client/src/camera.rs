use bevy::prelude::{
    App, Camera, Camera2d, Camera3d, Commands, Component, DirectionalLight, Name, Plugin, Startup,
    Transform, Vec3, default,
};
use bevy_inspector_egui::{
    bevy_egui::{EguiGlobalSettings, EguiPlugin, PrimaryEguiContext},
    quick::WorldInspectorPlugin,
};

use shared::constants::{HEIGHT, XDIM, YDIM};

#[derive(Component, Default)]
pub struct ArenaCamera;

#[derive(Component)]
struct DebugCamera;

pub struct ClientCameraPlugin;
impl Plugin for ClientCameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EguiGlobalSettings {
            auto_create_primary_context: false,
            ..Default::default()
        });
        app.add_plugins((EguiPlugin::default(), WorldInspectorPlugin::default()));
        app.add_systems(Startup, (spawn_arena_camera, spawn_debug_camera));
    }
}

/// Centre of the arena floor
pub fn arena_centre() -> Vec3 {
    Vec3::new(XDIM / 2.0, 0.0, YDIM / 2.0)
}

/// Elevated view from the south side looking down on the whole arena.
pub fn arena_camera_transform() -> Transform {
    let eye = arena_centre() + Vec3::new(0.0, XDIM.max(YDIM), YDIM * 0.6);
    Transform::from_translation(eye).looking_at(arena_centre(), Vec3::Y)
}

fn spawn_arena_camera(mut commands: Commands) {
    commands.spawn((
        ArenaCamera,
        Camera {
            order: 0,
            ..default()
        },
        Camera3d::default(),
        arena_camera_transform(),
        Name::new("Arena_Camera"),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(arena_centre() + Vec3::new(XDIM / 4.0, HEIGHT * 10.0, 0.0))
            .looking_at(arena_centre(), Vec3::Y),
        Name::new("Sun"),
    ));
}

fn spawn_debug_camera(mut commands: Commands) {
    commands.spawn((
        Camera {
            order: 100,
            ..default()
        },
        Camera2d::default(),
        DebugCamera,
        PrimaryEguiContext,
    ));
}
