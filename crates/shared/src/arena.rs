use avian3d::prelude::{Collider, RigidBody, Sensor};
use bevy::prelude::{
    App, Bundle, Commands, Component, Name, Plugin, Res, ResMut, Startup, Transform, Vec3, info,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{AGENT_X, AGENT_Y, HEIGHT, MIN_DISTANCE, OFFSET, ROOMBA_RAD, XDIM, YDIM};
use crate::entity_data::{SimEntityData, SimIdAllocator};
use crate::object_type::ObjectType;
use crate::settings::SimulationSettings;

pub const FLOOR_THICKNESS: f32 = 1.0;
pub const WALL_THICKNESS: f32 = 1.0;
pub const ROOMBA_BODY_HEIGHT: f32 = 2.0;
pub const MARKER_RADIUS: f32 = 1.0;

#[derive(Component, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArenaReady;

/// Full size of a box-shaped arena piece (floor, walls).
#[derive(Component, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoxExtent(pub Vec3);

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena);
    }
}

/// Distance markers keep from the walls so the roomba can reach them.
pub fn marker_margin() -> f32 {
    (ROOMBA_RAD + MIN_DISTANCE) as f32
}

/// Arena floor spans `[0, XDIM] x [0, YDIM]` on the XZ plane, Y up.
pub fn contains_on_floor(position: Vec3) -> bool {
    (0.0..=XDIM).contains(&position.x) && (0.0..=YDIM).contains(&position.z)
}

fn arena_bundle(data: SimEntityData, body: RigidBody, collider: Collider) -> impl Bundle {
    let object_type = data.object_type();
    (
        Name::new(data.label().to_string()),
        Transform::from_translation(data.position()).with_scale(data.scale()),
        object_type.collision_layers(),
        object_type,
        body,
        collider,
        data,
    )
}

pub fn spawn_arena(
    mut commands: Commands,
    settings: Option<Res<SimulationSettings>>,
    mut ids: ResMut<SimIdAllocator>,
) {
    let settings = settings.map(|s| s.clone()).unwrap_or_default();
    let centre = Vec3::new(XDIM / 2.0, 0.0, YDIM / 2.0);

    commands.spawn((
        arena_bundle(
            SimEntityData::new(
                centre.with_y(-FLOOR_THICKNESS / 2.0),
                Vec3::ZERO,
                Vec3::ONE,
                "Floor",
                ObjectType::FLOOR,
                ids.allocate(),
            ),
            RigidBody::Static,
            Collider::cuboid(XDIM, FLOOR_THICKNESS, YDIM),
        ),
        BoxExtent(Vec3::new(XDIM, FLOOR_THICKNESS, YDIM)),
    ));

    // Wall meshes are centred, lift them by -OFFSET so they stand on the floor
    let wall_y = -OFFSET;
    let walls = [
        (
            Vec3::new(XDIM, wall_y, YDIM / 2.0),
            Vec3::new(WALL_THICKNESS, HEIGHT, YDIM),
            "Wall East",
        ),
        (
            Vec3::new(0.0, wall_y, YDIM / 2.0),
            Vec3::new(WALL_THICKNESS, HEIGHT, YDIM),
            "Wall West",
        ),
        (
            Vec3::new(XDIM / 2.0, wall_y, YDIM),
            Vec3::new(XDIM, HEIGHT, WALL_THICKNESS),
            "Wall North",
        ),
        (
            Vec3::new(XDIM / 2.0, wall_y, 0.0),
            Vec3::new(XDIM, HEIGHT, WALL_THICKNESS),
            "Wall South",
        ),
    ];

    for (position, size, name) in walls {
        commands.spawn((
            arena_bundle(
                SimEntityData::new(
                    position,
                    Vec3::ZERO,
                    Vec3::ONE,
                    name,
                    ObjectType::WALLS,
                    ids.allocate(),
                ),
                RigidBody::Static,
                Collider::cuboid(size.x, size.y, size.z),
            ),
            BoxExtent(size),
        ));
    }

    commands.spawn(arena_bundle(
        SimEntityData::new(
            Vec3::new(AGENT_X as f32, ROOMBA_BODY_HEIGHT / 2.0, AGENT_Y as f32),
            Vec3::ZERO,
            Vec3::ONE,
            "Roomba",
            ObjectType::ROOMBA,
            ids.allocate(),
        ),
        RigidBody::Kinematic,
        Collider::cylinder(ROOMBA_RAD as f32, ROOMBA_BODY_HEIGHT),
    ));

    let margin = marker_margin();
    let mut rng = StdRng::seed_from_u64(settings.seed);
    for i in 0..settings.marker_count {
        let position = Vec3::new(
            rng.random_range(margin..XDIM - margin),
            MARKER_RADIUS,
            rng.random_range(margin..YDIM - margin),
        );
        commands.spawn((
            arena_bundle(
                SimEntityData::new(
                    position,
                    Vec3::ZERO,
                    Vec3::ONE,
                    format!("Marker_{}", i + 1),
                    ObjectType::MARKER,
                    ids.allocate(),
                ),
                RigidBody::Static,
                Collider::sphere(MARKER_RADIUS),
            ),
            Sensor,
        ));
    }

    info!(
        "Arena {}x{} spawned with {} markers (seed {})",
        XDIM, YDIM, settings.marker_count, settings.seed
    );
    commands.spawn((ArenaReady, Name::new("Arena")));
}
