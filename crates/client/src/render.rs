use bevy::prelude::{
    Add, App, Assets, Color, Commands, Cuboid, Cylinder, Mesh, Mesh3d, MeshMaterial3d, On, Plugin,
    Query, ResMut, Sphere, StandardMaterial, Without, debug, default,
};

use shared::arena::{BoxExtent, MARKER_RADIUS, ROOMBA_BODY_HEIGHT};
use shared::constants::ROOMBA_RAD;
use shared::entity_data::SimEntityData;
use shared::object_type::ObjectType;

pub struct ArenaVisualsPlugin;

impl Plugin for ArenaVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(add_arena_visuals);
    }
}

pub fn object_color(object_type: ObjectType) -> Color {
    match object_type {
        ObjectType::ROOMBA => Color::srgb(0.15, 0.15, 0.18),
        ObjectType::WALLS => Color::srgb(0.75, 0.72, 0.68),
        ObjectType::FLOOR => Color::srgb(0.45, 0.35, 0.25),
        ObjectType::MARKER => Color::srgb(0.9, 0.2, 0.2),
        _ => Color::WHITE,
    }
}

pub fn object_mesh(object_type: ObjectType, extent: Option<&BoxExtent>) -> Option<Mesh> {
    match object_type {
        ObjectType::ROOMBA => Some(Cylinder::new(ROOMBA_RAD as f32, ROOMBA_BODY_HEIGHT).into()),
        ObjectType::MARKER => Some(Sphere::new(MARKER_RADIUS).into()),
        ObjectType::WALLS | ObjectType::FLOOR => {
            extent.map(|BoxExtent(size)| Cuboid::from_size(*size).into())
        }
        _ => None,
    }
}

fn add_arena_visuals(
    trigger: On<Add, ObjectType>,
    query: Query<(&ObjectType, &SimEntityData, Option<&BoxExtent>), Without<Mesh3d>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let Ok((object_type, data, extent)) = query.get(trigger.entity) else {
        debug!("No arena data on {:?}, skipping visuals", trigger.entity);
        return;
    };

    let Some(mesh) = object_mesh(*object_type, extent) else {
        debug!("No mesh for {} ({:?})", data.label(), object_type);
        return;
    };

    commands.entity(trigger.entity).insert((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: object_color(*object_type),
            ..default()
        })),
    ));
    debug!("Added visuals for {}", data);
}
