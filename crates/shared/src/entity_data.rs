use bevy::prelude::{
    App, Changed, Component, DetectChangesMut, Entity, EulerRot, IntoScheduleConfigs, Message,
    MessageWriter, Plugin, PostUpdate, Quat, Query, Resource, Srgba, Transform, Vec3,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::object_type::ObjectType;

bitflags::bitflags! {
    /// Fields of [`SimEntityData`] changed since the last flush.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[serde(transparent)]
    pub struct DataBits: u32 {
        const POSITION = 1 << 0;
        const ROTATION = 1 << 1;
        const VELOCITY = 1 << 2;
        const SCALE = 1 << 3;
        const ACCELERATION = 1 << 4;
        const LABEL = 1 << 5;
        const COLOR = 1 << 6;
        const TYPE = 1 << 7;
    }
}

impl Default for DataBits {
    fn default() -> Self {
        DataBits::empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SimId(pub u32);

impl fmt::Display for SimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Resource, Default, Debug)]
pub struct SimIdAllocator {
    next: u32,
}

impl SimIdAllocator {
    pub fn allocate(&mut self) -> SimId {
        let id = SimId(self.next);
        self.next += 1;
        id
    }
}

/// State shared by every component of one simulated entity.
///
/// Setters only flag a field dirty when its value actually changes, so a
/// [`EntityDataDelta`] built from it carries nothing that a peer already has.
#[derive(Component, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimEntityData {
    position: Vec3,
    /// Euler angles in degrees
    rotation: Vec3,
    velocity: Vec3,
    scale: Vec3,
    acceleration: Vec3,
    label: String,
    color: Srgba,
    id: SimId,
    object_type: ObjectType,
    dirty: DataBits,
}

impl Default for SimEntityData {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            scale: Vec3::ONE,
            acceleration: Vec3::ZERO,
            label: String::new(),
            color: Srgba::WHITE,
            id: SimId::default(),
            object_type: ObjectType::empty(),
            dirty: DataBits::all(),
        }
    }
}

impl SimEntityData {
    pub fn new(
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        label: impl Into<String>,
        object_type: ObjectType,
        id: SimId,
    ) -> Self {
        Self {
            position,
            rotation,
            scale,
            label: label.into(),
            object_type,
            id,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Srgba {
        self.color
    }

    pub fn id(&self) -> SimId {
        self.id
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn dirty_bits(&self) -> DataBits {
        self.dirty
    }

    pub fn set_position(&mut self, position: Vec3) {
        if position != self.position {
            self.position = position;
            self.dirty |= DataBits::POSITION;
        }
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        if rotation != self.rotation {
            self.rotation = rotation;
            self.dirty |= DataBits::ROTATION;
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        if velocity != self.velocity {
            self.velocity = velocity;
            self.dirty |= DataBits::VELOCITY;
        }
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        if scale != self.scale {
            self.scale = scale;
            self.dirty |= DataBits::SCALE;
        }
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        if acceleration != self.acceleration {
            self.acceleration = acceleration;
            self.dirty |= DataBits::ACCELERATION;
        }
    }

    pub fn set_label(&mut self, label: &str) {
        if label != self.label {
            self.label = label.to_string();
            self.dirty |= DataBits::LABEL;
        }
    }

    pub fn set_color(&mut self, color: Srgba) {
        if color != self.color {
            self.color = color;
            self.dirty |= DataBits::COLOR;
        }
    }

    pub fn set_object_type(&mut self, object_type: ObjectType) {
        if object_type != self.object_type {
            self.object_type = object_type;
            self.dirty |= DataBits::TYPE;
        }
    }

    pub fn clear_dirty_bits(&mut self) {
        self.dirty = DataBits::empty();
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = DataBits::all();
    }

    pub fn mark_dirty(&mut self, bits: DataBits) {
        self.dirty |= bits;
    }

    pub fn is_dirty(&self, bits: DataBits) -> bool {
        self.dirty.intersects(bits)
    }

    /// Snapshot of the dirty fields only.
    pub fn delta(&self) -> EntityDataDelta {
        let pick = |bit: DataBits| self.dirty.contains(bit);
        EntityDataDelta {
            dirty: self.dirty,
            position: pick(DataBits::POSITION).then_some(self.position),
            rotation: pick(DataBits::ROTATION).then_some(self.rotation),
            velocity: pick(DataBits::VELOCITY).then_some(self.velocity),
            scale: pick(DataBits::SCALE).then_some(self.scale),
            acceleration: pick(DataBits::ACCELERATION).then_some(self.acceleration),
            label: pick(DataBits::LABEL).then(|| self.label.clone()),
            color: pick(DataBits::COLOR).then_some(self.color),
            object_type: pick(DataBits::TYPE).then_some(self.object_type),
        }
    }

    /// Writes the fields carried by `delta`. Bits that were already dirty stay
    /// dirty.
    pub fn apply_delta(&mut self, delta: &EntityDataDelta) {
        self.dirty |= delta.dirty;
        if let Some(position) = delta.position {
            self.position = position;
        }
        if let Some(rotation) = delta.rotation {
            self.rotation = rotation;
        }
        if let Some(velocity) = delta.velocity {
            self.velocity = velocity;
        }
        if let Some(scale) = delta.scale {
            self.scale = scale;
        }
        if let Some(acceleration) = delta.acceleration {
            self.acceleration = acceleration;
        }
        if let Some(label) = &delta.label {
            self.label.clone_from(label);
        }
        if let Some(color) = delta.color {
            self.color = color;
        }
        if let Some(object_type) = delta.object_type {
            self.object_type = object_type;
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        let radians = self.rotation * std::f32::consts::PI / 180.0;
        Quat::from_euler(EulerRot::XYZ, radians.x, radians.y, radians.z)
    }
}

impl fmt::Display for SimEntityData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, position: {}, rotation: {}, velocity: {}, scale: {}}}",
            self.id, self.position, self.rotation, self.velocity, self.scale
        )
    }
}

/// Changed fields of one entity, in the order position, rotation, velocity,
/// scale, acceleration, label, color, type.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityDataDelta {
    pub dirty: DataBits,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub acceleration: Option<Vec3>,
    pub label: Option<String>,
    pub color: Option<Srgba>,
    pub object_type: Option<ObjectType>,
}

#[derive(Message, Clone, Debug)]
pub struct EntityDataChanged {
    pub entity: Entity,
    pub id: SimId,
    pub delta: EntityDataDelta,
}

pub struct EntityDataPlugin;

impl Plugin for EntityDataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimIdAllocator>()
            .add_message::<EntityDataChanged>()
            .add_systems(
                PostUpdate,
                (sync_entity_data_to_transform, publish_and_clear_dirty_data).chain(),
            );
    }
}

fn sync_entity_data_to_transform(
    mut query: Query<(&SimEntityData, &mut Transform), Changed<SimEntityData>>,
) {
    for (data, mut transform) in query.iter_mut() {
        if data.is_dirty(DataBits::POSITION) {
            transform.translation = data.position;
        }
        if data.is_dirty(DataBits::ROTATION) {
            transform.rotation = data.rotation_quat();
        }
        if data.is_dirty(DataBits::SCALE) {
            transform.scale = data.scale;
        }
    }
}

fn publish_and_clear_dirty_data(
    mut query: Query<(Entity, &mut SimEntityData)>,
    mut changes: MessageWriter<EntityDataChanged>,
) {
    for (entity, mut data) in query.iter_mut() {
        if data.dirty.is_empty() {
            continue;
        }
        changes.write(EntityDataChanged {
            entity,
            id: data.id,
            delta: data.delta(),
        });
        data.bypass_change_detection().clear_dirty_bits();
    }
}
