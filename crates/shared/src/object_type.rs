use avian3d::prelude::{CollisionLayers, LayerMask};
use bevy::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::constants::{
    OBJECT_TYPE_FLOOR, OBJECT_TYPE_MARKER, OBJECT_TYPE_ROOMBA, OBJECT_TYPE_WALLS,
};

bitflags::bitflags! {
    /// Category tag of a simulated object. Tags OR together into masks for
    /// collision filtering and queries.
    #[derive(Component, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[serde(transparent)]
    pub struct ObjectType: u32 {
        const ROOMBA = OBJECT_TYPE_ROOMBA;
        const WALLS = OBJECT_TYPE_WALLS;
        const FLOOR = OBJECT_TYPE_FLOOR;
        const MARKER = OBJECT_TYPE_MARKER;
    }
}

impl ObjectType {
    /// Categories this object's collider reacts to. Markers are passed over.
    pub fn collides_with(self) -> ObjectType {
        let mut filter = ObjectType::empty();
        if self.contains(ObjectType::ROOMBA) {
            filter |= ObjectType::WALLS | ObjectType::FLOOR;
        }
        if self.intersects(ObjectType::WALLS | ObjectType::FLOOR) {
            filter |= ObjectType::ROOMBA;
        }
        filter
    }

    pub fn collision_layers(self) -> CollisionLayers {
        CollisionLayers::new(LayerMask(self.bits()), LayerMask(self.collides_with().bits()))
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectType::ROOMBA => "Roomba",
            ObjectType::WALLS => "Walls",
            ObjectType::FLOOR => "Floor",
            ObjectType::MARKER => "Marker",
            _ => "Mixed",
        }
    }
}
