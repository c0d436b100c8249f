#[cfg(test)]
mod entity_data_tests {
    use crate::entity_data::*;
    use crate::object_type::ObjectType;
    use bevy::prelude::*;

    /// New data is fully dirty, setting an equal value keeps it clean and a new
    /// value only flags its own field
    #[test]
    fn test_dirty_bits_track_real_changes() {
        let mut data = SimEntityData::default();
        assert_eq!(data.dirty_bits(), DataBits::all());

        data.clear_dirty_bits();
        assert_eq!(data.dirty_bits(), DataBits::empty());

        data.set_position(Vec3::ZERO);
        assert_eq!(data.dirty_bits(), DataBits::empty());

        data.set_position(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(data.dirty_bits(), DataBits::POSITION);
        assert_eq!(data.position(), Vec3::new(1.0, 0.0, 0.0));

        data.clear_dirty_bits();
        data.set_velocity(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(data.dirty_bits(), DataBits::VELOCITY);

        data.set_position(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(data.dirty_bits(), DataBits::POSITION | DataBits::VELOCITY);
        assert!(data.is_dirty(DataBits::VELOCITY));
        assert!(!data.is_dirty(DataBits::LABEL | DataBits::COLOR));
    }

    #[test]
    fn test_delta_carries_only_dirty_fields() {
        let mut data = SimEntityData::new(
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::ONE,
            "Roomba",
            ObjectType::ROOMBA,
            SimId(3),
        );
        data.clear_dirty_bits();
        data.set_label("Roomba 2");
        data.set_scale(Vec3::splat(2.0));

        let delta = data.delta();
        assert_eq!(delta.dirty, DataBits::LABEL | DataBits::SCALE);
        assert_eq!(delta.label.as_deref(), Some("Roomba 2"));
        assert_eq!(delta.scale, Some(Vec3::splat(2.0)));
        assert_eq!(delta.position, None);
        assert_eq!(delta.object_type, None);
    }

    /// Applying a delta keeps whatever was already dirty on the receiver
    #[test]
    fn test_apply_delta_merges_dirty_bits() {
        let mut sender = SimEntityData::default();
        sender.clear_dirty_bits();
        sender.set_color(Srgba::RED);
        sender.set_object_type(ObjectType::MARKER);

        let mut receiver = SimEntityData::default();
        receiver.clear_dirty_bits();
        receiver.set_acceleration(Vec3::Y);

        receiver.apply_delta(&sender.delta());

        assert_eq!(receiver.color(), Srgba::RED);
        assert_eq!(receiver.object_type(), ObjectType::MARKER);
        assert_eq!(
            receiver.dirty_bits(),
            DataBits::ACCELERATION | DataBits::COLOR | DataBits::TYPE
        );
    }

    #[test]
    fn test_display_lists_id_and_kinematics() {
        let data = SimEntityData::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::ONE,
            "Wall",
            ObjectType::WALLS,
            SimId(7),
        );
        let text = data.to_string();
        assert!(text.starts_with("{id: 7, position: "), "got {text}");
        assert!(text.contains("scale: "));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn test_sim_ids_are_allocated_in_order() {
        let mut ids = SimIdAllocator::default();
        assert_eq!(ids.allocate(), SimId(0));
        assert_eq!(ids.allocate(), SimId(1));
        assert_eq!(ids.allocate(), SimId(2));
    }

    /// The plugin mirrors dirty data onto the transform, publishes the change
    /// and leaves the data clean for the next frame
    #[test]
    fn test_plugin_syncs_transform_and_clears_bits() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(EntityDataPlugin);

        let entity = app
            .world_mut()
            .spawn((
                SimEntityData::new(
                    Vec3::new(10.0, 1.0, 10.0),
                    Vec3::new(0.0, 90.0, 0.0),
                    Vec3::ONE,
                    "Roomba",
                    ObjectType::ROOMBA,
                    SimId(0),
                ),
                Transform::default(),
            ))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(10.0, 1.0, 10.0));
        let forward = transform.rotation * Vec3::X;
        assert!((forward - Vec3::NEG_Z).length() < 1e-4, "got {forward}");

        let data = app.world().get::<SimEntityData>(entity).unwrap();
        assert_eq!(data.dirty_bits(), DataBits::empty());

        let messages = app.world().resource::<Messages<EntityDataChanged>>();
        let mut cursor = messages.get_cursor();
        let published: Vec<_> = cursor.read(messages).collect();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].entity, entity);
        assert_eq!(published[0].delta.dirty, DataBits::all());

        app.world_mut()
            .get_mut::<SimEntityData>(entity)
            .unwrap()
            .set_position(Vec3::new(12.0, 1.0, 10.0));
        app.update();

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(12.0, 1.0, 10.0));
    }
}
