#[cfg(test)]
mod module_handle_tests {
    use crate::module::*;
    use crate::settings::SimulationSettings;
    use bevy::prelude::*;

    fn module_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin));
        app.add_plugins(ModulePlugin);
        app.update();
        app
    }

    #[test]
    fn test_set_speedup_scales_virtual_time() {
        let mut app = module_app();

        RoombaMod::new(app.world_mut()).set_speedup(4.0).unwrap();

        let time = app.world().resource::<Time<Virtual>>();
        assert_eq!(time.relative_speed(), 4.0);
        let settings = app.world().resource::<SimulationSettings>();
        assert_eq!(settings.speedup, 4.0, "Speedup should be recorded in settings");
    }

    #[test]
    fn test_invalid_speedup_is_rejected() {
        let mut app = module_app();
        let mut module = RoombaMod::new(app.world_mut());

        assert_eq!(module.set_speedup(0.0), Err(ModError::InvalidSpeedup(0.0)));
        assert_eq!(module.set_speedup(-2.0), Err(ModError::InvalidSpeedup(-2.0)));
        assert!(matches!(
            module.set_speedup(f32::NAN),
            Err(ModError::InvalidSpeedup(v)) if v.is_nan()
        ));
        assert_eq!(module.speedup(), Some(1.0), "Clock should be untouched");
    }

    #[test]
    fn test_start_sarsa_enters_sarsa_state() {
        let mut app = module_app();
        assert_eq!(
            RoombaMod::new(app.world_mut()).algorithm(),
            Some(AlgorithmState::Idle)
        );

        RoombaMod::new(app.world_mut()).start_sarsa().unwrap();
        app.update();

        let state = app.world().resource::<State<AlgorithmState>>();
        assert_eq!(state.get(), &AlgorithmState::Sarsa);
        assert_eq!(app.world().resource::<TrainingRuns>().0, 1);
    }

    #[test]
    fn test_start_sarsa_twice_fails() {
        let mut app = module_app();
        RoombaMod::new(app.world_mut()).start_sarsa().unwrap();
        app.update();

        let err = RoombaMod::new(app.world_mut()).start_sarsa().unwrap_err();
        assert_eq!(err, ModError::AlgorithmAlreadyRunning(AlgorithmState::Sarsa));
        app.update();
        assert_eq!(app.world().resource::<TrainingRuns>().0, 1);
    }

    #[test]
    fn test_start_sarsa_twice_in_one_frame_fails() {
        let mut app = module_app();
        let mut module = RoombaMod::new(app.world_mut());

        module.start_sarsa().unwrap();
        assert_eq!(
            module.start_sarsa(),
            Err(ModError::AlgorithmAlreadyRunning(AlgorithmState::Sarsa)),
            "A queued start should block a second one"
        );

        app.update();
        assert_eq!(
            app.world().resource::<State<AlgorithmState>>().get(),
            &AlgorithmState::Sarsa
        );
        assert_eq!(app.world().resource::<TrainingRuns>().0, 1);
    }

    #[test]
    fn test_configured_speedup_applies_at_startup() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin));
        app.insert_resource(SimulationSettings {
            speedup: 2.5,
            ..default()
        });
        app.add_plugins(ModulePlugin);
        app.update();

        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 2.5);
    }

    #[test]
    fn test_bad_configured_speedup_keeps_clock() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin));
        app.insert_resource(SimulationSettings {
            speedup: -1.0,
            ..default()
        });
        app.add_plugins(ModulePlugin);
        app.update();

        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 1.0);
    }

    #[test]
    fn test_uninitialized_world_reports_missing_resources() {
        let mut world = World::new();
        let mut module = RoombaMod::new(&mut world);

        assert_eq!(
            module.set_speedup(1.0),
            Err(ModError::NotInitialized("Time<Virtual>"))
        );
        assert_eq!(
            module.start_sarsa(),
            Err(ModError::NotInitialized("State<AlgorithmState>"))
        );
    }
}
