use bevy::prelude::{
    App, NextState, OnEnter, OnExit, Plugin, Res, ResMut, Resource, Startup, State, States, Time,
    Virtual, World, info, warn,
};
use bevy::state::app::AppExtStates;
use thiserror::Error;

use crate::settings::SimulationSettings;

/// Learning algorithm the module is currently driving.
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmState {
    #[default]
    Idle,
    Sarsa,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModError {
    #[error("speedup must be a finite positive factor, got {0}")]
    InvalidSpeedup(f32),
    #[error("an algorithm is already running: {0:?}")]
    AlgorithmAlreadyRunning(AlgorithmState),
    #[error("module is not initialized: missing {0}")]
    NotInitialized(&'static str),
}

/// Control surface of the running mod. Passed explicitly to whoever needs to
/// drive the simulation instead of being fetched from a global.
pub trait ModHandle {
    fn set_speedup(&mut self, speedup: f32) -> Result<(), ModError>;
    fn start_sarsa(&mut self) -> Result<(), ModError>;
}

/// Number of algorithm runs started since the app was built.
#[derive(Resource, Default, Debug)]
pub struct TrainingRuns(pub u32);

/// [`ModHandle`] over a Bevy world built with [`ModulePlugin`].
pub struct RoombaMod<'w> {
    world: &'w mut World,
}

impl<'w> RoombaMod<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }

    pub fn speedup(&self) -> Option<f32> {
        self.world
            .get_resource::<Time<Virtual>>()
            .map(|time| time.relative_speed())
    }

    pub fn algorithm(&self) -> Option<AlgorithmState> {
        self.world
            .get_resource::<State<AlgorithmState>>()
            .map(|state| *state.get())
    }
}

impl ModHandle for RoombaMod<'_> {
    fn set_speedup(&mut self, speedup: f32) -> Result<(), ModError> {
        if !speedup.is_finite() || speedup <= 0.0 {
            return Err(ModError::InvalidSpeedup(speedup));
        }

        let mut time = self
            .world
            .get_resource_mut::<Time<Virtual>>()
            .ok_or(ModError::NotInitialized("Time<Virtual>"))?;
        time.set_relative_speed(speedup);

        match self.world.get_resource_mut::<SimulationSettings>() {
            Some(mut settings) => settings.speedup = speedup,
            None => self.world.insert_resource(SimulationSettings {
                speedup,
                ..Default::default()
            }),
        }

        info!("Simulation speedup set to {speedup}");
        Ok(())
    }

    fn start_sarsa(&mut self) -> Result<(), ModError> {
        let current = self
            .algorithm()
            .ok_or(ModError::NotInitialized("State<AlgorithmState>"))?;
        if current != AlgorithmState::Idle {
            return Err(ModError::AlgorithmAlreadyRunning(current));
        }

        let mut next = self
            .world
            .get_resource_mut::<NextState<AlgorithmState>>()
            .ok_or(ModError::NotInitialized("NextState<AlgorithmState>"))?;
        // A start queued earlier this frame counts as running
        if let NextState::Pending(pending) | NextState::PendingIfNeq(pending) = *next {
            return Err(ModError::AlgorithmAlreadyRunning(pending));
        }
        next.set(AlgorithmState::Sarsa);

        info!("Requested sarsa start");
        Ok(())
    }
}

pub struct ModulePlugin;

impl Plugin for ModulePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AlgorithmState>()
            .init_resource::<TrainingRuns>()
            .add_systems(Startup, apply_configured_speedup)
            .add_systems(OnEnter(AlgorithmState::Sarsa), announce_sarsa_start)
            .add_systems(OnExit(AlgorithmState::Sarsa), announce_sarsa_stop);
    }
}

/// Applies `SimulationSettings::speedup` to the virtual clock once the app starts.
fn apply_configured_speedup(
    settings: Option<Res<SimulationSettings>>,
    mut time: ResMut<Time<Virtual>>,
) {
    let Some(settings) = settings else {
        return;
    };
    if !settings.speedup.is_finite() || settings.speedup <= 0.0 {
        warn!(
            "Ignoring configured speedup {}, keeping {}",
            settings.speedup,
            time.relative_speed()
        );
        return;
    }
    time.set_relative_speed(settings.speedup);
}

fn announce_sarsa_start(mut runs: ResMut<TrainingRuns>, time: Res<Time<Virtual>>) {
    runs.0 += 1;
    info!(
        "Sarsa run {} started (speedup {:.2})",
        runs.0,
        time.relative_speed()
    );
}

fn announce_sarsa_stop(runs: Res<TrainingRuns>) {
    info!("Sarsa run {} stopped", runs.0);
}
