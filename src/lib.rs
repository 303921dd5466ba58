use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod solver;
pub mod systems;

// Public re-exports for clean API
pub use crate::config::{NeighborSearch, ViscoelasticParams};
pub use crate::core::{Particle, ParticleId, SimulationState, SpringNetwork, StepStats};
pub use crate::scene::{Blocker, Blockers, PendingEdits, SceneEdit};
pub use crate::solver::Bounds;
pub use crate::systems::SimulationBounds;

use crate::config::{STEP_HZ, check};
use crate::systems::{advance_simulation, apply_pending_edits, cull_out_of_bounds};

pub struct ViscoelasticPlugin {
    pub params: ViscoelasticParams,
    /// Fixed simulation steps per second.
    pub step_hz: f64,
}

impl Default for ViscoelasticPlugin {
    fn default() -> Self {
        Self {
            params: ViscoelasticParams::default(),
            step_hz: STEP_HZ,
        }
    }
}

impl ViscoelasticPlugin {
    pub fn new(params: ViscoelasticParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn with_step_hz(mut self, step_hz: f64) -> Self {
        self.step_hz = step_hz;
        self
    }
}

impl Plugin for ViscoelasticPlugin {
    fn build(&self, app: &mut App) {
        for field in self.params.invalid_fields() {
            warn!("parameter `{}` should be a non-negative finite number", field);
        }
        let dt = (1.0 / self.step_hz) as f32;
        if !check::plastic_rate_ok(dt, self.params.plasticity_constant) {
            warn!(
                "plasticity_constant {} at {} Hz lets rest lengths overshoot",
                self.params.plasticity_constant, self.step_hz
            );
        }

        app.insert_resource(SimulationState::new(self.params.clone()))
            .init_resource::<Blockers>()
            .init_resource::<PendingEdits>()
            .init_resource::<SimulationBounds>()
            .insert_resource(Time::<Fixed>::from_hz(self.step_hz))
            .add_systems(Update, (apply_pending_edits, cull_out_of_bounds).chain())
            .add_systems(FixedUpdate, advance_simulation);

        info!(
            "viscoelastic fluid: radius {}, {} Hz, {:?} neighbor search",
            self.params.interaction_radius, self.step_hz, self.params.neighbor_search
        );
    }
}
