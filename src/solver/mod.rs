//! Per-step solver passes
//!
//! Each pass works on the dense particle store directly; `SimulationState`
//! decides the order.

pub mod culling;
pub mod integrate;
pub mod neighbors;
pub mod relaxation;
pub mod springs;
pub mod viscosity;

pub use culling::{Bounds, cull_particles, point_region};
pub use integrate::{apply_gravity, predict_positions, reconstruct_velocities};
pub use neighbors::find_neighbors;
pub use relaxation::relax_density;
pub use springs::{
    SpringPassStats, adjust_rest_lengths, apply_spring_displacements, create_springs,
    plastic_rest_length, remove_stretched_springs, update_springs,
};
pub use viscosity::apply_viscosity;
