pub mod particle;
pub mod particle_set;
pub mod spring;
pub mod state;

pub use particle::{Neighbor, Particle, ParticleId};
pub use particle_set::ParticleSet;
pub use spring::{Spring, SpringKey, SpringNetwork};
pub use state::{SimulationState, StepStats};
