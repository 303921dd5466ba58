//! Gravity, position prediction and velocity reconstruction

use crate::core::ParticleSet;
use crate::math::Real;

/// Gravity acts along +y (screen space, y grows downward).
pub fn apply_gravity(particles: &mut ParticleSet, gravity: Real, dt: Real) {
    let step = gravity * dt;
    for particle in particles.particles_mut() {
        particle.velocity.y += step;
    }
}

pub fn predict_positions(particles: &mut ParticleSet, dt: Real) {
    for particle in particles.particles_mut() {
        particle.old_position = particle.position;
        particle.position += particle.velocity * dt;
    }
}

/// Velocity becomes the displacement accumulated over the step divided by `dt`.
pub fn reconstruct_velocities(particles: &mut ParticleSet, dt: Real) {
    let inv_dt = 1.0 / dt;
    for particle in particles.particles_mut() {
        particle.velocity = (particle.position - particle.old_position) * inv_dt;
    }
}
