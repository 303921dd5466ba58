//! Double-density relaxation
//!
//! Densities come from the offsets stored during neighbor search, not from
//! the positions as they are being moved. Displacements use the raw offset
//! vector, so their magnitude grows with separation as well as with `q`.

use crate::config::ViscoelasticParams;
use crate::core::ParticleSet;
use crate::math::{Real, closeness, zero_vector};

pub fn relax_density(particles: &mut ParticleSet, params: &ViscoelasticParams, dt: Real) {
    let radius = params.interaction_radius;
    let half_dt_sq = dt * dt * 0.5;

    for i in 0..particles.len() {
        let (density, near_density) = particles.at(i).neighbors.iter().fold(
            (0.0, 0.0),
            |(density, near_density), neighbor| {
                let q = closeness(neighbor.offset.length(), radius);
                (density + q * q, near_density + q * q * q)
            },
        );

        let pressure = params.stiffness * (density - params.rest_density);
        let near_pressure = params.near_stiffness * near_density;
        {
            let particle = particles.at_mut(i);
            particle.density = density;
            particle.near_density = near_density;
        }

        let mut self_displacement = zero_vector();
        for k in 0..particles.at(i).neighbors.len() {
            let neighbor = particles.at(i).neighbors[k];
            let q = closeness(neighbor.offset.length(), radius);
            let displacement = neighbor.offset * (half_dt_sq * (pressure * q + near_pressure * q * q));

            particles.at_mut(neighbor.index).position += displacement;
            self_displacement -= displacement;
        }
        particles.at_mut(i).position += self_displacement;
    }
}
