//! Pairwise viscosity impulses
//!
//! Runs before prediction, so the neighbor lists still describe the previous
//! step. Offsets are re-measured from current positions; pairs that drifted
//! to the radius or beyond are skipped.

use crate::config::ViscoelasticParams;
use crate::core::ParticleSet;
use crate::math::{Real, closeness, length_and_direction};

/// Apply viscosity impulses to every approaching pair. Returns how many
/// impulses were applied.
///
/// Each unordered pair is visited once (from its lower index) and both
/// velocities are updated immediately, so later pairs see earlier impulses.
pub fn apply_viscosity(particles: &mut ParticleSet, params: &ViscoelasticParams, dt: Real) -> usize {
    let sigma = params.linear_viscosity;
    let beta = params.quadratic_viscosity;
    if sigma == 0.0 && beta == 0.0 {
        return 0;
    }

    let radius = params.interaction_radius;
    let count = particles.len();
    let mut applied = 0;

    for i in 0..count {
        for k in 0..particles.at(i).neighbors.len() {
            let j = particles.at(i).neighbors[k].index;
            if j <= i || j >= count {
                continue;
            }

            let (first, second) = (particles.at(i), particles.at(j));
            let (distance, direction) = length_and_direction(second.position - first.position);
            let q = closeness(distance, radius);
            if q <= 0.0 || distance == 0.0 {
                continue;
            }

            // Inward radial velocity; positive when the pair is approaching.
            let inward = (first.velocity - second.velocity).dot(direction);
            if inward <= 0.0 {
                continue;
            }

            let impulse = direction * (dt * q * (sigma * inward + beta * inward * inward) * 0.5);
            particles.at_mut(i).velocity -= impulse;
            particles.at_mut(j).velocity += impulse;
            applied += 1;
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Particle;
    use crate::solver::find_neighbors;
    use bevy::math::Vec2;

    fn pair(v1: Vec2, v2: Vec2) -> ParticleSet {
        let mut set = ParticleSet::new();
        set.insert(Particle::new(Vec2::ZERO).with_velocity(v1));
        set.insert(Particle::new(Vec2::new(10.0, 0.0)).with_velocity(v2));
        find_neighbors(&mut set, &ViscoelasticParams::default());
        set
    }

    #[test]
    fn test_approaching_pair_is_damped_symmetrically() {
        let params = ViscoelasticParams::default().with_viscosity(1.0, 0.0);
        let mut set = pair(Vec2::new(5.0, 0.0), Vec2::new(-5.0, 0.0));

        assert_eq!(apply_viscosity(&mut set, &params, 0.1), 1);

        let v1 = set.at(0).velocity;
        let v2 = set.at(1).velocity;
        assert!(v1.x < 5.0 && v1.x > 0.0);
        assert!((v1 + v2).length() < 1e-6);
        assert_eq!(v1.y, 0.0);
    }

    #[test]
    fn test_separating_pair_is_untouched() {
        let params = ViscoelasticParams::default().with_viscosity(1.0, 1.0);
        let mut set = pair(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));

        assert_eq!(apply_viscosity(&mut set, &params, 0.1), 0);
        assert_eq!(set.at(0).velocity, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let params = ViscoelasticParams::default().with_viscosity(1.0, 1.0);
        let mut set = pair(Vec2::new(5.0, 0.0), Vec2::ZERO);
        set.at_mut(1).position = Vec2::ZERO;

        assert_eq!(apply_viscosity(&mut set, &params, 0.1), 0);
        assert_eq!(set.at(0).velocity, Vec2::new(5.0, 0.0));
        assert_eq!(set.at(1).velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pair_that_drifted_out_of_range_is_skipped() {
        let params = ViscoelasticParams::default().with_viscosity(1.0, 1.0);
        let mut set = pair(Vec2::new(5.0, 0.0), Vec2::ZERO);
        set.at_mut(1).position = Vec2::new(40.0, 0.0);

        assert_eq!(apply_viscosity(&mut set, &params, 0.1), 0);
        assert_eq!(set.at(0).velocity, Vec2::new(5.0, 0.0));
    }
}
