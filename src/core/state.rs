use std::time::Instant;

use bevy::prelude::*;

use crate::config::{ViscoelasticParams, check};
use crate::math::{Point, Real};
use crate::solver::{self, Bounds};

use super::particle::{Particle, ParticleId};
use super::particle_set::ParticleSet;
use super::spring::{Spring, SpringNetwork};

/// Counters gathered during the most recent call to `advance`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    pub particles: usize,
    pub neighbor_pairs: usize,
    pub viscosity_impulses: usize,
    pub springs_created: usize,
    pub springs_removed: usize,
    pub springs: usize,
    pub elapsed_ms: f32,
}

/// Aggregate simulation state: particles, springs and parameters.
#[derive(Resource, Clone, Debug)]
pub struct SimulationState {
    particle_set: ParticleSet,
    springs: SpringNetwork,
    params: ViscoelasticParams,
    last_step: StepStats,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(ViscoelasticParams::default())
    }
}

impl SimulationState {
    pub fn new(params: ViscoelasticParams) -> Self {
        Self {
            particle_set: ParticleSet::new(),
            springs: SpringNetwork::new(),
            params,
            last_step: StepStats::default(),
        }
    }

    pub fn params(&self) -> &ViscoelasticParams {
        &self.params
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particle_set
    }

    pub fn springs(&self) -> &SpringNetwork {
        &self.springs
    }

    pub fn particle_count(&self) -> usize {
        self.particle_set.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particle_set.get(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particle_set.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.particle_set.positions()
    }

    /// Endpoint positions of every spring, for debug drawing.
    pub fn spring_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.springs.iter().filter_map(|spring: &Spring| {
            let a = self.particle_set.get(spring.a)?;
            let b = self.particle_set.get(spring.b)?;
            Some((a.position, b.position))
        })
    }

    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    /// Insert a particle at rest.
    pub fn add_particle(&mut self, position: Point) -> ParticleId {
        self.particle_set.insert(Particle::new(position))
    }

    pub fn insert_particle(&mut self, particle: Particle) -> ParticleId {
        self.particle_set.insert(particle)
    }

    /// Remove a particle and every spring attached to it.
    pub fn remove_particle(&mut self, id: ParticleId) -> bool {
        if !self.particle_set.contains(id) {
            return false;
        }
        self.springs.sever(&mut self.particle_set, id);
        self.particle_set.remove(id)
    }

    pub fn clear(&mut self) {
        self.springs.clear(&mut self.particle_set);
        self.particle_set.clear();
        self.last_step = StepStats::default();
    }

    /// Remove every particle outside `bounds`. Returns how many were removed.
    pub fn cull<B: Bounds + ?Sized>(&mut self, bounds: &B) -> usize {
        let removed = solver::cull_particles(&mut self.particle_set, &mut self.springs, bounds);
        if removed > 0 {
            debug!(
                "culled {} particles, {} remain",
                removed,
                self.particle_set.len()
            );
        }
        removed
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Non-positive or non-finite timesteps leave the state untouched.
    pub fn advance(&mut self, dt: Real) {
        if !check::timestep_ok(dt) {
            warn!("ignoring simulation step with dt = {}", dt);
            return;
        }

        let start = Instant::now();
        let params = &self.params;
        let particles = &mut self.particle_set;
        let springs = &mut self.springs;

        solver::apply_gravity(particles, params.gravity, dt);
        let viscosity_impulses = solver::apply_viscosity(particles, params, dt);
        solver::predict_positions(particles, dt);

        let neighbor_pairs = solver::find_neighbors(particles, params);

        let spring_pass = solver::update_springs(particles, springs, params, dt);
        solver::apply_spring_displacements(particles, springs, params, dt);

        solver::relax_density(particles, params, dt);
        solver::reconstruct_velocities(particles, dt);

        let elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.last_step = StepStats {
            particles: particles.len(),
            neighbor_pairs,
            viscosity_impulses,
            springs_created: spring_pass.created,
            springs_removed: spring_pass.removed,
            springs: springs.len(),
            elapsed_ms,
        };
        trace!(
            "step: {:.3}ms, {} particles, {} pairs, {} springs (+{} -{})",
            elapsed_ms,
            self.last_step.particles,
            neighbor_pairs,
            self.last_step.springs,
            spring_pass.created,
            spring_pass.removed
        );
    }
}
