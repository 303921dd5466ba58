//! Fluid particles
//!
//! Particles carry position, velocity, the per-step density scratch values,
//! the transient neighbor list and the persistent spring links.

use indexmap::IndexMap;

use super::spring::SpringKey;
use crate::math::{Real, Vector, zero_vector};

/// Stable particle identifier. Never reused by the store that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub(crate) u64);

/// One entry of a particle's neighbor list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Dense index of the neighbor inside the particle store.
    pub index: usize,
    pub id: ParticleId,
    /// Vector pointing from the owning particle to the neighbor.
    pub offset: Vector,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector,
    pub velocity: Vector,
    /// Position snapshot taken right before prediction.
    pub old_position: Vector,

    // Recomputed every step
    pub density: Real,
    pub near_density: Real,

    pub(crate) neighbors: Vec<Neighbor>,
    pub(crate) springs: IndexMap<ParticleId, SpringKey>,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: zero_vector(),
            old_position: position,
            density: 0.0,
            near_density: 0.0,
            neighbors: Vec::new(),
            springs: IndexMap::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Neighbors found during the most recent step.
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    pub fn neighbor_offset(&self, id: ParticleId) -> Option<Vector> {
        self.neighbors
            .iter()
            .find(|neighbor| neighbor.id == id)
            .map(|neighbor| neighbor.offset)
    }

    /// Partner id and spring key for every spring attached to this particle.
    pub fn springs(&self) -> impl Iterator<Item = (ParticleId, SpringKey)> + '_ {
        self.springs.iter().map(|(&partner, &key)| (partner, key))
    }

    pub fn spring_to(&self, partner: ParticleId) -> Option<SpringKey> {
        self.springs.get(&partner).copied()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}
