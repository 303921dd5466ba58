//! Plastic springs between particle pairs
//!
//! A spring lives in three places at once: the network's global map and the
//! `springs` map of both endpoints. Every mutation here updates all three.

use indexmap::IndexMap;

use super::particle::ParticleId;
use super::particle_set::ParticleSet;
use crate::math::Real;

/// Unordered particle pair, normalized so that `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpringKey {
    a: ParticleId,
    b: ParticleId,
}

impl SpringKey {
    pub fn new(first: ParticleId, second: ParticleId) -> Self {
        if first <= second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }

    pub fn a(&self) -> ParticleId {
        self.a
    }

    pub fn b(&self) -> ParticleId {
        self.b
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint at all.
    pub fn other(&self, id: ParticleId) -> Option<ParticleId> {
        if id == self.a {
            Some(self.b)
        } else if id == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    /// Creeps toward the current pair distance under plastic deformation.
    pub rest_length: Real,
    pub a: ParticleId,
    pub b: ParticleId,
}

impl Spring {
    pub fn key(&self) -> SpringKey {
        SpringKey::new(self.a, self.b)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpringNetwork {
    springs: IndexMap<SpringKey, Spring>,
}

impl SpringNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn contains(&self, first: ParticleId, second: ParticleId) -> bool {
        self.springs.contains_key(&SpringKey::new(first, second))
    }

    pub fn get(&self, first: ParticleId, second: ParticleId) -> Option<&Spring> {
        self.springs.get(&SpringKey::new(first, second))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spring> {
        self.springs.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Spring> {
        self.springs.values_mut()
    }

    /// Create a spring between two live, distinct particles unless one exists.
    ///
    /// Returns true when a new spring was created.
    pub(crate) fn connect(
        &mut self,
        particles: &mut ParticleSet,
        first: ParticleId,
        second: ParticleId,
        rest_length: Real,
    ) -> bool {
        let key = SpringKey::new(first, second);
        if first == second
            || self.springs.contains_key(&key)
            || !particles.contains(first)
            || !particles.contains(second)
        {
            return false;
        }

        self.springs.insert(
            key,
            Spring {
                rest_length,
                a: key.a(),
                b: key.b(),
            },
        );
        if let Some(particle) = particles.get_mut(key.a()) {
            particle.springs.insert(key.b(), key);
        }
        if let Some(particle) = particles.get_mut(key.b()) {
            particle.springs.insert(key.a(), key);
        }
        true
    }

    /// Remove a spring from the network and from both endpoints.
    pub(crate) fn disconnect(&mut self, particles: &mut ParticleSet, key: SpringKey) -> Option<Spring> {
        let spring = self.springs.shift_remove(&key)?;
        if let Some(particle) = particles.get_mut(key.a()) {
            particle.springs.shift_remove(&key.b());
        }
        if let Some(particle) = particles.get_mut(key.b()) {
            particle.springs.shift_remove(&key.a());
        }
        Some(spring)
    }

    /// Remove every spring attached to `id`. Returns how many were removed.
    pub(crate) fn sever(&mut self, particles: &mut ParticleSet, id: ParticleId) -> usize {
        let keys: Vec<SpringKey> = match particles.get(id) {
            Some(particle) => particle.springs.values().copied().collect(),
            None => return 0,
        };
        keys.into_iter()
            .filter(|&key| self.disconnect(particles, key).is_some())
            .count()
    }

    /// Remove the springs for which `keep` returns false, preserving order.
    ///
    /// One pass over the global map, then the endpoints' entries are dropped.
    pub(crate) fn retain<F>(&mut self, particles: &mut ParticleSet, mut keep: F) -> usize
    where
        F: FnMut(&Spring, &ParticleSet) -> bool,
    {
        let mut doomed: Vec<SpringKey> = Vec::new();
        self.springs.retain(|&key, spring| {
            let kept = keep(spring, &*particles);
            if !kept {
                doomed.push(key);
            }
            kept
        });

        for key in &doomed {
            if let Some(particle) = particles.get_mut(key.a()) {
                particle.springs.shift_remove(&key.b());
            }
            if let Some(particle) = particles.get_mut(key.b()) {
                particle.springs.shift_remove(&key.a());
            }
        }
        doomed.len()
    }

    pub(crate) fn clear(&mut self, particles: &mut ParticleSet) {
        for particle in particles.particles_mut() {
            particle.springs.clear();
        }
        self.springs.clear();
    }
}
