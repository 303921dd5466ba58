use indexmap::IndexMap;

use super::particle::{Particle, ParticleId};
use crate::math::Point;

/// Dense, insertion-ordered particle storage with stable identifiers.
///
/// Dense indices are valid for the duration of a step; they shift when
/// particles are removed, which is why removal returns an old-to-new
/// index mapping and rewrites every neighbor list through it.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    particles: IndexMap<ParticleId, Particle>,
    next_id: u64,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Ids come from a 64-bit counter, which no realistic run exhausts.
    pub(crate) fn insert(&mut self, particle: Particle) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.insert(id, particle);
        id
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.particles.get_index_of(&id)
    }

    pub fn id_at(&self, index: usize) -> Option<ParticleId> {
        self.particles.get_index(index).map(|(&id, _)| id)
    }

    pub fn at(&self, index: usize) -> &Particle {
        &self.particles[index]
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter().map(|(&id, particle)| (id, particle))
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    pub(crate) fn particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.keys().copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.particles.values().map(|particle| particle.position)
    }

    /// Keep only the particles for which `keep` returns true.
    ///
    /// Returns the old-to-new index mapping (`None` for removed particles),
    /// or an empty mapping when nothing was removed. Springs are not touched
    /// here; callers sever them first.
    pub(crate) fn retain<F>(&mut self, mut keep: F) -> Vec<Option<usize>>
    where
        F: FnMut(ParticleId, &Particle) -> bool,
    {
        let old_len = self.particles.len();
        let mut mapping = vec![None; old_len];
        let mut next_index = 0;
        let mut removed_any = false;

        for (old_idx, (&id, particle)) in self.particles.iter().enumerate() {
            if keep(id, particle) {
                mapping[old_idx] = Some(next_index);
                next_index += 1;
            } else {
                removed_any = true;
            }
        }

        if !removed_any {
            return Vec::new();
        }

        let mut old_idx = 0;
        self.particles.retain(|_, _| {
            let kept = mapping[old_idx].is_some();
            old_idx += 1;
            kept
        });
        self.remap_neighbors(&mapping);
        mapping
    }

    pub(crate) fn remove(&mut self, id: ParticleId) -> bool {
        !self.retain(|candidate, _| candidate != id).is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.particles.clear();
    }

    fn remap_neighbors(&mut self, mapping: &[Option<usize>]) {
        for particle in self.particles.values_mut() {
            particle.neighbors.retain_mut(|neighbor| {
                match mapping.get(neighbor.index).copied().flatten() {
                    Some(new_index) => {
                        neighbor.index = new_index;
                        true
                    }
                    None => false,
                }
            });
        }
    }
}
