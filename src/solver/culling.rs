//! Removal of particles that left the simulation area

use std::collections::HashSet;

use bevy::math::Rect;

use crate::core::{ParticleId, ParticleSet, SpringNetwork};
use crate::math::Point;

/// Region containment test used to decide which particles survive.
pub trait Bounds {
    fn contains(&self, region: Rect) -> bool;
}

/// A rectangle contains a region when both of the region's corners are inside.
impl Bounds for Rect {
    fn contains(&self, region: Rect) -> bool {
        Rect::contains(self, region.min) && Rect::contains(self, region.max)
    }
}

impl<F> Bounds for F
where
    F: Fn(Rect) -> bool,
{
    fn contains(&self, region: Rect) -> bool {
        self(region)
    }
}

/// Zero-sized region at a particle position.
#[inline]
pub fn point_region(position: Point) -> Rect {
    Rect::from_center_size(position, bevy::math::Vec2::ZERO)
}

/// Remove every particle whose position is not contained by `bounds`,
/// severing its springs first. Returns the number of particles removed.
pub fn cull_particles<B>(particles: &mut ParticleSet, network: &mut SpringNetwork, bounds: &B) -> usize
where
    B: Bounds + ?Sized,
{
    let doomed: HashSet<ParticleId> = particles
        .iter()
        .filter(|(_, particle)| !bounds.contains(point_region(particle.position)))
        .map(|(id, _)| id)
        .collect();
    if doomed.is_empty() {
        return 0;
    }

    for &id in &doomed {
        network.sever(particles, id);
    }
    particles.retain(|id, _| !doomed.contains(&id));
    doomed.len()
}
