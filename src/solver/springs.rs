//! Spring lifecycle and elastic displacements
//!
//! Neighbor pairs without a spring get one with rest length equal to the
//! interaction radius. Rest lengths then creep plastically toward the
//! current distance once the deformation exceeds the yield band, and springs
//! stretched to the radius or beyond are dropped.

use crate::config::ViscoelasticParams;
use crate::core::{ParticleId, ParticleSet, SpringNetwork};
use crate::math::{Real, length_and_direction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpringPassStats {
    pub created: usize,
    pub removed: usize,
}

/// Plastic update of a single rest length.
///
/// Within `yield_ratio * rest_length` of the current distance the spring is
/// purely elastic and the rest length is returned unchanged.
#[inline]
pub fn plastic_rest_length(
    rest_length: Real,
    distance: Real,
    yield_ratio: Real,
    plasticity: Real,
    dt: Real,
) -> Real {
    let tolerable = yield_ratio * rest_length;
    if distance > rest_length + tolerable {
        rest_length + dt * plasticity * (distance - rest_length - tolerable)
    } else if distance < rest_length - tolerable {
        rest_length - dt * plasticity * (rest_length - distance - tolerable)
    } else {
        rest_length
    }
}

/// Create a spring for every neighbor pair that does not have one yet.
pub fn create_springs(particles: &mut ParticleSet, network: &mut SpringNetwork, rest_length: Real) -> usize {
    let pairs: Vec<(ParticleId, ParticleId)> = particles
        .iter()
        .enumerate()
        .flat_map(|(index, (id, particle))| {
            particle
                .neighbors()
                .iter()
                .filter(move |neighbor| neighbor.index > index)
                .map(move |neighbor| (id, neighbor.id))
        })
        .collect();

    pairs
        .into_iter()
        .filter(|&(a, b)| network.connect(particles, a, b, rest_length))
        .count()
}

pub fn adjust_rest_lengths(
    particles: &ParticleSet,
    network: &mut SpringNetwork,
    params: &ViscoelasticParams,
    dt: Real,
) {
    for spring in network.iter_mut() {
        let (Some(a), Some(b)) = (particles.get(spring.a), particles.get(spring.b)) else {
            continue;
        };
        let distance = (b.position - a.position).length();
        spring.rest_length = plastic_rest_length(
            spring.rest_length,
            distance,
            params.yield_ratio,
            params.plasticity_constant,
            dt,
        );
    }
}

/// Drop springs whose endpoints are at least `radius` apart.
pub fn remove_stretched_springs(particles: &mut ParticleSet, network: &mut SpringNetwork, radius: Real) -> usize {
    network.retain(particles, |spring, set| {
        match (set.get(spring.a), set.get(spring.b)) {
            (Some(a), Some(b)) => (b.position - a.position).length() < radius,
            _ => false,
        }
    })
}

/// Full spring maintenance pass: creation, plasticity, removal.
pub fn update_springs(
    particles: &mut ParticleSet,
    network: &mut SpringNetwork,
    params: &ViscoelasticParams,
    dt: Real,
) -> SpringPassStats {
    let radius = params.interaction_radius;
    let created = create_springs(particles, network, radius);
    adjust_rest_lengths(particles, network, params, dt);
    let removed = remove_stretched_springs(particles, network, radius);
    SpringPassStats { created, removed }
}

/// Move spring endpoints toward their rest length, in network order.
///
/// Each spring re-measures its endpoints, so displacements applied by
/// earlier springs are visible to later ones.
pub fn apply_spring_displacements(
    particles: &mut ParticleSet,
    network: &SpringNetwork,
    params: &ViscoelasticParams,
    dt: Real,
) {
    let radius = params.interaction_radius;
    let scale = dt * dt * params.spring_constant * 0.5;
    if scale == 0.0 {
        return;
    }

    for spring in network.iter() {
        let (Some(ia), Some(ib)) = (particles.index_of(spring.a), particles.index_of(spring.b)) else {
            continue;
        };
        let (distance, direction) =
            length_and_direction(particles.at(ib).position - particles.at(ia).position);
        let displacement = direction
            * (scale * (1.0 - spring.rest_length / radius) * (spring.rest_length - distance));

        particles.at_mut(ia).position -= displacement;
        particles.at_mut(ib).position += displacement;
    }
}
