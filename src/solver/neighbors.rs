//! Neighbor discovery
//!
//! Every pair closer than the interaction radius is recorded in both
//! particles' lists together with the offset between them. Lists are rebuilt
//! from scratch each step and end up sorted by dense index, whichever search
//! strategy found them.

use crate::config::{NeighborSearch, ViscoelasticParams};
use crate::core::{Neighbor, ParticleId, ParticleSet};
use crate::geometry::SpGrid;
use crate::math::{Point, Real};

/// Rebuild every neighbor list. Returns the number of unordered pairs found.
pub fn find_neighbors(particles: &mut ParticleSet, params: &ViscoelasticParams) -> usize {
    for particle in particles.particles_mut() {
        particle.neighbors.clear();
    }
    if particles.len() < 2 {
        return 0;
    }

    let positions: Vec<Point> = particles.positions().collect();
    let ids: Vec<ParticleId> = particles.ids().collect();
    let radius = params.interaction_radius;
    let radius_sq = params.interaction_radius_squared();

    match params.neighbor_search {
        NeighborSearch::BruteForce => brute_force(particles, &positions, &ids, radius_sq),
        NeighborSearch::Grid => {
            let pairs = grid_search(particles, &positions, &ids, radius, radius_sq);
            for particle in particles.particles_mut() {
                particle.neighbors.sort_unstable_by_key(|neighbor| neighbor.index);
            }
            pairs
        }
    }
}

#[inline(always)]
fn try_link(
    particles: &mut ParticleSet,
    positions: &[Point],
    ids: &[ParticleId],
    radius_sq: Real,
    i: usize,
    j: usize,
) -> bool {
    // Always measured from the lower index so both strategies agree bit for bit.
    let (low, high) = if i < j { (i, j) } else { (j, i) };
    let offset = positions[high] - positions[low];
    if !(offset.length_squared() < radius_sq) {
        return false;
    }

    particles.at_mut(low).neighbors.push(Neighbor {
        index: high,
        id: ids[high],
        offset,
    });
    particles.at_mut(high).neighbors.push(Neighbor {
        index: low,
        id: ids[low],
        offset: -offset,
    });
    true
}

fn brute_force(particles: &mut ParticleSet, positions: &[Point], ids: &[ParticleId], radius_sq: Real) -> usize {
    let mut pairs = 0;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if try_link(particles, positions, ids, radius_sq, i, j) {
                pairs += 1;
            }
        }
    }
    pairs
}

fn grid_search(
    particles: &mut ParticleSet,
    positions: &[Point],
    ids: &[ParticleId],
    radius: Real,
    radius_sq: Real,
) -> usize {
    let mut grid: SpGrid<Vec<usize>> = SpGrid::new(radius);
    for (index, &position) in positions.iter().enumerate() {
        let cell = grid.packed_cell_of(position);
        grid.get_packed_mut(cell).push(index);
    }

    let mut candidates = Vec::new();
    for (cell, bucket) in grid.iter_cells() {
        for (k, &i) in bucket.iter().enumerate() {
            for &j in &bucket[k + 1..] {
                candidates.push((i, j));
            }
        }
        grid.for_each_forward_neighbor(cell, |_, other| {
            for &i in bucket {
                for &j in other {
                    candidates.push((i, j));
                }
            }
        });
    }

    candidates
        .into_iter()
        .filter(|&(i, j)| try_link(particles, positions, ids, radius_sq, i, j))
        .count()
}
