// Headless run: drops a block of fluid inside a fixed box and logs step
// statistics until every particle has fallen out or the frame budget ends.
use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use visco2d::{NeighborSearch, SimulationBounds, SimulationState, ViscoelasticParams, ViscoelasticPlugin};

const BLOCK: (u32, u32) = (30, 30);
const SPACING: f32 = 7.0;
const BOX_SIZE: Vec2 = Vec2::new(800.0, 600.0);
const MAX_FRAMES: u32 = 600;

fn seed_particles(mut state: ResMut<SimulationState>, mut bounds: ResMut<SimulationBounds>) {
    let mut rng = StdRng::seed_from_u64(7);
    let origin = Vec2::new(BOX_SIZE.x * 0.5 - BLOCK.0 as f32 * SPACING * 0.5, 40.0);

    for x in 0..BLOCK.0 {
        for y in 0..BLOCK.1 {
            let jitter = Vec2::new(rng.random_range(-0.5..=0.5), rng.random_range(-0.5..=0.5));
            state.add_particle(origin + Vec2::new(x as f32, y as f32) * SPACING + jitter);
        }
    }
    bounds.0 = Some(Rect::from_corners(Vec2::ZERO, BOX_SIZE));
    info!("seeded {} particles", state.particle_count());
}

fn report(state: Res<SimulationState>, mut frame_count: Local<u32>) {
    *frame_count += 1;

    if *frame_count % 60 == 0 {
        let stats = state.last_step();
        info!(
            "[frame {:04}] particles={} pairs={} springs={} (+{} -{}) viscosity={} step={:.3}ms",
            *frame_count,
            stats.particles,
            stats.neighbor_pairs,
            stats.springs,
            stats.springs_created,
            stats.springs_removed,
            stats.viscosity_impulses,
            stats.elapsed_ms
        );
    }

    if *frame_count > MAX_FRAMES || (*frame_count > 1 && state.particle_count() == 0) {
        info!("done after {} frames", *frame_count);
        std::process::exit(0);
    }
}

fn main() {
    let params = ViscoelasticParams::viscous().with_neighbor_search(NeighborSearch::Grid);

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(ViscoelasticPlugin::new(params))
        .add_systems(Startup, seed_particles)
        .add_systems(Update, report)
        .run();
}
