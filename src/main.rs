use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;
use visco2d::systems::{apply_pending_edits, cull_out_of_bounds};
use visco2d::{
    Blockers, PendingEdits, SceneEdit, SimulationBounds, SimulationState, ViscoelasticParams,
    ViscoelasticPlugin,
};

const PARTICLE_RADIUS: f32 = 4.0;
const PLACEMENT_JITTER: f32 = 2.0;
const SEED_BLOCK: (u32, u32) = (12, 12);
const SEED_ORIGIN: Vec2 = Vec2::new(560.0, 80.0);
const SEED_SPACING: f32 = 8.0;

#[derive(Resource, Default)]
struct DebugDraw {
    springs: bool,
}

/// Simulation space is window space: origin top-left, y down.
fn sim_to_world(position: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        position.x - window_size.x * 0.5,
        window_size.y * 0.5 - position.y,
    )
}

fn setup(mut commands: Commands, mut pending: ResMut<PendingEdits>) {
    commands.spawn(Camera2d);

    for x in 0..SEED_BLOCK.0 {
        for y in 0..SEED_BLOCK.1 {
            let position = SEED_ORIGIN + Vec2::new(x as f32, y as f32) * SEED_SPACING;
            pending.push(SceneEdit::PlaceParticle(position));
        }
    }
}

fn handle_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut pending: ResMut<PendingEdits>,
    mut debug: ResMut<DebugDraw>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        pending.push(SceneEdit::ClearAll);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        debug.springs = !debug.springs;
    }
    if mouse.just_released(MouseButton::Right) {
        pending.push(SceneEdit::ReleaseBlocker);
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if mouse.pressed(MouseButton::Left) {
        let mut rand = rand::rng();
        let jitter = Vec2::new(
            rand.random_range(-PLACEMENT_JITTER..=PLACEMENT_JITTER),
            rand.random_range(-PLACEMENT_JITTER..=PLACEMENT_JITTER),
        );
        pending.push(SceneEdit::PlaceParticle(cursor + jitter));
    }
    if mouse.pressed(MouseButton::Right) {
        pending.push(SceneEdit::DragBlocker(cursor));
    }
}

fn update_bounds(windows: Query<&Window, With<PrimaryWindow>>, mut bounds: ResMut<SimulationBounds>) {
    let Ok(window) = windows.single() else {
        return;
    };
    bounds.0 = Some(Rect::new(0.0, 0.0, window.width(), window.height()));
}

fn draw_scene(
    mut gizmos: Gizmos,
    windows: Query<&Window, With<PrimaryWindow>>,
    state: Res<SimulationState>,
    blockers: Res<Blockers>,
    debug: Res<DebugDraw>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());

    for position in state.positions() {
        gizmos.circle_2d(
            Isometry2d::from_translation(sim_to_world(position, size)),
            PARTICLE_RADIUS,
            Color::hsl(210.0, 0.8, 0.6),
        );
    }

    if debug.springs {
        for (a, b) in state.spring_segments() {
            gizmos.line_2d(
                sim_to_world(a, size),
                sim_to_world(b, size),
                Color::srgba(1.0, 1.0, 1.0, 0.3),
            );
        }
    }

    for blocker in blockers.iter() {
        gizmos.line_2d(
            sim_to_world(blocker.a, size),
            sim_to_world(blocker.b, size),
            Color::hsl(30.0, 0.9, 0.55),
        );
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "visco2d".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ViscoelasticPlugin::new(ViscoelasticParams::default()))
        .init_resource::<DebugDraw>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_input.before(apply_pending_edits),
                update_bounds.before(cull_out_of_bounds),
                draw_scene.after(cull_out_of_bounds),
            ),
        )
        .run();
}
