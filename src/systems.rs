//! Bevy systems driving the simulation resource

use bevy::prelude::*;

use crate::core::SimulationState;
use crate::scene::{Blockers, PendingEdits, apply_edits};

/// Region particles must stay inside; `None` disables culling.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationBounds(pub Option<Rect>);

pub fn apply_pending_edits(
    mut state: ResMut<SimulationState>,
    mut blockers: ResMut<Blockers>,
    mut pending: ResMut<PendingEdits>,
) {
    if pending.is_empty() {
        return;
    }
    apply_edits(&mut state, &mut blockers, &mut pending);
}

pub fn cull_out_of_bounds(bounds: Res<SimulationBounds>, mut state: ResMut<SimulationState>) {
    if let Some(rect) = bounds.0 {
        state.cull(&rect);
    }
}

pub fn advance_simulation(time: Res<Time>, mut state: ResMut<SimulationState>) {
    state.advance(time.delta_secs());
}
