use bevy::prelude::*;

use crate::core::SimulationState;
use crate::math::Point;

use super::blocker::Blockers;

/// A user edit to the scene. Applied between steps, never during one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEdit {
    PlaceParticle(Point),
    DragBlocker(Point),
    ReleaseBlocker,
    ClearAll,
}

/// Edits collected from input this frame, in arrival order.
#[derive(Resource, Clone, Debug, Default)]
pub struct PendingEdits {
    edits: Vec<SceneEdit>,
}

impl PendingEdits {
    pub fn push(&mut self, edit: SceneEdit) {
        self.edits.push(edit);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SceneEdit> + '_ {
        self.edits.drain(..)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

pub fn apply_edit(state: &mut SimulationState, blockers: &mut Blockers, edit: SceneEdit) {
    match edit {
        SceneEdit::PlaceParticle(position) => {
            state.add_particle(position);
        }
        SceneEdit::DragBlocker(point) => blockers.drag(point),
        SceneEdit::ReleaseBlocker => {
            if let Some(blocker) = blockers.release() {
                debug!("placed blocker from {} to {}", blocker.a, blocker.b);
            }
        }
        SceneEdit::ClearAll => {
            info!(
                "clearing {} particles, {} springs, {} blockers",
                state.particle_count(),
                state.spring_count(),
                blockers.len()
            );
            state.clear();
            blockers.clear();
        }
    }
}

/// Apply every queued edit in order. Returns how many were applied.
pub fn apply_edits(state: &mut SimulationState, blockers: &mut Blockers, pending: &mut PendingEdits) -> usize {
    let mut applied = 0;
    for edit in pending.drain() {
        apply_edit(state, blockers, edit);
        applied += 1;
    }
    applied
}
