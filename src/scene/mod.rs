//! Scene editing outside the physics step
//!
//! Particle placement, blocker segments and clearing, queued by input
//! handling and applied between steps.

pub mod blocker;
pub mod edit;

pub use blocker::{Blocker, Blockers};
pub use edit::{PendingEdits, SceneEdit, apply_edit, apply_edits};
