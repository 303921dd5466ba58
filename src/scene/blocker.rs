use bevy::prelude::*;

use crate::math::{Point, Real};

/// A line segment drawn by the user. Rendered only; the fluid ignores it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blocker {
    pub a: Point,
    pub b: Point,
}

impl Blocker {
    pub fn at(point: Point) -> Self {
        Self { a: point, b: point }
    }

    pub fn length(&self) -> Real {
        (self.b - self.a).length()
    }
}

/// Every placed blocker plus the one currently being dragged, if any.
#[derive(Resource, Clone, Debug, Default)]
pub struct Blockers {
    blockers: Vec<Blocker>,
    in_progress: Option<usize>,
}

impl Blockers {
    /// Start a blocker at `point`, or move the free end of the one in progress.
    pub fn drag(&mut self, point: Point) {
        if let Some(blocker) = self.in_progress.and_then(|index| self.blockers.get_mut(index)) {
            blocker.b = point;
            return;
        }
        self.blockers.push(Blocker::at(point));
        self.in_progress = Some(self.blockers.len() - 1);
    }

    /// Finish the blocker in progress and return it.
    pub fn release(&mut self) -> Option<Blocker> {
        let index = self.in_progress.take()?;
        self.blockers.get(index).copied()
    }

    pub fn in_progress(&self) -> Option<&Blocker> {
        self.in_progress.and_then(|index| self.blockers.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blocker> {
        self.blockers.iter()
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn clear(&mut self) {
        self.blockers.clear();
        self.in_progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_then_release() {
        let mut blockers = Blockers::default();
        blockers.drag(Vec2::new(1.0, 1.0));
        blockers.drag(Vec2::new(4.0, 5.0));

        assert_eq!(blockers.len(), 1);
        let placed = blockers.release().unwrap();
        assert_eq!(placed.a, Vec2::new(1.0, 1.0));
        assert_eq!(placed.b, Vec2::new(4.0, 5.0));
        assert_eq!(placed.length(), 5.0);
        assert!(blockers.in_progress().is_none());
        assert!(blockers.release().is_none());
    }

    #[test]
    fn test_drag_after_release_starts_new_blocker() {
        let mut blockers = Blockers::default();
        blockers.drag(Vec2::ZERO);
        blockers.release();
        blockers.drag(Vec2::ONE);

        assert_eq!(blockers.len(), 2);
        assert_eq!(blockers.in_progress(), Some(&Blocker::at(Vec2::ONE)));
    }
}
