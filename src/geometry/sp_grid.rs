use std::collections::HashMap;

use bevy::prelude::IVec2;

use crate::math::{Point, Real};

pub type PackedCell = u64;

/// Forward half of the 3x3 block: visiting only these from every occupied
/// cell reaches each pair of adjacent cells exactly once.
const FORWARD_OFFSETS: [(i32, i32); 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

#[inline]
pub fn pack_coords(ix: i32, iy: i32) -> PackedCell {
    ((ix as u64) << 32) | (iy as u32 as u64)
}

#[inline]
pub fn unpack_coords(id: PackedCell) -> (i32, i32) {
    let ix = (id >> 32) as i32;
    let iy = id as u32 as i32;
    (ix, iy)
}

/// Sparse hashed grid; only cells that hold something are allocated.
#[derive(Clone, Debug)]
pub struct SpGrid<T> {
    cell_width: Real,
    cells: HashMap<PackedCell, T>,
}

impl<T: Default> SpGrid<T> {
    pub fn new(cell_width: Real) -> Self {
        Self {
            cell_width,
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_of(&self, position: Point) -> IVec2 {
        let inv = 1.0 / self.cell_width;
        IVec2::new(
            (position.x * inv).floor() as i32,
            (position.y * inv).floor() as i32,
        )
    }

    #[inline]
    pub fn packed_cell_of(&self, position: Point) -> PackedCell {
        let cell = self.cell_of(position);
        pack_coords(cell.x, cell.y)
    }

    pub fn get_packed_mut(&mut self, id: PackedCell) -> &mut T {
        self.cells.entry(id).or_default()
    }

    /// Calls `f` with each occupied cell and each of its occupied forward
    /// neighbors (right column and the cell below).
    pub fn for_each_forward_neighbor<F>(&self, base_id: PackedCell, mut f: F)
    where
        F: FnMut(PackedCell, &T),
    {
        let (ix, iy) = unpack_coords(base_id);
        for (dx, dy) in FORWARD_OFFSETS.iter() {
            let neighbor_id = pack_coords(ix.wrapping_add(*dx), iy.wrapping_add(*dy));
            if let Some(cell) = self.cells.get(&neighbor_id) {
                f(neighbor_id, cell);
            }
        }
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (PackedCell, &T)> {
        self.cells.iter().map(|(&id, node)| (id, node))
    }
}
