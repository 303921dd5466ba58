pub mod sp_grid;

pub use sp_grid::{PackedCell, SpGrid, pack_coords, unpack_coords};
