//! Collision test between a part placement and the grid.
//!
//! Mask cells outside the grid never collide. This lets a freshly spawned part
//! hang above row 0 and makes vertical bounds alone unable to block a part;
//! walls and floor block it because they are occupied cells.

use crate::grid::Grid;
use crate::part::Part;

/// Whether any set mask cell of `part` lands on an occupied grid cell.
pub fn collides(grid: &Grid, part: &Part) -> bool {
    part.cells()
        .any(|(row, col)| matches!(grid.get(row, col), Some(cell) if cell != 0))
}
