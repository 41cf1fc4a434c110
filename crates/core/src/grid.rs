//! Grid module - the occupancy matrix
//!
//! The grid is `rows x cols` binary cells stored in a flat row-major vector.
//! Coordinates are (row, col) with row 0 at the top.
//!
//! The grid carries its own walls: column 0, column `cols - 1` and row
//! `rows - 1` are always occupied. Collision against walls and floor is then
//! an ordinary occupancy test.

use log::debug;

use crate::part::Part;
use crate::types::ConfigError;

/// Empty cell value.
pub const EMPTY: u8 = 0;

/// Occupied cell value.
pub const FILLED: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<u8>,
}

impl Grid {
    /// Build a fresh grid: walled empty rows above a solid floor.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if cols == 0 {
            return Err(ConfigError::ZeroCols);
        }

        let mut grid = Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        };
        grid.reset();
        Ok(grid)
    }

    /// Empty every playable cell, keeping walls and floor.
    pub fn reset(&mut self) {
        for row in 0..self.rows - 1 {
            self.reset_row(row);
        }
        let floor = self.rows - 1;
        self.row_mut(floor).fill(FILLED);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at (row, col). Callers must stay in bounds.
    #[inline(always)]
    pub fn occupancy_at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Cell value at (row, col), or `None` outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Whether (row, col) is a wall or floor cell.
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        col == 0 || col + 1 == self.cols || row + 1 == self.rows
    }

    /// Set a playable cell.
    ///
    /// Returns false (and leaves the grid untouched) when the coordinate is
    /// outside the grid or names a wall/floor cell.
    pub fn set(&mut self, row: i32, col: i32, value: u8) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };
        if self.is_border(row as usize, col as usize) {
            return false;
        }
        self.cells[i] = value & FILLED;
        true
    }

    /// One row of cells.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.cols;
        let cols = self.cols;
        &mut self.cells[start..start + cols]
    }

    /// Iterate rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.cols)
    }

    /// Turn a row into an empty walled row (never a floor row).
    fn reset_row(&mut self, row: usize) {
        let cols = self.cols;
        let cells = self.row_mut(row);
        cells.fill(EMPTY);
        cells[0] = FILLED;
        cells[cols - 1] = FILLED;
    }

    /// Check if a row is completely filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        row < self.rows && self.row(row).iter().all(|&c| c != EMPTY)
    }

    /// OR the part's mask into the grid.
    ///
    /// Mask cells falling outside the grid are skipped, so a part that still
    /// sticks out above row 0 merges only its visible cells.
    pub fn merge(&mut self, part: &Part) {
        for (row, col) in part.cells() {
            if let Some(i) = self.index(row, col) {
                self.cells[i] |= FILLED;
            }
        }
        debug!(
            "merged {:?} rotation {} at ({}, {})",
            part.kind, part.rotation, part.x, part.y
        );
    }

    /// Remove every complete row above the floor and insert as many empty
    /// walled rows at the top. Returns the number of rows removed.
    ///
    /// Rows are compacted bottom-up in a single pass, so the result does not
    /// depend on the order in which complete rows are found.
    pub fn clear_completed_rows(&mut self) -> usize {
        if self.rows < 2 {
            return 0;
        }

        let cols = self.cols;
        let floor = self.rows - 1;
        let mut write = floor;
        let mut cleared = 0;

        // Scan from the row above the floor to the top.
        for read in (0..floor).rev() {
            if self.is_row_complete(read) {
                cleared += 1;
            } else {
                write -= 1;
                if write != read {
                    let src = read * cols;
                    self.cells.copy_within(src..src + cols, write * cols);
                }
            }
        }

        // Rows 0..write are now stale: replace them with empty walled rows.
        for row in 0..write {
            self.reset_row(row);
        }

        cleared
    }

    /// Whether the walls and floor are all still occupied.
    pub fn border_intact(&self) -> bool {
        let floor_ok = self.row(self.rows - 1).iter().all(|&c| c == FILLED);
        let walls_ok = self
            .iter_rows()
            .all(|r| r[0] == FILLED && r[self.cols - 1] == FILLED);
        floor_ok && walls_ok
    }

    /// Number of occupied cells that are neither wall nor floor.
    pub fn filled_interior(&self) -> usize {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| !self.is_border(row, col) && self.occupancy_at(row, col) != EMPTY)
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn new_grid_has_walls_and_floor() {
        let grid = Grid::new(21, 12).unwrap();
        assert_eq!(grid.rows(), 21);
        assert_eq!(grid.cols(), 12);
        assert!(grid.border_intact());
        assert_eq!(grid.filled_interior(), 0);
        assert_eq!(grid.row(0), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(grid.row(20), &[1; 12]);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Grid::new(0, 12), Err(ConfigError::ZeroRows));
        assert_eq!(Grid::new(21, 0), Err(ConfigError::ZeroCols));
    }

    #[test]
    fn index_calculation() {
        let grid = Grid::new(4, 5).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(1, 0), Some(5));
        assert_eq!(grid.index(3, 4), Some(19));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 5), None);
        assert_eq!(grid.index(4, 0), None);
    }

    #[test]
    fn set_refuses_border_cells() {
        let mut grid = Grid::new(6, 8).unwrap();
        assert!(!grid.set(2, 0, 0));
        assert!(!grid.set(2, 7, 0));
        assert!(!grid.set(5, 3, 0));
        assert!(!grid.set(-1, 3, 1));
        assert!(grid.set(2, 3, 1));
        assert_eq!(grid.get(2, 3), Some(1));
        assert!(grid.border_intact());
    }

    #[test]
    fn merge_skips_cells_above_the_grid() {
        let mut grid = Grid::new(21, 12).unwrap();
        // I vertical occupies local column 2, rows 0..4; anchor y=-2 leaves two rows visible.
        let mut part = Part::new(PieceKind::I, 4, -2);
        part.rotate(false);
        grid.merge(&part);

        assert_eq!(grid.get(0, 6), Some(1));
        assert_eq!(grid.get(1, 6), Some(1));
        assert_eq!(grid.filled_interior(), 2);
    }

    #[test]
    fn clear_single_complete_row() {
        let mut grid = Grid::new(6, 8).unwrap();
        for col in 1..7 {
            grid.set(4, col, 1);
        }
        grid.set(3, 2, 1);

        assert_eq!(grid.clear_completed_rows(), 1);
        // The partial row shifted down by one.
        assert_eq!(grid.get(4, 2), Some(1));
        assert_eq!(grid.filled_interior(), 1);
        assert!(grid.border_intact());
    }

    #[test]
    fn clear_non_adjacent_rows_in_one_pass() {
        let mut grid = Grid::new(8, 7).unwrap();
        for col in 1..6 {
            grid.set(6, col, 1);
            grid.set(4, col, 1);
        }
        grid.set(5, 1, 1);
        grid.set(3, 5, 1);

        assert_eq!(grid.clear_completed_rows(), 2);
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.get(6, 1), Some(1));
        assert_eq!(grid.get(5, 5), Some(1));
        assert_eq!(grid.filled_interior(), 2);
        assert_eq!(grid.row(0), &[1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(grid.row(1), &[1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn reset_keeps_only_the_border() {
        let mut grid = Grid::new(6, 8).unwrap();
        grid.set(3, 3, 1);
        grid.set(4, 6, 1);
        grid.reset();
        assert_eq!(grid.filled_interior(), 0);
        assert!(grid.border_intact());
    }

    #[test]
    fn floor_is_never_cleared() {
        let mut grid = Grid::new(5, 7).unwrap();
        assert_eq!(grid.clear_completed_rows(), 0);
        assert_eq!(grid.row(4), &[1; 7]);
    }
}
