//! What the engine hands to renderers.
//!
//! [`Frame`] borrows the live session state; [`Snapshot`] is its owned,
//! serializable copy for sinks that keep or ship frames.

use serde::Serialize;

use crate::grid::Grid;
use crate::part::Part;
use crate::types::{Phase, MASK_SIZE};

/// Consumer of rendered frames.
///
/// A sink must not keep game state of its own: painting the same frame twice
/// gives the same output.
pub trait RenderSink {
    type Error;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

/// Sink that drops every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    type Error = std::convert::Infallible;

    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Borrowed view of everything a renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: Phase,
    pub running: bool,
    pub grid: &'a Grid,
    pub part: Option<&'a Part>,
    pub rows_cleared: u32,
    pub parts_spawned: u32,
}

impl Frame<'_> {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Playing && !self.running
    }

    /// Occupancy at (row, col) including the active part.
    pub fn cell(&self, row: usize, col: usize) -> CellKind {
        if self.part_covers(row as i32, col as i32) {
            return CellKind::Part;
        }
        if self.grid.occupancy_at(row, col) == 0 {
            CellKind::Empty
        } else if self.grid.is_border(row, col) {
            CellKind::Wall
        } else {
            CellKind::Settled
        }
    }

    fn part_covers(&self, row: i32, col: i32) -> bool {
        self.part
            .map(|p| p.cells().any(|cell| cell == (row, col)))
            .unwrap_or(false)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.as_str(),
            running: self.running,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            grid: self.grid.iter_rows().map(|r| r.to_vec()).collect(),
            active: self.part.map(ActiveSnapshot::from),
            rows_cleared: self.rows_cleared,
            parts_spawned: self.parts_spawned,
        }
    }
}

/// What a renderer should paint at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    Settled,
    Part,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: &'static str,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
    pub mask: [[u8; MASK_SIZE]; MASK_SIZE],
}

impl From<&Part> for ActiveSnapshot {
    fn from(part: &Part) -> Self {
        Self {
            kind: part.kind.as_str(),
            rotation: part.rotation,
            x: part.x,
            y: part.y,
            mask: part.mask().to_rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: &'static str,
    pub running: bool,
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub rows_cleared: u32,
    pub parts_spawned: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn frame_cells_classify_walls_settled_and_part() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.set(6, 1, 1);
        let part = Part::new(PieceKind::O, 2, 0);
        let frame = Frame {
            phase: Phase::Playing,
            running: true,
            grid: &grid,
            part: Some(&part),
            rows_cleared: 0,
            parts_spawned: 1,
        };

        assert_eq!(frame.cell(0, 0), CellKind::Wall);
        assert_eq!(frame.cell(7, 4), CellKind::Wall);
        assert_eq!(frame.cell(6, 1), CellKind::Settled);
        assert_eq!(frame.cell(1, 3), CellKind::Part);
        assert_eq!(frame.cell(3, 3), CellKind::Empty);
        assert!(!frame.paused());
    }

    #[test]
    fn snapshot_copies_grid_and_part() {
        let grid = Grid::new(5, 7).unwrap();
        let part = Part::new(PieceKind::T, 1, -2);
        let frame = Frame {
            phase: Phase::Playing,
            running: false,
            grid: &grid,
            part: Some(&part),
            rows_cleared: 3,
            parts_spawned: 4,
        };
        let snap = frame.to_snapshot();

        assert_eq!(snap.phase, "playing");
        assert_eq!(snap.grid.len(), 5);
        assert_eq!(snap.grid[4], vec![1; 7]);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, "t");
        assert_eq!((active.x, active.y), (1, -2));
        assert_eq!(active.mask[1], [1, 1, 1, 0]);
        assert_eq!(snap.rows_cleared, 3);
    }
}
