//! The active part: a catalog kind, a rotation index and an anchor.
//!
//! The anchor is the top-left corner of the 4x4 mask in grid coordinates.
//! Rotation and translation are speculative; the session tests collision after
//! each change and applies the opposite change when it collides.

use crate::pieces::{catalog_entry, catalog_len, get_mask, rotations, Mask};
use crate::rng::RandomSource;
use crate::types::{PieceKind, MASK_SIZE, SPAWN_JITTER, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Part {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl Part {
    /// Create a part at rotation 0 with an explicit anchor.
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Spawn a random part above the visible grid.
    ///
    /// Draws the catalog index first, then the horizontal jitter. The initial
    /// rotation is always 0.
    pub fn spawn(rng: &mut impl RandomSource, cols: usize) -> Self {
        let kind = catalog_entry(rng.next_range(catalog_len() as u32) as usize);
        let x = spawn_column(cols) + rng.next_range(SPAWN_JITTER) as i32;
        Self::new(kind, x, SPAWN_Y)
    }

    /// Mask for the current rotation state.
    pub fn mask(&self) -> Mask {
        get_mask(self.kind, self.rotation)
    }

    /// Number of rotation states for this kind.
    pub fn rotation_count(&self) -> usize {
        rotations(self.kind).len()
    }

    /// Step the rotation index forward, or backward when `reverse` is set.
    pub fn rotate(&mut self, reverse: bool) {
        let n = self.rotation_count();
        self.rotation = if reverse {
            (self.rotation + n - 1) % n
        } else {
            (self.rotation + 1) % n
        };
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grid coordinates (row, col) of every set mask cell, in or out of bounds.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        let mask = self.mask();
        (0..MASK_SIZE * MASK_SIZE)
            .map(|i| (i / MASK_SIZE, i % MASK_SIZE))
            .filter(move |&(row, col)| mask.is_set(row, col))
            .map(move |(row, col)| (y + row as i32, x + col as i32))
    }
}

/// Left edge of the spawn window: the mask is centered in the grid, the
/// jitter then shifts it by at most one column to the right.
pub fn spawn_column(cols: usize) -> i32 {
    (cols.saturating_sub(MASK_SIZE) / 2) as i32
}
