//! Pieces module - the shape catalog
//!
//! Every shape is a 4x4 binary mask; a kind owns a cyclic sequence of masks,
//! one per rotation state. The catalog is static and never mutated.
//!
//! Masks are stored as `u16`, one nibble per row, top row in the high nibble:
//!
//! ```text
//! 0b0100_1110_0000_0000   =>   . # . .
//!                              # # # .
//!                              . . . .
//!                              . . . .
//! ```

use crate::types::{PieceKind, MASK_SIZE};

/// A 4x4 occupancy mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(u16);

impl Mask {
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Whether local cell (row, col) is set. Out-of-mask coordinates are empty.
    #[inline(always)]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        if row >= MASK_SIZE || col >= MASK_SIZE {
            return false;
        }
        let bit = 15 - (row * MASK_SIZE + col);
        self.0 & (1 << bit) != 0
    }

    /// Number of set cells.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate set cells as local (row, col) pairs, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..MASK_SIZE * MASK_SIZE)
            .map(|i| (i / MASK_SIZE, i % MASK_SIZE))
            .filter(move |&(row, col)| self.is_set(row, col))
    }

    /// Expand into a row-major 0/1 matrix.
    pub fn to_rows(&self) -> [[u8; MASK_SIZE]; MASK_SIZE] {
        let mut out = [[0u8; MASK_SIZE]; MASK_SIZE];
        for (row, col) in self.cells() {
            out[row][col] = 1;
        }
        out
    }
}

const I_ROTATIONS: [Mask; 2] = [
    Mask::from_bits(0b0000_1111_0000_0000),
    Mask::from_bits(0b0010_0010_0010_0010),
];

const O_ROTATIONS: [Mask; 1] = [Mask::from_bits(0b0000_0110_0110_0000)];

const T_ROTATIONS: [Mask; 4] = [
    Mask::from_bits(0b0100_1110_0000_0000),
    Mask::from_bits(0b0100_0110_0100_0000),
    Mask::from_bits(0b0000_1110_0100_0000),
    Mask::from_bits(0b0100_1100_0100_0000),
];

const S_ROTATIONS: [Mask; 2] = [
    Mask::from_bits(0b0110_1100_0000_0000),
    Mask::from_bits(0b0100_0110_0010_0000),
];

const Z_ROTATIONS: [Mask; 2] = [
    Mask::from_bits(0b1100_0110_0000_0000),
    Mask::from_bits(0b0010_0110_0100_0000),
];

const J_ROTATIONS: [Mask; 4] = [
    Mask::from_bits(0b1000_1110_0000_0000),
    Mask::from_bits(0b0110_0100_0100_0000),
    Mask::from_bits(0b0000_1110_0010_0000),
    Mask::from_bits(0b0100_0100_1100_0000),
];

const L_ROTATIONS: [Mask; 4] = [
    Mask::from_bits(0b0010_1110_0000_0000),
    Mask::from_bits(0b0100_0100_0110_0000),
    Mask::from_bits(0b0000_1110_1000_0000),
    Mask::from_bits(0b1100_0100_0100_0000),
];

/// Rotation sequence for a kind, in clockwise order.
pub fn rotations(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
    }
}

/// Mask for a kind at a rotation index (wrapped into range).
pub fn get_mask(kind: PieceKind, rotation: usize) -> Mask {
    let seq = rotations(kind);
    seq[rotation % seq.len()]
}

/// Number of entries in the catalog.
pub fn catalog_len() -> usize {
    PieceKind::ALL.len()
}

/// Catalog entry at `index` (wrapped into range).
pub fn catalog_entry(index: usize) -> PieceKind {
    PieceKind::ALL[index % PieceKind::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            for mask in rotations(kind) {
                assert_eq!(mask.count(), 4, "{:?} mask {:016b}", kind, mask.bits());
            }
        }
    }

    #[test]
    fn rotation_states_are_distinct() {
        for kind in PieceKind::ALL {
            let seq = rotations(kind);
            for (i, a) in seq.iter().enumerate() {
                for b in &seq[i + 1..] {
                    assert_ne!(a, b, "{:?} repeats a rotation state", kind);
                }
            }
        }
    }

    #[test]
    fn rotation_sequence_lengths() {
        let lens: Vec<usize> = PieceKind::ALL.iter().map(|&k| rotations(k).len()).collect();
        assert_eq!(lens, vec![2, 1, 4, 2, 2, 4, 4]);
    }

    #[test]
    fn mask_bit_layout_is_row_major() {
        let t = get_mask(PieceKind::T, 0);
        assert_eq!(
            t.to_rows(),
            [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        );
        assert!(t.is_set(0, 1));
        assert!(!t.is_set(0, 0));
        assert!(!t.is_set(4, 0));
    }

    #[test]
    fn get_mask_wraps_rotation_index() {
        assert_eq!(get_mask(PieceKind::I, 2), get_mask(PieceKind::I, 0));
        assert_eq!(get_mask(PieceKind::O, 3), get_mask(PieceKind::O, 0));
    }

    #[test]
    fn catalog_entries_cover_all_kinds() {
        assert_eq!(catalog_len(), 7);
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(catalog_entry(i), *kind);
            assert_eq!(kind.index(), i);
        }
    }
}
