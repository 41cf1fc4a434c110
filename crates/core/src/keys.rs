//! Pressed-key state as a fixed set of flags.

use bitflags::bitflags;

use crate::types::Key;

bitflags! {
    /// Logical keys currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeySet: u8 {
        const START = 1 << 0;
        const PAUSE_RESUME = 1 << 1;
        const ROTATE_CW = 1 << 2;
        const ROTATE_CCW = 1 << 3;
        const MOVE_LEFT = 1 << 4;
        const MOVE_RIGHT = 1 << 5;
        const SOFT_DROP = 1 << 6;

        const ROTATE = Self::ROTATE_CW.bits() | Self::ROTATE_CCW.bits();
    }
}

impl From<Key> for KeySet {
    fn from(key: Key) -> Self {
        match key {
            Key::Start => KeySet::START,
            Key::PauseResume => KeySet::PAUSE_RESUME,
            Key::RotateCw => KeySet::ROTATE_CW,
            Key::RotateCcw => KeySet::ROTATE_CCW,
            Key::MoveLeft => KeySet::MOVE_LEFT,
            Key::MoveRight => KeySet::MOVE_RIGHT,
            Key::SoftDrop => KeySet::SOFT_DROP,
        }
    }
}

impl KeySet {
    pub fn is_held(&self, key: Key) -> bool {
        self.contains(KeySet::from(key))
    }
}
