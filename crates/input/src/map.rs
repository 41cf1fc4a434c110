//! Key mapping from terminal key codes to logical keys.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Key;

/// Logical keys bound to one terminal key code.
///
/// Enter and Space carry two bindings each. The pause binding of Enter comes
/// before Start so that a single press never starts a game and then pauses it.
pub type Bindings = ArrayVec<Key, 2>;

/// Map a terminal key code to the logical keys it drives.
pub fn map_key(code: KeyCode) -> Bindings {
    let mut keys = Bindings::new();
    match code {
        KeyCode::Enter => {
            keys.push(Key::PauseResume);
            keys.push(Key::Start);
        }
        KeyCode::Char(' ') => {
            keys.push(Key::RotateCw);
            keys.push(Key::Start);
        }
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => keys.push(Key::PauseResume),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => keys.push(Key::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => keys.push(Key::RotateCcw),

        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            keys.push(Key::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            keys.push(Key::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            keys.push(Key::SoftDrop)
        }

        _ => {}
    }
    keys
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
