//! Held-key tracker for terminal environments.
//!
//! Turns crossterm key events into logical key-down / key-up edges. Terminals
//! that report key releases (keyboard enhancement) drive key-up directly; the
//! others get an auto-release once no press or repeat has been seen for the
//! release timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Key, KEY_RELEASE_TIMEOUT_MS};

/// A logical key changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down(Key),
    Up(Key),
}

const KEY_COUNT: usize = Key::ALL.len();

/// Edges produced by a single event or update.
pub type Edges = ArrayVec<KeyEdge, KEY_COUNT>;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Last press or repeat per held key, indexed by `Key::index`.
    held: [Option<Instant>; KEY_COUNT],
    release_events: bool,
    key_release_timeout: Duration,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: [None; KEY_COUNT],
            release_events: false,
            key_release_timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    /// Trust release events instead of the timeout from the start.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()].is_some()
    }

    /// Feed one key event observed at `now`.
    pub fn handle_event(&mut self, event: KeyEvent, now: Instant) -> Edges {
        let mut edges = Edges::new();
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                for key in map_key(event.code) {
                    let slot = &mut self.held[key.index()];
                    if slot.is_none() {
                        edges.push(KeyEdge::Down(key));
                    }
                    *slot = Some(now);
                }
            }
            KeyEventKind::Release => {
                // A terminal that reports one release reports them all.
                self.release_events = true;
                for key in map_key(event.code) {
                    if self.held[key.index()].take().is_some() {
                        edges.push(KeyEdge::Up(key));
                    }
                }
            }
        }
        edges
    }

    /// Release keys whose last press is older than the timeout.
    ///
    /// Does nothing once the terminal has shown it reports releases.
    pub fn update(&mut self, now: Instant) -> Edges {
        let mut edges = Edges::new();
        if self.release_events {
            return edges;
        }
        for key in Key::ALL {
            let slot = &mut self.held[key.index()];
            if let Some(last) = *slot {
                if now.saturating_duration_since(last) > self.key_release_timeout {
                    *slot = None;
                    edges.push(KeyEdge::Up(key));
                }
            }
        }
        edges
    }

    /// Release every held key.
    pub fn reset(&mut self) -> Edges {
        let mut edges = Edges::new();
        for key in Key::ALL {
            if self.held[key.index()].take().is_some() {
                edges.push(KeyEdge::Up(key));
            }
        }
        edges
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        event(code, KeyEventKind::Press)
    }

    #[test]
    fn test_key_index_matches_all_order() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_press_emits_down_once() {
        let mut kt = KeyTracker::new();
        let t0 = Instant::now();

        let edges = kt.handle_event(press(KeyCode::Left), t0);
        assert_eq!(edges.as_slice(), &[KeyEdge::Down(Key::MoveLeft)]);
        assert!(kt.is_held(Key::MoveLeft));

        // Terminal auto-repeat arrives as more presses.
        let edges = kt.handle_event(press(KeyCode::Left), t0 + Duration::from_millis(30));
        assert!(edges.is_empty());
    }

    #[test]
    fn test_enter_drives_two_keys() {
        let mut kt = KeyTracker::new();
        let edges = kt.handle_event(press(KeyCode::Enter), Instant::now());
        assert_eq!(
            edges.as_slice(),
            &[KeyEdge::Down(Key::PauseResume), KeyEdge::Down(Key::Start)]
        );
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kt.handle_event(press(KeyCode::Up), t0);
        assert!(kt.update(t0 + Duration::from_millis(50)).is_empty());

        let edges = kt.update(t0 + Duration::from_millis(51));
        assert_eq!(edges.as_slice(), &[KeyEdge::Up(Key::RotateCw)]);
        assert!(!kt.is_held(Key::RotateCw));

        // Pressing again is a fresh edge.
        let edges = kt.handle_event(press(KeyCode::Up), t0 + Duration::from_millis(60));
        assert_eq!(edges.as_slice(), &[KeyEdge::Down(Key::RotateCw)]);
    }

    #[test]
    fn test_repeat_extends_the_hold() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kt.handle_event(press(KeyCode::Down), t0);
        kt.handle_event(press(KeyCode::Down), t0 + Duration::from_millis(40));
        assert!(kt.update(t0 + Duration::from_millis(80)).is_empty());
        assert!(kt.is_held(Key::SoftDrop));
    }

    #[test]
    fn test_other_keys_do_not_extend_the_hold() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kt.handle_event(press(KeyCode::Left), t0);
        kt.handle_event(press(KeyCode::Right), t0 + Duration::from_millis(40));

        let edges = kt.update(t0 + Duration::from_millis(60));
        assert_eq!(edges.as_slice(), &[KeyEdge::Up(Key::MoveLeft)]);
        assert!(kt.is_held(Key::MoveRight));
    }

    #[test]
    fn test_release_events_disable_the_timeout() {
        let mut kt = KeyTracker::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kt.handle_event(press(KeyCode::Left), t0);
        let edges = kt.handle_event(event(KeyCode::Left, KeyEventKind::Release), t0);
        assert_eq!(edges.as_slice(), &[KeyEdge::Up(Key::MoveLeft)]);
        assert!(kt.release_events());

        kt.handle_event(press(KeyCode::Right), t0);
        assert!(kt.update(t0 + Duration::from_secs(5)).is_empty());
        assert!(kt.is_held(Key::MoveRight));
    }

    #[test]
    fn test_release_of_unheld_key_is_ignored() {
        let mut kt = KeyTracker::new().with_release_events(true);
        let edges = kt.handle_event(event(KeyCode::Char('z'), KeyEventKind::Release), Instant::now());
        assert!(edges.is_empty());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut kt = KeyTracker::new();
        let t0 = Instant::now();
        kt.handle_event(press(KeyCode::Char(' ')), t0);
        kt.handle_event(press(KeyCode::Left), t0);

        let edges = kt.reset();
        assert_eq!(
            edges.as_slice(),
            &[
                KeyEdge::Up(Key::Start),
                KeyEdge::Up(Key::RotateCw),
                KeyEdge::Up(Key::MoveLeft)
            ]
        );
        assert!(kt.reset().is_empty());
    }
}
