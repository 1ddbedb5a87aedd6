//! Key and pointer events to game intents

use crate::sim::{Intent, RunState};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    KeyR,
    /// Mouse button or touch
    Pointer,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "KeyR" => Key::KeyR,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Translate an input event. Jump keys restart after a game over.
pub fn map_key(event: KeyEvent, phase: RunState) -> Option<Intent> {
    match event {
        KeyEvent::Down(Key::Space | Key::ArrowUp | Key::Pointer) => {
            if phase == RunState::GameOver {
                Some(Intent::Restart)
            } else {
                Some(Intent::Jump)
            }
        }
        KeyEvent::Down(Key::KeyR) => Some(Intent::Restart),
        KeyEvent::Down(Key::ArrowDown) => Some(Intent::Duck(true)),
        KeyEvent::Up(Key::ArrowDown) => Some(Intent::Duck(false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        for key in [Key::Space, Key::ArrowUp, Key::Pointer] {
            assert_eq!(map_key(KeyEvent::Down(key), RunState::Idle), Some(Intent::Jump));
            assert_eq!(map_key(KeyEvent::Down(key), RunState::Running), Some(Intent::Jump));
            assert_eq!(
                map_key(KeyEvent::Down(key), RunState::GameOver),
                Some(Intent::Restart)
            );
            assert_eq!(map_key(KeyEvent::Up(key), RunState::Running), None);
        }
    }

    #[test]
    fn test_duck_and_restart() {
        assert_eq!(
            map_key(KeyEvent::Down(Key::ArrowDown), RunState::Running),
            Some(Intent::Duck(true))
        );
        assert_eq!(
            map_key(KeyEvent::Up(Key::ArrowDown), RunState::Running),
            Some(Intent::Duck(false))
        );
        assert_eq!(
            map_key(KeyEvent::Down(Key::KeyR), RunState::Running),
            Some(Intent::Restart)
        );
        assert_eq!(map_key(KeyEvent::Down(Key::from_code("KeyQ")), RunState::Running), None);
        assert_eq!(Key::from_code("Space"), Key::Space);
    }
}
