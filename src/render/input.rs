//! Input types read by sensing commands.
//!
//! Capturing input is the backend's job; these types only describe the
//! latest state it has seen.

use crate::error::StageError;
use std::fmt;
use std::str::FromStr;

/// Keys a script can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, stored lowercase.
    Char(char),
    /// Space bar.
    Space,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Matches whenever any key is held.
    Any,
}

impl KeyCode {
    /// A character key, folded to lowercase.
    pub fn char(c: char) -> Self {
        Self::Char(c.to_ascii_lowercase())
    }
}

impl FromStr for KeyCode {
    type Err = StageError;

    /// Parse the names scripts use: `"space"`, `"left arrow"`, `"any"`,
    /// or a single character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "space" => Self::Space,
            "enter" | "return" => Self::Enter,
            "left arrow" | "left" => Self::Left,
            "right arrow" | "right" => Self::Right,
            "up arrow" | "up" => Self::Up,
            "down arrow" | "down" => Self::Down,
            "any" => Self::Any,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::char(c),
                    _ => return Err(StageError::InvalidKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Space => f.write_str("space"),
            Self::Enter => f.write_str("enter"),
            Self::Left => f.write_str("left arrow"),
            Self::Right => f.write_str("right arrow"),
            Self::Up => f.write_str("up arrow"),
            Self::Down => f.write_str("down arrow"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Latest mouse position (in stage coordinates) and button state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    /// Horizontal stage coordinate.
    pub x: f64,
    /// Vertical stage coordinate.
    pub y: f64,
    /// Button held, if any.
    pub button: Option<MouseButton>,
}

impl MouseState {
    /// Check if any button is held.
    #[inline]
    pub const fn is_down(&self) -> bool {
        self.button.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("space".parse(), Ok(KeyCode::Space));
        assert_eq!("Left Arrow".parse(), Ok(KeyCode::Left));
        assert_eq!("any".parse(), Ok(KeyCode::Any));
        assert_eq!("A".parse(), Ok(KeyCode::Char('a')));
        assert_eq!("7".parse(), Ok(KeyCode::Char('7')));
    }

    #[test]
    fn test_parse_unknown_key() {
        assert_eq!(
            "f13".parse::<KeyCode>(),
            Err(StageError::InvalidKey("f13".to_string()))
        );
        assert_eq!("".parse::<KeyCode>(), Err(StageError::InvalidKey(String::new())));
    }

    #[test]
    fn test_key_display_roundtrip() {
        for key in [KeyCode::Space, KeyCode::Down, KeyCode::char('Q')] {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }

    #[test]
    fn test_mouse_down() {
        let mut mouse = MouseState::default();
        assert!(!mouse.is_down());
        mouse.button = Some(MouseButton::Left);
        assert!(mouse.is_down());
    }
}
