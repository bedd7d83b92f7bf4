//! Events consumed by the game state.
//!
//! Input sources (dance mat, keyboard, window) only ever produce
//! [`GameEvent`]s; the state machine in [`super::state`] never sees a raw
//! gilrs or egui event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverKind {
    /// The cat caught every mouse
    MiceEaten,
    /// A dog caught the cat
    Dog,
}

/// Abstract dance-mat panels, not tied to a concrete device.
///
/// Enumerated clockwise around the mat, the upper-left panel being 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Cross = 0,
    Up = 1,
    Circle = 2,
    Right = 3,
    Square = 4,
    Down = 5,
    Triangle = 6,
    Left = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Cross,
        Button::Up,
        Button::Circle,
        Button::Right,
        Button::Square,
        Button::Down,
        Button::Triangle,
        Button::Left,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A tick of the (irregular) game clock
    Tick,
    ReceivedQuit,
    ReceivedRestart,
    GameOver(GameOverKind),
    ButtonDown(Button),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Tick => write!(f, "Tick"),
            GameEvent::ReceivedQuit => write!(f, "ReceivedQuit"),
            GameEvent::ReceivedRestart => write!(f, "ReceivedRestart"),
            GameEvent::GameOver(kind) => write!(f, "GameOver({:?})", kind),
            GameEvent::ButtonDown(button) => write!(f, "ButtonDown({:?})", button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_follow_the_circle() {
        for (index, button) in Button::ALL.iter().enumerate() {
            assert_eq!(*button as usize, index);
        }
    }

    #[test]
    fn button_down_displays_its_panel() {
        assert_eq!(
            GameEvent::ButtonDown(Button::Triangle).to_string(),
            "ButtonDown(Triangle)"
        );
        assert_eq!(GameEvent::Tick.to_string(), "Tick");
    }
}
