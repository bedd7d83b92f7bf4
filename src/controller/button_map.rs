//! Native button codes of the dance mat to abstract [`Button`]s.
//!
//! Dance mats rarely have an SDL mapping, so gilrs reports their panels as
//! `Button::Unknown` together with the platform's native code. The table
//! below resolves those codes; the D-pad of ordinary gamepads is resolved
//! through gilrs' standard buttons as a fallback.

use crate::game::Button;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Native code of the first joystick button.
///
/// On Linux gilrs encodes the event type in the upper 16 bits (`EV_KEY`) and
/// the evdev code in the lower ones, starting at `BTN_JOYSTICK`.
#[cfg(target_os = "linux")]
pub const JOYSTICK_BUTTON_BASE: u32 = (1 << 16) | 0x120;

#[cfg(not(target_os = "linux"))]
pub const JOYSTICK_BUTTON_BASE: u32 = 0;

/// Button index on the mat the game was designed with, and its panel
const DEFAULT_LAYOUT: [(u32, Button); 8] = [
    (6, Button::Cross),
    (2, Button::Up),
    (7, Button::Circle),
    (3, Button::Right),
    (5, Button::Square),
    (1, Button::Down),
    (4, Button::Triangle),
    (0, Button::Left),
];

/// A single entry of the `[[button_map]]` configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub code: u32,
    pub button: Button,
}

pub fn default_bindings() -> Vec<ButtonBinding> {
    DEFAULT_LAYOUT
        .iter()
        .map(|(index, button)| ButtonBinding {
            code: JOYSTICK_BUTTON_BASE + index,
            button: *button,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    by_code: HashMap<u32, Button>,
}

impl ButtonMap {
    pub fn new(bindings: &[ButtonBinding]) -> Self {
        let by_code = bindings
            .iter()
            .map(|binding| (binding.code, binding.button))
            .collect();
        Self { by_code }
    }

    /// Resolve a press reported by gilrs.
    pub fn resolve(&self, button: gilrs::Button, code: u32) -> Option<Button> {
        if let Some(mapped) = self.by_code.get(&code) {
            return Some(*mapped);
        }

        let fallback = match button {
            gilrs::Button::DPadUp => Some(Button::Up),
            gilrs::Button::DPadDown => Some(Button::Down),
            gilrs::Button::DPadLeft => Some(Button::Left),
            gilrs::Button::DPadRight => Some(Button::Right),
            _ => None,
        };

        if fallback.is_none() {
            debug!("Unmapped button {:?} with native code {}", button, code);
        }
        fallback
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::new(&default_bindings())
    }
}
