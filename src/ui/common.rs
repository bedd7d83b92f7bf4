//! # Shared drawing constants
//!
//! Colours and text used across the scenes. The palette follows the
//! pixel-art of the sprites; characters drawn without sprites get a solid
//! colour per kind so they stay distinguishable on the floor.

use eframe::egui::Color32;

use crate::game::actors::ActorKind;

/// Footer shown below the game and the game-over screen
pub const FOOTER: &str = "Press \"q\" to quit and \"r\" to restart";

/// Palette of the game scenes
pub struct UiColors;

impl UiColors {
    /// Background of every scene and the letterbox bars (RGB: 0, 0, 0)
    pub const BACKGROUND: Color32 = Color32::BLACK;

    /// Impassable tiles (RGB: 0, 0, 0)
    pub const BLOCK: Color32 = Color32::BLACK;

    /// Walkable tiles (RGB: 242, 209, 107)
    pub const FLOOR: Color32 = Color32::from_rgb(242, 209, 107);

    /// Header, footer and dialogue text (RGB: 255, 255, 255)
    pub const TEXT: Color32 = Color32::WHITE;

    /// Shape fallback for the cat (RGB: 230, 120, 30) - Orange
    pub const CAT: Color32 = Color32::from_rgb(230, 120, 30);

    /// Shape fallback for the mice (RGB: 130, 130, 140) - Grey
    pub const MOUSE: Color32 = Color32::from_rgb(130, 130, 140);

    /// Shape fallback for the dogs (RGB: 110, 60, 20) - Brown
    pub const DOG: Color32 = Color32::from_rgb(110, 60, 20);

    /// Eye dot marking the facing direction of a shape
    pub const EYE: Color32 = Color32::WHITE;
}

impl UiColors {
    pub fn actor(kind: ActorKind) -> Color32 {
        match kind {
            ActorKind::Cat => Self::CAT,
            ActorKind::Mouse => Self::MOUSE,
            ActorKind::Dog => Self::DOG,
        }
    }
}
