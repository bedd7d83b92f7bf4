//! Game simulation
//!
//! A clock-driven, I/O-free model of the maze: the cat is steered by
//! [`events::GameEvent::ButtonDown`], mice and dogs wander on their own, and
//! every [`events::GameEvent::Tick`] advances walks and checks collisions.
//!
//! ```text
//! GameEvent queue ──► State::handle ──► State (level, cat, mice, dogs)
//!                          │
//!                          └──► AudioCue outbox
//! ```
//!
//! Time is passed in explicitly as seconds on the game clock, and randomness
//! comes from an injected [`rand::rngs::StdRng`], so a seeded game replays
//! identically.

pub mod actors;
pub mod events;
pub mod geometry;
pub mod level;
pub mod state;

pub use events::{Button, GameEvent, GameOverKind};
pub use level::InitialMap;
pub use state::{AudioCue, SoundEffect, State};
