//! Controller subsystem for dance-mat input
//!
//! 1. [`joystick`] - Enumeration and selection by GUID
//! 2. [`button_map`] - Native button codes to abstract mat panels
//! 3. [`event_collector`] - gilrs polling on a blocking worker
//! 4. [`controller_handle`] - Unified API and lifecycle management
//!
//! ```text
//! Dance mat ──► gilrs ──► Collector ──► mpsc<GameEvent> ──► game loop
//! ```

pub mod button_map;
pub mod controller_handle;
pub mod event_collector;
pub mod joystick;

pub use controller_handle::{list_joysticks, ControllerError, ControllerHandle, ControllerSettings};
pub use joystick::Guid;
