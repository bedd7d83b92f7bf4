//! Controller Handle - Unified API for dance-mat input
//!
//! Opens gilrs, picks the dance mat among the attached joysticks and hands
//! it to the [`EventCollector`], which runs on a blocking worker until the
//! handle is shut down.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::button_map::{ButtonBinding, ButtonMap};
use super::event_collector::{open_gilrs, CollectorError, CollectorHandle, EventCollector};
use super::joystick::{enumerate, select, Guid, JoystickInfo, SelectionError};
use crate::game::GameEvent;

/// Configuration settings for the controller subsystem
#[derive(Clone, Debug)]
pub struct ControllerSettings {
    /// Native button codes of the mat and the panels they stand for
    pub bindings: Vec<ButtonBinding>,

    /// GUID of the joystick to use; the first attached one if unset
    pub joystick: Option<Guid>,
}

/// Errors that can occur during controller initialization
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Collector error: {0}")]
    CollectorError(#[from] CollectorError),

    #[error(transparent)]
    SelectionError(#[from] SelectionError),
}

/// Enumerate the attached joysticks without starting collection
pub fn list_joysticks() -> Result<Vec<JoystickInfo>, ControllerError> {
    let gilrs = open_gilrs()?;
    Ok(enumerate(&gilrs)
        .into_iter()
        .map(|(_, joystick)| joystick)
        .collect())
}

/// Handle for the running controller subsystem
///
/// Dropping the handle does not stop collection; call
/// [`ControllerHandle::shutdown`] or cancel the token from
/// [`ControllerHandle::cancel_token`].
pub struct ControllerHandle {
    joystick: JoystickInfo,
    cancel: CancellationToken,
    collector: CollectorHandle,
}

impl ControllerHandle {
    /// Selects the dance mat and starts forwarding its presses to `sender`.
    ///
    /// # Errors
    ///
    /// * [`ControllerError::CollectorError`] - gilrs could not be initialized
    /// * [`ControllerError::SelectionError`] - no joystick is attached, or
    ///   none matches the requested GUID
    pub fn spawn(
        settings: ControllerSettings,
        sender: mpsc::Sender<GameEvent>,
    ) -> Result<Self, ControllerError> {
        info!("Initializing Controller system with settings: {:?}", settings);

        let gilrs = open_gilrs()?;
        let attached = enumerate(&gilrs);
        let infos: Vec<JoystickInfo> = attached.iter().map(|(_, info)| info.clone()).collect();

        let index = select(&infos, settings.joystick.as_ref())?;
        let (active_gamepad, joystick) = attached[index].clone();
        info!("Selected joystick: {} ({})", joystick.name, active_gamepad);

        let button_map = ButtonMap::new(&settings.bindings);
        let cancel = CancellationToken::new();

        let collector = EventCollector::create(
            gilrs,
            active_gamepad,
            button_map,
            sender,
            cancel.clone(),
        );
        let collector = CollectorHandle::spawn(collector);
        info!("Controller system initialized successfully");

        Ok(Self {
            joystick,
            cancel,
            collector,
        })
    }

    /// The joystick the game is played with
    pub fn joystick(&self) -> &JoystickInfo {
        &self.joystick
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop collection and wait for the worker to finish.
    pub async fn shutdown(self) {
        debug!("Shutting down controller system");
        self.cancel.cancel();
        self.collector.join().await;
        info!("Controller system stopped");
    }

    /// Run `body` while collecting, then shut down, whatever `body` returned.
    ///
    /// The collector runs on a blocking thread that the runtime waits for on
    /// exit, so an early return that skips the shutdown hangs the process.
    pub async fn while_collecting<T>(self, body: impl FnOnce(CancellationToken) -> T) -> T {
        let result = body(self.cancel_token());
        self.shutdown().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn handle_with_idle_worker() -> ControllerHandle {
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let collector = CollectorHandle::spawn_worker(move || {
            while !worker_cancel.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
        });

        ControllerHandle {
            joystick: JoystickInfo {
                name: "Dance Mat".to_string(),
                guid: Guid::from_bytes([0; 16]),
            },
            cancel,
            collector,
        }
    }

    #[tokio::test]
    async fn failing_window_still_stops_the_collector() {
        let handle = handle_with_idle_worker();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            handle.while_collecting(|cancel| {
                assert!(!cancel.is_cancelled());
                Err::<(), &str>("no display")
            }),
        )
        .await
        .expect("collector must stop after the body fails");

        assert_eq!(result, Err("no display"));
    }

    #[tokio::test]
    async fn shutdown_cancels_the_shared_token() {
        let handle = handle_with_idle_worker();
        let token = handle.cancel_token();

        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("collector must stop on shutdown");
        assert!(token.is_cancelled());
    }
}
