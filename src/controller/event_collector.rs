use chrono::Local;
use gilrs::{Event, EventType, GamepadId, Gilrs};
use statum::{machine, state};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::controller::button_map::ButtonMap;
use crate::game::GameEvent;

// Collector errors
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to initialize collector: {0}")]
    InitializationError(String),

    #[error("No gamepad connected: {0}")]
    NoGamepadError(String),

    #[error("Event receiver is gone")]
    ChannelClosed,
}

/// Open the gilrs context used both for enumeration and collection.
pub fn open_gilrs() -> Result<Gilrs, CollectorError> {
    info!("Initializing gilrs controller interface");
    match Gilrs::new() {
        Ok(g) => {
            info!("Successfully initialized gilrs");
            Ok(g)
        }
        Err(gilrs::Error::NotImplemented(g)) => {
            warn!("Gamepads are not supported on this platform, no joystick will be found");
            Ok(g)
        }
        Err(e) => {
            error!("Failed to initialize gilrs: {}", e);
            Err(CollectorError::InitializationError(e.to_string()))
        }
    }
}

// Define collector states using statum's state macro
#[state]
#[derive(Debug, Clone)]
pub enum CollectionState {
    Initializing,
    Collecting,
}

#[machine]
#[derive(Debug)]
pub struct EventCollector<S: CollectionState> {
    // Gilrs context
    gilrs: Gilrs,

    // The dance mat; presses of every other device are dropped
    active_gamepad: GamepadId,

    button_map: ButtonMap,

    // Channel towards the game loop
    event_sender: mpsc::Sender<GameEvent>,

    cancel: CancellationToken,
}

impl EventCollector<Initializing> {
    pub fn create(
        gilrs: Gilrs,
        active_gamepad: GamepadId,
        button_map: ButtonMap,
        event_sender: mpsc::Sender<GameEvent>,
        cancel: CancellationToken,
    ) -> Self {
        debug!(
            "Creating Event Collector for gamepad {} with {:?}",
            active_gamepad, button_map
        );
        Self::new(gilrs, active_gamepad, button_map, event_sender, cancel)
    }

    // Check that the selected gamepad is still there and start collecting
    pub fn initialize(self) -> Result<EventCollector<Collecting>, CollectorError> {
        match self.gilrs.connected_gamepad(self.active_gamepad) {
            Some(gamepad) => {
                info!(
                    "Collecting from gamepad {} ({})",
                    gamepad.name(),
                    self.active_gamepad
                );
            }
            None => {
                return Err(CollectorError::NoGamepadError(format!(
                    "gamepad {} disconnected before collection started",
                    self.active_gamepad
                )));
            }
        }

        info!("Event Collector initialized, transitioning to Collecting state");
        Ok(self.transition())
    }
}

impl EventCollector<Collecting> {
    /// Read a single gilrs event, forwarding it if it is a mat press.
    ///
    /// Returns whether an event was read.
    pub fn collect_next_event(&mut self) -> Result<bool, CollectorError> {
        let Some(Event { id, event, .. }) = self.gilrs.next_event() else {
            return Ok(false);
        };

        if id != self.active_gamepad {
            debug!("Skipping event from non-active gamepad {}: {:?}", id, event);
            return Ok(true);
        }

        let Some(game_event) = self.convert_gilrs_event(event) else {
            return Ok(true);
        };

        match self.event_sender.try_send(game_event) {
            Ok(_) => {
                debug!("{} sent to the game loop", game_event);
                Ok(true)
            }
            Err(TrySendError::Full(dropped)) => {
                warn!("Game loop is lagging behind, dropped {}", dropped);
                Ok(true)
            }
            Err(TrySendError::Closed(_)) => Err(CollectorError::ChannelClosed),
        }
    }

    // Run the collector until cancelled or the game loop goes away
    pub fn run_collection_loop(&mut self) -> Result<(), CollectorError> {
        info!("Starting Event Collector loop");

        let mut event_count = 0u64;
        let mut last_log_time = Local::now();
        let log_interval = chrono::Duration::seconds(30);

        while !self.cancel.is_cancelled() {
            match self.collect_next_event() {
                Ok(true) => event_count += 1,
                Ok(false) => std::thread::sleep(Duration::from_millis(1)),
                Err(CollectorError::ChannelClosed) => {
                    info!("Game loop closed the event channel, stopping collection");
                    return Ok(());
                }
                Err(e) => error!("Error collecting event: {}", e),
            }

            let now = Local::now();
            if now - last_log_time > log_interval {
                debug!(
                    "Event Collector stats: {} events in the last {} seconds",
                    event_count,
                    log_interval.num_seconds()
                );
                event_count = 0;
                last_log_time = now;
            }
        }

        info!("Event Collector cancelled");
        Ok(())
    }

    fn convert_gilrs_event(&mut self, event: EventType) -> Option<GameEvent> {
        match event {
            EventType::ButtonPressed(button, code) => {
                let code = code.into_u32();
                info!(
                    "Button pressed: {:?} (code {}) at {}",
                    button,
                    code,
                    Local::now().format("%H:%M:%S.%3f")
                );
                self.button_map
                    .resolve(button, code)
                    .map(GameEvent::ButtonDown)
            }
            EventType::ButtonReleased(button, _) | EventType::ButtonRepeated(button, _) => {
                debug!("Ignoring release/repeat of {:?}", button);
                None
            }
            EventType::Connected => {
                info!("Dance mat connected");
                None
            }
            EventType::Disconnected => {
                warn!("Dance mat disconnected, plug it back in to keep playing");
                None
            }
            _ => {
                debug!("Unhandled event type: {:?}", event);
                None
            }
        }
    }
}

// Public interface for spawning and running the collector
pub struct CollectorHandle {
    task: tokio::task::JoinHandle<()>,
}

impl CollectorHandle {
    /// Move the collector onto a blocking worker of the tokio runtime.
    pub fn spawn(collector: EventCollector<Initializing>) -> Self {
        info!("Spawning Event Collector task");
        Self::spawn_worker(move || match collector.initialize() {
            Ok(mut collecting_state) => {
                if let Err(e) = collecting_state.run_collection_loop() {
                    error!("Collector task terminated with error: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to initialize Event Collector: {}", e);
            }
        })
    }

    /// Run `worker` on a blocking thread. It must return once its
    /// cancellation token fires, or [`CollectorHandle::join`] never completes.
    pub fn spawn_worker(worker: impl FnOnce() + Send + 'static) -> Self {
        Self {
            task: tokio::task::spawn_blocking(worker),
        }
    }

    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("Event Collector task panicked: {}", e);
        }
    }
}
