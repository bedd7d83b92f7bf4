//! # Game window
//!
//! [`GameApp`] is the eframe application hosting the game. Each frame it
//!
//! 1. drains the dance-mat events forwarded by the controller subsystem,
//! 2. adds keyboard input (`q`, `r` and optionally the arrow keys),
//! 3. appends a [`GameEvent::Tick`] and lets the [`State`] handle the queue,
//! 4. plays the audio cues and paints the current scene,
//! 5. asks for the next frame after `1 / fps` seconds.
//!
//! Controller events enter through `raw_input_hook`, before egui processes
//! the frame, in the same way keyboard input does.

pub mod common;
pub mod render;

use eframe::egui::{self, Key};
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::audio::Audio;
use crate::game::{Button, GameEvent, InitialMap, State};
use crate::media::Sprites;
use common::UiColors;

/// Settings of the game window taken from the configuration
#[derive(Clone, Debug)]
pub struct GameSettings {
    pub fps: u32,
    pub allow_arrow_keys: bool,
    pub media_dir: Option<PathBuf>,
}

/// Translate a key press into a game event.
pub fn key_to_event(key: Key, allow_arrow_keys: bool) -> Option<GameEvent> {
    match key {
        Key::Q => Some(GameEvent::ReceivedQuit),
        Key::R => Some(GameEvent::ReceivedRestart),
        Key::ArrowUp if allow_arrow_keys => Some(GameEvent::ButtonDown(Button::Up)),
        Key::ArrowDown if allow_arrow_keys => Some(GameEvent::ButtonDown(Button::Down)),
        Key::ArrowLeft if allow_arrow_keys => Some(GameEvent::ButtonDown(Button::Left)),
        Key::ArrowRight if allow_arrow_keys => Some(GameEvent::ButtonDown(Button::Right)),
        _ => None,
    }
}

pub struct GameApp {
    state: State,
    queue: VecDeque<GameEvent>,

    /// Presses on the dance mat, from the controller subsystem
    event_receiver: mpsc::Receiver<GameEvent>,

    settings: GameSettings,
    sprites: Option<Sprites>,
    audio: Audio,

    /// Origin of the game clock
    clock: Instant,

    /// Cancelled once the player quits, to stop the controller subsystem
    cancel: CancellationToken,
    closing: bool,
}

impl GameApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: GameSettings,
        event_receiver: mpsc::Receiver<GameEvent>,
        cancel: CancellationToken,
        rng: StdRng,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let media_dir = settings.media_dir.as_deref();
        let sprites = Sprites::try_load(&cc.egui_ctx, media_dir);
        let audio = Audio::open(media_dir);

        info!("Starting the game at {} fps", settings.fps);
        Self {
            state: State::new(0.0, InitialMap::default(), rng),
            queue: VecDeque::new(),
            event_receiver,
            settings,
            sprites,
            audio,
            clock: Instant::now(),
            cancel,
            closing: false,
        }
    }

    fn gather_keyboard(&mut self, ctx: &egui::Context) {
        let allow_arrow_keys = self.settings.allow_arrow_keys;
        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } = event
                {
                    if let Some(event) = key_to_event(*key, allow_arrow_keys) {
                        self.queue.push_back(event);
                    }
                }
            }

            if input.viewport().close_requested() {
                self.queue.push_back(GameEvent::ReceivedQuit);
            }
        });
    }
}

impl eframe::App for GameApp {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, _raw_input: &mut egui::RawInput) {
        while let Ok(event) = self.event_receiver.try_recv() {
            debug!("Controller event: {}", event);
            self.queue.push_back(event);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.gather_keyboard(ctx);

        let now = self.clock.elapsed().as_secs_f64();
        self.queue.push_back(GameEvent::Tick);
        self.state.handle_all(&mut self.queue, now);
        self.audio.apply(&self.state.take_audio_cues());

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(UiColors::BACKGROUND))
            .show(ctx, |ui| render::paint(ui, &self.state, self.sprites.as_ref()));

        if self.state.received_quit && !self.closing {
            info!("Quitting the game...");
            self.closing = true;
            self.cancel.cancel();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        ctx.request_repaint_after(Duration::from_secs_f64(1.0 / self.settings.fps as f64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_and_restart_keys_always_work() {
        for allow in [false, true] {
            assert_eq!(key_to_event(Key::Q, allow), Some(GameEvent::ReceivedQuit));
            assert_eq!(key_to_event(Key::R, allow), Some(GameEvent::ReceivedRestart));
            assert_eq!(key_to_event(Key::Space, allow), None);
        }
    }

    #[test]
    fn arrow_keys_need_to_be_allowed() {
        assert_eq!(key_to_event(Key::ArrowUp, false), None);
        assert_eq!(key_to_event(Key::ArrowLeft, false), None);

        assert_eq!(
            key_to_event(Key::ArrowUp, true),
            Some(GameEvent::ButtonDown(Button::Up))
        );
        assert_eq!(
            key_to_event(Key::ArrowDown, true),
            Some(GameEvent::ButtonDown(Button::Down))
        );
        assert_eq!(
            key_to_event(Key::ArrowLeft, true),
            Some(GameEvent::ButtonDown(Button::Left))
        );
        assert_eq!(
            key_to_event(Key::ArrowRight, true),
            Some(GameEvent::ButtonDown(Button::Right))
        );
    }
}
