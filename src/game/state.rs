//! Global state of a running game and the event handling that drives it.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

use super::actors::{ActorKind, Body, Cat, Npc, Walking};
use super::events::{Button, GameEvent, GameOverKind};
use super::geometry::{
    characters_touch, in_bounds, neighbours, next_row_column, row_column_to_xy,
    xy_to_row_column, Direction, RowColumn,
};
use super::level::{Cell, InitialMap, Level, Tile};

/// Walk duration of all characters, in seconds
pub const WALK_DURATION: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Bark,
    Bell,
    Victory,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Bark, SoundEffect::Bell, SoundEffect::Victory];

    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Bark => "bark",
            SoundEffect::Bell => "bell",
            SoundEffect::Victory => "victory",
        }
    }
}

/// Side effects on the audio output requested by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Play(SoundEffect),
    StopAll,
}

fn button_to_direction(button: Button) -> Option<Direction> {
    match button {
        Button::Up => Some(Direction::North),
        Button::Right => Some(Direction::East),
        Button::Down => Some(Direction::South),
        Button::Left => Some(Direction::West),
        _ => None,
    }
}

pub struct State {
    /// Set once we received the signal to quit the game
    pub received_quit: bool,

    /// Start of the game, in seconds on the game clock
    pub game_start: f64,

    /// Current time on the game clock, in seconds
    pub now: f64,

    pub game_over: Option<GameOverKind>,

    pub game_end: Option<f64>,

    pub level: Level,
    pub cat: Cat,
    pub mice: Vec<Npc>,
    pub dogs: Vec<Npc>,

    map: InitialMap,
    rng: StdRng,
    audio_cues: Vec<AudioCue>,
}

impl State {
    pub fn new(game_start: f64, map: InitialMap, rng: StdRng) -> Self {
        let cat_xy = row_column_to_xy(map.cat());
        let mut state = Self {
            received_quit: false,
            game_start,
            now: game_start,
            game_over: None,
            game_end: None,
            level: Level::from_map(&map),
            cat: Cat {
                body: Body::new(cat_xy, Direction::South),
                direction_to_walk: None,
            },
            mice: Vec::new(),
            dogs: Vec::new(),
            map,
            rng,
            audio_cues: Vec::new(),
        };
        state.reset(game_start);
        state
    }

    /// Put the game back into its starting configuration.
    fn reset(&mut self, game_start: f64) {
        self.received_quit = false;
        self.game_start = game_start;
        self.now = game_start;
        self.game_over = None;
        self.game_end = None;
        self.level = Level::from_map(&self.map);
        self.mice.clear();
        self.dogs.clear();

        let cells: Vec<(RowColumn, Cell)> = self.map.cells().collect();
        for (row_column, cell) in cells {
            let xy = row_column_to_xy(row_column);
            match cell {
                Cell::Block | Cell::Floor => {}
                Cell::Cat => {
                    let direction = self.random_direction();
                    self.cat = Cat {
                        body: Body::new(xy, direction),
                        direction_to_walk: None,
                    };
                }
                Cell::Mouse | Cell::Dog => {
                    let kind = if cell == Cell::Mouse {
                        ActorKind::Mouse
                    } else {
                        ActorKind::Dog
                    };
                    let direction = self.random_direction();
                    let npc = Npc {
                        kind,
                        body: Body::new(xy, direction),
                        next_walk: game_start + self.rng.gen::<f64>() * 3.0,
                    };
                    match kind {
                        ActorKind::Mouse => self.mice.push(npc),
                        _ => self.dogs.push(npc),
                    }
                }
            }
        }

        debug!(
            "Game initialized at {:.3}s with {} mice and {} dogs",
            game_start,
            self.mice.len(),
            self.dogs.len()
        );
    }

    fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }

    /// Consume the first event in the queue.
    ///
    /// Handling an event may append follow-up events to the queue.
    pub fn handle(&mut self, queue: &mut VecDeque<GameEvent>, now: f64) {
        let Some(event) = queue.pop_front() else {
            return;
        };

        match event {
            GameEvent::ReceivedQuit => {
                info!("Received quit");
                self.received_quit = true;
            }
            GameEvent::ReceivedRestart => {
                info!("Restarting the game");
                self.audio_cues.push(AudioCue::StopAll);
                self.reset(now);
            }
            GameEvent::GameOver(kind) => {
                if self.game_over.is_none() {
                    info!(
                        "Game over: {:?} after {:.1}s",
                        kind,
                        now - self.game_start
                    );
                    self.game_over = Some(kind);
                    self.game_end = Some(now);
                    let sound = match kind {
                        GameOverKind::MiceEaten => SoundEffect::Victory,
                        GameOverKind::Dog => SoundEffect::Bark,
                    };
                    self.audio_cues.push(AudioCue::Play(sound));
                }
            }
            _ if self.game_over.is_some() => {}
            GameEvent::Tick => self.tick(queue, now),
            GameEvent::ButtonDown(button) => {
                if self.cat.body.is_idle() {
                    if let Some(direction) = button_to_direction(button) {
                        self.cat.direction_to_walk = Some(direction);
                    }
                }
            }
        }
    }

    /// Handle events until the queue is empty.
    pub fn handle_all(&mut self, queue: &mut VecDeque<GameEvent>, now: f64) {
        while !queue.is_empty() {
            self.handle(queue, now);
        }
    }

    fn tick(&mut self, queue: &mut VecDeque<GameEvent>, now: f64) {
        self.now = now;

        if self.mice.is_empty() {
            queue.push_back(GameEvent::GameOver(GameOverKind::MiceEaten));
        }

        let cat_xy = self.cat.body.xy;
        if self
            .dogs
            .iter()
            .any(|dog| characters_touch(dog.body.xy, cat_xy))
        {
            queue.push_back(GameEvent::GameOver(GameOverKind::Dog));
            return;
        }

        let mice_before = self.mice.len();
        self.mice
            .retain(|mouse| !characters_touch(mouse.body.xy, cat_xy));
        for _ in self.mice.len()..mice_before {
            info!("Caught a mouse, {} left", self.mice.len());
            self.audio_cues.push(AudioCue::Play(SoundEffect::Bell));
        }

        let mut occupied: HashSet<RowColumn> = self.level.blocks().collect();
        occupied.insert(self.cat.body.reserved_tile());
        for npc in self.dogs.iter().chain(self.mice.iter()) {
            occupied.insert(npc.body.reserved_tile());
        }

        for npc in self.dogs.iter_mut().chain(self.mice.iter_mut()) {
            if !npc.body.is_idle() || now <= npc.next_walk {
                continue;
            }

            let row_column = xy_to_row_column(npc.body.xy);
            let free: Vec<RowColumn> = neighbours(row_column)
                .filter(|next| in_bounds(*next) && !occupied.contains(next))
                .collect();

            if free.is_empty() {
                continue;
            }

            let target = free[self.rng.gen_range(0..free.len())];
            npc.body.walking = Some(Walking {
                start: now,
                eta: now + WALK_DURATION,
                origin_xy: npc.body.xy,
                target_xy: row_column_to_xy(target),
            });
            occupied.remove(&row_column);
            occupied.insert(target);

            npc.next_walk = now + 3.0 + self.rng.gen::<f64>() * 5.0;
        }

        if let Some(direction) = self.cat.direction_to_walk.take() {
            debug_assert!(
                self.cat.body.is_idle(),
                "cat can not be walking and instructed to walk"
            );

            let row_column = xy_to_row_column(self.cat.body.xy);
            let target = next_row_column(row_column, direction);

            match self.level.tile(target) {
                Some(Tile::Floor) => {
                    self.cat.body.walking = Some(Walking {
                        start: now,
                        eta: now + WALK_DURATION,
                        origin_xy: self.cat.body.xy,
                        target_xy: row_column_to_xy(target),
                    });
                }
                // Blocks and the edge of the map only turn the cat around.
                Some(Tile::Block) | None => self.cat.body.direction = direction,
            }
        }

        self.cat.body.advance(now);
        for npc in self.dogs.iter_mut().chain(self.mice.iter_mut()) {
            npc.body.advance(now);
        }
    }

    /// Take the audio cues accumulated since the last call.
    pub fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio_cues)
    }

    /// Seconds played so far, frozen at the end of the game
    pub fn elapsed(&self) -> f64 {
        self.game_end.unwrap_or(self.now) - self.game_start
    }

    /// All characters in drawing order: the cat, the dogs, then the mice
    pub fn actors(&self) -> impl Iterator<Item = (ActorKind, &Body)> + '_ {
        std::iter::once((ActorKind::Cat, &self.cat.body)).chain(
            self.dogs
                .iter()
                .chain(self.mice.iter())
                .map(|npc| (npc.kind, &npc.body)),
        )
    }
}
