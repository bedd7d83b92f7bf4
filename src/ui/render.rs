//! Drawing of the scenes onto an egui painter.
//!
//! Every scene is laid out on a fixed 640×480 canvas and then scaled
//! uniformly into the available space, letterboxed in black.

use eframe::egui::{
    self, emath::RectTransform, pos2, vec2, Align2, FontId, Painter, Pos2, Rect, Vec2,
};

use super::common::{UiColors, FOOTER};
use crate::game::actors::{ActorKind, Body};
use crate::game::geometry::{
    Direction, CHARACTER_HEIGHT, CHARACTER_WIDTH, LEVEL_HEIGHT, LEVEL_WIDTH, TILE_HEIGHT,
    TILE_WIDTH,
};
use crate::game::level::Tile;
use crate::game::{GameOverKind, State};
use crate::media::{Sprites, FRAMES_PER_DIRECTION};

pub const CANVAS_WIDTH: f32 = TILE_WIDTH * LEVEL_WIDTH as f32;
/// One extra row of tiles holds the header and the footer.
pub const CANVAS_HEIGHT: f32 = TILE_HEIGHT * (LEVEL_HEIGHT as f32 + 1.0);

/// The level starts half a tile below the top of the canvas.
const LEVEL_OFFSET: Vec2 = vec2(0.0, TILE_HEIGHT / 2.0);

/// Which scene the state calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Game,
    GameOver(GameOverKind),
    Quit,
}

impl Scene {
    pub fn of(state: &State) -> Self {
        if state.received_quit {
            Scene::Quit
        } else if let Some(kind) = state.game_over {
            Scene::GameOver(kind)
        } else {
            Scene::Game
        }
    }
}

/// Largest rectangle of the aspect ratio of `scene` that fits centered in `surface`
pub fn fit_scene(scene: Vec2, surface: Rect) -> Rect {
    let scale = (surface.width() / scene.x).min(surface.height() / scene.y);
    Rect::from_center_size(surface.center(), scene * scale)
}

/// Format a duration in seconds as `MM:SS`, truncating.
pub fn format_clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0) as u64;
    let rest = (seconds - minutes as f64 * 60.0) as u64;
    format!("{:02}:{:02}", minutes, rest)
}

/// Sprite direction and frame index for `body` at `now`
pub fn sprite_frame(body: &Body, now: f64) -> (Direction, usize) {
    match &body.walking {
        None => (body.direction, 0),
        Some(walking) => {
            let index = (walking.fraction(now) * FRAMES_PER_DIRECTION as f32) as usize;
            (walking.direction(), index.min(FRAMES_PER_DIRECTION - 1))
        }
    }
}

pub fn paint(ui: &mut egui::Ui, state: &State, sprites: Option<&Sprites>) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
    painter.rect_filled(response.rect, 0.0, UiColors::BACKGROUND);

    let canvas = Rect::from_min_size(Pos2::ZERO, vec2(CANVAS_WIDTH, CANVAS_HEIGHT));
    let to_screen = RectTransform::from_to(canvas, fit_scene(canvas.size(), response.rect));
    let canvas = Canvas {
        painter: &painter,
        to_screen,
    };

    match Scene::of(state) {
        Scene::Quit => canvas.text(pos2(20.0, 20.0), "Quitting...", 32.0),
        Scene::GameOver(kind) => {
            let message = match kind {
                GameOverKind::MiceEaten => {
                    format!("Bravo! Your time: {}", format_clock(state.elapsed()))
                }
                GameOverKind::Dog => "Game Over :'(".to_string(),
            };
            canvas.text(pos2(20.0, 20.0), &message, 16.0);
            canvas.text(pos2(20.0, CANVAS_HEIGHT - 20.0), FOOTER, 16.0);
        }
        Scene::Game => paint_game(&canvas, state, sprites),
    }
}

fn paint_game(canvas: &Canvas<'_>, state: &State, sprites: Option<&Sprites>) {
    canvas.text(
        pos2(10.0, 2.0),
        &format!("Time: {}", format_clock(state.elapsed())),
        15.0,
    );

    for ((row, column), tile) in state.level.tiles() {
        let min = pos2(column as f32 * TILE_WIDTH, row as f32 * TILE_HEIGHT) + LEVEL_OFFSET;
        let color = match tile {
            Tile::Block => UiColors::BLOCK,
            Tile::Floor => UiColors::FLOOR,
        };
        canvas.rect(Rect::from_min_size(min, vec2(TILE_WIDTH, TILE_HEIGHT)), color);
    }

    for (kind, body) in state.actors() {
        let (direction, frame) = sprite_frame(body, state.now);
        let rect = Rect::from_min_size(
            pos2(body.xy.0.trunc(), body.xy.1.trunc()) + LEVEL_OFFSET,
            vec2(CHARACTER_WIDTH, CHARACTER_HEIGHT),
        );

        match sprites.and_then(|sprites| sprites.frame(kind, direction, frame)) {
            Some(texture) => canvas.image(texture, rect),
            None => canvas.shape(kind, direction, rect),
        }
    }

    canvas.text(pos2(10.0, CANVAS_HEIGHT - TILE_HEIGHT / 2.0), FOOTER, 10.0);
}

/// Painter working in canvas coordinates
struct Canvas<'a> {
    painter: &'a Painter,
    to_screen: RectTransform,
}

impl Canvas<'_> {
    fn scale(&self) -> f32 {
        self.to_screen.scale().x
    }

    fn text(&self, pos: Pos2, text: &str, size: f32) {
        self.painter.text(
            self.to_screen.transform_pos(pos),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(size * self.scale()),
            UiColors::TEXT,
        );
    }

    fn rect(&self, rect: Rect, color: egui::Color32) {
        self.painter
            .rect_filled(self.to_screen.transform_rect(rect), 0.0, color);
    }

    fn image(&self, texture: &egui::TextureHandle, rect: Rect) {
        self.painter.image(
            texture.id(),
            self.to_screen.transform_rect(rect),
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    /// A disc with an eye towards `direction`, for running without sprites
    fn shape(&self, kind: ActorKind, direction: Direction, rect: Rect) {
        let radius = rect.width() * 0.4;
        let center = rect.center();
        self.painter.circle_filled(
            self.to_screen.transform_pos(center),
            radius * self.scale(),
            UiColors::actor(kind),
        );

        let offset = match direction {
            Direction::North => vec2(0.0, -1.0),
            Direction::East => vec2(1.0, 0.0),
            Direction::South => vec2(0.0, 1.0),
            Direction::West => vec2(-1.0, 0.0),
        };
        self.painter.circle_filled(
            self.to_screen.transform_pos(center + offset * radius * 0.6),
            radius * 0.2 * self.scale(),
            UiColors::EYE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actors::Walking;
    use crate::game::level::InitialMap;
    use crate::game::GameEvent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    #[test]
    fn canvas_holds_the_level_and_a_spare_row() {
        assert_eq!(CANVAS_WIDTH, 640.0);
        assert_eq!(CANVAS_HEIGHT, 480.0);
    }

    #[test]
    fn scene_is_letterboxed_into_wide_and_tall_surfaces() {
        let scene = vec2(640.0, 480.0);

        let wide = fit_scene(scene, Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1080.0)));
        assert_eq!(wide, Rect::from_min_max(pos2(240.0, 0.0), pos2(1680.0, 1080.0)));

        let tall = fit_scene(scene, Rect::from_min_size(Pos2::ZERO, vec2(640.0, 960.0)));
        assert_eq!(tall, Rect::from_min_max(pos2(0.0, 240.0), pos2(640.0, 720.0)));

        let exact = Rect::from_min_size(pos2(10.0, 10.0), vec2(1280.0, 960.0));
        assert_eq!(fit_scene(scene, exact), exact);
    }

    #[test]
    fn clock_truncates_to_whole_seconds() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(59.99), "00:59");
        assert_eq!(format_clock(61.5), "01:01");
        assert_eq!(format_clock(3599.0), "59:59");
        assert_eq!(format_clock(-1.0), "00:00");
    }

    #[test]
    fn frames_follow_the_walk() {
        let mut body = Body::new((0.0, 0.0), Direction::South);
        assert_eq!(sprite_frame(&body, 10.0), (Direction::South, 0));

        body.walking = Some(Walking {
            start: 1.0,
            eta: 1.25,
            origin_xy: (0.0, 0.0),
            target_xy: (32.0, 0.0),
        });
        assert_eq!(sprite_frame(&body, 1.0), (Direction::East, 0));
        assert_eq!(sprite_frame(&body, 1.1), (Direction::East, 1));
        assert_eq!(sprite_frame(&body, 1.2), (Direction::East, 2));
        assert_eq!(sprite_frame(&body, 1.25), (Direction::East, 2));
        assert_eq!(sprite_frame(&body, 0.5), (Direction::East, 0));
    }

    #[test]
    fn quitting_takes_precedence_over_game_over() {
        let mut state = State::new(0.0, InitialMap::default(), StdRng::seed_from_u64(3));
        assert_eq!(Scene::of(&state), Scene::Game);

        let mut queue = VecDeque::from([GameEvent::GameOver(GameOverKind::Dog)]);
        state.handle_all(&mut queue, 1.0);
        assert_eq!(Scene::of(&state), Scene::GameOver(GameOverKind::Dog));

        let mut queue = VecDeque::from([GameEvent::ReceivedQuit]);
        state.handle_all(&mut queue, 2.0);
        assert_eq!(Scene::of(&state), Scene::Quit);
    }

    #[test]
    fn painting_works_without_sprites() {
        let ctx = egui::Context::default();
        let state = State::new(0.0, InitialMap::default(), StdRng::seed_from_u64(3));
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| paint(ui, &state, None));
        });
    }
}
