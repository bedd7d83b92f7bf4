//! Sprites and sound effects loaded from the media directory.
//!
//! ```text
//! <media_dir>/images/{cat,mouse,dog}_{north,east,south,west}{0,1,2}.png
//! <media_dir>/sfx/{bark,bell,victory}.ogg
//! ```
//!
//! Media is optional: without sprites the characters are drawn as shapes,
//! without sounds the game is silent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::game::actors::ActorKind;
use crate::game::geometry::Direction;
use crate::game::SoundEffect;

/// Animation frames per walking direction
pub const FRAMES_PER_DIRECTION: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// `media/` next to the executable, where release archives put it
pub fn default_media_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("media"))
}

pub fn sprite_path(
    media_dir: &Path,
    kind: ActorKind,
    direction: Direction,
    frame: usize,
) -> PathBuf {
    media_dir
        .join("images")
        .join(format!("{}_{}{}.png", kind.name(), direction.name(), frame))
}

pub fn sound_path(media_dir: &Path, sound: SoundEffect) -> PathBuf {
    media_dir.join("sfx").join(format!("{}.ogg", sound.name()))
}

/// Decode an image file into egui's pixel format
pub fn load_image(path: &Path) -> Result<egui::ColorImage, MediaError> {
    let image = image::open(path)
        .map_err(|source| MediaError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

/// Character sprites uploaded as textures
pub struct Sprites {
    frames: HashMap<(ActorKind, Direction), Vec<egui::TextureHandle>>,
}

impl Sprites {
    /// Load every sprite; fails on the first missing or broken file.
    pub fn load(ctx: &egui::Context, media_dir: &Path) -> Result<Self, MediaError> {
        let mut frames = HashMap::new();

        for kind in ActorKind::ALL {
            for direction in Direction::ALL {
                let mut textures = Vec::with_capacity(FRAMES_PER_DIRECTION);
                for frame in 0..FRAMES_PER_DIRECTION {
                    let path = sprite_path(media_dir, kind, direction, frame);
                    let image = load_image(&path)?;
                    let name = format!("{}_{}{}", kind.name(), direction.name(), frame);
                    textures.push(ctx.load_texture(name, image, egui::TextureOptions::NEAREST));
                }
                frames.insert((kind, direction), textures);
            }
        }

        info!("Loaded sprites from {}", media_dir.display());
        Ok(Self { frames })
    }

    /// Load the sprites, or log why the shapes fallback is used.
    pub fn try_load(ctx: &egui::Context, media_dir: Option<&Path>) -> Option<Self> {
        let Some(media_dir) = media_dir else {
            warn!("No media directory, drawing characters as shapes");
            return None;
        };

        match Self::load(ctx, media_dir) {
            Ok(sprites) => Some(sprites),
            Err(e) => {
                warn!("{}; drawing characters as shapes", e);
                None
            }
        }
    }

    pub fn frame(
        &self,
        kind: ActorKind,
        direction: Direction,
        frame: usize,
    ) -> Option<&egui::TextureHandle> {
        self.frames.get(&(kind, direction))?.get(frame)
    }
}
