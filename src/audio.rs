//! Sound effect playback
//!
//! Playback needs the `audio` feature (rodio). Without it, cues are only
//! logged so the rest of the game behaves the same.

use std::path::Path;
use tracing::debug;

use crate::game::AudioCue;

pub struct Audio {
    #[cfg(feature = "audio")]
    backend: Option<backend::Backend>,
}

impl Audio {
    pub fn open(media_dir: Option<&Path>) -> Self {
        #[cfg(feature = "audio")]
        {
            Self {
                backend: backend::Backend::open(media_dir),
            }
        }

        #[cfg(not(feature = "audio"))]
        {
            debug!(
                "Built without the audio feature, sound effects from {:?} are disabled",
                media_dir
            );
            Self {}
        }
    }

    pub fn apply(&mut self, cues: &[AudioCue]) {
        for cue in cues {
            debug!("Audio cue: {:?}", cue);

            #[cfg(feature = "audio")]
            if let Some(backend) = self.backend.as_mut() {
                backend.apply(*cue);
            }
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;
    use tracing::{info, warn};

    use crate::game::{AudioCue, SoundEffect};
    use crate::media::sound_path;

    pub struct Backend {
        // Playback stops when the stream is dropped.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sounds: HashMap<SoundEffect, Arc<[u8]>>,
        sinks: Vec<Sink>,
    }

    impl Backend {
        pub fn open(media_dir: Option<&Path>) -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(output) => output,
                Err(e) => {
                    warn!("No audio output available: {}", e);
                    return None;
                }
            };

            let mut sounds = HashMap::new();
            if let Some(media_dir) = media_dir {
                for sound in SoundEffect::ALL {
                    let path = sound_path(media_dir, sound);
                    match std::fs::read(&path) {
                        Ok(bytes) => {
                            sounds.insert(sound, Arc::from(bytes));
                        }
                        Err(e) => warn!("Skipping sound {}: {}", path.display(), e),
                    }
                }
            }
            info!("Audio ready with {} sound effects", sounds.len());

            Some(Self {
                _stream: stream,
                handle,
                sounds,
                sinks: Vec::new(),
            })
        }

        pub fn apply(&mut self, cue: AudioCue) {
            self.sinks.retain(|sink| !sink.empty());

            match cue {
                AudioCue::StopAll => {
                    for sink in self.sinks.drain(..) {
                        sink.stop();
                    }
                }
                AudioCue::Play(sound) => {
                    let Some(bytes) = self.sounds.get(&sound) else {
                        return;
                    };
                    let source = match Decoder::new(Cursor::new(bytes.clone())) {
                        Ok(source) => source,
                        Err(e) => {
                            warn!("Failed to decode {:?}: {}", sound, e);
                            return;
                        }
                    };
                    match Sink::try_new(&self.handle) {
                        Ok(sink) => {
                            sink.append(source);
                            self.sinks.push(sink);
                        }
                        Err(e) => warn!("Failed to play {:?}: {}", sound, e),
                    }
                }
            }
        }
    }
}
