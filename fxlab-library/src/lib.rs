//! Audio I/O and run settings for fxlab - loading, saving, presets, config

mod config;
mod loader;
mod presets;
mod references;
mod writer;

pub use config::{Config, DEFAULT_OUTPUT_DIR};
pub use loader::{downmix, LoadError, LoadedTrack, TrackLoader};
pub use presets::{PresetError, ReverbPreset};
pub use references::{reference_file, reference_path, DRY_LABEL};
pub use writer::{save_wav, save_wav_stereo, SaveError};
