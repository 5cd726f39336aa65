//! Simple configuration persistence for fxlab
//!
//! Stores batch-run settings: where to read, where to write and how to tune
//! the effects that take a setting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default render directory
pub const DEFAULT_OUTPUT_DIR: &str = "output/final";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dry recording to process
    pub input: Option<PathBuf>,
    /// Directory rendered files go to
    pub output_dir: PathBuf,
    /// Note the dry recording is tuned to
    pub root_note: String,
    /// Extra comb delay for the right reverb channel, in samples
    pub stereo_spread: u32,
    /// Pitch shifter window in milliseconds
    pub pitch_window_ms: f64,
    /// Folder holding the console reference recordings
    pub reference_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            root_note: fxlab_analysis::DEFAULT_ROOT_NOTE.to_string(),
            stereo_spread: fxlab_dsp::DEFAULT_STEREO_SPREAD,
            pitch_window_ms: fxlab_dsp::pitch_shift::DEFAULT_WINDOW_MS,
            reference_dir: None,
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save config to the default location
    pub fn save(&self) -> io::Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.serialize();
        fs::write(path, content)
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fxlab")
            .join("config.txt")
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "input" => config.input = Some(PathBuf::from(value)),
                "output_dir" => config.output_dir = PathBuf::from(value),
                "root_note" => config.root_note = value.to_string(),
                "stereo_spread" => match value.parse() {
                    Ok(spread) => config.stereo_spread = spread,
                    Err(_) => tracing::warn!(value, "ignoring invalid stereo_spread"),
                },
                "pitch_window_ms" => match value.parse::<f64>() {
                    Ok(ms) if ms > 0.0 => config.pitch_window_ms = ms,
                    _ => tracing::warn!(value, "ignoring invalid pitch_window_ms"),
                },
                "reference_dir" => config.reference_dir = Some(PathBuf::from(value)),
                _ => {} // Ignore unknown keys
            }
        }

        config
    }

    /// Serialize config to simple key=value format
    fn serialize(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# fxlab configuration".to_string());

        if let Some(ref input) = self.input {
            lines.push(format!("input={}", input.display()));
        }
        lines.push(format!("output_dir={}", self.output_dir.display()));
        lines.push(format!("root_note={}", self.root_note));
        lines.push(format!("stereo_spread={}", self.stereo_spread));
        lines.push(format!("pitch_window_ms={}", self.pitch_window_ms));
        if let Some(ref dir) = self.reference_dir {
            lines.push(format!("reference_dir={}", dir.display()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("output/final"));
        assert_eq!(config.root_note, "C4");
        assert_eq!(config.stereo_spread, 23);
        assert_eq!(config.pitch_window_ms, 40.0);
    }

    #[test]
    fn test_parse_with_values() {
        let content = "input=/music/dry.wav\nstereo_spread = 30\nroot_note=A3\nreference_dir=/refs";
        let config = Config::parse(content);
        assert_eq!(config.input, Some(PathBuf::from("/music/dry.wav")));
        assert_eq!(config.stereo_spread, 30);
        assert_eq!(config.root_note, "A3");
        assert_eq!(config.reference_dir, Some(PathBuf::from("/refs")));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_parse_with_comments() {
        let content = "# Comment\noutput_dir=/renders\n# Another comment";
        let config = Config::parse(content);
        assert_eq!(config.output_dir, PathBuf::from("/renders"));
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = Config::parse("stereo_spread=-4\npitch_window_ms=0\nunknown=1");
        assert_eq!(config.stereo_spread, 23);
        assert_eq!(config.pitch_window_ms, 40.0);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config {
            input: Some(PathBuf::from("/test/dry.wav")),
            pitch_window_ms: 25.5,
            reference_dir: Some(PathBuf::from("/test/refs")),
            ..Config::default()
        };

        let serialized = config.serialize();
        let parsed = Config::parse(&serialized);

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("fxlab-config-{}", std::process::id()))
            .join("config.txt");
        let config = Config {
            root_note: "G2".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(parent) = path.parent() {
            std::fs::remove_dir_all(parent).ok();
        }
    }
}
