//! Named reverb parameter bundles

use fxlab_dsp::ReverbParams;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown reverb preset: {0}")]
    UnknownPreset(String),
}

/// Reverb presets tuned against the console recordings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReverbPreset {
    /// Short, dense hall
    Hall,
    /// Long, sparse echoes
    Room,
    /// Hall-like with a wetter mix
    Stage,
}

impl ReverbPreset {
    pub const ALL: [ReverbPreset; 3] = [ReverbPreset::Hall, ReverbPreset::Room, ReverbPreset::Stage];

    /// Preset label
    pub fn name(self) -> &'static str {
        match self {
            ReverbPreset::Hall => "REV-HALL",
            ReverbPreset::Room => "REV-ROOM",
            ReverbPreset::Stage => "REV-STAGE",
        }
    }

    /// Parameter bundle for this preset
    pub fn params(self) -> ReverbParams {
        match self {
            ReverbPreset::Hall => ReverbParams {
                comb_delays_ms: vec![26.84, 28.02, 45.82, 33.63],
                comb_gains: vec![0.758, 0.854, 0.796, 0.825],
                allpass_delays_ms: vec![2.35, 6.9],
                allpass_gains: vec![0.653, 0.659],
                wet_gain: 0.4,
            },
            ReverbPreset::Room => ReverbParams {
                comb_delays_ms: vec![419.0, 359.0, 251.0, 467.0],
                comb_gains: vec![0.50, 0.48, 0.56, 0.44],
                allpass_delays_ms: vec![7.06, 6.46],
                allpass_gains: vec![0.716, 0.613],
                wet_gain: 0.2,
            },
            ReverbPreset::Stage => ReverbParams {
                comb_delays_ms: vec![46.27, 39.96, 28.03, 51.85],
                comb_gains: vec![0.758, 0.854, 0.796, 0.825],
                allpass_delays_ms: vec![3.5, 1.2],
                allpass_gains: vec![0.7, 0.7],
                wet_gain: 0.5,
            },
        }
    }
}

impl FromStr for ReverbPreset {
    type Err = PresetError;

    /// Accepts "REV-HALL" or just "hall", any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let key = upper.strip_prefix("REV-").unwrap_or(&upper);
        match key {
            "HALL" => Ok(ReverbPreset::Hall),
            "ROOM" => Ok(ReverbPreset::Room),
            "STAGE" => Ok(ReverbPreset::Stage),
            _ => Err(PresetError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for ReverbPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in ReverbPreset::ALL {
            let params = preset.params();
            assert!(params.validate().is_ok(), "{} invalid", preset);
            assert!(fxlab_dsp::Reverb::new(&params, 44100).is_ok());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("REV-HALL".parse(), Ok(ReverbPreset::Hall));
        assert_eq!("room".parse(), Ok(ReverbPreset::Room));
        assert_eq!(" rev-stage ".parse(), Ok(ReverbPreset::Stage));
        assert_eq!(
            "REV-PLATE".parse::<ReverbPreset>(),
            Err(PresetError::UnknownPreset("REV-PLATE".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for preset in ReverbPreset::ALL {
            assert_eq!(preset.to_string().parse(), Ok(preset));
        }
    }
}
