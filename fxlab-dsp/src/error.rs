//! Configuration errors raised before any sample is processed

use thiserror::Error;

/// Errors that can occur while building an effect
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("delay of {delay_ms}ms is shorter than one sample at {sample_rate}Hz")]
    ZeroLengthDelay { delay_ms: f64, sample_rate: u32 },
    #[error("delay line capacity must be at least one sample")]
    ZeroCapacity,
    #[error("gain {gain} is unstable, |gain| must be below 1.0")]
    UnstableGain { gain: f32 },
    #[error("{what}: {delays} delays but {gains} gains")]
    ParameterMismatch {
        what: &'static str,
        delays: usize,
        gains: usize,
    },
    #[error("reverb needs at least one comb filter")]
    EmptyCombBank,
    #[error("minimum delay {min_ms}ms exceeds maximum delay {max_ms}ms")]
    InvalidDelayRange { min_ms: f64, max_ms: f64 },
}

pub type Result<T> = std::result::Result<T, EffectError>;

/// Reject feedback gains that would make a recursive filter blow up
pub(crate) fn check_gain(gain: f32) -> Result<f32> {
    if gain.abs() < 1.0 {
        Ok(gain)
    } else {
        Err(EffectError::UnstableGain { gain })
    }
}
