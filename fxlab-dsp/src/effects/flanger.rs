//! Flanger effect - sweeping feedforward comb
//!
//! Mixes the signal with a copy of itself read from a delay line whose
//! length is swept by an LFO between a minimum and a maximum delay.

use super::delay_line::DelayLine;
use super::lfo::Lfo;
use super::Effect;
use crate::error::{EffectError, Result};
use crate::normalize::normalize_peak;

/// Extra headroom in the delay buffer beyond the maximum sweep
const BUFFER_HEADROOM_MS: f64 = 2.0;

/// Flanger settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangerParams {
    /// Shortest delay of the sweep in ms
    pub delay_min_ms: f64,
    /// Longest delay of the sweep in ms
    pub delay_max_ms: f64,
    /// LFO rate in Hz
    pub rate_hz: f64,
    /// Gain applied to the delayed copy (0.0 - 1.0)
    pub depth_gain: f32,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            delay_min_ms: 1.0,
            delay_max_ms: 5.0,
            rate_hz: 0.5,
            depth_gain: 0.7,
        }
    }
}

/// Flanger with LFO-modulated fractional delay
pub struct Flanger {
    params: FlangerParams,

    /// Delay length modulator, in samples
    lfo: Lfo,

    /// Holds the raw (dry) input history
    delay_line: DelayLine,
}

impl Flanger {
    /// Create a new flanger
    pub fn new(params: FlangerParams, sample_rate: u32) -> Result<Self> {
        if params.delay_min_ms > params.delay_max_ms {
            return Err(EffectError::InvalidDelayRange {
                min_ms: params.delay_min_ms,
                max_ms: params.delay_max_ms,
            });
        }

        // Sweep centre and half-span, converted to samples
        let sr = sample_rate as f64;
        let center = (params.delay_min_ms + params.delay_max_ms) / 2000.0 * sr;
        let range = (params.delay_max_ms - params.delay_min_ms) / 2000.0 * sr;

        Ok(Self {
            params,
            lfo: Lfo::new(params.rate_hz, center, range, sample_rate),
            delay_line: DelayLine::from_ms(params.delay_max_ms + BUFFER_HEADROOM_MS, sample_rate)?,
        })
    }

    pub fn params(&self) -> &FlangerParams {
        &self.params
    }

    /// Delay buffer length in samples
    pub fn buffer_len(&self) -> usize {
        self.delay_line.len()
    }

    /// Process one sample (no normalization)
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let current_delay = self.lfo.next_value();

        let delayed = self.delay_line.read_delayed(current_delay);
        let output = input + self.params.depth_gain * delayed;

        // Only the dry input goes into the line, no feedback
        self.delay_line.write(input);

        output
    }
}

impl Effect for Flanger {
    fn process(&mut self, input: &[f32]) -> Vec<f32> {
        tracing::debug!(
            samples = input.len(),
            rate_hz = self.params.rate_hz,
            delay_min_ms = self.params.delay_min_ms,
            delay_max_ms = self.params.delay_max_ms,
            "flanger start"
        );

        let mut output: Vec<f32> = input.iter().map(|&x| self.process_sample(x)).collect();
        normalize_peak(&mut output);

        tracing::debug!(effect = self.name(), "effect done");
        output
    }

    fn name(&self) -> &'static str {
        "Flanger"
    }
}

/// Run a fresh flanger over a whole buffer
pub fn apply_flanger(input: &[f32], sample_rate: u32, params: FlangerParams) -> Result<Vec<f32>> {
    let mut flanger = Flanger::new(params, sample_rate)?;
    Ok(flanger.process(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::peak;

    #[test]
    fn test_flanger_creation() {
        let flanger = Flanger::new(FlangerParams::default(), 44100).unwrap();
        // (5 + 2)ms at 44.1kHz
        assert_eq!(flanger.buffer_len(), 308);
        assert_eq!(flanger.params().rate_hz, 0.5);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let params = FlangerParams {
            delay_min_ms: 6.0,
            delay_max_ms: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Flanger::new(params, 44100),
            Err(EffectError::InvalidDelayRange { .. })
        ));
    }

    #[test]
    fn test_silence_in_silence_out() {
        let output = apply_flanger(&vec![0.0; 10000], 44100, FlangerParams::default()).unwrap();
        assert_eq!(output.len(), 10000);
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fixed_delay_echo() {
        // Zero-width sweep: constant 2ms delay = 2 samples at 1kHz
        let params = FlangerParams {
            delay_min_ms: 2.0,
            delay_max_ms: 2.0,
            rate_hz: 0.5,
            depth_gain: 0.5,
        };
        let mut input = vec![0.0; 16];
        input[0] = 0.8;

        let output = apply_flanger(&input, 1000, params).unwrap();
        assert_eq!(output[0], 0.8);
        assert_eq!(output[1], 0.0);
        assert!((output[2] - 0.4).abs() < 1e-6);
        assert!(output[3..].iter().all(|&s| s.abs() < 1e-6));
    }

    #[test]
    fn test_output_normalized() {
        let params = FlangerParams {
            depth_gain: 1.0,
            ..Default::default()
        };
        let input = vec![0.9; 4410];
        let output = apply_flanger(&input, 44100, params).unwrap();
        assert!(peak(&output) <= 1.0);
        assert!(output.iter().all(|s| s.is_finite()));
    }
}
