//! Schroeder all-pass filter
//!
//! Flat magnitude response for any `|gain| < 1`; only the phase is
//! smeared. Used in series after the comb bank to diffuse the reverb tail.

use super::delay_line::DelayLine;
use crate::error::{check_gain, Result};

/// Canonical-form Schroeder all-pass
#[derive(Debug, Clone)]
pub struct AllPassFilter {
    line: DelayLine,
    gain: f32,
}

impl AllPassFilter {
    pub fn new(delay_ms: f64, gain: f32, sample_rate: u32) -> Result<Self> {
        Ok(Self {
            line: DelayLine::from_ms(delay_ms, sample_rate)?,
            gain: check_gain(gain)?,
        })
    }

    /// Delay length in samples
    pub fn delay_samples(&self) -> usize {
        self.line.len()
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.line.current();
        let buffer_in = input + self.gain * delayed;
        let output = delayed - self.gain * buffer_in;
        self.line.write(buffer_in);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_magnitude_is_flat() {
        let sample_rate = 44100;

        for freq in [100.0, 440.0, 1000.0, 3000.0, 8000.0] {
            let mut ap = AllPassFilter::new(5.0, 0.7, sample_rate).unwrap();
            let input: Vec<f32> = (0..sample_rate as usize)
                .map(|n| ((2.0 * PI * freq * n as f64 / sample_rate as f64).sin() * 0.5) as f32)
                .collect();
            let output: Vec<f32> = input.iter().map(|&x| ap.process(x)).collect();

            // Skip the transient while the filter fills up
            let settle = 8820;
            let ratio = rms(&output[settle..]) / rms(&input[settle..]);
            assert!(
                (ratio - 1.0).abs() < 0.02,
                "{}Hz: rms ratio {}",
                freq,
                ratio
            );
        }
    }

    #[test]
    fn test_impulse_response() {
        let g = 0.5;
        let mut ap = AllPassFilter::new(2.0, g, 1000).unwrap();
        assert_eq!(ap.delay_samples(), 2);

        let out: Vec<f32> = (0..5)
            .map(|n| ap.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();

        // y[0] = -g, y[M] = 1 - g^2, y[2M] = g(1 - g^2)
        assert!((out[0] + g).abs() < 1e-6);
        assert_eq!(out[1], 0.0);
        assert!((out[2] - (1.0 - g * g)).abs() < 1e-6);
        assert!((out[4] - g * (1.0 - g * g)).abs() < 1e-6);
    }

    #[test]
    fn test_unstable_gain_rejected() {
        assert!(AllPassFilter::new(5.0, 1.0, 44100).is_err());
    }
}
