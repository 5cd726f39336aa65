//! Sinusoidal low-frequency oscillator
//!
//! Produces `center + range * sin(phase)`. The same primitive modulates a
//! delay length (flanger) or a gain (tremolo); only the center/range
//! mapping differs.

use std::f64::consts::TAU;

/// Phase-accumulator LFO
#[derive(Debug, Clone)]
pub struct Lfo {
    center: f64,
    range: f64,
    /// Current phase in radians
    phase: f64,
    /// Phase increment per sample
    phase_step: f64,
}

impl Lfo {
    /// Create an LFO oscillating in `[center - range, center + range]`
    pub fn new(rate_hz: f64, center: f64, range: f64, sample_rate: u32) -> Self {
        let phase_step = TAU * rate_hz / sample_rate as f64;
        if phase_step > TAU {
            // Single-subtraction wrap cannot keep up with this rate
            tracing::warn!(
                rate_hz,
                sample_rate,
                phase_step,
                "LFO step exceeds one cycle per sample, phase will drift above 2π"
            );
        }

        Self {
            center,
            range,
            phase: 0.0,
            phase_step,
        }
    }

    /// Current phase in radians
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    /// Return the modulation value for this sample and advance the phase
    #[inline]
    pub fn next_value(&mut self) -> f64 {
        let output = self.center + self.range * self.phase.sin();

        self.phase += self.phase_step;
        if self.phase > TAU {
            self.phase -= TAU;
        }

        output
    }
}
