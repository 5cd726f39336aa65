//! Single-tap comb filters
//!
//! Both variants share the same circular realization: read the delayed
//! value, write `input + gain * delayed` back at the cursor, return the
//! delayed value. The reverb bank and the flanger rely on this exact
//! read-then-write order.

use super::delay_line::DelayLine;
use crate::error::{check_gain, Result};

/// Recursive (feedback) comb filter
///
/// `w[n] = x[n] + g * w[n - M]`, output is `w[n - M]`. An impulse comes
/// back after `M` samples at full scale and then decays by `g` every
/// further period.
#[derive(Debug, Clone)]
pub struct IirCombFilter {
    line: DelayLine,
    gain: f32,
}

impl IirCombFilter {
    /// Create a comb with a delay in milliseconds and a feedback gain
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
        self.line.process(input, self.gain)
    }
}

/// Non-recursive (feedforward) comb filter
///
/// Conceptually `y[n] = x[n] + g * x[n - M]`. The buffer update is the same
/// as the recursive variant; a true feedforward topology (the flanger)
/// drives a `DelayLine` through its low-level interface instead.
#[derive(Debug, Clone)]
pub struct FirCombFilter {
    line: DelayLine,
    gain: f32,
}

impl FirCombFilter {
    /// Create a comb with a delay in milliseconds and a gain
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
        self.line.process(input, self.gain)
    }
}
