//! Tremolo effect (amplitude modulation)

use super::lfo::Lfo;
use super::Effect;
use crate::normalize::normalize_peak;

/// Tremolo settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TremoloParams {
    /// LFO rate in Hz (typically 3 - 8)
    pub rate_hz: f64,
    /// Modulation depth (0.0 = no effect, 1.0 = gain swings down to silence)
    pub depth: f64,
}

impl Default for TremoloParams {
    fn default() -> Self {
        Self {
            rate_hz: 5.0,
            depth: 0.8,
        }
    }
}

/// LFO-driven gain stage
pub struct Tremolo {
    params: TremoloParams,
    /// Gain oscillating in `[1 - depth, 1]`
    lfo: Lfo,
}

impl Tremolo {
    pub fn new(params: TremoloParams, sample_rate: u32) -> Self {
        let range = params.depth / 2.0;
        let center = 1.0 - range;

        Self {
            params,
            lfo: Lfo::new(params.rate_hz, center, range, sample_rate),
        }
    }

    pub fn params(&self) -> &TremoloParams {
        &self.params
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        input * self.lfo.next_value() as f32
    }
}

impl Effect for Tremolo {
    fn process(&mut self, input: &[f32]) -> Vec<f32> {
        tracing::debug!(
            samples = input.len(),
            rate_hz = self.params.rate_hz,
            depth = self.params.depth,
            "tremolo start"
        );

        let mut output: Vec<f32> = input.iter().map(|&x| self.process_sample(x)).collect();
        normalize_peak(&mut output);

        tracing::debug!(effect = self.name(), "effect done");
        output
    }

    fn name(&self) -> &'static str {
        "Tremolo"
    }
}

/// Run a fresh tremolo over a whole buffer
pub fn apply_tremolo(input: &[f32], sample_rate: u32, params: TremoloParams) -> Vec<f32> {
    Tremolo::new(params, sample_rate).process(input)
}
