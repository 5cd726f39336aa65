//! Schroeder-style reverb
//!
//! Parallel recursive comb filters are summed and scaled, then diffused
//! through a series chain of all-pass filters. The wet signal is added on
//! top of the full dry signal.

use super::allpass::AllPassFilter;
use super::comb::IirCombFilter;
use super::Effect;
use crate::error::{EffectError, Result};
use crate::normalize::normalize_peak;

/// Right-channel comb offset for the stereo variant, in samples
pub const DEFAULT_STEREO_SPREAD: u32 = 23;

/// Comb bank and all-pass chain settings
#[derive(Debug, Clone, PartialEq)]
pub struct ReverbParams {
    /// Comb delays in ms (one per comb)
    pub comb_delays_ms: Vec<f64>,
    /// Comb feedback gains
    pub comb_gains: Vec<f32>,
    /// All-pass delays in ms (one per all-pass)
    pub allpass_delays_ms: Vec<f64>,
    /// All-pass gains
    pub allpass_gains: Vec<f32>,
    /// Gain of the reverberated signal added to the dry input
    pub wet_gain: f32,
}

impl ReverbParams {
    /// Check array lengths without building any filter
    pub fn validate(&self) -> Result<()> {
        if self.comb_delays_ms.len() != self.comb_gains.len() {
            return Err(EffectError::ParameterMismatch {
                what: "comb filters",
                delays: self.comb_delays_ms.len(),
                gains: self.comb_gains.len(),
            });
        }
        if self.allpass_delays_ms.len() != self.allpass_gains.len() {
            return Err(EffectError::ParameterMismatch {
                what: "all-pass filters",
                delays: self.allpass_delays_ms.len(),
                gains: self.allpass_gains.len(),
            });
        }
        if self.comb_delays_ms.is_empty() {
            return Err(EffectError::EmptyCombBank);
        }
        Ok(())
    }

    /// Same settings with every comb delay lengthened by `spread` samples
    pub fn with_spread(&self, spread: u32, sample_rate: u32) -> Self {
        let spread_ms = (spread as f64 / sample_rate as f64) * 1000.0;
        Self {
            comb_delays_ms: self.comb_delays_ms.iter().map(|d| d + spread_ms).collect(),
            ..self.clone()
        }
    }
}

/// Mono reverberator
pub struct Reverb {
    combs: Vec<IirCombFilter>,
    allpasses: Vec<AllPassFilter>,
    /// 1/N for N combs
    comb_scale: f32,
    wet_gain: f32,
}

impl Reverb {
    /// Build every filter up front; any bad parameter fails here
    pub fn new(params: &ReverbParams, sample_rate: u32) -> Result<Self> {
        params.validate()?;

        let combs = params
            .comb_delays_ms
            .iter()
            .zip(&params.comb_gains)
            .map(|(&delay_ms, &gain)| IirCombFilter::new(delay_ms, gain, sample_rate))
            .collect::<Result<Vec<_>>>()?;

        let allpasses = params
            .allpass_delays_ms
            .iter()
            .zip(&params.allpass_gains)
            .map(|(&delay_ms, &gain)| AllPassFilter::new(delay_ms, gain, sample_rate))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            comb_scale: 1.0 / combs.len() as f32,
            combs,
            allpasses,
            wet_gain: params.wet_gain,
        })
    }

    /// Comb delay lengths in samples
    pub fn comb_delays(&self) -> Vec<usize> {
        self.combs.iter().map(IirCombFilter::delay_samples).collect()
    }

    /// Process one sample (no normalization)
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let mut comb_sum = 0.0;
        for comb in &mut self.combs {
            comb_sum += comb.process(input);
        }

        let mut wet = comb_sum * self.comb_scale;
        for allpass in &mut self.allpasses {
            wet = allpass.process(wet);
        }

        input + wet * self.wet_gain
    }
}

impl Effect for Reverb {
    fn process(&mut self, input: &[f32]) -> Vec<f32> {
        tracing::debug!(
            samples = input.len(),
            combs = self.combs.len(),
            allpasses = self.allpasses.len(),
            "reverb start"
        );

        let mut output: Vec<f32> = input.iter().map(|&x| self.process_sample(x)).collect();
        normalize_peak(&mut output);

        tracing::debug!(effect = self.name(), "effect done");
        output
    }

    fn name(&self) -> &'static str {
        "Reverb"
    }
}

/// Mono reverb over a whole buffer
pub fn apply_reverb(input: &[f32], sample_rate: u32, params: &ReverbParams) -> Result<Vec<f32>> {
    let mut reverb = Reverb::new(params, sample_rate)?;
    Ok(reverb.process(input))
}

/// Stereo reverb: the right channel's combs are `spread` samples longer
///
/// Each channel is peak-normalized on its own, so the left/right balance
/// can shift when their peaks differ.
pub fn apply_reverb_stereo(
    input: &[f32],
    sample_rate: u32,
    params: &ReverbParams,
    spread: u32,
) -> Result<Vec<[f32; 2]>> {
    // Build both channels before touching any sample
    let mut left = Reverb::new(params, sample_rate)?;
    let mut right = Reverb::new(&params.with_spread(spread, sample_rate), sample_rate)?;

    let left = left.process(input);
    let right = right.process(input);

    Ok(left.into_iter().zip(right).map(|(l, r)| [l, r]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::peak;

    fn single_comb(delay_ms: f64, gain: f32) -> ReverbParams {
        ReverbParams {
            comb_delays_ms: vec![delay_ms],
            comb_gains: vec![gain],
            allpass_delays_ms: vec![],
            allpass_gains: vec![],
            wet_gain: 1.0,
        }
    }

    fn hall() -> ReverbParams {
        ReverbParams {
            comb_delays_ms: vec![26.84, 28.02, 45.82, 33.63],
            comb_gains: vec![0.758, 0.854, 0.796, 0.825],
            allpass_delays_ms: vec![2.35, 6.9],
            allpass_gains: vec![0.653, 0.659],
            wet_gain: 0.4,
        }
    }

    #[test]
    fn test_single_comb_impulse() {
        let sample_rate = 44100;
        let m = (0.05f64 * sample_rate as f64).round() as usize;
        let mut input = vec![0.0; m * 4];
        input[0] = 1.0;

        let output = apply_reverb(&input, sample_rate, &single_comb(50.0, 0.5)).unwrap();

        // Dry impulse, first echo unscaled, then each later echo scaled by the gain
        assert_eq!(output[0], 1.0);
        assert_eq!(output[m], 1.0);
        assert!((output[2 * m] - 0.5).abs() < 1e-7);
        assert!((output[3 * m] - 0.25).abs() < 1e-7);
        assert_eq!(output[m - 1], 0.0);
        assert_eq!(output[m + 1], 0.0);
    }

    #[test]
    fn test_comb_sum_is_averaged() {
        let params = ReverbParams {
            comb_delays_ms: vec![2.0, 3.0],
            comb_gains: vec![0.5, 0.5],
            allpass_delays_ms: vec![],
            allpass_gains: vec![],
            wet_gain: 1.0,
        };
        let mut input = vec![0.0; 8];
        input[0] = 1.0;
        let output = apply_reverb(&input, 1000, &params).unwrap();
        assert_eq!(output[2], 0.5);
        assert_eq!(output[3], 0.5);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut params = hall();
        params.comb_gains.pop();
        assert_eq!(
            Reverb::new(&params, 44100).err(),
            Some(EffectError::ParameterMismatch {
                what: "comb filters",
                delays: 4,
                gains: 3
            })
        );

        let mut params = hall();
        params.allpass_delays_ms.push(1.0);
        assert!(matches!(
            apply_reverb(&[0.0; 4], 44100, &params),
            Err(EffectError::ParameterMismatch { what: "all-pass filters", .. })
        ));
    }

    #[test]
    fn test_empty_comb_bank_rejected() {
        let params = ReverbParams {
            comb_delays_ms: vec![],
            comb_gains: vec![],
            allpass_delays_ms: vec![],
            allpass_gains: vec![],
            wet_gain: 0.4,
        };
        assert_eq!(Reverb::new(&params, 44100).err(), Some(EffectError::EmptyCombBank));
    }

    #[test]
    fn test_silence_in_silence_out() {
        let output = apply_reverb(&vec![0.0; 20000], 44100, &hall()).unwrap();
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_loud_input_normalized() {
        let input: Vec<f32> = (0..44100).map(|n| (n as f32 * 0.03).sin() * 0.95).collect();
        let output = apply_reverb(&input, 44100, &hall()).unwrap();
        assert_eq!(output.len(), input.len());
        assert!(peak(&output) <= 1.0);
    }

    #[test]
    fn test_spread_lengthens_combs() {
        let sample_rate = 44100;
        let params = hall();
        let left = Reverb::new(&params, sample_rate).unwrap();
        let right = Reverb::new(&params.with_spread(DEFAULT_STEREO_SPREAD, sample_rate), sample_rate)
            .unwrap();

        for (l, r) in left.comb_delays().iter().zip(right.comb_delays()) {
            let diff = r as i64 - *l as i64;
            assert!((22..=24).contains(&diff), "spread of {} samples", diff);
        }
    }

    #[test]
    fn test_stereo_shape_and_left_matches_mono() {
        let input: Vec<f32> = (0..8000).map(|n| if n % 1000 == 0 { 0.8 } else { 0.0 }).collect();
        let params = hall();

        let mono = apply_reverb(&input, 44100, &params).unwrap();
        let stereo = apply_reverb_stereo(&input, 44100, &params, DEFAULT_STEREO_SPREAD).unwrap();

        assert_eq!(stereo.len(), input.len());
        for (frame, m) in stereo.iter().zip(&mono) {
            assert_eq!(frame[0], *m);
        }
        assert!(stereo.iter().any(|f| f[0] != f[1]));
    }
}
