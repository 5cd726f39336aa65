//! Real-time granular pitch shifter
//!
//! Input is written into a circular buffer at normal speed while two read
//! pointers, half a window apart, sweep through it at a rate set by the
//! pitch ratio. Each pointer is faded in and out with a triangular window
//! so the jump when it wraps around is never heard.
//!
//! The shifter keeps its write cursor and phasor between calls, so a long
//! signal can be fed block by block.

use crate::effects::DelayLine;
use crate::error::{EffectError, Result};
use crate::normalize::normalize_peak;

/// Default grain window in ms
pub const DEFAULT_WINDOW_MS: f64 = 40.0;

/// Pitch ratio for a shift in semitones
#[inline]
pub fn pitch_factor(semitones: f64) -> f64 {
    2f64.powf(semitones / 12.0)
}

/// Semitone distance from `root_hz` to `target_hz`
pub fn semitones_between(root_hz: f64, target_hz: f64) -> f64 {
    12.0 * (target_hz / root_hz).log2()
}

/// Per-sample phasor step for a shift over a window of `window` samples
///
/// Factor 2.0 (octave up) shortens the delay by one sample every sample.
/// The phasor only stays in [0, 1) while the step is below 1 in magnitude.
#[inline]
fn phasor_rate(semitones: f64, window: f64) -> f64 {
    (1.0 - pitch_factor(semitones)) / window
}

/// Triangular crossfade gain: 0 at the pointer's ends, 1 at its midpoint
#[inline]
fn crossfade_gain(phase: f64) -> f32 {
    (1.0 - 2.0 * (phase - 0.5).abs()) as f32
}

/// Two-pointer overlap-add pitch shifter
pub struct PitchShifter {
    /// Window length in samples
    window: usize,
    /// Holds `2 * window` samples of input history
    buffer: DelayLine,
    /// Relative read position in [0, 1)
    phasor: f64,
}

impl PitchShifter {
    /// Create a shifter with a grain window of `window_ms`
    pub fn new(sample_rate: u32, window_ms: f64) -> Result<Self> {
        let window = crate::effects::ms_to_samples(window_ms, sample_rate);
        if window == 0 {
            return Err(EffectError::ZeroLengthDelay {
                delay_ms: window_ms,
                sample_rate,
            });
        }

        Ok(Self {
            window,
            buffer: DelayLine::with_capacity(window * 2)?,
            phasor: 0.0,
        })
    }

    /// Window length in samples
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn phasor(&self) -> f64 {
        self.phasor
    }

    pub fn write_cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Shift a block by `semitones`, continuing from the previous block
    pub fn process_block(&mut self, input: &[f32], semitones: f64) -> Vec<f32> {
        let window = self.window as f64;

        let delay_rate = phasor_rate(semitones, window);
        if delay_rate.abs() >= 1.0 {
            tracing::warn!(
                semitones,
                window = self.window,
                delay_rate,
                "shift too large for the window, phasor will drift out of [0, 1)"
            );
        }

        let mut output = Vec::with_capacity(input.len());
        for &x in input {
            // Written at 1x regardless of the shift
            self.buffer.store(x);

            let phase_a = self.phasor;
            let phase_b = (self.phasor + 0.5) % 1.0;

            let cursor = self.buffer.cursor() as f64;
            let val_a = self.buffer.read_at(cursor - phase_a * window);
            let val_b = self.buffer.read_at(cursor - phase_b * window);

            output.push(val_a * crossfade_gain(phase_a) + val_b * crossfade_gain(phase_b));

            self.buffer.advance();

            // Rate may be negative for downward shifts, wrap both ways
            self.phasor += delay_rate;
            if self.phasor >= 1.0 {
                self.phasor -= 1.0;
            } else if self.phasor < 0.0 {
                self.phasor += 1.0;
            }
        }

        normalize_peak(&mut output);
        output
    }
}

/// Shift a whole buffer with a fresh shifter and the default window
pub fn change_pitch(input: &[f32], sample_rate: u32, semitones: f64) -> Result<Vec<f32>> {
    tracing::debug!(semitones, samples = input.len(), "pitch shift start");

    let mut shifter = PitchShifter::new(sample_rate, DEFAULT_WINDOW_MS)?;
    let output = shifter.process_block(input, semitones);

    tracing::debug!("pitch shift done");
    Ok(output)
}

/// Shift a buffer recorded at `root_hz` so it sounds at `target_hz`
pub fn shift_to_frequency(
    input: &[f32],
    sample_rate: u32,
    target_hz: f64,
    root_hz: f64,
) -> Result<Vec<f32>> {
    let semitones = semitones_between(root_hz, target_hz);
    tracing::info!(root_hz, target_hz, semitones, "frequency shift");
    change_pitch(input, sample_rate, semitones)
}
