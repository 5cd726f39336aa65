//! Audio effects for fxlab

mod allpass;
mod comb;
mod delay_line;
mod flanger;
mod lfo;
mod reverb;
mod tremolo;

pub use allpass::AllPassFilter;
pub use comb::{FirCombFilter, IirCombFilter};
pub use delay_line::{ms_to_samples, DelayLine};
pub use flanger::{apply_flanger, Flanger, FlangerParams};
pub use lfo::Lfo;
pub use reverb::{apply_reverb, apply_reverb_stereo, Reverb, ReverbParams, DEFAULT_STEREO_SPREAD};
pub use tremolo::{apply_tremolo, Tremolo, TremoloParams};

/// Trait for whole-buffer mono effects
///
/// Implementors are single-writer: state lives in `&mut self` and the
/// output is peak-normalized before it is returned.
pub trait Effect {
    /// Process a mono buffer, returning an output of the same length
    fn process(&mut self, input: &[f32]) -> Vec<f32>;

    /// Get effect name
    fn name(&self) -> &'static str;
}
