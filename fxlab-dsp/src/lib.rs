//! Effects core for fxlab
//!
//! Sample-accurate building blocks and the effects assembled from them:
//! - DelayLine: circular buffer with fractional reads
//! - Comb / all-pass filters
//! - LFO: sinusoidal modulator
//! - Effects: reverb (mono/stereo), flanger, tremolo
//! - Pitch shift: two-pointer overlap-add granular shifter
//!
//! Every component owns its state and is driven through `&mut self`;
//! nothing here does I/O.

mod effects;
mod error;
mod normalize;
pub mod pitch_shift;

pub use effects::{
    apply_flanger, apply_reverb, apply_reverb_stereo, apply_tremolo, ms_to_samples, AllPassFilter,
    DelayLine, Effect, FirCombFilter, Flanger, FlangerParams, IirCombFilter, Lfo, Reverb,
    ReverbParams, Tremolo, TremoloParams, DEFAULT_STEREO_SPREAD,
};
pub use error::{EffectError, Result};
pub use normalize::{normalize_peak, peak};
pub use pitch_shift::{change_pitch, semitones_between, shift_to_frequency, PitchShifter};
