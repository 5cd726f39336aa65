//! Audio analysis module for fxlab
//!
//! Provides the note/frequency table, musical pitch shifting by note name,
//! validation metrics (MSE, SNR, PRD) and FFT pitch detection.

mod metrics;
mod notes;
mod pitch;
mod shift;

pub use metrics::{mse, prd, rms, snr_db, Comparison};
pub use notes::{midi_to_frequency, midi_to_name, note_frequency, require_note, NoteError};
pub use pitch::{PitchAnalyzer, DEFAULT_FFT_SIZE};
pub use shift::{note_interval, shift_to_note, ShiftError, DEFAULT_ROOT_NOTE};
