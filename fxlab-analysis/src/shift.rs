//! Musical pitch shifting by note name

use crate::notes::{require_note, NoteError};
use fxlab_dsp::{change_pitch, semitones_between, EffectError};
use thiserror::Error;

/// Default note the source material is assumed to be in
pub const DEFAULT_ROOT_NOTE: &str = "C4";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShiftError {
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error(transparent)]
    Effect(#[from] EffectError),
}

/// Semitone distance between two note names
pub fn note_interval(root_note: &str, target_note: &str) -> Result<f64, NoteError> {
    let root_hz = require_note(root_note)?;
    let target_hz = require_note(target_note)?;
    Ok(semitones_between(root_hz, target_hz))
}

/// Shift audio recorded at `root_note` so it plays at `target_note`
///
/// Both names are resolved before any sample is touched.
pub fn shift_to_note(
    input: &[f32],
    sample_rate: u32,
    target_note: &str,
    root_note: &str,
) -> Result<Vec<f32>, ShiftError> {
    let semitones = note_interval(root_note, target_note)?;
    tracing::info!(root_note, target_note, semitones, "musical shift");
    Ok(change_pitch(input, sample_rate, semitones)?)
}
