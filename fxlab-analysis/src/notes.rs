//! Note name to frequency table
//!
//! Equal-tempered, A4 = 440Hz, covering C0 (MIDI 12) through B8 (MIDI 119).
//! Names use sharps ("C#4", "F#3"); lookup is case-insensitive.

use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// First and last MIDI notes in the table
const MIDI_RANGE: std::ops::Range<u8> = 12..120;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("unknown note name: {0}")]
    UnknownNote(String),
}

/// Frequency of a MIDI note number
pub fn midi_to_frequency(midi_note: u8) -> f64 {
    440.0 * 2f64.powf((midi_note as f64 - 69.0) / 12.0)
}

/// Name of a MIDI note number ("A4" for 69)
pub fn midi_to_name(midi_note: u8) -> String {
    let octave = (midi_note / 12) as i32 - 1;
    format!("{}{}", NOTE_NAMES[(midi_note % 12) as usize], octave)
}

fn table() -> &'static HashMap<String, f64> {
    static NOTES: OnceLock<HashMap<String, f64>> = OnceLock::new();
    NOTES.get_or_init(|| {
        MIDI_RANGE
            .map(|midi| (midi_to_name(midi), midi_to_frequency(midi)))
            .collect()
    })
}

/// Frequency of a note name, `None` if the name is not in the table
pub fn note_frequency(name: &str) -> Option<f64> {
    table().get(&name.trim().to_uppercase()).copied()
}

/// Like [`note_frequency`], but an unknown name is an error
pub fn require_note(name: &str) -> Result<f64, NoteError> {
    note_frequency(name).ok_or_else(|| NoteError::UnknownNote(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitches() {
        assert_eq!(note_frequency("A4"), Some(440.0));
        assert!((note_frequency("C4").unwrap() - 261.6256).abs() < 1e-3);
        assert!((note_frequency("A3").unwrap() - 220.0).abs() < 1e-9);
        assert!((note_frequency("F#4").unwrap() - 369.9944).abs() < 1e-3);
    }

    #[test]
    fn test_range_edges() {
        assert!((note_frequency("C0").unwrap() - 16.3516).abs() < 1e-3);
        assert!(note_frequency("B8").is_some());
        assert!(note_frequency("C9").is_none());
        assert!(note_frequency("B-1").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(note_frequency("g#4"), note_frequency("G#4"));
        assert_eq!(note_frequency(" a4 "), Some(440.0));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(note_frequency("H2"), None);
        assert_eq!(
            require_note("Bb4"),
            Err(NoteError::UnknownNote("Bb4".to_string()))
        );
    }

    #[test]
    fn test_midi_names() {
        assert_eq!(midi_to_name(69), "A4");
        assert_eq!(midi_to_name(12), "C0");
        assert_eq!(midi_to_name(61), "C#4");
        assert_eq!(table().len(), 108);
    }
}
