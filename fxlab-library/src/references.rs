//! Console reference recordings
//!
//! Maps each effect label to the file captured from the hardware mixer,
//! so rendered output can be compared against it.

use std::path::{Path, PathBuf};

/// Label of the unprocessed recording
pub const DRY_LABEL: &str = "ORIGINAL";

const REFERENCE_FILES: [(&str, &str); 25] = [
    ("REV-HALL1", "01.wav"),
    ("REV-HALL2", "02.wav"),
    ("REV-ROOM1", "03.wav"),
    ("REV-ROOM2", "04.wav"),
    ("REV-STAGE A", "05.wav"),
    ("REV-STAGE AB", "06.wav"),
    ("REV-STAGE B", "07.wav"),
    ("REV-STAGE Bb", "08.wav"),
    ("REV-STAGE C", "09.wav"),
    ("REV-STAGE D", "10.wav"),
    ("REV-STAGE Dd", "11.wav"),
    ("REV-STAGE E", "12.wav"),
    ("REV-STAGE F", "13.wav"),
    ("REV-STAGE Fb", "14.wav"),
    ("REV-STAGE G", "15.wav"),
    ("REV-STAGE Gb", "16.wav"),
    ("RET-STATE GTHT", "17.wav"),
    ("CHORUS", "18.wav"),
    ("FLANGER", "19.wav"),
    ("PHASER", "20.wav"),
    ("RADIO-VOICE", "21.wav"),
    ("TREMOLO", "22.wav"),
    ("AUTO-WAH", "23.wav"),
    ("VOCAL", "24.wav"),
    (DRY_LABEL, "original.wav"),
];

/// File name of the recording for an effect label
pub fn reference_file(label: &str) -> Option<&'static str> {
    REFERENCE_FILES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, file)| *file)
}

/// Full path of the recording for an effect label under `dir`
pub fn reference_path(dir: &Path, label: &str) -> Option<PathBuf> {
    reference_file(label).map(|file| dir.join(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(reference_file("FLANGER"), Some("19.wav"));
        assert_eq!(reference_file(DRY_LABEL), Some("original.wav"));
        assert_eq!(reference_file("REV-STAGE Gb"), Some("16.wav"));
        assert_eq!(reference_file("flanger"), None);
    }

    #[test]
    fn test_path_join() {
        assert_eq!(
            reference_path(Path::new("/audio"), "TREMOLO"),
            Some(PathBuf::from("/audio/22.wav"))
        );
        assert_eq!(reference_path(Path::new("/audio"), "NOPE"), None);
    }
}
