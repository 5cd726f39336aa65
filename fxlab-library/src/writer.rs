//! 16-bit PCM WAV output

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV encode error: {0}")]
    Wav(#[from] hound::Error),
}

/// Clip to [-1, 1] and scale to i16, truncating toward zero
#[inline]
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

fn wav_spec(sample_rate: u32, channels: u16) -> hound::WavSpec {
    hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn create_parent(path: &Path) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write a mono buffer
pub fn save_wav(path: &Path, sample_rate: u32, samples: &[f32]) -> Result<(), SaveError> {
    create_parent(path)?;
    let mut writer = hound::WavWriter::create(path, wav_spec(sample_rate, 1))?;
    for &s in samples {
        writer.write_sample(to_i16(s))?;
    }
    writer.finalize()?;

    tracing::info!(path = %path.display(), samples = samples.len(), "saved mono WAV");
    Ok(())
}

/// Write a two-column (left, right) buffer
pub fn save_wav_stereo(path: &Path, sample_rate: u32, frames: &[[f32; 2]]) -> Result<(), SaveError> {
    create_parent(path)?;
    let mut writer = hound::WavWriter::create(path, wav_spec(sample_rate, 2))?;
    for &[left, right] in frames {
        writer.write_sample(to_i16(left))?;
        writer.write_sample(to_i16(right))?;
    }
    writer.finalize()?;

    tracing::info!(path = %path.display(), frames = frames.len(), "saved stereo WAV");
    Ok(())
}
