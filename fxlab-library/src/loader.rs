//! Audio file loading and decoding

use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Errors that can occur during loading
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No audio track found in file")]
    NoAudioTrack,
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A loaded, mono, decoded signal
#[derive(Debug, Clone)]
pub struct LoadedTrack {
    /// Mono samples (f32, normalized to -1.0 to 1.0)
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source file before downmixing
    pub channels: u16,
}

impl LoadedTrack {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Audio file loader using Symphonia
#[derive(Debug, Default)]
pub struct TrackLoader {
    /// Resample to this rate when set; keep the file's rate otherwise
    target_sample_rate: Option<u32>,
}

impl TrackLoader {
    /// Create a loader that keeps the file's native sample rate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that resamples everything to `target_sample_rate`
    pub fn with_sample_rate(target_sample_rate: u32) -> Self {
        Self {
            target_sample_rate: Some(target_sample_rate),
        }
    }

    /// Load and decode an audio file, averaging all channels to mono
    pub fn load(&self, path: &Path) -> Result<LoadedTrack, LoadError> {
        // Open the file
        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create hint from file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        // Probe the format
        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let mut format = probed.format;

        // Find first audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(LoadError::NoAudioTrack)?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let source_sample_rate = codec_params.sample_rate.unwrap_or(44100);
        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        // Decode all samples (interleaved)
        let mut interleaved: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stopped reading packets");
                    break;
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(symphonia::core::errors::Error::DecodeError(msg)) => {
                    tracing::warn!(path = %path.display(), msg, "skipping corrupt packet");
                    continue;
                }
                Err(e) => return Err(LoadError::Decode(e.to_string())),
            };

            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;

            let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
            sample_buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(sample_buf.samples());
        }

        let samples = downmix(&interleaved, channels as usize);

        let (samples, sample_rate) = match self.target_sample_rate {
            Some(target) if target != source_sample_rate => {
                (resample(&samples, source_sample_rate, target)?, target)
            }
            _ => (samples, source_sample_rate),
        };

        tracing::info!(
            path = %path.display(),
            sample_rate,
            channels,
            samples = samples.len(),
            "loaded audio"
        );

        Ok(LoadedTrack {
            samples,
            sample_rate,
            channels,
        })
    }
}

/// Average interleaved frames down to one channel
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Resample a mono signal
fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>, LoadError> {
    use rubato::{FftFixedInOut, Resampler};

    let frames = samples.len();

    let mut resampler =
        FftFixedInOut::<f32>::new(source_rate as usize, target_rate as usize, 1024, 1)
            .map_err(|e| LoadError::Decode(e.to_string()))?;

    // Process in chunks
    let chunk_size = resampler.input_frames_next();
    let mut output: Vec<f32> = Vec::new();

    let mut pos = 0;
    while pos + chunk_size <= frames {
        let resampled = resampler
            .process(&[&samples[pos..pos + chunk_size]], None)
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        output.extend(&resampled[0]);
        pos += chunk_size;
    }

    // Handle remaining samples (pad with zeros)
    if pos < frames {
        let remaining = frames - pos;
        let mut padded = samples[pos..].to_vec();
        padded.resize(chunk_size, 0.0);

        let resampled = resampler
            .process(&[padded.as_slice()], None)
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        // Only take the proportional amount of output
        let output_frames = (remaining * target_rate as usize) / source_rate as usize;
        output.extend(&resampled[0][..output_frames.min(resampled[0].len())]);
    }

    tracing::debug!(source_rate, target_rate, frames = output.len(), "resampled");
    Ok(output)
}
