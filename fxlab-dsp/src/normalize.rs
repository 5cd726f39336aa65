//! End-of-buffer peak normalization
//!
//! Every effect finishes by scaling the whole output down when its peak
//! overshoots full scale. This is a global gain change, not a clipper.

/// Largest absolute sample value (0.0 for an empty buffer)
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

/// Divide the buffer by its peak if the peak exceeds 1.0
///
/// Returns the peak that was divided out, or `None` when the buffer was
/// already within range. Applying it twice is the same as applying it once.
pub fn normalize_peak(samples: &mut [f32]) -> Option<f32> {
    let max_amp = peak(samples);
    if max_amp > 1.0 {
        for s in samples.iter_mut() {
            *s /= max_amp;
        }
        tracing::debug!(peak = max_amp, "normalized output");
        Some(max_amp)
    } else {
        None
    }
}
