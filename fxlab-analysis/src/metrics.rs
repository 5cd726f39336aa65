//! Offline validation metrics
//!
//! Compare a processed signal against a reference. Inputs of different
//! lengths are truncated to the shorter one.

fn paired<'a>(original: &'a [f32], processed: &'a [f32]) -> (&'a [f32], &'a [f32]) {
    let len = original.len().min(processed.len());
    (&original[..len], &processed[..len])
}

fn squared_error(original: &[f32], processed: &[f32]) -> f64 {
    original
        .iter()
        .zip(processed)
        .map(|(&o, &p)| {
            let d = o as f64 - p as f64;
            d * d
        })
        .sum()
}

fn energy(samples: &[f32]) -> f64 {
    samples.iter().map(|&s| (s as f64) * (s as f64)).sum()
}

/// Root mean square level (0.0 for an empty buffer)
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (energy(samples) / samples.len() as f64).sqrt()
}

/// Mean squared error (0.0 when there is no overlap)
pub fn mse(original: &[f32], processed: &[f32]) -> f64 {
    let (original, processed) = paired(original, processed);
    if original.is_empty() {
        return 0.0;
    }
    squared_error(original, processed) / original.len() as f64
}

/// Signal-to-noise ratio in dB, treating the difference as noise
///
/// Identical signals give `f64::INFINITY`.
pub fn snr_db(original: &[f32], processed: &[f32]) -> f64 {
    let (original, processed) = paired(original, processed);
    let noise_power = squared_error(original, processed);
    if noise_power == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (energy(original) / noise_power).log10()
}

/// Percent root-mean-square difference
///
/// A silent reference gives 0.0 when the processed signal is silent too
/// and `f64::INFINITY` otherwise.
pub fn prd(original: &[f32], processed: &[f32]) -> f64 {
    let (original, processed) = paired(original, processed);
    let numerator = squared_error(original, processed);
    let denominator = energy(original);
    if denominator == 0.0 {
        return if numerator == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (numerator / denominator).sqrt() * 100.0
}

/// All three metrics at once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub mse: f64,
    pub snr_db: f64,
    pub prd: f64,
}

impl Comparison {
    pub fn between(original: &[f32], processed: &[f32]) -> Self {
        Self {
            mse: mse(original, processed),
            snr_db: snr_db(original, processed),
            prd: prd(original, processed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_signals() {
        let x = vec![0.1, -0.4, 0.7, 0.2];
        assert_eq!(mse(&x, &x), 0.0);
        assert_eq!(snr_db(&x, &x), f64::INFINITY);
        assert_eq!(prd(&x, &x), 0.0);
    }

    #[test]
    fn test_known_values() {
        let original = vec![1.0, 1.0, 1.0, 1.0];
        let processed = vec![0.5, 0.5, 0.5, 0.5];

        assert!((mse(&original, &processed) - 0.25).abs() < 1e-12);
        // Signal power 4, noise power 1
        assert!((snr_db(&original, &processed) - 10.0 * 4f64.log10()).abs() < 1e-9);
        assert!((prd(&original, &processed) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncates_to_shorter() {
        let original = vec![0.5, 0.5, 0.5];
        let processed = vec![0.5, 0.5, 0.5, 9.0, 9.0];
        assert_eq!(mse(&original, &processed), 0.0);
        assert_eq!(Comparison::between(&processed, &original).prd, 0.0);
    }

    #[test]
    fn test_silent_reference() {
        assert_eq!(prd(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(prd(&[0.0, 0.0], &[0.1, 0.0]), f64::INFINITY);
        assert_eq!(mse(&[], &[1.0]), 0.0);
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[0.5, -0.5, 0.5, -0.5]) - 0.5).abs() < 1e-12);
    }
}
