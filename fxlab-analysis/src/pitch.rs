//! Dominant frequency estimation for checking pitch shifts

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// Default analysis length (power of two)
pub const DEFAULT_FFT_SIZE: usize = 16384;

/// FFT peak picker
pub struct PitchAnalyzer {
    sample_rate: u32,
    fft_size: usize,
    fft: std::sync::Arc<dyn rustfft::Fft<f32>>,
    window: Vec<f32>,
    /// Pre-allocated FFT buffer
    fft_buffer: Vec<Complex<f32>>,
}

impl PitchAnalyzer {
    pub fn new(sample_rate: u32) -> Self {
        Self::with_fft_size(sample_rate, DEFAULT_FFT_SIZE)
    }

    pub fn with_fft_size(sample_rate: u32, fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Hann window
        let window: Vec<f32> = (0..fft_size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / fft_size as f32).cos()))
            .collect();

        Self {
            sample_rate,
            fft_size,
            fft,
            window,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    /// Width of one FFT bin in Hz
    pub fn resolution(&self) -> f32 {
        self.sample_rate as f32 / self.fft_size as f32
    }

    /// Strongest frequency in the first `fft_size` samples
    ///
    /// Shorter inputs are zero padded. Returns `None` for silence.
    pub fn dominant_frequency(&mut self, samples: &[f32]) -> Option<f32> {
        let sample_count = samples.len().min(self.fft_size);
        for (i, &sample) in samples.iter().enumerate().take(sample_count) {
            self.fft_buffer[i] = Complex::new(sample * self.window[i], 0.0);
        }
        for buf in self.fft_buffer.iter_mut().skip(sample_count) {
            *buf = Complex::new(0.0, 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        // Skip DC, search up to Nyquist
        let (bin, magnitude) = self.fft_buffer[1..self.fft_size / 2]
            .iter()
            .enumerate()
            .map(|(i, c)| (i + 1, c.norm()))
            .fold((0, 0.0f32), |best, cur| if cur.1 > best.1 { cur } else { best });

        if magnitude <= f32::EPSILON {
            return None;
        }

        Some(bin as f32 * self.resolution())
    }
}
