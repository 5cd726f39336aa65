//! Circular delay line with fractional reads
//!
//! Shared building block for the comb, all-pass, flanger and pitch shift
//! stages. Exposes the comb-style `process` convenience as well as the raw
//! `write` / `read_at` primitives so modulated effects can drive the buffer
//! with their own read pointer.

use crate::error::{EffectError, Result};

/// Convert a delay in milliseconds to a whole number of samples (truncated)
#[inline]
pub fn ms_to_samples(delay_ms: f64, sample_rate: u32) -> usize {
    ((delay_ms / 1000.0) * sample_rate as f64) as usize
}

/// Fixed-capacity circular buffer with a single write cursor
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    cursor: usize,
}

impl DelayLine {
    /// Create a delay line holding `delay_ms` worth of samples
    pub fn from_ms(delay_ms: f64, sample_rate: u32) -> Result<Self> {
        let samples = ms_to_samples(delay_ms, sample_rate);
        if samples == 0 {
            return Err(EffectError::ZeroLengthDelay {
                delay_ms,
                sample_rate,
            });
        }
        Self::with_capacity(samples)
    }

    /// Create a delay line with an explicit capacity in samples
    pub fn with_capacity(samples: usize) -> Result<Self> {
        if samples == 0 {
            return Err(EffectError::ZeroCapacity);
        }

        Ok(Self {
            buffer: vec![0.0; samples],
            cursor: 0,
        })
    }

    /// Buffer length in samples
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false, construction rejects empty buffers
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current write cursor, always in `[0, len)`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Value stored at the cursor (written `len` samples ago)
    #[inline]
    pub fn current(&self) -> f32 {
        self.buffer[self.cursor]
    }

    /// Store a sample at the cursor and advance it
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.cursor] = sample;
        self.advance();
    }

    /// Overwrite the value at the cursor without moving it
    #[inline]
    pub fn store(&mut self, sample: f32) {
        self.buffer[self.cursor] = sample;
    }

    /// Move the cursor one slot forward
    #[inline]
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.buffer.len();
    }

    /// Read at a fractional absolute position with linear interpolation
    ///
    /// The position is brought into `[0, len)` by repeatedly adding or
    /// subtracting the buffer length, so offsets spanning several buffer
    /// lengths resolve the same way a read pointer walking the ring would.
    #[inline]
    pub fn read_at(&self, position: f64) -> f32 {
        let len = self.buffer.len() as f64;
        let mut pos = position;
        while pos < 0.0 {
            pos += len;
        }
        while pos >= len {
            pos -= len;
        }

        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let next = (idx + 1) % self.buffer.len();

        self.buffer[idx] * (1.0 - frac) + self.buffer[next] * frac
    }

    /// Read the value `offset` samples behind the cursor
    #[inline]
    pub fn read_delayed(&self, offset: f64) -> f32 {
        self.read_at(self.cursor as f64 - offset)
    }

    /// Comb-style step: return the delayed value, write `input + gain * delayed`
    #[inline]
    pub fn process(&mut self, input: f32, gain: f32) -> f32 {
        let output = self.current();
        self.write(input + gain * output);
        output
    }
}
