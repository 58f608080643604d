//! Sine tone rendering

use std::f32::consts::TAU;
use std::time::Duration;

/// Render rate for drill tones
pub const TONE_SAMPLE_RATE: u32 = 44_100;

/// Default loudness relative to full scale
pub const TONE_AMPLITUDE: f32 = 0.3;

/// A fixed-pitch sine of a given length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineTone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub amplitude: f32,
    pub sample_rate: u32,
}

impl SineTone {
    pub fn new(frequency_hz: f32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
            amplitude: TONE_AMPLITUDE,
            sample_rate: TONE_SAMPLE_RATE,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration.as_secs_f64()) as usize
    }

    /// Mono samples: `amplitude * sin(2 pi f n / sr)`
    pub fn render(&self) -> Vec<f32> {
        let sr = self.sample_rate as f32;
        (0..self.num_samples())
            .map(|n| self.amplitude * (TAU * self.frequency_hz * n as f32 / sr).sin())
            .collect()
    }
}
