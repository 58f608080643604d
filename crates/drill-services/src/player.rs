//! Tone playback collaborators

use std::time::Duration;

use drill_core::{Clock, TonePlayer};
use tracing::{debug, error};

use crate::audio_io::AudioOutputService;
use crate::clock::SleepClock;
use crate::tone::{SineTone, TONE_AMPLITUDE};

/// Plays sine tones on the default output device
pub struct CpalTonePlayer {
    amplitude: f32,
}

impl CpalTonePlayer {
    pub fn new(amplitude: f32) -> Self {
        Self { amplitude }
    }
}

impl Default for CpalTonePlayer {
    fn default() -> Self {
        Self::new(TONE_AMPLITUDE)
    }
}

impl TonePlayer for CpalTonePlayer {
    fn play_tone(&mut self, frequency_hz: Option<f64>, duration: Duration) {
        let Some(frequency) = frequency_hz else {
            debug!("Skipping tone generation (no frequency)");
            return;
        };

        debug!(frequency_hz = frequency, ?duration, "Playing tone");
        let tone = SineTone::new(frequency as f32, duration).with_amplitude(self.amplitude);
        if let Err(e) = AudioOutputService::play_blocking(&tone.render(), tone.sample_rate) {
            error!("Error playing tone: {}", e);
        }
    }
}

/// Stands in for audio when running muted: logs the tone and waits it out
pub struct SilentTonePlayer {
    clock: SleepClock,
}

impl SilentTonePlayer {
    pub fn new(clock: SleepClock) -> Self {
        Self { clock }
    }
}

impl TonePlayer for SilentTonePlayer {
    fn play_tone(&mut self, frequency_hz: Option<f64>, duration: Duration) {
        let Some(frequency) = frequency_hz else {
            return;
        };
        debug!(frequency_hz = frequency, ?duration, "Muted tone");
        self.clock.pause(duration);
    }
}
