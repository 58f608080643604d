//! Outward-facing capabilities the drill engine calls into
//!
//! Each call blocks until its effect has finished. Implementations log their
//! own failures; the engine never stops because speech or audio misbehaved.

use std::time::Duration;

/// Speaks an utterance and returns once it has been spoken
pub trait Announcer {
    fn announce(&mut self, utterance: &str);
}

/// Plays a tone and returns once playback completes. `None` is a no-op.
pub trait TonePlayer {
    fn play_tone(&mut self, frequency_hz: Option<f64>, duration: Duration);
}

/// Timed waits between drill events
pub trait Clock {
    fn pause(&mut self, duration: Duration);
}

impl<T: Announcer + ?Sized> Announcer for Box<T> {
    fn announce(&mut self, utterance: &str) {
        (**self).announce(utterance)
    }
}

impl<T: TonePlayer + ?Sized> TonePlayer for Box<T> {
    fn play_tone(&mut self, frequency_hz: Option<f64>, duration: Duration) {
        (**self).play_tone(frequency_hz, duration)
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration)
    }
}
