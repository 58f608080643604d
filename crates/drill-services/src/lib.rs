//! drill-services: Speech, tone playback and timing for degree-drill

pub mod audio_io;
pub mod clock;
pub mod player;
pub mod speech;
pub mod tone;

pub use audio_io::{AudioOutputError, AudioOutputService, OutputDeviceInfo};
pub use clock::{Shutdown, SleepClock};
pub use player::{CpalTonePlayer, SilentTonePlayer};
pub use speech::{CommandSpeaker, LogSpeaker, SpeechBackend, SpeechError};
pub use tone::{SineTone, TONE_AMPLITUDE, TONE_SAMPLE_RATE};
