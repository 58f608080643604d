//! Text-to-speech through the platform's speech command

use std::path::PathBuf;
use std::process::{Command, Stdio};

use drill_core::Announcer;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("No text-to-speech engine found (tried: {0})")]
    NoEngine(String),
    #[error("Failed to start speech engine: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Speech engine exited with {0}")]
    Failed(std::process::ExitStatus),
}

/// External speech programs we know how to drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechBackend {
    /// macOS `say`
    Say,
    /// `espeak-ng` or `espeak`
    Espeak(String),
    /// speech-dispatcher's `spd-say`
    SpdSay,
    /// Windows PowerShell with System.Speech
    PowerShell,
}

impl SpeechBackend {
    /// Pick the first engine available on this machine
    pub fn detect() -> Result<Self, SpeechError> {
        if cfg!(target_os = "macos") {
            return Ok(Self::Say);
        }
        if cfg!(target_os = "windows") {
            return Ok(Self::PowerShell);
        }

        let candidates = ["espeak-ng", "espeak", "spd-say"];
        for program in candidates {
            if find_in_path(program).is_some() {
                return Ok(match program {
                    "spd-say" => Self::SpdSay,
                    other => Self::Espeak(other.to_string()),
                });
            }
        }
        Err(SpeechError::NoEngine(candidates.join(", ")))
    }

    /// Command that speaks `text` and exits when done
    pub fn command(&self, text: &str) -> Command {
        match self {
            Self::Say => {
                let mut cmd = Command::new("say");
                cmd.arg(text);
                cmd
            }
            Self::Espeak(program) => {
                let mut cmd = Command::new(program);
                cmd.arg("--").arg(text);
                cmd
            }
            Self::SpdSay => {
                let mut cmd = Command::new("spd-say");
                cmd.arg("--wait").arg("--").arg(text);
                cmd
            }
            Self::PowerShell => {
                let script = format!(
                    "Add-Type -AssemblyName System.Speech; \
                     (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
                    text.replace('\'', "''")
                );
                let mut cmd = Command::new("powershell");
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()]);
                cmd
            }
        }
    }
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Pad a leading bare letter "A" so engines say the letter, not the article
pub fn spoken_form(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.split_whitespace().next() {
        Some("A") => format!(" {} ", trimmed),
        _ => trimmed.to_string(),
    }
}

/// Speaks through an external speech program, blocking until it exits
pub struct CommandSpeaker {
    backend: SpeechBackend,
}

impl CommandSpeaker {
    pub fn new(backend: SpeechBackend) -> Self {
        Self { backend }
    }

    pub fn detect() -> Result<Self, SpeechError> {
        let backend = SpeechBackend::detect()?;
        info!(?backend, "Using speech engine");
        Ok(Self::new(backend))
    }

    pub fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let status = self
            .backend
            .command(&spoken_form(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed(status))
        }
    }
}

impl Announcer for CommandSpeaker {
    fn announce(&mut self, utterance: &str) {
        if utterance.trim().is_empty() {
            debug!("Skipping empty text for speech");
            return;
        }
        info!("Speaking: {}", utterance);
        if let Err(e) = self.speak(utterance) {
            error!("Speech failed: {}", e);
        }
    }
}

/// Writes utterances to the log instead of speaking them
#[derive(Debug, Default)]
pub struct LogSpeaker;

impl Announcer for LogSpeaker {
    fn announce(&mut self, utterance: &str) {
        if utterance.trim().is_empty() {
            debug!("Skipping empty text for speech");
            return;
        }
        info!("Speaking: {}", utterance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoken_form_pads_letter_a() {
        assert_eq!(spoken_form("A"), " A ");
        assert_eq!(spoken_form("A flat"), " A flat ");
        assert_eq!(spoken_form("B flat"), "B flat");
        assert_eq!(spoken_form("New Root Note: A"), "New Root Note: A");
    }

    #[test]
    fn test_espeak_command() {
        let cmd = SpeechBackend::Espeak("espeak-ng".into()).command("flat 3");
        assert_eq!(cmd.get_program(), "espeak-ng");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["--", "flat 3"]);
    }

    #[test]
    fn test_spd_say_waits() {
        let cmd = SpeechBackend::SpdSay.command("E flat");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["--wait", "--", "E flat"]);
    }

    #[test]
    fn test_powershell_escapes_quotes() {
        let cmd = SpeechBackend::PowerShell.command("it's");
        let script = cmd.get_args().last().unwrap().to_string_lossy().into_owned();
        assert!(script.contains("Speak('it''s')"));
    }

    #[test]
    fn test_log_speaker_accepts_repeats() {
        let mut speaker = LogSpeaker;
        speaker.announce("5");
        speaker.announce("5");
        speaker.announce("   ");
    }
}
