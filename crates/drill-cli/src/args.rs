//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use drill_core::{split_list, DrillConfig};

#[derive(Parser, Debug, Default)]
#[command(name = "degree-drill")]
#[command(about = "Speaks random scale degrees, plays their tones, names the notes and cycles through root notes")]
pub struct Args {
    /// Comma-separated scale degrees (e.g. "1,flat 3,5,b9,#11")
    pub degrees: Option<String>,

    /// Comma-separated root notes (e.g. "C,Db,F#")
    #[arg(long, alias = "root_notes")]
    pub root_notes: Option<String>,

    /// Times each unique degree is played per root before switching (min 1)
    #[arg(long, alias = "plays_per_root")]
    pub plays_per_root: Option<u32>,

    /// Approximate time in seconds from one element to the next
    #[arg(long, allow_hyphen_values = true)]
    pub delay: Option<f64>,

    /// Octave for root notes (4 puts C at middle C)
    #[arg(long, allow_hyphen_values = true)]
    pub octave: Option<i32>,

    /// Seconds between a tone and its spoken note name
    #[arg(long, alias = "tone_name_delay", allow_hyphen_values = true)]
    pub tone_name_delay: Option<f64>,

    /// Tone length in seconds
    #[arg(long, allow_hyphen_values = true)]
    pub tone_duration: Option<f64>,

    /// Treat 9, 11 and 13 as unknown degrees
    #[arg(long)]
    pub no_extended: bool,

    /// Do not open an audio device; tones are waited out silently
    #[arg(long)]
    pub mute: bool,

    /// Log utterances instead of speaking them
    #[arg(long)]
    pub no_speech: bool,

    /// Config file (defaults to <config dir>/degree-drill/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay command-line values on top of file settings
    pub fn apply(&self, mut config: DrillConfig) -> DrillConfig {
        if let Some(degrees) = &self.degrees {
            config.degrees = split_list(degrees);
        }
        if let Some(roots) = &self.root_notes {
            config.roots = split_list(roots);
        }
        if let Some(plays) = self.plays_per_root {
            config.plays_per_root = plays;
        }
        if let Some(delay) = self.delay {
            config.cycle_delay_secs = delay;
        }
        if let Some(octave) = self.octave {
            config.octave = octave;
        }
        if let Some(delay) = self.tone_name_delay {
            config.tone_name_delay_secs = delay;
        }
        if let Some(duration) = self.tone_duration {
            config.tone_duration_secs = duration;
        }
        if self.no_extended {
            config.extended_degrees = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "degree-drill",
            "1,flat 3,5",
            "--root-notes",
            "C,Db",
            "--plays-per-root",
            "2",
            "--delay",
            "4.5",
            "--octave",
            "3",
            "--tone-name-delay",
            "0.5",
        ])
        .unwrap();

        let config = args.apply(DrillConfig::default());
        assert_eq!(config.degrees, vec!["1", "flat 3", "5"]);
        assert_eq!(config.roots, vec!["C", "Db"]);
        assert_eq!(config.plays_per_root, 2);
        assert_eq!(config.cycle_delay_secs, 4.5);
        assert_eq!(config.octave, 3);
        assert_eq!(config.tone_name_delay_secs, 0.5);
        assert!(config.extended_degrees);
    }

    #[test]
    fn test_underscore_aliases() {
        let args = Args::try_parse_from(["degree-drill", "1", "--root_notes", "F", "--plays_per_root", "3"]).unwrap();
        assert_eq!(args.root_notes.as_deref(), Some("F"));
        assert_eq!(args.plays_per_root, Some(3));
    }

    #[test]
    fn test_negative_delay_is_clamped() {
        let args = Args::try_parse_from(["degree-drill", "1", "--root-notes", "C", "--delay", "-2"]).unwrap();
        let config = args.apply(DrillConfig::default()).clamped();
        assert_eq!(config.cycle_delay_secs, 0.0);
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let file = DrillConfig {
            roots: vec!["G".into()],
            octave: 2,
            extended_degrees: false,
            ..Default::default()
        };
        let args = Args::try_parse_from(["degree-drill", "1,5"]).unwrap();
        let config = args.apply(file);
        assert_eq!(config.roots, vec!["G"]);
        assert_eq!(config.octave, 2);
        assert!(!config.extended_degrees);
        assert_eq!(config.degrees, vec!["1", "5"]);
    }
}
