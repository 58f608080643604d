//! Drill settings

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DrillError, Result};
use crate::root::validate_roots;

/// Everything a practice session needs to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Degree tokens exactly as typed
    pub degrees: Vec<String>,
    /// Root names exactly as typed, in rotation order
    pub roots: Vec<String>,
    /// Plays per unique degree before moving to the next root
    pub plays_per_root: u32,
    /// Target time from the start of one element to the start of the next
    pub cycle_delay_secs: f64,
    pub octave: i32,
    /// Pause between the tone and its spoken note name
    pub tone_name_delay_secs: f64,
    pub tone_duration_secs: f64,
    /// Pause after a new root has been announced
    pub root_settle_secs: f64,
    pub extended_degrees: bool,
    pub tone_amplitude: f32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            degrees: Vec::new(),
            roots: Vec::new(),
            plays_per_root: 1,
            cycle_delay_secs: 3.0,
            octave: 4,
            tone_name_delay_secs: 1.0,
            tone_duration_secs: 0.5,
            root_settle_secs: 2.0,
            extended_degrees: true,
            tone_amplitude: 0.3,
        }
    }
}

impl DrillConfig {
    /// Raise out-of-range numbers to their minimum, warning for each one
    pub fn clamped(mut self) -> Self {
        if self.plays_per_root < 1 {
            warn!(value = self.plays_per_root, "plays per root below 1, using 1");
            self.plays_per_root = 1;
        }
        for (name, value) in [
            ("cycle delay", &mut self.cycle_delay_secs),
            ("tone name delay", &mut self.tone_name_delay_secs),
            ("tone duration", &mut self.tone_duration_secs),
            ("root settle delay", &mut self.root_settle_secs),
        ] {
            if !value.is_finite() || *value < 0.0 {
                warn!(value = *value, "{} must be non-negative, using 0", name);
                *value = 0.0;
            }
        }
        self.tone_amplitude = self.tone_amplitude.clamp(0.0, 1.0);
        self
    }

    /// Trimmed, de-duplicated, sorted degree tokens
    pub fn unique_degrees(&self) -> Vec<String> {
        self.degrees
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Trimmed root names with empty entries dropped, order kept
    pub fn root_sequence(&self) -> Vec<String> {
        self.roots
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Reject configurations that cannot start a session
    pub fn validate(&self) -> Result<()> {
        if self.unique_degrees().is_empty() {
            return Err(DrillError::NoDegrees);
        }
        validate_roots(&self.root_sequence())
    }

    pub fn cycle_delay(&self) -> Duration {
        secs(self.cycle_delay_secs)
    }

    pub fn tone_name_delay(&self) -> Duration {
        secs(self.tone_name_delay_secs)
    }

    pub fn tone_duration(&self) -> Duration {
        secs(self.tone_duration_secs)
    }

    pub fn root_settle(&self) -> Duration {
        secs(self.root_settle_secs)
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Split a comma-separated list, trimming items and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
