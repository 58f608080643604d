//! Pitch number and equal-tempered frequency calculation

/// Tuning anchor: A4
pub const A4_FREQUENCY_HZ: f64 = 440.0;
pub const A4_PITCH: i32 = 69;

/// Highest valid MIDI note number
pub const MAX_PITCH: i32 = 127;

/// Convert a pitch number to its equal-tempered frequency in Hz
pub fn pitch_to_frequency(pitch: i32) -> f64 {
    A4_FREQUENCY_HZ * 2.0_f64.powf((pitch - A4_PITCH) as f64 / 12.0)
}

/// Whether a pitch number falls inside 0..=127
pub fn in_midi_range(pitch: i32) -> bool {
    (0..=MAX_PITCH).contains(&pitch)
}

/// Target pitch and its frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchResult {
    pub target: i32,
    pub frequency_hz: f64,
}

impl PitchResult {
    /// Out-of-range targets still carry a frequency; callers decide whether to warn
    pub fn in_midi_range(&self) -> bool {
        in_midi_range(self.target)
    }
}

/// Compute the pitch `offset` semitones above `root`.
///
/// Returns `None` when either input is missing.
pub fn calculate(root: Option<i32>, offset: Option<i32>) -> Option<PitchResult> {
    let target = root? + offset?;
    Some(PitchResult {
        target,
        frequency_hz: pitch_to_frequency(target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a440_reference() {
        assert!((pitch_to_frequency(69) - 440.0).abs() < 1e-6);
        assert!((pitch_to_frequency(81) - 880.0).abs() < 1e-6);
        assert!((pitch_to_frequency(57) - 220.0).abs() < 1e-6);
    }

    #[test]
    fn test_calculate() {
        let result = calculate(Some(60), Some(3)).unwrap();
        assert_eq!(result.target, 63);
        assert!((result.frequency_hz - 311.127).abs() < 1e-3);
        assert!(result.in_midi_range());
    }

    #[test]
    fn test_missing_inputs() {
        assert_eq!(calculate(None, Some(4)), None);
        assert_eq!(calculate(Some(60), None), None);
    }

    #[test]
    fn test_out_of_range_still_computes() {
        let result = calculate(Some(120), Some(21)).unwrap();
        assert_eq!(result.target, 141);
        assert!(!result.in_midi_range());
        assert!(result.frequency_hz > 10_000.0);

        let low = calculate(Some(-12), Some(0)).unwrap();
        assert!(!low.in_midi_range());
        assert!(low.frequency_hz > 0.0);
    }
}
