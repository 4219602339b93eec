//! Beep configuration
//!
//! Frequency and amplitude of the replacement tone. Values are validated
//! before they are stored, so a rejected update never leaves a half-applied
//! configuration behind.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DeidError, Result};

/// Default beep frequency in Hz
pub const DEFAULT_FREQUENCY: f64 = 500.0;

/// Default beep amplitude (linear, full scale)
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// Tone parameters used by every de-identified window
///
/// Deserializes from JSON such as `{"frequency": 440, "amplitude": 0.5}`.
/// Missing fields fall back to the defaults, and `volume` is accepted as
/// another name for `amplitude`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeepConfig {
    /// Tone frequency in Hz (> 0)
    pub frequency: f64,
    /// Linear gain in [0.0, 1.0]
    #[serde(alias = "volume")]
    pub amplitude: f64,
}

impl Default for BeepConfig {
    fn default() -> Self {
        BeepConfig {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl BeepConfig {
    /// Create a validated configuration
    pub fn new(frequency: f64, amplitude: f64) -> Result<Self> {
        let config = BeepConfig {
            frequency,
            amplitude,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DeidError::InvalidConfig {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration string
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: BeepConfig =
            serde_json::from_str(text).map_err(|e| DeidError::InvalidConfig {
                reason: format!("malformed config: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check both parameters are in range
    pub fn validate(&self) -> Result<()> {
        validate_frequency(self.frequency)?;
        validate_amplitude(self.amplitude)
    }

    /// Return a copy with the given overrides applied, validated as a whole
    pub fn with_overrides(&self, frequency: Option<f64>, amplitude: Option<f64>) -> Result<Self> {
        let updated = BeepConfig {
            frequency: frequency.unwrap_or(self.frequency),
            amplitude: amplitude.unwrap_or(self.amplitude),
        };
        updated.validate()?;
        Ok(updated)
    }
}

fn validate_frequency(frequency: f64) -> Result<()> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(DeidError::InvalidConfig {
            reason: format!("frequency must be a finite value above 0 Hz, got {}", frequency),
        });
    }
    Ok(())
}

fn validate_amplitude(amplitude: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&amplitude) {
        return Err(DeidError::InvalidConfig {
            reason: format!("amplitude must be within [0.0, 1.0], got {}", amplitude),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BeepConfig::default();
        assert_eq!(config.frequency, 500.0);
        assert_eq!(config.amplitude, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_frequency() {
        for freq in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = BeepConfig::new(freq, 0.5).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_CONFIG", "frequency {}", freq);
        }
    }

    #[test]
    fn test_rejects_bad_amplitude() {
        for amp in [-0.01, 1.01, f64::NAN] {
            assert!(BeepConfig::new(500.0, amp).is_err(), "amplitude {}", amp);
        }
        assert!(BeepConfig::new(500.0, 0.0).is_ok());
        assert!(BeepConfig::new(500.0, 1.0).is_ok());
    }

    #[test]
    fn test_overrides_are_atomic() {
        let base = BeepConfig::new(440.0, 0.5).unwrap();
        assert!(base.with_overrides(Some(1000.0), Some(2.0)).is_err());

        let updated = base.with_overrides(None, Some(0.25)).unwrap();
        assert_eq!(updated.frequency, 440.0);
        assert_eq!(updated.amplitude, 0.25);
    }

    #[test]
    fn test_json_partial_and_alias() {
        let config = BeepConfig::from_json_str(r#"{"volume": 0.5}"#).unwrap();
        assert_eq!(config.frequency, DEFAULT_FREQUENCY);
        assert_eq!(config.amplitude, 0.5);

        let config = BeepConfig::from_json_str(r#"{"frequency": 1000}"#).unwrap();
        assert_eq!(config.frequency, 1000.0);
        assert_eq!(config.amplitude, DEFAULT_AMPLITUDE);
    }

    #[test]
    fn test_json_validation() {
        assert!(BeepConfig::from_json_str(r#"{"frequency": -5}"#).is_err());
        assert!(BeepConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"frequency": 880, "amplitude": 0.3}}"#).unwrap();

        let config = BeepConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config, BeepConfig::new(880.0, 0.3).unwrap());
    }
}
