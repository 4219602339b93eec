//! Error handling for audio-deid
//!
//! Every failure carries a stable error code, and file-level failures
//! keep the underlying cause reachable through `Error::source`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for de-identification operations
pub type Result<T> = std::result::Result<T, DeidError>;

/// Boxed underlying cause carried by load/save failures
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for audio-deid operations
#[derive(Error, Debug)]
pub enum DeidError {
    // Configuration Errors
    #[error("Invalid beep configuration: {reason}")]
    InvalidConfig { reason: String },

    // Session Errors
    #[error("No audio loaded")]
    NotLoaded,

    #[error("Invalid range {start_secs}s..{end_secs}s: {reason}")]
    InvalidRange {
        start_secs: f64,
        end_secs: f64,
        reason: String,
    },

    // File Errors
    #[error("Failed to load audio from {path}: {reason}")]
    Load {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Cause>,
    },

    #[error("Failed to save audio to {path}: {reason}")]
    Save {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Cause>,
    },
}

impl DeidError {
    pub(crate) fn invalid_range(start_secs: f64, end_secs: f64, reason: impl Into<String>) -> Self {
        DeidError::InvalidRange {
            start_secs,
            end_secs,
            reason: reason.into(),
        }
    }

    pub(crate) fn load<E>(path: impl Into<PathBuf>, reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DeidError::Load {
            path: path.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn save<E>(path: impl Into<PathBuf>, reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DeidError::Save {
            path: path.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            DeidError::InvalidConfig { .. } => "INVALID_CONFIG",
            DeidError::NotLoaded => "NOT_LOADED",
            DeidError::InvalidRange { .. } => "INVALID_RANGE",
            DeidError::Load { .. } => "LOAD_ERROR",
            DeidError::Save { .. } => "SAVE_ERROR",
        }
    }

    /// Returns a user-facing recovery hint, if one applies.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            DeidError::InvalidConfig { .. } => {
                Some("Use a frequency above 0 Hz and an amplitude between 0.0 and 1.0.")
            }
            DeidError::NotLoaded => Some("Load an audio file before de-identifying or saving."),
            DeidError::InvalidRange { .. } => {
                Some("Ranges must satisfy 0 <= start < end < duration. Reload the file and retry.")
            }
            DeidError::Load { .. } => Some("Check the file exists and is a PCM or float WAV file."),
            DeidError::Save { .. } => Some("Check the output location is writable."),
        }
    }
}
