//! De-identification of a single time range
//!
//! Maps a `[start, end)` range in seconds onto a sample window and
//! overwrites it with the configured beep in every channel.

use log::debug;

use crate::config::BeepConfig;
use crate::engine::{synthesize, SampleBuffer};
use crate::error::{DeidError, Result};

/// A contiguous run of sample indices, `start..start + len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    pub start: usize,
    pub len: usize,
}

impl SampleWindow {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Validate a range against a buffer and map it onto sample indices
///
/// Bounds are checked in seconds against the buffer duration
/// (`len / sample_rate`): both ends must be finite, non-negative and strictly
/// before the end of the audio, and `start` must precede `end`. Indices are
/// `round(sample_rate * seconds)`.
///
/// # Errors
/// `InvalidRange` if any bound check fails or the range rounds to zero
/// samples.
pub fn sample_window(buffer: &SampleBuffer, start_secs: f64, end_secs: f64) -> Result<SampleWindow> {
    let duration = buffer.duration_secs();
    let reject = |reason: String| Err(DeidError::invalid_range(start_secs, end_secs, reason));

    if !start_secs.is_finite() || !end_secs.is_finite() {
        return reject("range bounds must be finite".to_string());
    }
    if start_secs < 0.0 || end_secs < 0.0 {
        return reject("range bounds must not be negative".to_string());
    }
    if start_secs >= duration || end_secs >= duration {
        return reject(format!("range must end before {:.6}s", duration));
    }
    if start_secs >= end_secs {
        return reject("start must precede end".to_string());
    }

    let rate = buffer.sample_rate() as f64;
    let start = (rate * start_secs).round() as usize;
    let end = ((rate * end_secs).round() as usize).min(buffer.len());

    if end <= start {
        return reject("range is shorter than one sample".to_string());
    }

    Ok(SampleWindow {
        start,
        len: end - start,
    })
}

/// Overwrite `[start_secs, end_secs)` of every channel with the beep tone
///
/// Returns the sample window that was written. On error the buffer may
/// not be relied upon; callers discard it.
pub fn deidentify(
    buffer: &mut SampleBuffer,
    config: &BeepConfig,
    start_secs: f64,
    end_secs: f64,
) -> Result<SampleWindow> {
    let window = sample_window(buffer, start_secs, end_secs)?;
    let beep = synthesize(
        buffer.sample_rate(),
        window.len,
        config.frequency,
        config.amplitude,
    );

    buffer.splice_write(window.start, &beep)?;

    debug!(
        "Beeped {:.3}s..{:.3}s (samples {}..{}) across {} channel(s)",
        start_secs,
        end_secs,
        window.start,
        window.end(),
        buffer.num_channels()
    );

    Ok(window)
}
