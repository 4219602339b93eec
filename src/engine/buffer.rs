//! Sample Buffer
//!
//! In-memory decoded audio: a sample rate plus one owned `Vec<f32>` per
//! channel. All channels always share the same length.

use crate::error::{DeidError, Result};

// ============================================================================
// Sample Buffer
// ============================================================================

/// Decoded, non-interleaved audio held by a loaded session
///
/// # Example
/// ```
/// use audio_deid::engine::SampleBuffer;
///
/// let buffer = SampleBuffer::silence(44100, 2, 44100).unwrap();
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.len(), 44100);
/// assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    samples: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// Create a buffer from owned channel data
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the sample rate is zero, there are no
    /// channels, or the channels differ in length.
    pub fn new(sample_rate: u32, samples: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(DeidError::InvalidConfig {
                reason: "sample rate must be greater than 0".to_string(),
            });
        }

        let Some(first) = samples.first() else {
            return Err(DeidError::InvalidConfig {
                reason: "audio must have at least one channel".to_string(),
            });
        };

        let len = first.len();
        if let Some(ch) = samples.iter().position(|c| c.len() != len) {
            return Err(DeidError::InvalidConfig {
                reason: format!(
                    "channel {} has {} samples, expected {}",
                    ch,
                    samples[ch].len(),
                    len
                ),
            });
        }

        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Create a zero-filled buffer
    pub fn silence(sample_rate: u32, num_channels: usize, num_samples: usize) -> Result<Self> {
        Self::new(sample_rate, vec![vec![0.0_f32; num_samples]; num_channels])
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds (`len / sample_rate`)
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Samples of one channel
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// All channels, read-only
    #[inline]
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.samples
    }

    /// Consume the buffer, returning `(sample_rate, channels)`
    pub fn into_parts(self) -> (u32, Vec<Vec<f32>>) {
        (self.sample_rate, self.samples)
    }

    /// Overwrite `waveform.len()` samples of every channel starting at `start`
    ///
    /// The same waveform is written into each channel, so a mono tone is
    /// replicated across stereo or multi-channel audio.
    ///
    /// # Errors
    /// Returns `InvalidRange` if the write would run past the end of the
    /// buffer. Nothing is written in that case.
    pub fn splice_write(&mut self, start: usize, waveform: &[f32]) -> Result<()> {
        let len = self.len();
        let end = start
            .checked_add(waveform.len())
            .filter(|&end| end <= len)
            .ok_or_else(|| {
                let rate = self.sample_rate as f64;
                DeidError::invalid_range(
                    start as f64 / rate,
                    (start.saturating_add(waveform.len())) as f64 / rate,
                    format!(
                        "sample window {}..+{} exceeds buffer length {}",
                        start,
                        waveform.len(),
                        len
                    ),
                )
            })?;

        for channel in &mut self.samples {
            channel[start..end].copy_from_slice(waveform);
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_channel_list() {
        let err = SampleBuffer::new(44100, Vec::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_new_rejects_zero_sample_rate() {
        assert!(SampleBuffer::new(0, vec![vec![0.0; 4]]).is_err());
    }

    #[test]
    fn test_new_rejects_ragged_channels() {
        let err = SampleBuffer::new(44100, vec![vec![0.0; 4], vec![0.0; 3]]).unwrap_err();
        assert!(err.to_string().contains("channel 1"));
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::silence(8000, 1, 20000).unwrap();
        assert!((buffer.duration_secs() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_splice_write_all_channels() {
        let mut buffer = SampleBuffer::silence(10, 2, 10).unwrap();
        buffer.splice_write(3, &[0.1, 0.2, 0.3]).unwrap();

        for ch in 0..2 {
            assert_eq!(
                buffer.channel(ch),
                &[0.0, 0.0, 0.0, 0.1, 0.2, 0.3, 0.0, 0.0, 0.0, 0.0]
            );
        }
    }

    #[test]
    fn test_splice_write_up_to_end() {
        let mut buffer = SampleBuffer::silence(10, 1, 5).unwrap();
        buffer.splice_write(3, &[1.0, 1.0]).unwrap();
        assert_eq!(buffer.channel(0), &[0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_splice_write_out_of_bounds_leaves_buffer_untouched() {
        let mut buffer = SampleBuffer::silence(10, 2, 5).unwrap();
        let err = buffer.splice_write(4, &[1.0, 1.0]).unwrap_err();

        assert!(matches!(err, DeidError::InvalidRange { .. }));
        assert!(buffer.channels().iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_splice_write_empty_waveform() {
        let mut buffer = SampleBuffer::silence(10, 1, 5).unwrap();
        buffer.splice_write(5, &[]).unwrap();
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
    }
}
