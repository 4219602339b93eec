//! Audio de-identification session
//!
//! [`AudioDeid`] owns one loaded recording at a time:
//!
//! ```text
//! load ──> deidentify* ──> save
//!   │          │             │
//!   └──────────┴─── clear ───┴──> (nothing loaded)
//! ```
//!
//! A failed `load` or `deidentify` discards the loaded audio, and `save`
//! always does, so a partially processed file can never be written out by
//! accident. Reload after any failure.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::BeepConfig;
use crate::deid;
use crate::engine::{Codec, DecodedAudio, EncodeFormat, SampleBuffer, WavCodec};
use crate::error::{DeidError, Result};

/// Label used for the source path of in-memory loads
const MEMORY_SOURCE: &str = "<memory>";

/// Stateful de-identification session
///
/// ```no_run
/// use audio_deid::{AudioDeid, BeepConfig};
///
/// # fn main() -> audio_deid::Result<()> {
/// let mut deid = AudioDeid::new(BeepConfig::new(500.0, 0.5)?);
/// deid.load("sample/input.wav")?
///     .deidentify(0.81, 1.262)?
///     .deidentify(2.978, 3.212)?
///     .save("sample/output.wav")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AudioDeid<C: Codec = WavCodec> {
    config: BeepConfig,
    codec: C,
    loaded: Option<Loaded>,
}

/// Audio held between `load` and `save`
#[derive(Debug)]
struct Loaded {
    buffer: SampleBuffer,
    /// Encoding of the source, handed back to the codec on save
    format: EncodeFormat,
}

impl AudioDeid<WavCodec> {
    /// Create a session using the WAV codec, saving in the input's format
    pub fn new(config: BeepConfig) -> Self {
        Self::with_codec(config, WavCodec::default())
    }
}

impl Default for AudioDeid<WavCodec> {
    fn default() -> Self {
        Self::new(BeepConfig::default())
    }
}

impl<C: Codec> AudioDeid<C> {
    /// Create a session with a custom codec
    pub fn with_codec(config: BeepConfig, codec: C) -> Self {
        AudioDeid {
            config,
            codec,
            loaded: None,
        }
    }

    /// Current beep configuration
    pub fn config(&self) -> BeepConfig {
        self.config
    }

    /// Update beep frequency and/or amplitude
    ///
    /// Both values are validated before either is stored. On error the
    /// previous configuration stays in effect and loaded audio is untouched.
    pub fn configure(&mut self, frequency: Option<f64>, amplitude: Option<f64>) -> Result<()> {
        self.config = self.config.with_overrides(frequency, amplitude)?;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Sample rate of the loaded audio
    pub fn sample_rate(&self) -> Option<u32> {
        self.loaded.as_ref().map(|l| l.buffer.sample_rate())
    }

    /// Read-only view of the loaded channel data
    pub fn channels(&self) -> Option<&[Vec<f32>]> {
        self.loaded.as_ref().map(|l| l.buffer.channels())
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.loaded.as_ref().map(|l| l.buffer.duration_secs())
    }

    /// Sample encoding of the loaded file
    pub fn source_format(&self) -> Option<EncodeFormat> {
        self.loaded.as_ref().map(|l| l.format)
    }

    /// Read and decode an audio file, replacing anything already loaded
    ///
    /// # Errors
    /// `Load` wrapping the I/O or codec failure. The session is left with
    /// nothing loaded.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        self.clear();

        let bytes = fs::read(path)
            .map_err(|e| DeidError::load(path, "failed to read file", e))?;

        self.adopt(path, &bytes)?;
        Ok(self)
    }

    /// Decode audio from an in-memory byte slice
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.clear();
        self.adopt(Path::new(MEMORY_SOURCE), bytes)?;
        Ok(self)
    }

    fn adopt(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        let decoded = self
            .codec
            .decode(bytes)
            .map_err(|e| DeidError::load(path, "failed to decode audio", e))?;

        if decoded.channel_data.is_empty() {
            return Err(DeidError::Load {
                path: path.to_path_buf(),
                reason: "decoded audio has no channels".to_string(),
                source: None,
            });
        }

        // The decoder's vectors are moved in, so the session owns the only copy.
        let buffer = SampleBuffer::new(decoded.sample_rate, decoded.channel_data).map_err(|e| {
            DeidError::load(path, "decoded audio is not a usable sample buffer", e)
        })?;

        info!(
            "Loaded {}: {} channel(s), {} Hz, {}-bit {:?}, {:.3}s",
            path.display(),
            buffer.num_channels(),
            buffer.sample_rate(),
            decoded.format.bits_per_sample,
            decoded.format.sample_format,
            buffer.duration_secs()
        );

        self.loaded = Some(Loaded {
            buffer,
            format: decoded.format,
        });
        Ok(())
    }

    /// Overwrite `[start_secs, end_secs)` with the beep in every channel
    ///
    /// # Errors
    /// * `NotLoaded` - nothing is loaded
    /// * `InvalidRange` - the range is negative, not ascending, or does not
    ///   end before the audio does
    ///
    /// Any error other than `NotLoaded` discards the loaded audio.
    pub fn deidentify(&mut self, start_secs: f64, end_secs: f64) -> Result<&mut Self> {
        let loaded = self.loaded.as_mut().ok_or(DeidError::NotLoaded)?;

        let result = deid::deidentify(&mut loaded.buffer, &self.config, start_secs, end_secs);
        if let Err(e) = result {
            warn!("De-identification failed, discarding loaded audio: {}", e);
            self.clear();
            return Err(e);
        }

        Ok(self)
    }

    /// Encode the loaded audio and write it to `path`
    ///
    /// Missing parent directories are created. The loaded audio is
    /// discarded whether or not the write succeeds.
    ///
    /// # Errors
    /// * `NotLoaded` - nothing is loaded
    /// * `Save` - encoding, directory creation, or the write failed
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let Loaded { buffer, format } = self.loaded.take().ok_or(DeidError::NotLoaded)?;

        let (sample_rate, channel_data) = buffer.into_parts();
        let audio = DecodedAudio {
            sample_rate,
            channel_data,
            format,
        };

        let bytes = self
            .codec
            .encode(&audio)
            .map_err(|e| DeidError::save(path, "failed to encode audio", e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| DeidError::save(path, "failed to create output directory", e))?;
        }

        fs::write(path, &bytes).map_err(|e| DeidError::save(path, "failed to write file", e))?;

        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Discard any loaded audio. Never fails.
    pub fn clear(&mut self) {
        self.loaded = None;
    }
}
