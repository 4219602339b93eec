//! WAV codec adapter
//!
//! Converts between WAV container bytes and non-interleaved f32 channel
//! data. Integer PCM (8/16/24/32-bit) and 32-bit float are decoded and
//! encoded. By default the output keeps the input file's sample encoding;
//! a fixed [`EncodeFormat`] can override it.
//!
//! Integer samples are scaled by `2^(bits-1)` in both directions, so a
//! decode/encode round trip reproduces the original integers exactly.
//!
//! Nothing here touches the filesystem. The session reads and writes bytes
//! and hands them to a [`Codec`].

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

/// Errors produced while decoding or encoding audio bytes
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Malformed channel data: {reason}")]
    MalformedChannels { reason: String },
}

/// Codec-neutral decoded audio
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    /// One sample vector per channel
    pub channel_data: Vec<Vec<f32>>,
    /// Sample encoding of the source, reused on save unless overridden
    pub format: EncodeFormat,
}

/// Decode/encode seam between the session and a container format
pub trait Codec {
    /// Decode container bytes into per-channel samples
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, CodecError>;

    /// Encode per-channel samples into container bytes
    fn encode(&self, audio: &DecodedAudio) -> Result<Vec<u8>, CodecError>;
}

/// Sample encoding of a WAV stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeFormat {
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
}

impl Default for EncodeFormat {
    fn default() -> Self {
        EncodeFormat::int(16)
    }
}

impl EncodeFormat {
    /// Bit depth as given on the command line: 32 means IEEE float,
    /// anything else integer PCM
    pub fn new(bit_depth: u16) -> Self {
        if bit_depth == 32 {
            EncodeFormat::float32()
        } else {
            EncodeFormat::int(bit_depth)
        }
    }

    /// Integer PCM at the given bit depth
    pub fn int(bits_per_sample: u16) -> Self {
        EncodeFormat {
            bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }

    /// 32-bit float, lossless for in-memory f32 samples
    pub fn float32() -> Self {
        EncodeFormat {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }

    /// Whether [`WavCodec`] can write this encoding
    pub fn is_supported(&self) -> bool {
        matches!(
            (self.sample_format, self.bits_per_sample),
            (SampleFormat::Float, 32) | (SampleFormat::Int, 8 | 16 | 24 | 32)
        )
    }
}

/// hound-backed WAV codec
#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec {
    /// `None` writes the decoded audio's own format
    format: Option<EncodeFormat>,
}

impl WavCodec {
    /// Codec that always writes `format`, whatever the input was
    pub fn new(format: EncodeFormat) -> Self {
        WavCodec {
            format: Some(format),
        }
    }
}

impl Codec for WavCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, CodecError> {
        let reader = WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        let channels = spec.channels as usize;

        if channels == 0 {
            return Err(CodecError::MalformedChannels {
                reason: "file declares zero channels".to_string(),
            });
        }

        let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

        if interleaved.len() % channels != 0 {
            return Err(CodecError::MalformedChannels {
                reason: format!(
                    "{} samples is not divisible by channel count {}",
                    interleaved.len(),
                    channels
                ),
            });
        }

        Ok(DecodedAudio {
            sample_rate: spec.sample_rate,
            channel_data: deinterleave(&interleaved, channels),
            format: EncodeFormat {
                bits_per_sample: spec.bits_per_sample,
                sample_format: spec.sample_format,
            },
        })
    }

    fn encode(&self, audio: &DecodedAudio) -> Result<Vec<u8>, CodecError> {
        let channels = u16::try_from(audio.channel_data.len()).map_err(|_| {
            CodecError::UnsupportedFormat {
                format: format!("{}-channel audio", audio.channel_data.len()),
            }
        })?;
        if channels == 0 {
            return Err(CodecError::MalformedChannels {
                reason: "no channels to encode".to_string(),
            });
        }

        let frames = audio.channel_data[0].len();
        if audio.channel_data.iter().any(|ch| ch.len() != frames) {
            return Err(CodecError::MalformedChannels {
                reason: "channels differ in length".to_string(),
            });
        }

        let format = self.format.unwrap_or(audio.format);
        if !format.is_supported() {
            return Err(unsupported_output(format));
        }

        let spec = WavSpec {
            channels,
            sample_rate: audio.sample_rate,
            bits_per_sample: format.bits_per_sample,
            sample_format: format.sample_format,
        };

        let interleaved = interleave(&audio.channel_data);
        let mut cursor = Cursor::new(Vec::with_capacity(44 + interleaved.len() * 4));

        {
            let mut writer = WavWriter::new(&mut cursor, spec)?;
            match (format.sample_format, format.bits_per_sample) {
                (SampleFormat::Float, 32) => {
                    for sample in interleaved {
                        writer.write_sample(sample)?;
                    }
                }
                (SampleFormat::Int, 8) => {
                    for sample in interleaved {
                        writer.write_sample(quantize(sample, 8) as i8)?;
                    }
                }
                (SampleFormat::Int, 16) => {
                    for sample in interleaved {
                        writer.write_sample(quantize(sample, 16) as i16)?;
                    }
                }
                // 24-bit stored as i32 in hound
                (SampleFormat::Int, bits @ (24 | 32)) => {
                    for sample in interleaved {
                        writer.write_sample(quantize(sample, bits))?;
                    }
                }
                _ => return Err(unsupported_output(format)),
            }
            writer.finalize()?;
        }

        Ok(cursor.into_inner())
    }
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn unsupported_output(format: EncodeFormat) -> CodecError {
    CodecError::UnsupportedFormat {
        format: format!(
            "{}-bit {:?} output (only 8/16/24/32-bit int and 32-bit float supported)",
            format.bits_per_sample, format.sample_format
        ),
    }
}

/// Scale a [-1, 1] sample to a `bits`-wide signed integer, clamped to range
///
/// Uses the same `2^(bits-1)` factor as decoding.
fn quantize(sample: f32, bits: u16) -> i32 {
    let full_scale = (1_i64 << (bits - 1)) as f64;
    (sample as f64 * full_scale)
        .round()
        .clamp(-full_scale, full_scale - 1.0) as i32
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>, CodecError> {
    let samples = match (sample_format, bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        // hound hands 8-bit unsigned PCM back as signed i8
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / 128.0))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect::<Result<Vec<_>, _>>()?,
        (format, bits) => {
            return Err(CodecError::UnsupportedFormat {
                format: format!("{}-bit {:?} audio", bits, format),
            })
        }
    };

    Ok(samples)
}

/// De-interleave samples from [L,R,L,R,...] to [[L,L,...], [R,R,...]]
fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let frames = samples.len() / channels;
    let mut result = vec![Vec::with_capacity(frames); channels];

    for frame in samples.chunks_exact(channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            result[ch].push(sample);
        }
    }

    result
}

/// Interleave channels from [[L,L,...], [R,R,...]] to [L,R,L,R,...]
fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = channels.first() else {
        return Vec::new();
    };

    let frames = first.len();
    let mut result = Vec::with_capacity(frames * channels.len());

    for frame in 0..frames {
        for channel in channels {
            result.push(channel[frame]);
        }
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
