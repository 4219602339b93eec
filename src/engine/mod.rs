//! Audio Engine Module
//!
//! Core audio handling for de-identification:
//! - Sample buffer management
//! - Beep tone synthesis
//! - WAV codec adapter

pub mod buffer;
pub mod io;
pub mod tone;

pub use buffer::SampleBuffer;
pub use io::{Codec, CodecError, DecodedAudio, EncodeFormat, WavCodec};
pub use tone::synthesize;
