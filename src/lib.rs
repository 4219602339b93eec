//! audio-deid - Audio De-identification
//!
//! Overwrites chosen time ranges of a recording with a synthesized sine
//! "beep" and re-encodes the result.
//!
//! # Architecture
//!
//! - `engine`: sample buffers, tone synthesis, WAV codec
//! - `deid`: maps a time range onto samples and splices in the beep
//! - `session`: load / de-identify / save lifecycle around one file
//! - `cli`: thin command-line wrapper

pub mod cli;
pub mod config;
pub mod deid;
pub mod engine;
pub mod error;
pub mod session;

pub use config::BeepConfig;
pub use error::{DeidError, Result};
pub use session::AudioDeid;
