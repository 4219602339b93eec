//! CLI Module
//!
//! Command-line interface for audio-deid.

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Beep out time ranges of a WAV recording
#[derive(Parser, Debug)]
#[command(name = "audio-deid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input WAV file
    pub input: PathBuf,

    /// Output WAV file (parent directories are created)
    pub output: PathBuf,

    /// Range to beep out, in seconds, as START:END (repeatable)
    #[arg(short, long = "range", value_name = "START:END", required = true)]
    pub ranges: Vec<TimeRange>,

    /// Beep frequency in Hz (default 500)
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Beep amplitude between 0.0 and 1.0 (default 1.0)
    #[arg(short, long)]
    pub amplitude: Option<f64>,

    /// JSON file with `frequency` and `amplitude`; flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output bit depth: 8, 16, 24 or 32 (float); defaults to the input's
    #[arg(short, long)]
    pub bit_depth: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// A `START:END` range in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{}'", s))?;

        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid seconds '{}': {}", v, e))
        };

        Ok(TimeRange {
            start_secs: parse(start)?,
            end_secs: parse(end)?,
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_secs, self.end_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range: TimeRange = "0.81:1.262".parse().unwrap();
        assert_eq!(range.start_secs, 0.81);
        assert_eq!(range.end_secs, 1.262);
        assert_eq!(range.to_string(), "0.81:1.262");
    }

    #[test]
    fn test_parse_range_rejects_malformed() {
        assert!("1.0".parse::<TimeRange>().is_err());
        assert!("a:2".parse::<TimeRange>().is_err());
        assert!("1:".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from([
            "audio-deid",
            "in.wav",
            "out/out.wav",
            "-r",
            "0.5:1.0",
            "--range",
            "2:3",
            "--amplitude",
            "0.5",
        ])
        .unwrap();

        assert_eq!(cli.ranges.len(), 2);
        assert_eq!(cli.ranges[1], TimeRange { start_secs: 2.0, end_secs: 3.0 });
        assert_eq!(cli.amplitude, Some(0.5));
        assert_eq!(cli.frequency, None);
        assert_eq!(cli.bit_depth, None);
    }

    #[test]
    fn test_cli_requires_range() {
        assert!(Cli::try_parse_from(["audio-deid", "in.wav", "out.wav"]).is_err());
    }
}
