//! CLI Command Implementations

use anyhow::{Context, Result};
use log::info;

use crate::cli::Cli;
use crate::config::BeepConfig;
use crate::engine::{EncodeFormat, WavCodec};
use crate::session::AudioDeid;

/// Resolve the beep configuration from an optional file plus flag overrides
pub fn resolve_config(cli: &Cli) -> Result<BeepConfig> {
    let base = match &cli.config {
        Some(path) => BeepConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BeepConfig::default(),
    };

    Ok(base.with_overrides(cli.frequency, cli.amplitude)?)
}

/// Load the input, beep out every requested range, and save the output.
pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    info!(
        "Beep: {} Hz at amplitude {}, {} range(s)",
        config.frequency,
        config.amplitude,
        cli.ranges.len()
    );

    let codec = match cli.bit_depth {
        Some(bits) => WavCodec::new(EncodeFormat::new(bits)),
        None => WavCodec::default(),
    };
    let mut session = AudioDeid::with_codec(config, codec);

    session
        .load(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    for range in &cli.ranges {
        session
            .deidentify(range.start_secs, range.end_secs)
            .with_context(|| format!("de-identifying {}", range))?;
    }

    session
        .save(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "De-identified {} range(s): {} -> {}",
        cli.ranges.len(),
        cli.input.display(),
        cli.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"frequency": 1000, "volume": 0.2}}"#).unwrap();

        let cli = Cli::try_parse_from([
            "audio-deid",
            "in.wav",
            "out.wav",
            "-r",
            "0:1",
            "--config",
            file.path().to_str().unwrap(),
            "--amplitude",
            "0.7",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.frequency, 1000.0);
        assert_eq!(config.amplitude, 0.7);
    }

    #[test]
    fn test_invalid_flag_value() {
        let cli = Cli::try_parse_from([
            "audio-deid",
            "in.wav",
            "out.wav",
            "-r",
            "0:1",
            "--frequency=-5",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.wav");
        let output = dir.path().join("out.wav");
        let cli = Cli::try_parse_from([
            "audio-deid",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "-r",
            "0:1",
        ])
        .unwrap();

        assert!(run(&cli).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_writes_output_in_input_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("redacted").join("out.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 24,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&input, spec).unwrap();
        for _ in 0..8000 * 2 {
            writer.write_sample(-777_i32).unwrap();
        }
        writer.finalize().unwrap();

        let cli = Cli::try_parse_from([
            "audio-deid",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "-r",
            "0.25:0.5",
            "-a",
            "0.5",
        ])
        .unwrap();
        run(&cli).unwrap();

        let mut reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.spec(), spec);
        let samples: Vec<i32> = reader.samples::<i32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 8000 * 2);

        // Frames 2000..4000 carry the beep; everything else is untouched
        assert!(samples[..2000 * 2].iter().all(|&s| s == -777));
        assert!(samples[4000 * 2..].iter().all(|&s| s == -777));
        assert!(samples[2000 * 2..4000 * 2].iter().any(|&s| s > 4_000_000));
    }
}
