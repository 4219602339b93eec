//! Beep tone synthesis
//!
//! Generates the sine wave that replaces de-identified audio.

use std::f64::consts::PI;

/// Generate a sine tone of exactly `sample_count` samples
///
/// Sample `i` is `sin(2π · frequency · i / sample_rate) · amplitude`, so the
/// first sample is always 0 and the output is fully determined by the inputs.
/// The phase is computed in f64 and narrowed to f32 per sample.
///
/// # Arguments
/// * `sample_rate` - Sample rate in Hz (must be non-zero)
/// * `sample_count` - Number of samples to generate (0 yields an empty vec)
/// * `frequency` - Tone frequency in Hz
/// * `amplitude` - Linear gain applied to the unit sine
pub fn synthesize(sample_rate: u32, sample_count: usize, frequency: f64, amplitude: f64) -> Vec<f32> {
    let angular_freq = 2.0 * PI * frequency / sample_rate as f64;

    (0..sample_count)
        .map(|i| ((angular_freq * i as f64).sin() * amplitude) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_length() {
        assert!(synthesize(44100, 0, 500.0, 1.0).is_empty());
    }

    #[test]
    fn test_exact_length_and_phase_zero() {
        let tone = synthesize(48000, 1234, 440.0, 0.8);
        assert_eq!(tone.len(), 1234);
        assert_eq!(tone[0], 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = synthesize(22050, 5000, 1000.0, 0.5);
        let b = synthesize(22050, 5000, 1000.0, 0.5);
        assert_eq!(
            a.iter().map(|s| s.to_bits()).collect::<Vec<_>>(),
            b.iter().map(|s| s.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_quarter_period_peak() {
        // 500 Hz at 8 kHz: 16 samples per cycle, peak at index 4
        let tone = synthesize(8000, 16, 500.0, 0.5);
        assert_abs_diff_eq!(tone[4], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(tone[8], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tone[12], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_amplitude_bounds_output() {
        let tone = synthesize(44100, 44100, 500.0, 0.25);
        let peak = tone.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.25 + 1e-6);
        assert!(peak > 0.24);
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        let tone = synthesize(44100, 100, 500.0, 0.0);
        assert!(tone.iter().all(|&s| s == 0.0));
    }
}
