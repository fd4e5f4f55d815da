//! Message embedding
//!
//! Validation runs first; only then are protocol bins boosted (start marker,
//! length bits, character tones) and the spectrum inverted back to samples.
//! A validation failure therefore never leaves a partial output file.

use log::{debug, info};
use num_complex::Complex64;
use std::path::Path;

use super::{
    alphabet, frequency_bin, StegoError, CHARACTER_FACTOR, LENGTH_BITS, LENGTH_FACTOR,
    LENGTH_MARKER_BASE, LENGTH_MARKER_SPACING, START_FACTOR, START_MARKER_FREQ,
};
use crate::dsp::transform::{dft, idft, FrequencyComponent, Spectrum};
use crate::wav::{read_carrier, write_carrier, Carrier};

/// Check that a message can be embedded: length in [1, 255] and every
/// uppercase-folded character present in the carrier table.
pub fn validate_message(message: &str) -> Result<(), StegoError> {
    let length = message.chars().count();
    if length == 0 || length > 255 {
        return Err(StegoError::MessageLength(length));
    }
    for c in message.chars() {
        if !alphabet::is_supported(c) {
            return Err(StegoError::UnsupportedCharacter(c));
        }
    }
    Ok(())
}

/// Scale a bin's magnitude and re-derive its cartesian form at the unchanged
/// phase. Single choke point for all marker and character embedding.
pub fn rescale_bin(component: &mut FrequencyComponent, factor: f64) {
    let raw_magnitude = component.as_complex().norm() * factor;
    let raw = Complex64::from_polar(raw_magnitude, component.phase);
    component.magnitude *= factor;
    component.re = raw.re;
    component.im = raw.im;
}

fn boost_frequency(spectrum: &mut Spectrum, freq: f64, factor: f64) {
    if let Some(bin) = frequency_bin(freq, spectrum) {
        rescale_bin(&mut spectrum.components[bin], factor);
    } else {
        // Tone above the available bins for this carrier; skipped by design
        debug!("no bin for {freq} Hz, skipping");
    }
}

/// Boost the start marker and the set bits of the message length, LSB first.
fn add_message_markers(spectrum: &mut Spectrum, message_length: usize) {
    boost_frequency(spectrum, START_MARKER_FREQ, START_FACTOR);

    for bit in 0..LENGTH_BITS {
        if message_length & (1 << bit) != 0 {
            let freq = LENGTH_MARKER_BASE + LENGTH_MARKER_SPACING * bit as f64;
            boost_frequency(spectrum, freq, LENGTH_FACTOR);
        }
    }
}

/// Boost both carrier tones of one character.
fn embed_character(spectrum: &mut Spectrum, c: char) {
    let Some(tones) = alphabet::carrier_frequencies(c) else {
        return;
    };
    for freq in tones {
        boost_frequency(spectrum, freq, CHARACTER_FACTOR);
    }
}

/// Embed a message into a spectrum in place.
///
/// Characters sharing carrier tones compound multiplicatively when a tone is
/// boosted more than once; the 255-character cap bounds the drift.
pub fn embed_message(spectrum: &mut Spectrum, message: &str) -> Result<(), StegoError> {
    validate_message(message)?;

    let upper = message.to_uppercase();
    let length = upper.chars().count();

    add_message_markers(spectrum, length);
    for c in upper.chars() {
        embed_character(spectrum, c);
    }

    debug!("embedded {length} characters across the spectrum");
    Ok(())
}

/// Full cypher pipeline: read the carrier, embed the message in its spectrum,
/// invert, and write the modified carrier.
pub fn cypher_file(input: &Path, output: &Path, message: &str) -> Result<(), StegoError> {
    // Validate before touching any file
    validate_message(message)?;

    let carrier = read_carrier(input)?;
    info!(
        "embedding {} characters into '{}' ({} samples)",
        message.chars().count(),
        input.display(),
        carrier.samples.len()
    );

    let mut spectrum = dft(&carrier.samples, carrier.sample_rate as f64)?;
    embed_message(&mut spectrum, message)?;
    let samples = idft(&spectrum)?;

    write_carrier(
        output,
        &Carrier {
            samples,
            sample_rate: carrier.sample_rate,
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_spectrum() -> Spectrum {
        let mut samples = vec![0.0; 1024];
        samples[0] = 1.0;
        dft(&samples, 48000.0).unwrap()
    }

    #[test]
    fn test_validate_message_bounds() {
        assert!(matches!(
            validate_message(""),
            Err(StegoError::MessageLength(0))
        ));
        let long = "A".repeat(256);
        assert!(matches!(
            validate_message(&long),
            Err(StegoError::MessageLength(256))
        ));
        assert!(validate_message(&"A".repeat(255)).is_ok());
        assert!(validate_message("hello world").is_ok());
    }

    #[test]
    fn test_validate_message_alphabet() {
        assert!(matches!(
            validate_message("A@B"),
            Err(StegoError::UnsupportedCharacter('@'))
        ));
    }

    #[test]
    fn test_rescale_bin_preserves_phase() {
        let mut component = FrequencyComponent {
            frequency: 1000.0,
            magnitude: 0.5,
            phase: 0.7,
            re: 3.0 * 0.7f64.cos(),
            im: 3.0 * 0.7f64.sin(),
        };

        rescale_bin(&mut component, 2.0);

        assert!((component.magnitude - 1.0).abs() < 1e-12);
        assert!((component.as_complex().norm() - 6.0).abs() < 1e-12);
        assert!((component.as_complex().arg() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_markers_boost_expected_bins() {
        let mut spectrum = impulse_spectrum();
        let reference = spectrum.clone();

        // Length 3: bits 0 and 1 set
        add_message_markers(&mut spectrum, 3);

        // Start marker at 15 kHz (bin 320), boosted by 1.02
        let ratio = spectrum.components[320].magnitude / reference.components[320].magnitude;
        assert!((ratio - START_FACTOR).abs() < 1e-9);

        // Length bits at 16 kHz and 16.1 kHz
        for freq in [16_000.0, 16_100.0] {
            let bin = frequency_bin(freq, &spectrum).unwrap();
            let ratio = spectrum.components[bin].magnitude / reference.components[bin].magnitude;
            assert!((ratio - LENGTH_FACTOR).abs() < 1e-9);
        }

        // Bit 2 is clear: its bin is untouched
        let bin = frequency_bin(16_200.0, &spectrum).unwrap();
        assert_eq!(
            spectrum.components[bin].magnitude,
            reference.components[bin].magnitude
        );
    }

    #[test]
    fn test_character_tones_compound() {
        let mut spectrum = impulse_spectrum();
        let reference = spectrum.clone();

        // 'A' and 'B' share their row tone at 1200 Hz
        embed_character(&mut spectrum, 'A');
        embed_character(&mut spectrum, 'B');

        let row_bin = frequency_bin(1200.0, &spectrum).unwrap();
        let ratio = spectrum.components[row_bin].magnitude / reference.components[row_bin].magnitude;
        assert!((ratio - CHARACTER_FACTOR * CHARACTER_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_validation_before_mutation() {
        let mut spectrum = impulse_spectrum();
        let reference = spectrum.clone();

        assert!(embed_message(&mut spectrum, "BAD@MESSAGE").is_err());
        for (a, b) in spectrum.components.iter().zip(&reference.components) {
            assert_eq!(a.magnitude, b.magnitude);
        }
    }

    #[test]
    fn test_cypher_file_rejects_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");

        // Invalid message: no output artifact, input never even opened
        assert!(cypher_file(&input, &output, "@@@").is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_cypher_file_end_to_end() {
        use crate::wav::CARRIER_SAMPLE_RATE;
        use std::f64::consts::PI;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");

        // 15 kHz tone at 48 kHz over 1024 samples sits exactly on bin 320,
        // the start marker bin, so the boost is measurable after quantization
        let carrier = Carrier {
            samples: (0..1024)
                .map(|i| 0.5 * (2.0 * PI * 15_000.0 * i as f64 / 48000.0).sin())
                .collect(),
            sample_rate: CARRIER_SAMPLE_RATE,
        };
        write_carrier(&input, &carrier).unwrap();

        cypher_file(&input, &output, "HI").unwrap();
        assert!(output.exists());

        let original = read_carrier(&input).unwrap();
        let modified = read_carrier(&output).unwrap();
        assert_eq!(modified.sample_rate, CARRIER_SAMPLE_RATE);
        assert_eq!(modified.samples.len(), original.samples.len());

        let clean = dft(&original.samples, CARRIER_SAMPLE_RATE as f64).unwrap();
        let embedded = dft(&modified.samples, CARRIER_SAMPLE_RATE as f64).unwrap();
        let ratio = embedded.components[320].magnitude / clean.components[320].magnitude;
        assert!((ratio - START_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn test_embedding_survives_inversion() {
        let mut samples = vec![0.0; 1024];
        samples[0] = 1.0;

        let mut spectrum = dft(&samples, 48000.0).unwrap();
        embed_message(&mut spectrum, "HI").unwrap();
        let modified = idft(&spectrum).unwrap();

        assert_eq!(modified.len(), samples.len());

        // Re-analyzing the modified signal shows the boosted start marker
        let reanalyzed = dft(&modified, 48000.0).unwrap();
        let clean = dft(&samples, 48000.0).unwrap();
        let ratio =
            reanalyzed.components[320].magnitude / clean.components[320].magnitude;
        assert!((ratio - START_FACTOR).abs() < 1e-6);
    }
}
