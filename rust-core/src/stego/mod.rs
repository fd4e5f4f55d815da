//! Spectral steganography codec
//!
//! Hides a short text message in a carrier's spectrum by boosting the
//! magnitudes of protocol bins: one start marker, eight length-bit markers,
//! and a two-tone set per message character. The perturbation survives the
//! inverse transform but not re-encoding or resampling of the carrier.

pub mod alphabet;
pub mod detect;
pub mod embed;

pub use detect::{decypher_file, HiddenMessage};
pub use embed::cypher_file;

use thiserror::Error;

use crate::dsp::transform::Spectrum;
use crate::dsp::TransformError;
use crate::wav::CarrierError;

/// Frequency of the start-of-message marker, in Hz.
pub const START_MARKER_FREQ: f64 = 15_000.0;
/// Base frequency of the message-length bit band, in Hz.
pub const LENGTH_MARKER_BASE: f64 = 16_000.0;
/// Spacing between adjacent length-bit carriers, in Hz.
pub const LENGTH_MARKER_SPACING: f64 = 100.0;
/// Number of length bits (messages are capped at 255 characters).
pub const LENGTH_BITS: usize = 8;

/// Magnitude boost applied to the start marker bin.
pub const START_FACTOR: f64 = 1.02;
/// Magnitude boost applied to each set length-bit bin.
pub const LENGTH_FACTOR: f64 = 1.015;
/// Magnitude boost applied to each character tone bin.
pub const CHARACTER_FACTOR: f64 = 1.01;

/// Errors from the steganography codec.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("unsupported character {0:?} in message")]
    UnsupportedCharacter(char),

    #[error("message length must be between 1 and 255 characters, got {0}")]
    MessageLength(usize),

    #[error(transparent)]
    Carrier(#[from] CarrierError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// The half-spectrum bin nearest to `freq`, or `None` when the frequency
/// falls outside the available bins (for example a carrier tone above the
/// Nyquist frequency of a short or low-rate signal). Callers skip such
/// tones silently.
pub(crate) fn frequency_bin(freq: f64, spectrum: &Spectrum) -> Option<usize> {
    if spectrum.freq_resolution <= 0.0 {
        return None;
    }
    let bin = (freq / spectrum.freq_resolution).round() as usize;
    (bin < spectrum.components.len()).then_some(bin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::transform::dft;

    #[test]
    fn test_frequency_bin_addressing() {
        // 1024 samples at 48 kHz: resolution 46.875 Hz, 512 bins
        let spectrum = dft(&vec![0.1; 1024], 48000.0).unwrap();

        assert_eq!(frequency_bin(0.0, &spectrum), Some(0));
        assert_eq!(frequency_bin(46.875, &spectrum), Some(1));
        assert_eq!(frequency_bin(15_000.0, &spectrum), Some(320));
        // Above the last half-spectrum bin
        assert_eq!(frequency_bin(24_000.0, &spectrum), None);
    }

    #[test]
    fn test_frequency_bin_empty_spectrum() {
        let spectrum = dft(&[], 48000.0).unwrap();
        assert_eq!(frequency_bin(1000.0, &spectrum), None);
    }
}
