//! Message detection (decypher)
//!
//! Best-effort decoder for the embedding protocol. Each protocol bin is
//! compared against a local baseline estimated from nearby non-protocol bins;
//! a marker counts as present when the magnitude ratio exceeds half its
//! embedding boost. The protocol encodes neither character order nor
//! multiplicity, so detection recovers the message length and the set of
//! embedded characters only. Reliable for carriers with locally smooth
//! spectra that were not re-encoded after embedding.

use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

use super::{
    alphabet, frequency_bin, StegoError, LENGTH_BITS, LENGTH_MARKER_BASE, LENGTH_MARKER_SPACING,
    START_MARKER_FREQ,
};
use crate::dsp::transform::{dft, Spectrum};
use crate::wav::read_carrier;

/// Detection threshold for the start marker (embedded boost 1.02).
const START_THRESHOLD: f64 = 1.010;
/// Detection threshold for length-bit markers (embedded boost 1.015).
const LENGTH_THRESHOLD: f64 = 1.0075;
/// Detection threshold for character tones (embedded boost 1.01).
const CHARACTER_THRESHOLD: f64 = 1.005;

/// How far around a candidate bin the baseline estimate may look.
const BASELINE_SPAN: usize = 10;
/// How many reference bins the baseline estimate uses at most.
const BASELINE_BINS: usize = 6;

/// What the detector recovered from a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenMessage {
    /// Message length decoded from the length-bit markers.
    pub length: usize,
    /// Characters whose full tone set was detected, in table order.
    pub characters: Vec<char>,
}

/// Every bin the embedding protocol may touch for this spectrum.
fn protocol_bins(spectrum: &Spectrum) -> HashSet<usize> {
    let mut bins = HashSet::new();

    if let Some(bin) = frequency_bin(START_MARKER_FREQ, spectrum) {
        bins.insert(bin);
    }
    for bit in 0..LENGTH_BITS {
        let freq = LENGTH_MARKER_BASE + LENGTH_MARKER_SPACING * bit as f64;
        if let Some(bin) = frequency_bin(freq, spectrum) {
            bins.insert(bin);
        }
    }
    for c in alphabet::supported_characters() {
        let Some(tones) = alphabet::carrier_frequencies(c) else {
            continue;
        };
        for freq in tones {
            if let Some(bin) = frequency_bin(freq, spectrum) {
                bins.insert(bin);
            }
        }
    }

    bins
}

/// Estimate the unperturbed magnitude at `bin` from nearby bins that the
/// protocol never touches. Immediate neighbours are skipped to tolerate
/// leakage from the candidate itself.
fn baseline(spectrum: &Spectrum, bin: usize, protocol: &HashSet<usize>) -> Option<f64> {
    let mut references = Vec::with_capacity(BASELINE_BINS);

    for offset in 2..=BASELINE_SPAN {
        let below = bin.checked_sub(offset);
        let above = Some(bin + offset).filter(|&i| i < spectrum.components.len());
        for index in [below, above].into_iter().flatten() {
            if !protocol.contains(&index) {
                references.push(spectrum.components[index].magnitude);
            }
            if references.len() >= BASELINE_BINS {
                break;
            }
        }
        if references.len() >= BASELINE_BINS {
            break;
        }
    }

    if references.is_empty() {
        return None;
    }
    Some(references.iter().sum::<f64>() / references.len() as f64)
}

/// Whether the bin nearest `freq` stands out above its baseline by at least
/// `threshold`.
fn marker_present(
    spectrum: &Spectrum,
    freq: f64,
    threshold: f64,
    protocol: &HashSet<usize>,
) -> bool {
    let Some(bin) = frequency_bin(freq, spectrum) else {
        return false;
    };
    let Some(base) = baseline(spectrum, bin, protocol) else {
        return false;
    };
    if base <= 0.0 {
        return false;
    }

    let ratio = spectrum.components[bin].magnitude / base;
    debug!("marker check at {freq} Hz (bin {bin}): ratio {ratio:.5} vs {threshold}");
    ratio >= threshold
}

/// Look for an embedded message in a spectrum.
///
/// Returns `None` when the start marker is absent.
pub fn detect(spectrum: &Spectrum) -> Option<HiddenMessage> {
    if spectrum.components.is_empty() {
        return None;
    }

    let protocol = protocol_bins(spectrum);

    if !marker_present(spectrum, START_MARKER_FREQ, START_THRESHOLD, &protocol) {
        return None;
    }

    let mut length = 0usize;
    for bit in 0..LENGTH_BITS {
        let freq = LENGTH_MARKER_BASE + LENGTH_MARKER_SPACING * bit as f64;
        if marker_present(spectrum, freq, LENGTH_THRESHOLD, &protocol) {
            length |= 1 << bit;
        }
    }

    let mut characters = Vec::new();
    for c in alphabet::supported_characters() {
        let Some(tones) = alphabet::carrier_frequencies(c) else {
            continue;
        };
        let all_present = tones
            .iter()
            .all(|&freq| marker_present(spectrum, freq, CHARACTER_THRESHOLD, &protocol));
        if all_present {
            characters.push(c);
        }
    }

    Some(HiddenMessage { length, characters })
}

/// Full decypher pipeline: read the carrier, transform it, and look for an
/// embedded message.
pub fn decypher_file(input: &Path) -> Result<Option<HiddenMessage>, StegoError> {
    let carrier = read_carrier(input)?;
    info!(
        "scanning '{}' ({} samples) for an embedded message",
        input.display(),
        carrier.samples.len()
    );

    let spectrum = dft(&carrier.samples, carrier.sample_rate as f64)?;
    Ok(detect(&spectrum))
}
