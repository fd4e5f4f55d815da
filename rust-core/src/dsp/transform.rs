//! Canonical forward/inverse transform with a half-spectrum result
//!
//! The forward entry point picks one of two strategies on input length: the
//! radix-2 FFT for power-of-two lengths, a direct O(N²) DFT otherwise. Both
//! produce the same half-spectrum result type, so callers never see which
//! strategy ran.

use log::debug;
use num_complex::Complex64;
use std::cmp::Ordering;
use std::f64::consts::PI;

use super::fft::{fft, ifft};
use super::TransformError;

/// One analyzed frequency bin.
///
/// `magnitude` is amplitude-normalized (bin 0 divided by the transform length,
/// all other bins divided by the transform length then doubled to account for
/// the folded mirror half). `re`/`im` keep the raw spectrum value so the
/// inverse transform can reconstruct the signal exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyComponent {
    /// Center frequency in Hz.
    pub frequency: f64,
    /// Amplitude-normalized magnitude.
    pub magnitude: f64,
    /// Phase in radians, in (-π, π].
    pub phase: f64,
    /// Raw real part of the spectrum value.
    pub re: f64,
    /// Raw imaginary part of the spectrum value.
    pub im: f64,
}

impl FrequencyComponent {
    /// The raw spectrum value backing this bin.
    pub fn as_complex(&self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }
}

/// Half-spectrum result of one forward transform.
#[derive(Debug, Clone, Default)]
pub struct Spectrum {
    /// Bins 0..transform_len/2, lowest frequency first.
    pub components: Vec<FrequencyComponent>,
    /// The bin at exactly half the sample rate, unnormalized. Present only
    /// when the transform length is even; it has no conjugate mirror partner.
    pub nyquist: Option<Complex64>,
    /// Sample rate of the analyzed signal in Hz.
    pub sample_rate: f64,
    /// Number of samples in the analyzed signal.
    pub sample_count: usize,
    /// Number of points in the underlying transform.
    pub transform_len: usize,
    /// Spacing between adjacent bins in Hz (sample_rate / transform_len).
    pub freq_resolution: f64,
}

impl Spectrum {
    /// The `n` strongest bins, in descending magnitude order.
    ///
    /// The sort is stable, so bins of equal magnitude keep their frequency
    /// order. `n` is clamped to the available bin count; `n == 0` or an empty
    /// spectrum yields an empty list.
    pub fn top_frequencies(&self, n: usize) -> Vec<FrequencyComponent> {
        if n == 0 || self.components.is_empty() {
            return Vec::new();
        }

        let mut ranked = self.components.clone();
        ranked.sort_by(|a, b| {
            b.magnitude
                .partial_cmp(&a.magnitude)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }
}

/// Forward transform of a real sample buffer into a half-spectrum.
///
/// An empty buffer yields an empty result, not an error.
pub fn dft(samples: &[f64], sample_rate: f64) -> Result<Spectrum, TransformError> {
    let n = samples.len();
    if n == 0 {
        return Ok(Spectrum {
            sample_rate,
            ..Spectrum::default()
        });
    }

    let spectrum = if n.is_power_of_two() {
        debug!("forward transform: {n} samples, radix-2 FFT");
        let input: Vec<Complex64> = samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        fft(&input)?
    } else {
        debug!("forward transform: {n} samples, direct DFT fallback");
        direct_dft(samples)
    };

    let transform_len = n;
    let freq_resolution = sample_rate / transform_len as f64;
    let components = (0..transform_len / 2)
        .map(|i| {
            let bin = spectrum[i];
            let magnitude = if i == 0 {
                bin.norm() / transform_len as f64
            } else {
                2.0 * bin.norm() / transform_len as f64
            };
            FrequencyComponent {
                frequency: i as f64 * freq_resolution,
                magnitude,
                phase: bin.arg(),
                re: bin.re,
                im: bin.im,
            }
        })
        .collect();
    let nyquist = (transform_len % 2 == 0).then(|| spectrum[transform_len / 2]);

    Ok(Spectrum {
        components,
        nyquist,
        sample_rate,
        sample_count: n,
        transform_len,
        freq_resolution,
    })
}

/// Inverse transform: rebuild the full conjugate-symmetric spectrum from the
/// half-spectrum, invert it, and truncate to the original sample count.
///
/// An empty spectrum yields an empty buffer, not an error. Odd transform
/// lengths lose their top independent bin to the half-spectrum representation;
/// it is synthesized as zero, so only even lengths round-trip exactly. The
/// degenerate case is a single-sample buffer: its half-spectrum holds zero
/// components (`transform_len / 2 == 0`), so the DC sample is dropped and the
/// inverse yields an empty buffer.
pub fn idft(spectrum: &Spectrum) -> Result<Vec<f64>, TransformError> {
    if spectrum.components.is_empty() {
        return Ok(Vec::new());
    }

    let n = spectrum.transform_len;
    let mut full = vec![Complex64::new(0.0, 0.0); n];

    for (i, component) in spectrum.components.iter().enumerate() {
        full[i] = component.as_complex();
    }
    if n % 2 == 0 {
        full[n / 2] = spectrum.nyquist.unwrap_or_default();
    }
    // Mirror half: conjugates of bins 1..; bin 0 has no mirror.
    for i in 1..n.div_ceil(2) {
        full[n - i] = full[i].conj();
    }

    let time_domain = if n.is_power_of_two() {
        ifft(&full)?
    } else {
        direct_idft(&full)
    };

    Ok(time_domain
        .iter()
        .take(spectrum.sample_count)
        .map(|c| c.re)
        .collect())
}

/// Direct O(N²) forward transform for arbitrary lengths.
fn direct_dft(samples: &[f64]) -> Vec<Complex64> {
    let n = samples.len();
    (0..n)
        .map(|k| {
            (0..n)
                .map(|j| {
                    let angle = -2.0 * PI * (k * j) as f64 / n as f64;
                    samples[j] * Complex64::from_polar(1.0, angle)
                })
                .sum()
        })
        .collect()
}

/// Direct O(N²) inverse transform for arbitrary lengths.
fn direct_idft(spectrum: &[Complex64]) -> Vec<Complex64> {
    let n = spectrum.len();
    (0..n)
        .map(|j| {
            let sum: Complex64 = (0..n)
                .map(|k| {
                    let angle = 2.0 * PI * (k * j) as f64 / n as f64;
                    spectrum[k] * Complex64::from_polar(1.0, angle)
                })
                .sum();
            sum / n as f64
        })
        .collect()
}
