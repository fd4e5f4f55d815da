//! Radix-2 Cooley-Tukey FFT over complex samples
//!
//! Decimation-in-time with an explicit bit-reversal permutation and iterative
//! butterfly stages. Inputs must be a power of two; callers that cannot
//! guarantee that use the direct transform in [`crate::dsp::transform`].

use num_complex::Complex64;
use std::f64::consts::PI;

use super::TransformError;

/// Forward FFT of a power-of-two-length complex sequence.
///
/// Produces the full N-point spectrum (both halves, not yet folded).
///
/// # Errors
/// * [`TransformError::EmptyInput`] for a zero-length input
/// * [`TransformError::InvalidSize`] when the length is not a power of two
pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
    let n = input.len();

    if n == 0 {
        return Err(TransformError::EmptyInput);
    }
    if n == 1 {
        return Ok(input.to_vec());
    }
    if !n.is_power_of_two() {
        return Err(TransformError::InvalidSize(n));
    }

    // Reorder by bit-reversed index so each butterfly stage reads and writes
    // in place.
    let bits = n.trailing_zeros();
    let mut output = vec![Complex64::new(0.0, 0.0); n];
    for (i, &sample) in input.iter().enumerate() {
        output[i.reverse_bits() >> (usize::BITS - bits)] = sample;
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = -2.0 * PI / size as f64;

        for block in (0..n).step_by(size) {
            for j in 0..half {
                let twiddle = Complex64::from_polar(1.0, step * j as f64);
                let u = output[block + j];
                let v = output[block + j + half] * twiddle;
                output[block + j] = u + v;
                output[block + j + half] = u - v;
            }
        }

        size <<= 1;
    }

    Ok(output)
}

/// Inverse FFT via the conjugation identity `IFFT(x) = conj(FFT(conj(x))) / N`.
///
/// Same length requirements and errors as [`fft`].
pub fn ifft(input: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
    let n = input.len();

    if n == 0 {
        return Err(TransformError::EmptyInput);
    }
    if n == 1 {
        return Ok(input.to_vec());
    }
    if !n.is_power_of_two() {
        return Err(TransformError::InvalidSize(n));
    }

    let conjugated: Vec<Complex64> = input.iter().map(|c| c.conj()).collect();
    let transformed = fft(&conjugated)?;

    Ok(transformed
        .iter()
        .map(|c| c.conj() / n as f64)
        .collect())
}
