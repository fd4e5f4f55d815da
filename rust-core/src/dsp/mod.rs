//! Frequency-domain transform engine
//!
//! Complex FFT/IFFT, the canonical half-spectrum DFT/IDFT entry points,
//! and window functions for spectral analysis.

pub mod fft;
pub mod transform;
pub mod windowing;

pub use fft::{fft, ifft};
pub use transform::{dft, idft, FrequencyComponent, Spectrum};
pub use windowing::{apply_window, WindowType};

use thiserror::Error;

/// Errors produced by the transform engine.
///
/// Both conditions are detected before any work is done and are terminal for
/// the call; the engine never recovers silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A zero-length transform was requested.
    #[error("transform input is empty")]
    EmptyInput,

    /// A non-power-of-two length was passed to the power-of-two-only FFT.
    #[error("FFT length must be a power of two, got {0}")]
    InvalidSize(usize),
}
