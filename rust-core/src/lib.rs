//! Stegwave - spectral analysis and audio steganography
//!
//! Transforms mono 16-bit PCM audio into the frequency domain and back, with
//! two front doors: ranking the dominant frequencies of a carrier, and hiding
//! a short text message in a carrier by perturbing the magnitudes of chosen
//! frequency bins.

pub mod analysis;
pub mod dsp;
pub mod stego;
pub mod wav;

pub use analysis::{analyze_file, AnalysisReport};
pub use dsp::transform::{dft, idft, FrequencyComponent, Spectrum};
pub use dsp::windowing::{apply_window, WindowType};
pub use dsp::TransformError;
pub use stego::{cypher_file, decypher_file, HiddenMessage, StegoError};
pub use wav::{read_carrier, write_carrier, Carrier, CarrierError};
