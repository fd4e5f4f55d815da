//! Analysis report generation
//!
//! Windows the input (analysis path only), runs the canonical forward
//! transform, and ranks the output bins by magnitude.

use log::info;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::dsp::transform::{dft, FrequencyComponent, Spectrum};
use crate::dsp::windowing::{apply_window, WindowType};
use crate::dsp::TransformError;
use crate::wav::{read_carrier, CarrierError};

/// Errors from the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Carrier(#[from] CarrierError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Ranked top frequencies of one carrier.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// How many frequencies were requested.
    pub requested: usize,
    /// The strongest bins, descending magnitude, clamped to availability.
    pub peaks: Vec<FrequencyComponent>,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top {} frequencies:", self.requested)?;
        for peak in &self.peaks {
            writeln!(f, "{:.1} Hz", peak.frequency)?;
        }
        Ok(())
    }
}

/// Transform a sample buffer for analysis, windowing it first when requested
/// (buffers of one sample or fewer are never windowed).
pub fn analyze(
    samples: &[f64],
    sample_rate: f64,
    window: Option<WindowType>,
) -> Result<Spectrum, TransformError> {
    match window {
        Some(window_type) if samples.len() > 1 => {
            dft(&apply_window(samples, window_type), sample_rate)
        }
        _ => dft(samples, sample_rate),
    }
}

/// Full analysis pipeline: read the carrier, transform it, and rank the top
/// `n` frequencies.
pub fn analyze_file(
    input: &Path,
    n: usize,
    window: Option<WindowType>,
) -> Result<AnalysisReport, AnalysisError> {
    let carrier = read_carrier(input)?;
    info!(
        "analyzing '{}' ({} samples at {} Hz)",
        input.display(),
        carrier.samples.len(),
        carrier.sample_rate
    );

    let spectrum = analyze(&carrier.samples, carrier.sample_rate as f64, window)?;

    Ok(AnalysisReport {
        requested: n,
        peaks: spectrum.top_frequencies(n),
    })
}
