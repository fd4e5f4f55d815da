//! WAV carrier I/O
//!
//! Reads and writes the one supported container profile: mono, 16-bit signed
//! integer PCM at 48 kHz. Samples are normalized to [-1, 1] on read (divide by
//! 2^15) and re-quantized on write (multiply by 32767, truncate).

use hound::{SampleFormat, WavSpec};
use log::debug;
use std::path::Path;
use thiserror::Error;

/// The only sample rate the carrier profile accepts, in Hz.
pub const CARRIER_SAMPLE_RATE: u32 = 48_000;

/// Errors from reading or writing a carrier file.
#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("WAV container error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported sample format {0:?}, expected integer PCM")]
    UnsupportedFormat(SampleFormat),

    #[error("expected a mono carrier, got {0} channels")]
    NotMono(u16),

    #[error("unsupported sample rate {0} Hz, expected {CARRIER_SAMPLE_RATE} Hz")]
    UnsupportedSampleRate(u32),

    #[error("unsupported bit depth {0}, expected 16 bits per sample")]
    UnsupportedBitDepth(u16),
}

/// A fully materialized audio carrier.
#[derive(Debug, Clone)]
pub struct Carrier {
    /// Samples normalized to [-1, 1].
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

fn validate_spec(spec: &WavSpec) -> Result<(), CarrierError> {
    if spec.sample_format != SampleFormat::Int {
        return Err(CarrierError::UnsupportedFormat(spec.sample_format));
    }
    if spec.channels != 1 {
        return Err(CarrierError::NotMono(spec.channels));
    }
    if spec.sample_rate != CARRIER_SAMPLE_RATE {
        return Err(CarrierError::UnsupportedSampleRate(spec.sample_rate));
    }
    if spec.bits_per_sample != 16 {
        return Err(CarrierError::UnsupportedBitDepth(spec.bits_per_sample));
    }
    Ok(())
}

/// Read and validate a carrier file, normalizing its samples to [-1, 1].
pub fn read_carrier(path: &Path) -> Result<Carrier, CarrierError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    validate_spec(&spec)?;

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|v| v as f64 / 32768.0))
        .collect::<Result<Vec<f64>, _>>()?;

    debug!(
        "read carrier '{}': {} samples at {} Hz",
        path.display(),
        samples.len(),
        spec.sample_rate
    );

    Ok(Carrier {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write a carrier file, re-quantizing its samples to 16-bit PCM.
///
/// The container's data-size fields are finalized by the writer once all
/// samples are out.
pub fn write_carrier(path: &Path, carrier: &Carrier) -> Result<(), CarrierError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: carrier.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &carrier.samples {
        writer.write_sample((sample * 32767.0) as i16)?;
    }
    writer.finalize()?;

    debug!(
        "wrote carrier '{}': {} samples",
        path.display(),
        carrier.samples.len()
    );

    Ok(())
}
