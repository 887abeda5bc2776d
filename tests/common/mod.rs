//! Common test utilities
//!
//! In-memory WAV builders for test fixtures, including the
//! loosely-structured variant with a vendor padding chunk between the
//! format description and the payload.

#![allow(dead_code)]

use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// Format parameters for a generated WAV fixture.
pub struct WavSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavSpec {
    pub fn cd_stereo() -> Self {
        WavSpec {
            sample_rate: 44100,
            channels: 2,
            bits_per_sample: 16,
        }
    }

    pub fn mono_8bit() -> Self {
        WavSpec {
            sample_rate: 16000,
            channels: 1,
            bits_per_sample: 8,
        }
    }
}

/// Build a complete WAV file image: RIFF header, fmt chunk, optional
/// junk chunk (mimicking Apple's FLLR padding), then the data chunk.
pub fn build_wav(spec: &WavSpec, payload: &[u8], junk: Option<&[u8]>) -> Vec<u8> {
    let junk_len = junk.map_or(0, |j| 8 + j.len());
    let riff_size = 36 + junk_len + payload.len();

    let mut out = Vec::with_capacity(riff_size + 8);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(riff_size as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&spec.channels.to_le_bytes());
    out.extend_from_slice(&spec.sample_rate.to_le_bytes());
    let block_align = spec.channels * (spec.bits_per_sample / 8);
    let byte_rate = spec.sample_rate * block_align as u32;
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&spec.bits_per_sample.to_le_bytes());

    if let Some(junk) = junk {
        out.extend_from_slice(b"FLLR");
        out.extend_from_slice(&(junk.len() as u32).to_le_bytes());
        out.extend_from_slice(junk);
    }

    out.extend_from_slice(b"data");
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);

    out
}

/// Write a WAV fixture to disk.
pub fn write_wav(path: &Path, spec: &WavSpec, payload: &[u8], junk: Option<&[u8]>) {
    fs::write(path, build_wav(spec, payload, junk)).expect("failed to write WAV fixture");
}

/// Interleaved 16-bit sine samples, one detuned tone per channel.
pub fn sine_i16(frames: usize, channels: usize) -> Vec<i16> {
    let mut samples = Vec::with_capacity(frames * channels);
    for frame in 0..frames {
        for channel in 0..channels {
            let t = frame as f32 / 44100.0;
            let frequency = 440.0 + 110.0 * channel as f32;
            let value = (0.5 * (2.0 * PI * frequency * t).sin() * 32767.0) as i16;
            samples.push(value);
        }
    }
    samples
}

/// Serialize i16 samples to little-endian PCM bytes.
pub fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
