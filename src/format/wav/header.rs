//! WAV header location and interpretation
//!
//! The header is not walked chunk by chunk. Instead the payload marker is
//! found with a raw substring search over a fixed-size file prefix, and
//! the format fields are read from the canonical fixed offsets. This
//! tolerates non-standard chunks between the format description and the
//! payload (for example Apple's FLLR padding), which a strict chunk
//! walker would have to understand to skip.

use super::{
    BITS_PER_SAMPLE_OFFSET, CHANNELS_OFFSET, DATA_CHUNK, MIN_HEADER_LEN, RIFF_MAGIC,
    RIFF_SIZE_OFFSET, SAMPLE_RATE_OFFSET, WAVE_MAGIC,
};
use crate::error::{Error, Result};

/// Parsed WAV header fields needed for encoding.
///
/// Immutable once computed.
#[derive(Debug, Clone)]
pub struct WavHeader {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u32,
    /// Bits per sample (8 or 16)
    pub bits_per_sample: u32,
    /// Byte offset of the `data` tag within the file
    pub data_offset: u32,
    /// Total sample frames in the payload
    pub total_frames: u32,
}

impl WavHeader {
    /// Locate the payload marker in a file prefix and extract the header.
    ///
    /// `prefix` holds at most the first [`SCAN_PREFIX_LEN`] bytes of the
    /// file; a marker beyond that window yields [`Error::PayloadNotFound`].
    ///
    /// The frame count is derived from the whole-file size field rather
    /// than the length stored with the `data` tag, which is inaccurate in
    /// some producers' files.
    ///
    /// [`SCAN_PREFIX_LEN`]: super::SCAN_PREFIX_LEN
    pub fn locate(prefix: &[u8]) -> Result<Self> {
        if prefix.len() < MIN_HEADER_LEN {
            return Err(Error::format(format!(
                "file too short for a WAV header: {} bytes",
                prefix.len()
            )));
        }

        if &prefix[0..4] != RIFF_MAGIC {
            return Err(Error::format("not a valid RIFF file"));
        }

        if &prefix[8..12] != WAVE_MAGIC {
            return Err(Error::format("not a valid WAVE file"));
        }

        let data_offset = find_tag(prefix, DATA_CHUNK).ok_or(Error::PayloadNotFound)?;

        let riff_size = read_u32(prefix, RIFF_SIZE_OFFSET);
        let channels = read_u16(prefix, CHANNELS_OFFSET) as u32;
        let sample_rate = read_u32(prefix, SAMPLE_RATE_OFFSET);
        let bits_per_sample = read_u16(prefix, BITS_PER_SAMPLE_OFFSET) as u32;

        if !matches!(bits_per_sample, 8 | 16) {
            return Err(Error::unsupported(format!(
                "{}-bit PCM is not supported (expected 8 or 16)",
                bits_per_sample
            )));
        }

        if channels == 0 {
            return Err(Error::format("invalid channel count: 0"));
        }

        if sample_rate == 0 {
            return Err(Error::format("invalid sample rate: 0"));
        }

        // The size field stores (actual file size - 8), and the payload
        // bytes start 8 bytes past the tag (tag plus 32-bit length).
        let frame_bytes = (channels * bits_per_sample / 8) as u64;
        let payload_bytes =
            (riff_size as u64 + 8).saturating_sub(data_offset as u64 + 8);
        let total_frames = (payload_bytes / frame_bytes) as u32;

        Ok(WavHeader {
            sample_rate,
            channels,
            bits_per_sample,
            data_offset: data_offset as u32,
            total_frames,
        })
    }

    /// Byte offset of the first payload byte.
    pub fn payload_start(&self) -> u64 {
        self.data_offset as u64 + 8
    }

    /// Size of one interleaved frame in bytes.
    pub fn bytes_per_frame(&self) -> usize {
        (self.channels * self.bits_per_sample / 8) as usize
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.total_frames as f64 / self.sample_rate as f64
    }
}

/// Raw substring search for a 4-byte tag. Returns the first match.
fn find_tag(haystack: &[u8], tag: &[u8; 4]) -> Option<usize> {
    haystack.windows(tag.len()).position(|window| window == tag)
}

fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}
