//! WAV audio format support
//!
//! This module locates and interprets the PCM payload inside RIFF/WAV
//! files, including loosely-structured ones that carry vendor padding
//! chunks between the format description and the payload.

pub mod header;
pub mod reader;

pub use header::WavHeader;
pub use reader::WavReader;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// How many bytes of the file start are scanned for the payload marker.
///
/// Files whose `data` tag appears later than this are unsupported by
/// design. The window is large enough to skip over vendor padding such
/// as Apple's 4 KiB FLLR chunk.
pub const SCAN_PREFIX_LEN: usize = 64 * 1024;

/// Canonical fixed-header field offsets, relative to the file start.
/// The leading RIFF/WAVE/fmt section always precedes the payload marker
/// in a conforming file.
pub(crate) const RIFF_SIZE_OFFSET: usize = 4;
pub(crate) const CHANNELS_OFFSET: usize = 22;
pub(crate) const SAMPLE_RATE_OFFSET: usize = 24;
pub(crate) const BITS_PER_SAMPLE_OFFSET: usize = 34;

/// Minimum length of a parseable fixed header (RIFF + fmt chunks).
pub(crate) const MIN_HEADER_LEN: usize = 44;
