//! Chunked reader over the PCM payload of a WAV file

use super::header::WavHeader;
use super::SCAN_PREFIX_LEN;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Reader positioned at the PCM payload of a WAV file.
///
/// Opening reads the scan prefix, locates the header, and leaves the
/// cursor on the first payload byte. Subsequent reads hand out whole
/// interleaved frames until the derived frame count is exhausted.
pub struct WavReader {
    reader: BufReader<File>,
    header: WavHeader,
    frames_read: u64,
}

impl WavReader {
    /// Open a WAV file and position the cursor at the payload start.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut prefix = vec![0u8; SCAN_PREFIX_LEN];
        let filled = read_up_to(&mut reader, &mut prefix)?;
        prefix.truncate(filled);

        let header = WavHeader::locate(&prefix)?;

        reader.seek(SeekFrom::Start(header.payload_start()))?;

        Ok(WavReader {
            reader,
            header,
            frames_read: 0,
        })
    }

    /// Get the parsed header
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// Frames not yet handed out
    pub fn frames_remaining(&self) -> u64 {
        self.header.total_frames as u64 - self.frames_read
    }

    /// Read up to `max_frames` whole frames into `buf`.
    ///
    /// Returns the number of frames read; zero once the payload is
    /// exhausted. `buf` must hold at least `max_frames` frames.
    pub fn read_frames(&mut self, buf: &mut [u8], max_frames: usize) -> Result<usize> {
        let frames = max_frames.min(self.frames_remaining() as usize);
        if frames == 0 {
            return Ok(0);
        }

        let byte_len = frames * self.header.bytes_per_frame();
        self.reader
            .read_exact(&mut buf[..byte_len])
            .map_err(|e| Error::format(format!("failed to read PCM payload: {}", e)))?;

        self.frames_read += frames as u64;

        Ok(frames)
    }
}

/// Fill `buf` as far as the source allows; short files are not an error
/// at this stage.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
