//! WAV to FLAC transcoding pipeline
//!
//! Orchestrates the whole conversion: locate the PCM payload, configure
//! and bind an encoding session, then drive the chunked
//! read/convert/feed loop and finalize.

use crate::codec::flac::FlacSession;
use crate::codec::pcm;
use crate::error::{Error, Result};
use crate::format::wav::{WavHeader, WavReader};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Frames read, converted and fed per loop iteration.
pub const CHUNK_FRAMES: usize = 65536;

/// Transcode the WAV file at `input` into a FLAC file at `output`,
/// preserving sample rate, channel count and bit depth.
///
/// The encoded stream is written to a sibling `.partial` path and
/// renamed onto `output` only after a successful finalize, so a failed
/// run never leaves a half-written destination behind. An input with
/// zero payload frames succeeds and produces a valid empty-payload
/// stream.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
        return Err(Error::invalid_input("input and output paths must be non-empty"));
    }

    // Drop any stale destination up front so an interrupted run cannot
    // mix old trailing bytes with a new partial write.
    match fs::remove_file(output) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut reader = WavReader::open(input)?;
    let header = reader.header().clone();

    info!(
        input = %input.display(),
        sample_rate = header.sample_rate,
        channels = header.channels,
        bits_per_sample = header.bits_per_sample,
        frames = header.total_frames,
        "transcoding wav to flac"
    );

    let mut session = FlacSession::new(
        header.sample_rate,
        header.channels,
        header.bits_per_sample,
    )?;
    session.set_total_frames_estimate(header.total_frames as u64);

    let partial = partial_path(output);
    session.bind_to_file(&partial)?;

    match stream_frames(&mut reader, &mut session, &header) {
        Ok(()) => match fs::rename(&partial, output) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&partial);
                Err(e.into())
            }
        },
        Err(e) => {
            let _ = fs::remove_file(&partial);
            Err(e)
        }
    }
}

/// The chunked read → convert → feed loop, then finalize.
fn stream_frames(
    reader: &mut WavReader,
    session: &mut FlacSession,
    header: &WavHeader,
) -> Result<()> {
    // Scratch buffers are owned by this invocation; concurrent
    // transcodes never share state.
    let frame_bytes = header.bytes_per_frame();
    let mut raw = vec![0u8; CHUNK_FRAMES * frame_bytes];
    let mut samples: Vec<i32> = Vec::with_capacity(CHUNK_FRAMES * header.channels as usize);

    loop {
        let frames = reader.read_frames(&mut raw, CHUNK_FRAMES)?;
        if frames == 0 {
            break;
        }

        pcm::bytes_to_samples(&raw[..frames * frame_bytes], header.bits_per_sample, &mut samples)?;
        session.feed(&samples, frames)?;

        debug!(frames, remaining = reader.frames_remaining(), "fed chunk");
    }

    session.finish()
}

/// Sibling path the stream is written to before the final rename.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/out.flac")),
            PathBuf::from("/tmp/out.flac.partial")
        );
    }

    #[test]
    fn test_encode_rejects_empty_paths() {
        let result = encode(Path::new(""), Path::new("out.flac"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = encode(Path::new("in.wav"), Path::new(""));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
