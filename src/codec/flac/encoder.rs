//! FLAC encoding session built on the flacenc engine
//!
//! A session owns the lifecycle of one compression run: configuration,
//! output binding, sample ingestion, finalization. The engine is driven
//! one block at a time and the serialized bitstream moves into the
//! bound sink.
//!
//! ## Example
//! ```ignore
//! let mut session = FlacSession::new(44100, 2, 16)?;
//! session.bind_to_file(Path::new("out.flac"))?;
//! session.feed(&samples, frames)?;
//! session.finish()?;
//! ```

use super::sink::{FileSink, StreamSink};
use crate::error::{Error, Result};
use flacenc::bitsink::ByteSink;
use flacenc::component::{BitRepr, Stream, StreamInfo};
use flacenc::config::Encoder as EngineConfig;
use flacenc::error::{Verify, Verified};
use flacenc::source::{Fill, FrameBuf};
use std::path::Path;
use tracing::debug;

/// Operational default compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 5;

/// Bytes handed to the bound sink per write request.
const SINK_WRITE_CHUNK: usize = 64 * 1024;

/// FLAC session configuration
///
/// Supplied once at session creation; immutable thereafter.
#[derive(Debug, Clone)]
pub struct FlacSessionConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels (1-8)
    pub channels: u32,
    /// Bits per sample (8 or 16)
    pub bits_per_sample: u32,
    /// Compression level (0-8)
    pub compression_level: u8,
}

impl FlacSessionConfig {
    /// Create a configuration with the default compression level.
    pub fn new(sample_rate: u32, channels: u32, bits_per_sample: u32) -> Self {
        FlacSessionConfig {
            sample_rate,
            channels,
            bits_per_sample,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Block size used by the engine for this compression level.
    pub fn block_size(&self) -> usize {
        match self.compression_level {
            0 | 1 => 1152,
            2 | 3 => 2048,
            4..=6 => 4096,
            _ => 4608,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 || self.sample_rate > 655_350 {
            return Err(Error::engine_init(format!(
                "invalid sample rate: {}. Valid range: 1-655350 Hz",
                self.sample_rate
            )));
        }

        if self.channels == 0 || self.channels > 8 {
            return Err(Error::engine_init(format!(
                "invalid channel count: {}. Valid range: 1-8",
                self.channels
            )));
        }

        if !matches!(self.bits_per_sample, 8 | 16) {
            return Err(Error::unsupported(format!(
                "{}-bit PCM is not supported (expected 8 or 16)",
                self.bits_per_sample
            )));
        }

        if self.compression_level > 8 {
            return Err(Error::engine_init(format!(
                "invalid compression level: {}. Valid range: 0-8",
                self.compression_level
            )));
        }

        Ok(())
    }
}

/// One-way session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Created,
    Bound,
    Finished,
}

/// One FLAC compression session.
///
/// Exactly one output binding is active per session; binding twice,
/// feeding before binding, or feeding after finishing are state errors.
/// `&mut self` on every transition enforces the single-caller ordering
/// statically, and dropping the session releases everything it owns.
pub struct FlacSession {
    config: FlacSessionConfig,
    engine_config: Verified<EngineConfig>,
    state: SessionState,
    sink: Option<Box<dyn StreamSink>>,
    samples: Vec<i32>,
    frames_fed: u64,
    total_frames_estimate: u64,
}

impl FlacSession {
    /// Create a session with the default compression level.
    pub fn new(sample_rate: u32, channels: u32, bits_per_sample: u32) -> Result<Self> {
        Self::with_config(FlacSessionConfig::new(sample_rate, channels, bits_per_sample))
    }

    /// Create a session from an explicit configuration.
    pub fn with_config(config: FlacSessionConfig) -> Result<Self> {
        config.validate()?;

        let mut engine_config = EngineConfig::default();
        engine_config.block_size = config.block_size();

        let engine_config = engine_config
            .into_verified()
            .map_err(|e| Error::engine_init(format!("engine rejected configuration: {:?}", e)))?;

        Ok(FlacSession {
            config,
            engine_config,
            state: SessionState::Created,
            sink: None,
            samples: Vec::new(),
            frames_fed: 0,
            total_frames_estimate: 0,
        })
    }

    /// Get the session configuration
    pub fn config(&self) -> &FlacSessionConfig {
        &self.config
    }

    /// Frames accepted so far
    pub fn frames_fed(&self) -> u64 {
        self.frames_fed
    }

    /// Advisory frame count hint. Used to presize the ingestion buffer;
    /// never correctness-critical.
    pub fn set_total_frames_estimate(&mut self, frames: u64) {
        self.total_frames_estimate = frames;
        let samples = (frames as usize).saturating_mul(self.config.channels as usize);
        if samples > self.samples.capacity() {
            self.samples.reserve(samples - self.samples.len());
        }
    }

    /// Bind the session to a destination file.
    ///
    /// Mutually exclusive with [`bind_to_stream`](Self::bind_to_stream);
    /// the transition into the bound state is one-way.
    pub fn bind_to_file(&mut self, path: &Path) -> Result<()> {
        self.ensure_unbound()?;

        let sink = FileSink::create(path)?;
        self.sink = Some(Box::new(sink));
        self.state = SessionState::Bound;

        Ok(())
    }

    /// Bind the session to a caller-supplied sink.
    pub fn bind_to_stream(&mut self, sink: Box<dyn StreamSink>) -> Result<()> {
        self.ensure_unbound()?;

        self.sink = Some(sink);
        self.state = SessionState::Bound;

        Ok(())
    }

    /// Push one interleaved batch of `frame_count` frames.
    ///
    /// May be called any number of times after binding and before
    /// finishing. The batch length must equal `frame_count * channels`.
    pub fn feed(&mut self, samples: &[i32], frame_count: usize) -> Result<()> {
        match self.state {
            SessionState::Bound => {}
            SessionState::Created => {
                return Err(Error::invalid_state("session has no bound output"));
            }
            SessionState::Finished => {
                return Err(Error::invalid_state("session is already finished"));
            }
        }

        let expected = frame_count * self.config.channels as usize;
        if samples.len() != expected {
            return Err(Error::encode(format!(
                "sample batch length {} does not match {} frames of {} channels",
                samples.len(),
                frame_count,
                self.config.channels
            )));
        }

        self.samples.extend_from_slice(samples);
        self.frames_fed += frame_count as u64;

        Ok(())
    }

    /// Drive the engine over everything fed so far and write the encoded
    /// stream through the bound sink.
    ///
    /// Safe with zero frames fed; the result is a valid empty-payload
    /// stream. Finishing an already-finished session is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        match self.state {
            SessionState::Bound => {}
            SessionState::Created => {
                return Err(Error::invalid_state("session has no bound output"));
            }
            // Tolerated, matching the historical finish-on-absent-session
            // behavior. Not an invitation to rely on it.
            SessionState::Finished => return Ok(()),
        }

        debug!(
            frames = self.frames_fed,
            estimated = self.total_frames_estimate,
            "driving engine over fed samples"
        );

        let encoded = self.run_engine()?;

        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| Error::invalid_state("bound session lost its sink"))?;

        for chunk in encoded.chunks(SINK_WRITE_CHUNK) {
            sink.write(chunk)
                .map_err(|e| Error::finalize(format!("sink write failed: {}", e)))?;
        }

        sink.flush()
            .map_err(|e| Error::finalize(format!("sink flush failed: {}", e)))?;

        if sink.is_seekable() {
            if let Ok(position) = sink.tell() {
                debug!(
                    bytes = position,
                    frames = self.frames_fed,
                    "flac stream finalized"
                );
            }
        }

        self.state = SessionState::Finished;

        Ok(())
    }

    fn ensure_unbound(&self) -> Result<()> {
        match self.state {
            SessionState::Created => Ok(()),
            SessionState::Bound => Err(Error::invalid_state("session is already bound")),
            SessionState::Finished => Err(Error::invalid_state("session is already finished")),
        }
    }

    /// Run the engine over the accumulated samples and serialize the
    /// resulting stream.
    ///
    /// Frames are encoded one block at a time. The trailing frame buffer
    /// is shrunk to the remainder before encoding, so the last frame
    /// keeps its true length and the decoded stream has exactly as many
    /// frames as were fed. With nothing fed the output is a bare header
    /// carrying a zero total-sample count.
    fn run_engine(&self) -> Result<Vec<u8>> {
        let channels = self.config.channels as usize;
        let block_size = self.config.block_size();

        let mut stream_info = StreamInfo::new(
            self.config.sample_rate as usize,
            channels,
            self.config.bits_per_sample as usize,
        )
        .map_err(|e| Error::engine_init(format!("engine rejected stream parameters: {:?}", e)))?;
        stream_info
            .set_block_sizes(block_size, block_size)
            .map_err(|e| Error::engine_init(format!("engine rejected block size: {:?}", e)))?;
        stream_info.set_total_samples(self.frames_fed as usize);

        let mut framebuf = FrameBuf::with_size(channels, block_size)
            .map_err(|e| Error::engine_init(format!("engine rejected frame buffer: {:?}", e)))?;

        let mut frames = Vec::new();
        let mut frame_size_bounds: Option<(usize, usize)> = None;
        for (frame_number, chunk) in self.samples.chunks(block_size * channels).enumerate() {
            let chunk_frames = chunk.len() / channels;
            if chunk_frames != framebuf.size() {
                framebuf.resize(chunk_frames);
            }
            framebuf
                .fill_interleaved(chunk)
                .map_err(|e| Error::encode(format!("frame buffering failed: {}", e)))?;

            let frame = flacenc::encode_fixed_size_frame(
                &self.engine_config,
                &framebuf,
                frame_number,
                &stream_info,
            )
            .map_err(|e| Error::encode(format!("engine encode failed: {:?}", e)))?;

            let frame_bytes = frame.count_bits() / 8;
            frame_size_bounds = Some(match frame_size_bounds {
                Some((min, max)) => (min.min(frame_bytes), max.max(frame_bytes)),
                None => (frame_bytes, frame_bytes),
            });
            frames.push(frame);
        }

        let (min_frame, max_frame) = frame_size_bounds.unwrap_or((0, 0));
        stream_info
            .set_frame_sizes(min_frame, max_frame)
            .map_err(|e| Error::encode(format!("engine rejected frame size bounds: {:?}", e)))?;

        let mut byte_sink = ByteSink::new();
        Stream::with_stream_info(stream_info)
            .write(&mut byte_sink)
            .map_err(|e| Error::encode(format!("bitstream serialization failed: {}", e)))?;
        for frame in &frames {
            frame
                .write(&mut byte_sink)
                .map_err(|e| Error::encode(format!("bitstream serialization failed: {}", e)))?;
        }

        Ok(byte_sink.as_slice().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = FlacSession::new(44100, 2, 16).unwrap();
        assert_eq!(session.config().sample_rate, 44100);
        assert_eq!(session.config().channels, 2);
        assert_eq!(session.config().bits_per_sample, 16);
        assert_eq!(session.config().compression_level, DEFAULT_COMPRESSION_LEVEL);
        assert_eq!(session.frames_fed(), 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            FlacSession::new(44100, 0, 16),
            Err(Error::EngineInit(_))
        ));
        assert!(matches!(
            FlacSession::new(0, 2, 16),
            Err(Error::EngineInit(_))
        ));
        assert!(matches!(
            FlacSession::new(44100, 2, 24),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_block_size_follows_level() {
        let mut config = FlacSessionConfig::new(44100, 2, 16);
        assert_eq!(config.block_size(), 4096);
        config.compression_level = 0;
        assert_eq!(config.block_size(), 1152);
        config.compression_level = 8;
        assert_eq!(config.block_size(), 4608);
    }

    #[test]
    fn test_feed_requires_binding() {
        let mut session = FlacSession::new(44100, 2, 16).unwrap();
        let result = session.feed(&[0, 0], 1);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_finish_requires_binding() {
        let mut session = FlacSession::new(44100, 2, 16).unwrap();
        assert!(matches!(
            session.finish(),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_feed_checks_batch_length() {
        use crate::codec::flac::sink::CallbackSink;

        let mut session = FlacSession::new(44100, 2, 16).unwrap();
        session
            .bind_to_stream(Box::new(CallbackSink::write_only(Box::new(|_| Ok(())))))
            .unwrap();

        // 3 samples cannot be 2 stereo frames
        let result = session.feed(&[0, 0, 0], 2);
        assert!(matches!(result, Err(Error::Encode(_))));
    }
}
