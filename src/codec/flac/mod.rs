//! FLAC encoding support
//!
//! FLAC (Free Lossless Audio Codec) output via the pure-Rust flacenc
//! engine, wrapped in a session type with swappable output sinks.

pub mod encoder;
pub mod sink;

pub use encoder::{FlacSession, FlacSessionConfig, DEFAULT_COMPRESSION_LEVEL};
pub use sink::{CallbackSink, FileSink, SeekFn, StreamSink, TellFn, WriteFn};

/// FLAC stream magic number
pub const FLAC_MAGIC: &[u8; 4] = b"fLaC";
