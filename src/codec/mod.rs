//! Codec support (sample conversion and encoding)

pub mod flac;
pub mod pcm;

pub use flac::{FlacSession, FlacSessionConfig};
pub use pcm::bytes_to_samples;
