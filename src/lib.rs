//! wavflac - lossless WAV to FLAC transcoding
//!
//! Converts uncompressed PCM audio in a WAV container into a FLAC
//! stream, preserving sample rate, channel count and bit depth. The
//! compression math is delegated to an opaque engine; this crate owns
//! the transcoding pipeline around it.
//!
//! # Architecture
//!
//! - `format`: WAV payload location and chunked PCM reading
//! - `codec`: PCM sample conversion and the FLAC encoding session
//! - `transcode`: the read → convert → feed pipeline
//!
//! The single-call entry point is [`encode`]:
//!
//! ```no_run
//! use std::path::Path;
//!
//! wavflac_lib::encode(Path::new("in.wav"), Path::new("out.flac"))?;
//! # Ok::<(), wavflac_lib::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod transcode;

pub use error::{Error, Result};
pub use transcode::encode;

/// wavflac version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the wavflac library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the wavflac library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt().with_env_filter(level).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verbose, false);
        assert_eq!(config.debug, false);
    }

    #[test]
    fn test_init() {
        let config = Config::default();
        assert!(init(config).is_ok());
    }
}
