//! Output sinks for FLAC encoding sessions
//!
//! The session writes through [`StreamSink`] and never depends on a
//! concrete backend. `write` is mandatory; `seek` and `tell` are an
//! optional pair. A sink without them receives a strictly append-only
//! single-pass stream.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Destination for encoded bytes.
pub trait StreamSink {
    /// Write one run of encoded bytes. Mandatory.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Reposition the output cursor.
    fn seek(&mut self, _position: u64) -> Result<()> {
        Err(Error::unsupported("sink is not seekable"))
    }

    /// Report the current output cursor position.
    fn tell(&mut self) -> Result<u64> {
        Err(Error::unsupported("sink does not report positions"))
    }

    /// Whether `seek` and `tell` are both usable.
    fn is_seekable(&self) -> bool {
        false
    }

    /// Flush buffered bytes to the destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Direct-file sink backed by a buffered writer.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create (truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(FileSink {
            writer: BufWriter::new(file),
        })
    }
}

impl StreamSink for FileSink {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn seek(&mut self, position: u64) -> Result<()> {
        self.writer.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.writer.stream_position()?)
    }

    fn is_seekable(&self) -> bool {
        true
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write callback: receives each run of encoded bytes.
pub type WriteFn = Box<dyn FnMut(&[u8]) -> Result<()>>;
/// Seek callback: absolute byte offset into the output.
pub type SeekFn = Box<dyn FnMut(u64) -> Result<()>>;
/// Tell callback: reports the current output byte offset.
pub type TellFn = Box<dyn FnMut() -> Result<u64>>;

/// Caller-supplied sink built from closures.
///
/// State that a C API would thread through an opaque context pointer is
/// captured by the closures instead.
pub struct CallbackSink {
    write_fn: WriteFn,
    seek_fn: Option<SeekFn>,
    tell_fn: Option<TellFn>,
}

impl CallbackSink {
    /// Build a sink from a mandatory write callback and an optional
    /// seek/tell pair.
    ///
    /// Seeking without the ability to report the position afterwards is
    /// rejected with [`Error::InconsistentCallbacks`].
    pub fn new(
        write_fn: WriteFn,
        seek_fn: Option<SeekFn>,
        tell_fn: Option<TellFn>,
    ) -> Result<Self> {
        if seek_fn.is_some() && tell_fn.is_none() {
            return Err(Error::InconsistentCallbacks);
        }

        Ok(CallbackSink {
            write_fn,
            seek_fn,
            tell_fn,
        })
    }

    /// Build a write-only (non-seekable, single-pass) sink.
    pub fn write_only(write_fn: WriteFn) -> Self {
        CallbackSink {
            write_fn,
            seek_fn: None,
            tell_fn: None,
        }
    }
}

impl StreamSink for CallbackSink {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (self.write_fn)(data)
    }

    fn seek(&mut self, position: u64) -> Result<()> {
        match self.seek_fn.as_mut() {
            Some(seek_fn) => seek_fn(position),
            None => Err(Error::unsupported("sink is not seekable")),
        }
    }

    fn tell(&mut self) -> Result<u64> {
        match self.tell_fn.as_mut() {
            Some(tell_fn) => tell_fn(),
            None => Err(Error::unsupported("sink does not report positions")),
        }
    }

    fn is_seekable(&self) -> bool {
        self.seek_fn.is_some() && self.tell_fn.is_some()
    }
}
