//! Container format handling
//!
//! This crate reads exactly one container family (RIFF/WAV) on the input
//! side; the compressed output container is produced by the encoder
//! engine.

pub mod wav;

pub use wav::{WavHeader, WavReader};
