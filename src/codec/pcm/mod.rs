//! PCM (Pulse Code Modulation) sample conversion
//!
//! Maps raw little-endian PCM bytes into the encoder engine's canonical
//! interleaved signed 32-bit representation. Stateless; no I/O.

use crate::error::{Error, Result};

/// Convert raw PCM bytes into interleaved `i32` samples.
///
/// 16-bit input is interpreted as signed little-endian and sign-extended.
/// 8-bit input follows the WAV convention of unsigned samples and is
/// zero-extended, so every converted value lands in `0..=255`. No
/// clipping is applied; input is assumed in range.
///
/// `out` is cleared and refilled, so a caller-owned buffer can be reused
/// across chunks.
pub fn bytes_to_samples(raw: &[u8], bits_per_sample: u32, out: &mut Vec<i32>) -> Result<()> {
    out.clear();

    match bits_per_sample {
        16 => {
            if raw.len() % 2 != 0 {
                return Err(Error::invalid_input(
                    "16-bit PCM data must have an even byte length",
                ));
            }
            out.extend(
                raw.chunks_exact(2)
                    .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as i32),
            );
        }
        8 => {
            out.extend(raw.iter().map(|&byte| byte as i32));
        }
        other => {
            return Err(Error::unsupported(format!(
                "{}-bit PCM is not supported (expected 8 or 16)",
                other
            )));
        }
    }

    Ok(())
}
