//! Converts a scroll's raw bytes into the codewords that seed platter 0.

use crate::error::Fault;

/// Converts big-endian 4-byte groups into codewords.
///
/// Fails with [`Fault::MalformedScroll`] when `scroll`'s length is not a
/// multiple of four.
pub fn load(scroll: &[u8]) -> Result<Vec<u32>, Fault> {
    if scroll.len() % 4 != 0 {
        return Err(Fault::MalformedScroll(scroll.len()));
    }
    Ok(scroll
        .chunks_exact(4)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect())
}
