//! Portable byte-at-a-time CRC-32 kernel.
//!
//! One table lookup per input byte against the 256-entry compile-time table.
//! This is the universal fallback: every platform can run it, and the
//! vectorized kernels delegate short inputs to it.

use crate::tables::CRC32_TABLE;

/// Canonical kernel name for the byte-at-a-time table lookup kernel.
pub(crate) const BYTEWISE_KERNEL_NAME: &str = "portable/bytewise";

/// Update CRC-32 state using the byte-at-a-time lookup table.
///
/// `crc` is the raw register state (pre-inverted). No finalization is
/// applied here.
#[inline]
#[allow(clippy::indexing_slicing)] // index is 0..=255 by mask, table is [u32; 256]
pub fn crc32_bytewise(mut crc: u32, data: &[u8]) -> u32 {
  for &b in data {
    let index = ((crc ^ (b as u32)) & 0xFF) as usize;
    crc = CRC32_TABLE[index] ^ (crc >> 8);
  }
  crc
}
