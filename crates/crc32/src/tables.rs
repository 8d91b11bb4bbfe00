//! Const-fn CRC-32 lookup table generation.
//!
//! The 256-entry table is computed at compile time with `const fn` and
//! embedded directly in the binary. Entry `i` is the CRC register after
//! feeding the single byte `i` into a zeroed register: eight conditional
//! shift/XOR steps with the reflected polynomial.

// Indexing here uses loop indices bounded to 0..256 against [u32; 256].
#![allow(clippy::indexing_slicing)]

/// CRC-32 (ISO-HDLC / IEEE 802.3) reflected polynomial.
pub const CRC32_POLY: u32 = 0xEDB8_8320;

/// Generate a single lookup table entry.
///
/// Uses bit-by-bit computation with the reflected polynomial.
#[must_use]
pub const fn crc32_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = index as u32;
  let mut i = 0;
  while i < 8 {
    if crc & 1 != 0 {
      crc = (crc >> 1) ^ poly;
    } else {
      crc >>= 1;
    }
    i += 1;
  }
  crc
}

/// Generate the 256-entry byte-at-a-time lookup table.
#[must_use]
pub const fn generate_crc32_table(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;
  while i < 256 {
    table[i] = crc32_table_entry(poly, i as u8);
    i += 1;
  }
  table
}

/// The byte-at-a-time lookup table, computed at compile time.
pub static CRC32_TABLE: [u32; 256] = generate_crc32_table(CRC32_POLY);
