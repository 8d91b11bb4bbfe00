//! Bitwise reference implementation.
//!
//! This module provides the canonical "source of truth" for CRC-32
//! computation. It processes one bit at a time, making it:
//!
//! - **Obviously correct**: The algorithm directly mirrors the mathematical definition
//! - **Audit-friendly**: ~10 lines of code, no lookup tables
//! - **Const-evaluable**: Can verify check values at compile time
//!
//! All optimized kernels (bytewise table lookup, carryless-multiply folding,
//! hardware CRC instructions) must produce identical results to this function.
//!
//! # Performance
//!
//! This is intentionally slow (~8 operations per bit). Use for correctness
//! verification and test oracles only.

/// Bitwise CRC-32 computation (reflected, LSB-first).
///
/// # Arguments
///
/// * `poly` - Reflected polynomial (0xEDB88320 for CRC-32 ISO-HDLC)
/// * `init` - Initial register value (typically 0xFFFFFFFF)
/// * `data` - Input bytes
///
/// # Returns
///
/// The raw CRC register state (caller applies final XOR if needed).
#[must_use]
#[allow(clippy::indexing_slicing)] // index is bounded by the loop condition
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Verification
// ─────────────────────────────────────────────────────────────────────────────

// Verify the reference implementation against the standard check value at
// compile time. If this fails, the build fails.
const _: () = {
  const CHECK_INPUT: &[u8] = b"123456789";
  let crc = crc32_bitwise(crate::tables::CRC32_POLY, !0u32, CHECK_INPUT) ^ !0u32;
  assert!(crc == 0xCBF4_3926);
};
