//! aarch64 hardware CRC-32 kernel (ARMv8 CRC extension).
//!
//! Uses the dedicated `crc32x`/`crc32w`/`crc32h`/`crc32b` instructions,
//! consuming 8 bytes per instruction on the main path.
//!
//! # Safety
//!
//! Uses `unsafe` for aarch64 intrinsics. Callers must ensure the CRC
//! extension is available before executing this path (the dispatcher does
//! this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::*;

/// CRC-32 update using the ARMv8 CRC extension.
///
/// `crc` is the raw register state (pre-inverted).
#[inline]
#[target_feature(enable = "crc")]
pub unsafe fn crc32_arm(crc: u32, data: &[u8]) -> u32 {
  let mut state = crc;

  let mut chunks8 = data.chunks_exact(8);
  for chunk in chunks8.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    state = __crc32d(state, u64::from_le_bytes(bytes));
  }

  let mut chunks4 = chunks8.remainder().chunks_exact(4);
  for chunk in chunks4.by_ref() {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(chunk);
    state = __crc32w(state, u32::from_le_bytes(bytes));
  }

  let mut chunks2 = chunks4.remainder().chunks_exact(2);
  for chunk in chunks2.by_ref() {
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(chunk);
    state = __crc32h(state, u16::from_le_bytes(bytes));
  }

  for &b in chunks2.remainder() {
    state = __crc32b(state, b);
  }

  state
}

/// Safe wrapper for the ARMv8 CRC extension kernel.
#[inline]
pub fn crc32_arm_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies the CRC extension before selecting this kernel.
  unsafe { crc32_arm(crc, data) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::portable::crc32_bytewise;

  fn crc_available() -> bool {
    platform::caps().has(platform::caps::aarch64::CRC_READY)
  }

  #[test]
  fn test_matches_bytewise_across_lengths() {
    if !crc_available() {
      return;
    }

    for len in [0usize, 1, 2, 3, 4, 7, 8, 9, 15, 16, 17, 63, 64, 65, 127, 128, 1024, 4096] {
      let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect();
      let fast = crc32_arm_safe(!0, &data);
      let slow = crc32_bytewise(!0, &data);
      assert_eq!(fast, slow, "mismatch at len={len}");
    }
  }

  #[test]
  fn test_large_input() {
    if !crc_available() {
      return;
    }

    let data: Vec<u8> = (0..1 << 20).map(|i| (i as u8).wrapping_mul(17)).collect();
    assert_eq!(crc32_arm_safe(!0, &data), crc32_bytewise(!0, &data));
  }
}
