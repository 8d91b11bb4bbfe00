//! CRC-32 (ISO-HDLC / IEEE 802.3) with automatic hardware acceleration.
//!
//! This crate computes the ubiquitous CRC-32 checksum (Ethernet FCS, gzip,
//! ZIP, PNG): reflected polynomial `0xEDB88320`, initial value `0xFFFFFFFF`,
//! final complement.
//!
//! # Backends
//!
//! The best kernel for the running CPU is selected once and cached:
//!
//! | Backend | Requires | Notes |
//! |---------|----------|-------|
//! | `x86_64/pclmul` | PCLMULQDQ + SSE4.1 | 4-lane 64-byte folding |
//! | `aarch64/crc` | CRC extension | hardware `crc32x` instructions |
//! | `portable/bytewise` | nothing | 256-entry table lookup |
//!
//! The folding kernel delegates inputs shorter than 64 bytes to the table
//! kernel, so the selected function is total over all input lengths.
//!
//! # Example
//!
//! ```rust
//! use traits::{Checksum, ChecksumCombine};
//! use crc32::Crc32;
//!
//! // One-shot computation
//! let data = b"123456789";
//! let crc = crc32::compute(data);
//! assert_eq!(crc, 0xCBF4_3926);
//!
//! // Streaming computation
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! // Combine independently computed halves
//! let (a, b) = data.split_at(4);
//! let combined = Crc32::combine(Crc32::checksum(a), Crc32::checksum(b), b.len());
//! assert_eq!(combined, crc);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod combine;
mod portable;
pub mod reference;
pub mod tables;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;


#[cfg(all(test, not(miri)))]
mod proptests;

use platform::dispatch::{Crc32Dispatcher, Crc32Fn, Selected};
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use platform::{
  dispatch::{select, Candidate},
  Caps,
};
use traits::{Checksum, ChecksumCombine};

use crate::combine::{combine_crc32, generate_shift8_matrix_32, Gf2Matrix32};

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Select the best CRC-32 kernel for the current platform.
#[cfg(target_arch = "x86_64")]
fn select_crc32() -> Selected<Crc32Fn> {
  let caps = platform::caps();
  select(
    caps,
    &[
      Candidate::new("x86_64/pclmul", platform::caps::x86::PCLMUL_READY, x86_64::crc32_pclmul_safe),
      Candidate::new(portable::BYTEWISE_KERNEL_NAME, Caps::NONE, portable::crc32_bytewise),
    ],
  )
}

#[cfg(target_arch = "aarch64")]
fn select_crc32() -> Selected<Crc32Fn> {
  let caps = platform::caps();
  select(
    caps,
    &[
      Candidate::new("aarch64/crc", platform::caps::aarch64::CRC_READY, aarch64::crc32_arm_safe),
      Candidate::new(portable::BYTEWISE_KERNEL_NAME, Caps::NONE, portable::crc32_bytewise),
    ],
  )
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn select_crc32() -> Selected<Crc32Fn> {
  Selected::new(portable::BYTEWISE_KERNEL_NAME, portable::crc32_bytewise)
}

/// Static dispatcher for CRC-32.
static CRC32_DISPATCHER: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32);

// ─────────────────────────────────────────────────────────────────────────────
// Raw-state API
// ─────────────────────────────────────────────────────────────────────────────

/// Initial CRC register value.
pub const INITIAL: u32 = 0xFFFF_FFFF;

/// Update raw CRC state with a buffer.
///
/// `state` is the pre-inverted register (start from [`INITIAL`]); apply
/// [`finalize`] to obtain the checksum.
#[inline]
#[must_use]
pub fn update(state: u32, data: &[u8]) -> u32 {
  CRC32_DISPATCHER.call(state, data)
}

/// Update raw CRC state with a single byte.
///
/// Equivalent to `update(state, &[byte])`; single-byte and buffered updates
/// are interchangeable.
#[inline]
#[must_use]
pub fn update_byte(state: u32, byte: u8) -> u32 {
  portable::crc32_bytewise(state, &[byte])
}

/// Finalize raw CRC state into a checksum (bitwise complement).
#[inline]
#[must_use]
pub const fn finalize(state: u32) -> u32 {
  state ^ !0
}

/// Compute the CRC-32 checksum of a buffer in one shot.
#[inline]
#[must_use]
pub fn compute(data: &[u8]) -> u32 {
  finalize(update(INITIAL, data))
}

/// Get the name of the currently selected backend.
///
/// Returns the implementation name (e.g., "portable/bytewise", "x86_64/pclmul").
#[must_use]
pub fn selected_backend() -> &'static str {
  CRC32_DISPATCHER.backend_name()
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming hasher
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 checksum (IEEE 802.3 / ISO-HDLC).
///
/// Used in Ethernet FCS, ZIP, gzip, PNG, and many other formats.
///
/// # Properties
///
/// - **Polynomial**: 0x04C11DB7 (normal), 0xEDB88320 (reflected)
/// - **Initial value**: 0xFFFFFFFF
/// - **Final XOR**: 0xFFFFFFFF
/// - **Reflect input/output**: Yes
#[derive(Clone)]
pub struct Crc32 {
  state: u32,
}

impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Crc32 {
  /// Pre-computed shift-by-8 matrix for combine.
  const SHIFT8_MATRIX: Gf2Matrix32 = generate_shift8_matrix_32(tables::CRC32_POLY);

  /// Create a hasher to resume from a previous CRC value.
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self { state: crc ^ !0 }
  }

  /// Get the name of the currently selected backend.
  #[must_use]
  pub fn backend_name() -> &'static str {
    selected_backend()
  }
}

impl Checksum for Crc32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self { state: !0 }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self { state: initial ^ !0 }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state = CRC32_DISPATCHER.call(self.state, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.state ^ !0
  }

  #[inline]
  fn reset(&mut self) {
    self.state = !0;
  }
}

impl ChecksumCombine for Crc32 {
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    combine_crc32(crc_a, crc_b, len_b, Self::SHIFT8_MATRIX)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  const TEST_DATA: &[u8] = b"123456789";

  #[test]
  fn test_compute_check_value() {
    assert_eq!(compute(TEST_DATA), 0xCBF4_3926);
  }

  #[test]
  fn test_compute_fox() {
    assert_eq!(compute(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
  }

  #[test]
  fn test_compute_empty() {
    assert_eq!(compute(&[]), 0);
    assert_eq!(Crc32::checksum(&[]), 0);
  }

  #[test]
  fn test_raw_state_roundtrip() {
    let state = update(INITIAL, TEST_DATA);
    assert_eq!(finalize(state), 0xCBF4_3926);
  }

  #[test]
  fn test_update_byte_matches_buffer() {
    let mut state = INITIAL;
    for &b in TEST_DATA {
      state = update_byte(state, b);
    }
    assert_eq!(state, update(INITIAL, TEST_DATA));
    assert_eq!(finalize(state), 0xCBF4_3926);
  }

  #[test]
  fn test_streaming() {
    let oneshot = Crc32::checksum(TEST_DATA);

    let mut hasher = Crc32::new();
    hasher.update(&TEST_DATA[..5]);
    hasher.update(&TEST_DATA[5..]);
    assert_eq!(hasher.finalize(), oneshot);
  }

  #[test]
  fn test_streaming_chunked() {
    let oneshot = Crc32::checksum(TEST_DATA);

    let mut hasher = Crc32::new();
    for chunk in TEST_DATA.chunks(3) {
      hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), oneshot);
  }

  #[test]
  fn test_finalize_is_idempotent() {
    let mut hasher = Crc32::new();
    hasher.update(TEST_DATA);
    assert_eq!(hasher.finalize(), hasher.finalize());
  }

  #[test]
  fn test_reset() {
    let mut hasher = Crc32::new();
    hasher.update(b"some data");
    hasher.reset();
    hasher.update(TEST_DATA);
    assert_eq!(hasher.finalize(), Crc32::checksum(TEST_DATA));
  }

  #[test]
  fn test_resume() {
    let mut h1 = Crc32::new();
    h1.update(&TEST_DATA[..5]);
    let partial = h1.finalize();

    let mut h2 = Crc32::resume(partial);
    h2.update(&TEST_DATA[5..]);
    assert_eq!(h2.finalize(), Crc32::checksum(TEST_DATA));
  }

  #[test]
  fn test_with_initial_matches_resume() {
    let partial = Crc32::checksum(&TEST_DATA[..4]);

    let mut h = Crc32::with_initial(partial);
    h.update(&TEST_DATA[4..]);
    assert_eq!(h.finalize(), Crc32::checksum(TEST_DATA));
  }

  #[test]
  fn test_update_vectored() {
    let bufs: [&[u8]; 3] = [b"123", b"456", b"789"];
    assert_eq!(Crc32::checksum_vectored(&bufs), 0xCBF4_3926);
  }

  #[test]
  fn test_combine() {
    let data = b"hello world";
    let (a, b) = data.split_at(6);

    let crc_a = Crc32::checksum(a);
    let crc_b = Crc32::checksum(b);
    let combined = Crc32::combine(crc_a, crc_b, b.len());

    assert_eq!(combined, Crc32::checksum(data));
  }

  #[test]
  fn test_combine_all_splits() {
    for split in 0..=TEST_DATA.len() {
      let (a, b) = TEST_DATA.split_at(split);
      let crc_a = Crc32::checksum(a);
      let crc_b = Crc32::checksum(b);
      let combined = Crc32::combine(crc_a, crc_b, b.len());
      assert_eq!(combined, Crc32::checksum(TEST_DATA), "Failed at split {split}");
    }
  }

  #[test]
  fn test_default_matches_new() {
    let mut a = Crc32::default();
    let mut b = Crc32::new();
    a.update(TEST_DATA);
    b.update(TEST_DATA);
    assert_eq!(a.finalize(), b.finalize());
  }

  #[test]
  fn test_backend_name_not_empty() {
    assert!(!Crc32::backend_name().is_empty());
    assert!(!selected_backend().is_empty());
  }
}
