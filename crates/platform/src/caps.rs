//! CPU capability detection and representation.
//!
//! This module provides a unified capability model for all supported architectures.
//! It answers the question: "What instructions can I legally run on this machine?"
//!
//! # Design
//!
//! [`Caps`] is a 256-bit bitset representing available CPU features. Each bit
//! corresponds to a specific ISA extension. The bits are architecture-specific
//! but the API is uniform across all targets.
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86/x86_64 features
//! - Bits 64-127: aarch64 features
//! - Bits 128-255: reserved
//!
//! # Usage
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let c = platform::caps();
//! if c.has(x86::PCLMUL_READY) {
//!     // Use PCLMULQDQ folding path
//! }
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 256-bit feature bitset.
///
/// This is the core type for capability-based dispatch. Use [`has()`](Caps::has)
/// to check if required features are available.
///
/// # Thread Safety
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 4]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 4]);

  /// Create a capability set from raw words.
  ///
  /// This is primarily useful for testing. Normal usage should prefer the
  /// predefined constants.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 4]) -> Self {
    Self(words)
  }

  /// Check if all features in `required` are present.
  ///
  /// This is the core dispatch check, marked `#[inline(always)]` for zero overhead.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0]
      && (self.0[1] & required.0[1]) == required.0[1]
      && (self.0[2] & required.0[2]) == required.0[2]
      && (self.0[3] & required.0[3]) == required.0[3]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([
      self.0[0] | other.0[0],
      self.0[1] | other.0[1],
      self.0[2] | other.0[2],
      self.0[3] | other.0[3],
    ])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([
      self.0[0] & other.0[0],
      self.0[1] & other.0[1],
      self.0[2] & other.0[2],
      self.0[3] & other.0[3],
    ])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones() + self.0[3].count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bit must be 0-255 (enforced by type system via u8).
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    // Use match instead of indexing to satisfy const evaluation
    let mut bits = [0u64; 4];
    match word {
      0 => bits[0] = 1u64 << bit_in_word,
      1 => bits[1] = 1u64 << bit_in_word,
      2 => bits[2] = 1u64 << bit_in_word,
      _ => bits[3] = 1u64 << bit_in_word,
    }
    Self(bits)
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    let bits_word = match word {
      0 => self.0[0],
      1 => self.0[1],
      2 => self.0[2],
      _ => self.0[3],
    };
    (bits_word & (1u64 << bit_in_word)) != 0
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "Caps([{:#018x}, {:#018x}, {:#018x}, {:#018x}])",
      self.0[0], self.0[1], self.0[2], self.0[3]
    )
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features.
pub mod x86 {
  use super::Caps;

  // ─── SSE Family ───
  pub const SSE2: Caps = Caps::bit(0);
  pub const SSE3: Caps = Caps::bit(1);
  pub const SSSE3: Caps = Caps::bit(2);
  pub const SSE41: Caps = Caps::bit(3);
  pub const SSE42: Caps = Caps::bit(4);

  // ─── AVX Family ───
  pub const AVX: Caps = Caps::bit(6);
  pub const AVX2: Caps = Caps::bit(7);

  // ─── Crypto Extensions ───
  pub const AESNI: Caps = Caps::bit(10);
  pub const PCLMULQDQ: Caps = Caps::bit(11);

  // ─── Combined Capability Masks ───

  /// Everything the carryless-multiply folding kernel needs.
  ///
  /// PCLMULQDQ for the folds, SSE4.1 for the final 32-bit lane extract.
  pub const PCLMUL_READY: Caps = Caps([PCLMULQDQ.0[0] | SSE41.0[0], 0, 0, 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features.
pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(64); // Baseline on AArch64
  pub const AES: Caps = Caps::bit(65);
  pub const PMULL: Caps = Caps::bit(66);
  pub const CRC: Caps = Caps::bit(72);

  // ─── Combined Capability Masks ───

  /// Everything the ARMv8 CRC-extension kernel needs.
  pub const CRC_READY: Caps = Caps([0, CRC.0[1], 0, 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
