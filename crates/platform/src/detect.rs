//! Runtime CPU detection.
//!
//! This module provides the `caps()` function that returns detected CPU
//! capabilities. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via CPUID on x86_64, auxv/sysctl on aarch64)
//! - Caching (via `OnceLock`)
//! - Miri fallback (always returns the empty set)

use crate::caps::Caps;

/// Get detected CPU capabilities, cached after the first call.
///
/// Under Miri, always returns the empty set to avoid interpreting SIMD
/// intrinsics.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Caps> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }
}

/// Detect capabilities without caching.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    detect_x86_64()
  }

  #[cfg(target_arch = "aarch64")]
  {
    detect_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
fn detect_x86_64() -> Caps {
  // Compile-time features first, then runtime-detected features on top.
  compile_time_x86_64().union(runtime_x86_64())
}

/// Compile-time detected x86_64 features.
#[cfg(target_arch = "x86_64")]
const fn compile_time_x86_64() -> Caps {
  use crate::caps::x86;

  // SSE2 is baseline on x86_64. Mutable when target_feature attributes
  // enable further feature unions.
  #[allow(unused_mut)]
  let mut bits = x86::SSE2;

  #[cfg(target_feature = "sse3")]
  {
    bits = bits.union(x86::SSE3);
  }

  #[cfg(target_feature = "ssse3")]
  {
    bits = bits.union(x86::SSSE3);
  }

  #[cfg(target_feature = "sse4.1")]
  {
    bits = bits.union(x86::SSE41);
  }

  #[cfg(target_feature = "sse4.2")]
  {
    bits = bits.union(x86::SSE42);
  }

  #[cfg(target_feature = "avx")]
  {
    bits = bits.union(x86::AVX);
  }

  #[cfg(target_feature = "avx2")]
  {
    bits = bits.union(x86::AVX2);
  }

  #[cfg(target_feature = "aes")]
  {
    bits = bits.union(x86::AESNI);
  }

  #[cfg(target_feature = "pclmulqdq")]
  {
    bits = bits.union(x86::PCLMULQDQ);
  }

  bits
}

/// Runtime detected x86_64 features.
#[cfg(target_arch = "x86_64")]
fn runtime_x86_64() -> Caps {
  use crate::caps::x86;

  let mut bits = Caps::NONE;

  if std::arch::is_x86_feature_detected!("sse3") {
    bits |= x86::SSE3;
  }
  if std::arch::is_x86_feature_detected!("ssse3") {
    bits |= x86::SSSE3;
  }
  if std::arch::is_x86_feature_detected!("sse4.1") {
    bits |= x86::SSE41;
  }
  if std::arch::is_x86_feature_detected!("sse4.2") {
    bits |= x86::SSE42;
  }
  if std::arch::is_x86_feature_detected!("avx") {
    bits |= x86::AVX;
  }
  if std::arch::is_x86_feature_detected!("avx2") {
    bits |= x86::AVX2;
  }
  if std::arch::is_x86_feature_detected!("aes") {
    bits |= x86::AESNI;
  }
  if std::arch::is_x86_feature_detected!("pclmulqdq") {
    bits |= x86::PCLMULQDQ;
  }

  bits
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
fn detect_aarch64() -> Caps {
  use crate::caps::aarch64;

  // NEON is baseline on AArch64
  let bits = aarch64::NEON;
  let bits = bits.union(compile_time_aarch64());
  bits.union(runtime_aarch64())
}

/// Compile-time detected aarch64 features.
#[cfg(target_arch = "aarch64")]
const fn compile_time_aarch64() -> Caps {
  // Import is used when target_feature attributes are enabled at compile time.
  #[allow(unused_imports)]
  use crate::caps::aarch64;

  // Mutable when target_feature attributes enable feature unions.
  #[allow(unused_mut)]
  let mut bits = Caps::NONE;

  #[cfg(target_feature = "aes")]
  {
    bits = bits.union(aarch64::AES);
    bits = bits.union(aarch64::PMULL); // PMULL is bundled with AES
  }

  #[cfg(target_feature = "crc")]
  {
    bits = bits.union(aarch64::CRC);
  }

  bits
}

/// Runtime detected aarch64 features.
#[cfg(target_arch = "aarch64")]
fn runtime_aarch64() -> Caps {
  use crate::caps::aarch64;

  let mut bits = Caps::NONE;

  if std::arch::is_aarch64_feature_detected!("aes") {
    bits |= aarch64::AES;
    bits |= aarch64::PMULL;
  }

  if std::arch::is_aarch64_feature_detected!("crc") {
    bits |= aarch64::CRC;
  }

  bits
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
