//! Kernel dispatch: selection and caching.
//!
//! This module provides the core dispatch primitives:
//!
//! - [`Candidate`]: A kernel with capability requirements
//! - [`Selected`]: The result of kernel selection
//! - [`select`]: Choose the best kernel from a candidate list
//! - [`Crc32Dispatcher`]: cached dispatcher for CRC-32 kernels
//!
//! # Design
//!
//! Algorithm crates register kernels as an ordered list of `Candidate`s,
//! best first. The dispatcher detects CPU features once, picks the first
//! candidate whose requirements are satisfied, and caches the selection.
//! Subsequent calls are a single indirect call.
//!
//! # Usage
//!
//! ```ignore
//! use platform::dispatch::{Candidate, Crc32Dispatcher, Crc32Fn, Selected, select};
//! use platform::caps::{x86, Caps};
//!
//! fn select_crc32() -> Selected<Crc32Fn> {
//!     let caps = platform::caps();
//!     select(caps, &[
//!         Candidate::new("x86_64/pclmul", x86::PCLMUL_READY, pclmul_kernel),
//!         Candidate::new("portable/bytewise", Caps::NONE, portable_kernel),
//!     ])
//! }
//!
//! static DISPATCHER: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32);
//! ```

use std::sync::OnceLock;

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/pclmul").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
///
/// Contains the selected kernel's name and function pointer.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
/// The last candidate should always have `requires = Caps::NONE` as a
/// portable fallback.
///
/// # Panics
///
/// Panics if `candidates` is empty or no candidate matches.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("No matching kernel found! Candidate list must include a portable fallback.");
}

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32 Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Signature for CRC-32 kernels: `fn(crc: u32, data: &[u8]) -> u32`.
///
/// `crc` is the raw register state (pre-inverted); kernels never apply the
/// final complement.
pub type Crc32Fn = fn(u32, &[u8]) -> u32;

/// Dispatcher for CRC-32 kernels.
///
/// Caches the selected kernel on first access via `OnceLock`. Thread-safe.
///
/// # Example
///
/// ```ignore
/// static DISPATCH: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32);
///
/// fn compute(crc: u32, data: &[u8]) -> u32 {
///     DISPATCH.call(crc, data)
/// }
/// ```
pub struct Crc32Dispatcher {
  inner: OnceLock<Selected<Crc32Fn>>,
  /// The selector function that chooses the best kernel.
  selector: fn() -> Selected<Crc32Fn>,
}

impl Crc32Dispatcher {
  /// Create a new dispatcher with the given selector function.
  ///
  /// The selector is called once on first access to choose the best kernel.
  #[must_use]
  pub const fn new(selector: fn() -> Selected<Crc32Fn>) -> Self {
    Self {
      inner: OnceLock::new(),
      selector,
    }
  }

  /// Get the selected kernel, initializing on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<Crc32Fn> {
    *self.inner.get_or_init(|| (self.selector)())
  }

  /// Get the name of the selected backend.
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }

  /// Call the selected kernel.
  #[inline]
  #[must_use]
  pub fn call(&self, crc: u32, data: &[u8]) -> u32 {
    (self.get().func)(crc, data)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn portable_crc32(_crc: u32, _data: &[u8]) -> u32 {
    0xDEADBEEF
  }

  fn fast_crc32(_crc: u32, _data: &[u8]) -> u32 {
    0xCAFEBABE
  }

  #[test]
  fn test_candidate_creation() {
    let c: Candidate<Crc32Fn> = Candidate::new("test", Caps::NONE, portable_crc32);
    assert_eq!(c.name, "test");
    assert_eq!(c.requires, Caps::NONE);
  }

  #[test]
  fn test_select_portable_fallback() {
    let candidates: &[Candidate<Crc32Fn>] = &[
      Candidate::new("fast", Caps::bit(0), fast_crc32),
      Candidate::new("portable", Caps::NONE, portable_crc32),
    ];

    let selected = select(Caps::NONE, candidates);
    assert_eq!(selected.name, "portable");
    assert_eq!((selected.func)(0, &[]), 0xDEADBEEF);
  }

  #[test]
  fn test_select_best_match() {
    let candidates: &[Candidate<Crc32Fn>] = &[
      Candidate::new("fast", Caps::bit(0), fast_crc32),
      Candidate::new("portable", Caps::NONE, portable_crc32),
    ];

    let selected = select(Caps::bit(0), candidates);
    assert_eq!(selected.name, "fast");
    assert_eq!((selected.func)(0, &[]), 0xCAFEBABE);
  }

  #[test]
  fn test_select_skips_unavailable() {
    // Caps have bit 0, but not bit 1
    let candidates: &[Candidate<Crc32Fn>] = &[
      Candidate::new("needs_bit1", Caps::bit(1), fast_crc32),
      Candidate::new("needs_bit0", Caps::bit(0), fast_crc32),
      Candidate::new("portable", Caps::NONE, portable_crc32),
    ];

    let selected = select(Caps::bit(0), candidates);
    assert_eq!(selected.name, "needs_bit0");
  }

  #[test]
  #[should_panic(expected = "No matching kernel")]
  fn test_select_no_fallback_panics() {
    let candidates: &[Candidate<Crc32Fn>] = &[Candidate::new("fast", Caps::bit(0), fast_crc32)];
    let _ = select(Caps::NONE, candidates);
  }

  fn test_selector() -> Selected<Crc32Fn> {
    Selected::new("test", portable_crc32)
  }

  #[test]
  fn test_crc32_dispatcher() {
    static DISPATCH: Crc32Dispatcher = Crc32Dispatcher::new(test_selector);

    let selected = DISPATCH.get();
    assert_eq!(selected.name, "test");

    // Second call should return cached result
    let selected2 = DISPATCH.get();
    assert_eq!(selected2.name, "test");

    assert_eq!(DISPATCH.call(0, &[]), 0xDEADBEEF);
  }

  #[test]
  fn test_dispatcher_backend_name() {
    static DISPATCH: Crc32Dispatcher = Crc32Dispatcher::new(test_selector);
    assert_eq!(DISPATCH.backend_name(), "test");
  }
}
