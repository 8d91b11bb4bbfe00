//! CPU detection, capabilities, and kernel dispatch.
//!
//! This crate is the single source of truth for CPU feature detection and
//! kernel selection across the workspace.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine (capabilities)
//! - [`dispatch::Candidate`] / [`dispatch::Selected`]: kernel selection
//! - [`dispatch::Crc32Dispatcher`]: cached runtime dispatch for CRC-32 kernels
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::PCLMUL_READY) {
//!     // Use PCLMULQDQ folding kernel
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: Algorithms query `platform::caps()` instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`, avoiding runtime
//!    overhead.
//! 3. **Cached otherwise**: Runtime detection runs once per process and is cached in a `OnceLock`.
//! 4. **Miri-safe**: Under Miri, always returns portable-only caps.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

pub mod caps;
mod detect;
pub mod dispatch;

pub use caps::Caps;

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// Results are cached in a `OnceLock`; detection runs once per process.
///
/// # Miri
///
/// Under Miri, always returns the empty capability set to avoid
/// interpreting SIMD intrinsics.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Detect capabilities without caching.
///
/// This is useful for testing or when you need fresh detection.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  detect::detect_uncached()
}
