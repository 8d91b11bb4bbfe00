//! Core traits for checksum algorithms.
//!
//! This crate provides the foundational traits that every checksum
//! implementation in the workspace conforms to. It has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Checksum`] | Streaming checksum computation | CRC-32 |
//! | [`ChecksumCombine`] | Parallel checksum combination | CRC with O(log n) combine |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
