//! x86_64 carryless-multiply CRC-32 kernel (PCLMULQDQ folding).
//!
//! Implements the folded-reduction scheme from Intel's "Fast CRC Computation
//! for Generic Polynomials Using PCLMULQDQ Instruction" white paper:
//!
//! 1. Load four 128-bit lanes (one 64-byte block) and XOR the incoming state
//!    into the low 32 bits of lane 0.
//! 2. Fold each subsequent 64-byte block into the four lanes with the
//!    distance-512 constants (k1/k2).
//! 3. Reduce the four lanes to one with the distance-128 constants (k3/k4),
//!    then fold any remaining whole 16-byte chunks the same way.
//! 4. Reduce 128 -> 64 -> 32 bits and finish with a Barrett reduction.
//! 5. Any sub-16-byte tail goes through the lookup table.
//!
//! Inputs shorter than one 64-byte block take the bytewise path; the folding
//! warm-up consumes a full block.
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure PCLMULQDQ and
//! SSE4.1 are available before executing this path (the dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use crate::portable::crc32_bytewise;

// Fold constants for the reflected CRC-32 polynomial 0x104C11DB7.
//
// K1/K2 fold across 512 bits (one 4-lane block), K3/K4 across 128 bits,
// K5 reduces 64 bits to 32. MU and POLY drive the final Barrett reduction.
const K1: i64 = 0x1_5444_2bd4;
const K2: i64 = 0x1_c6e4_1596;
const K3: i64 = 0x1_7519_97d0;
const K4: i64 = 0x0_ccaa_009e;
const K5: i64 = 0x1_63cd_6124;
const MU: i64 = 0x1_F701_1641;
const POLY: i64 = 0x1_DB71_0641;

/// Minimum input length for the folding path. The warm-up loads one full
/// 4-lane block.
const FOLD_BLOCK: usize = 64;

/// CRC-32 update using PCLMULQDQ 4-lane folding.
///
/// `crc` is the raw register state (pre-inverted). Total over all input
/// lengths: short inputs fall back to the bytewise kernel.
#[inline]
#[target_feature(enable = "pclmulqdq", enable = "sse4.1")]
pub unsafe fn crc32_pclmul(crc: u32, data: &[u8]) -> u32 {
  if data.len() < FOLD_BLOCK {
    return crc32_bytewise(crc, data);
  }

  let mut blocks = data.chunks_exact(FOLD_BLOCK);

  // Warm-up: load the first 64-byte block into four 128-bit lanes and
  // combine the incoming state into the low 32 bits of lane 0.
  let first = match blocks.next() {
    Some(block) => block,
    // Unreachable: length was checked above.
    None => return crc32_bytewise(crc, data),
  };
  let p = first.as_ptr().cast::<__m128i>();
  let mut x0 = _mm_loadu_si128(p);
  let mut x1 = _mm_loadu_si128(p.add(1));
  let mut x2 = _mm_loadu_si128(p.add(2));
  let mut x3 = _mm_loadu_si128(p.add(3));
  x0 = _mm_xor_si128(x0, _mm_cvtsi32_si128(crc as i32));

  // Fold the remaining 64-byte blocks into the four lanes.
  let k1k2 = _mm_set_epi64x(K2, K1);
  for block in blocks.by_ref() {
    let p = block.as_ptr().cast::<__m128i>();
    x0 = fold16(x0, _mm_loadu_si128(p), k1k2);
    x1 = fold16(x1, _mm_loadu_si128(p.add(1)), k1k2);
    x2 = fold16(x2, _mm_loadu_si128(p.add(2)), k1k2);
    x3 = fold16(x3, _mm_loadu_si128(p.add(3)), k1k2);
  }

  // Reduce four lanes to one.
  let k3k4 = _mm_set_epi64x(K4, K3);
  x0 = fold16(x0, x1, k3k4);
  x0 = fold16(x0, x2, k3k4);
  x0 = fold16(x0, x3, k3k4);

  // Fold remaining whole 16-byte chunks.
  let mut tail16 = blocks.remainder().chunks_exact(16);
  for chunk in tail16.by_ref() {
    x0 = fold16(x0, _mm_loadu_si128(chunk.as_ptr().cast::<__m128i>()), k3k4);
  }

  // Reduce 128 bits to 64 bits.
  x0 = _mm_xor_si128(_mm_clmulepi64_si128::<0x10>(x0, k3k4), _mm_srli_si128::<8>(x0));

  // Reduce 64 bits to 32 bits.
  let low32 = _mm_set_epi32(0, 0, 0, !0);
  x0 = _mm_xor_si128(
    _mm_clmulepi64_si128::<0x00>(_mm_and_si128(x0, low32), _mm_set_epi64x(0, K5)),
    _mm_srli_si128::<4>(x0),
  );

  // Barrett reduction back into a 32-bit register.
  let mu_poly = _mm_set_epi64x(MU, POLY);
  let t1 = _mm_clmulepi64_si128::<0x10>(_mm_and_si128(x0, low32), mu_poly);
  let t2 = _mm_clmulepi64_si128::<0x00>(_mm_and_si128(t1, low32), mu_poly);
  let mut state = _mm_extract_epi32::<1>(_mm_xor_si128(x0, t2)) as u32;

  // Sub-16-byte tail through the lookup table.
  state = crc32_bytewise(state, tail16.remainder());

  state
}

/// Fold `a` forward by 128 bits and accumulate `b`.
///
/// Computes `clmul(a_lo, k_lo) ^ clmul(a_hi, k_hi) ^ b`.
#[inline]
#[target_feature(enable = "pclmulqdq")]
unsafe fn fold16(a: __m128i, b: __m128i, k: __m128i) -> __m128i {
  let lo = _mm_clmulepi64_si128::<0x00>(a, k);
  let hi = _mm_clmulepi64_si128::<0x11>(a, k);
  _mm_xor_si128(_mm_xor_si128(b, lo), hi)
}

/// Safe wrapper for the PCLMULQDQ folding kernel.
#[inline]
pub fn crc32_pclmul_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies PCLMULQDQ and SSE4.1 before selecting this kernel.
  unsafe { crc32_pclmul(crc, data) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::portable::crc32_bytewise;

  fn pclmul_available() -> bool {
    platform::caps().has(platform::caps::x86::PCLMUL_READY)
  }

  #[test]
  fn test_matches_bytewise_across_lengths() {
    if !pclmul_available() {
      return;
    }

    // Lengths straddling the warm-up block and the 16-byte fold boundary.
    for len in [0usize, 1, 15, 16, 17, 63, 64, 65, 80, 96, 127, 128, 129, 255, 256, 1024, 4096] {
      let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect();
      let fast = crc32_pclmul_safe(!0, &data);
      let slow = crc32_bytewise(!0, &data);
      assert_eq!(fast, slow, "mismatch at len={len}");
    }
  }

  #[test]
  fn test_state_threading() {
    if !pclmul_available() {
      return;
    }

    let data: Vec<u8> = (0..1000u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
    for split in [64usize, 128, 500, 936] {
      let (a, b) = data.split_at(split);
      let threaded = crc32_pclmul_safe(crc32_pclmul_safe(!0, a), b);
      assert_eq!(threaded, crc32_bytewise(!0, &data), "mismatch at split={split}");
    }
  }

  #[test]
  fn test_large_input() {
    if !pclmul_available() {
      return;
    }

    let data: Vec<u8> = (0..1 << 20).map(|i| (i as u8).wrapping_mul(17)).collect();
    assert_eq!(crc32_pclmul_safe(!0, &data), crc32_bytewise(!0, &data));
  }
}
