//! GF(2) matrix operations for CRC-32 combination.
//!
//! When you have `crc(A)` and `crc(B)`, you can compute `crc(A || B)` without
//! reprocessing `A`. This is done in O(log n) time using matrix exponentiation
//! over GF(2).
//!
//! # Mathematical Background
//!
//! For reflected CRCs:
//! ```text
//! crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
//! ```
//!
//! The multiplication by `x^(8*len(B))` is computed as matrix multiplication
//! where the matrix represents the effect of shifting by `8*len(B)` bits.

// Indexing here uses loop indices bounded to 0..32 against [u32; 32].
#![allow(clippy::indexing_slicing)]

/// A 32x32 GF(2) matrix represented as 32 u32 values.
///
/// Each u32 is a column of the matrix: entry `i` is the image of basis
/// vector `i`.
#[derive(Clone, Copy)]
pub struct Gf2Matrix32([u32; 32]);

impl Gf2Matrix32 {
  /// Create the identity matrix.
  #[must_use]
  pub const fn identity() -> Self {
    let mut m = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      m[i] = 1 << i;
      i += 1;
    }
    Self(m)
  }

  /// Multiply matrix by a vector (u32 treated as column vector).
  #[inline]
  #[must_use]
  pub const fn mul_vec(self, vec: u32) -> u32 {
    let mut result = 0u32;
    let mut i = 0;
    while i < 32 {
      if vec & (1 << i) != 0 {
        result ^= self.0[i];
      }
      i += 1;
    }
    result
  }

  /// Multiply two matrices (self * other).
  #[must_use]
  pub const fn mul_mat(self, other: Self) -> Self {
    let mut result = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      result[i] = self.mul_vec(other.0[i]);
      i += 1;
    }
    Self(result)
  }

  /// Square the matrix (self * self).
  #[inline]
  #[must_use]
  pub const fn square(self) -> Self {
    self.mul_mat(self)
  }
}

/// Generate the "shift by 1 bit" matrix for a given CRC polynomial.
///
/// For a reflected CRC with polynomial P, appending one zero bit means:
/// `new_crc = (crc >> 1) ^ (P if crc & 1 else 0)`. Column 0 therefore maps
/// to P, and column j (j > 0) maps to bit j-1.
#[must_use]
pub const fn generate_shift1_matrix_32(poly: u32) -> Gf2Matrix32 {
  let mut m = [0u32; 32];

  m[0] = poly;

  let mut j = 1;
  while j < 32 {
    m[j] = 1 << (j - 1);
    j += 1;
  }

  Gf2Matrix32(m)
}

/// Generate the "shift by 8 bits" matrix (one zero byte) for a CRC-32
/// polynomial.
///
/// This is the fundamental building block for combine.
#[must_use]
pub const fn generate_shift8_matrix_32(poly: u32) -> Gf2Matrix32 {
  let shift1 = generate_shift1_matrix_32(poly);
  let shift2 = shift1.square();
  let shift4 = shift2.square();

  shift4.square()
}

/// Combine two CRC-32 values.
///
/// Given `crc_a = crc(A)` and `crc_b = crc(B)`, computes `crc(A || B)`.
///
/// # Arguments
///
/// * `crc_a` - CRC of the first part (finalized)
/// * `crc_b` - CRC of the second part (finalized)
/// * `len_b` - Length of the second part in bytes
/// * `shift8_matrix` - Pre-computed "shift by 8 bits" matrix for the polynomial
///
/// # Algorithm
///
/// Uses square-and-multiply to compute `crc_a * x^(8*len_b)` in O(log len_b)
/// time.
#[must_use]
pub const fn combine_crc32(crc_a: u32, crc_b: u32, len_b: usize, shift8_matrix: Gf2Matrix32) -> u32 {
  if len_b == 0 {
    return crc_a;
  }

  let mut mat = shift8_matrix;
  let mut result_mat = Gf2Matrix32::identity();
  let mut remaining = len_b;

  while remaining > 0 {
    if remaining & 1 != 0 {
      result_mat = result_mat.mul_mat(mat);
    }
    mat = mat.square();
    remaining >>= 1;
  }

  result_mat.mul_vec(crc_a) ^ crc_b
}
