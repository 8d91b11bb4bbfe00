use crc::{Crc, CRC_32_ISO_HDLC};
use proptest::prelude::*;
use traits::{Checksum, ChecksumCombine};

use super::*;

const EXTERNAL: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

proptest! {
  #[test]
  fn dispatch_matches_bytewise(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = compute(&data);
    let bytewise = portable::crc32_bytewise(!0, &data) ^ !0;
    prop_assert_eq!(ours, bytewise);
  }

  #[test]
  fn dispatch_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=512)) {
    let ours = compute(&data);
    let oracle = reference::crc32_bitwise(tables::CRC32_POLY, !0, &data) ^ !0;
    prop_assert_eq!(ours, oracle);
  }

  #[test]
  fn chunking_is_invariant(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let oneshot = compute(&data);

    let mut hasher = Crc32::new();
    for part in data.chunks(chunk) {
      hasher.update(part);
    }
    prop_assert_eq!(hasher.finalize(), oneshot);
  }

  #[test]
  fn single_byte_updates_match(data in proptest::collection::vec(any::<u8>(), 0..=512)) {
    let mut state = INITIAL;
    for &b in &data {
      state = update_byte(state, b);
    }
    prop_assert_eq!(finalize(state), compute(&data));
  }

  #[test]
  fn combine_matches_oneshot(data in proptest::collection::vec(any::<u8>(), 0..=2048), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);

    let crc_a = Crc32::checksum(a);
    let crc_b = Crc32::checksum(b);
    let combined = Crc32::combine(crc_a, crc_b, b.len());

    prop_assert_eq!(combined, compute(&data));
  }

  // ───────────────────────────────────────────────────────────────────────────
  // Cross-validation against the crc crate
  // ───────────────────────────────────────────────────────────────────────────

  #[test]
  fn matches_crc_crate(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(compute(&data), EXTERNAL.checksum(&data));
  }

  #[test]
  fn streaming_matches_crc_crate(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut ours = Crc32::new();
    let mut digest = EXTERNAL.digest();

    for part in data.chunks(chunk) {
      ours.update(part);
      digest.update(part);
    }

    prop_assert_eq!(ours.finalize(), digest.finalize());
  }
}

#[test]
fn test_vectors() {
  assert_eq!(compute(b"123456789"), 0xCBF4_3926);
  assert_eq!(compute(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
}
