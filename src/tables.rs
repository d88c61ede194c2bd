// SPDX-License-Identifier: Apache-2.0

//! Compaction permutation tables.
//!
//! Row `m` of a table moves the lanes whose bit is set in mask `m` to the front
//! of the register, keeping their order. The compaction kernels look the row
//! up with the comparison mask, permute once and store the whole register.
//! Tables are built at compile time and are read-only.

/// Rows of eight 32-bit lane indices for `vpermd`.
#[cfg(any(target_arch = "x86_64", test))]
#[repr(C, align(32))]
pub(crate) struct WordPermutations<const ROWS: usize>(pub(crate) [[u32; 8]; ROWS]);

/// Rows of sixteen byte indices for `tbl`. Unused slots hold `0x80`, which
/// `tbl` turns into zero.
#[cfg(any(target_arch = "aarch64", test))]
#[repr(C, align(16))]
pub(crate) struct BytePermutations<const ROWS: usize>(pub(crate) [[u8; 16]; ROWS]);

#[cfg(any(target_arch = "aarch64", test))]
const BYTE_UNUSED: u8 = 0x80;

/// `lanes` lanes, each `words` 32-bit words wide (1 for 32-bit, 2 for 64-bit lanes).
#[cfg(any(target_arch = "x86_64", test))]
const fn word_table<const ROWS: usize>(lanes: usize, words: usize) -> [[u32; 8]; ROWS] {
  let mut table = [[0u32; 8]; ROWS];
  let mut mask = 0;
  while mask < ROWS {
    let mut out = 0;
    let mut lane = 0;
    while lane < lanes {
      if mask & (1 << lane) != 0 {
        let mut w = 0;
        while w < words {
          table[mask][out] = (lane * words + w) as u32;
          out += 1;
          w += 1;
        }
      }
      lane += 1;
    }
    mask += 1;
  }
  table
}

/// `lanes` lanes, each `bytes` bytes wide.
#[cfg(any(target_arch = "aarch64", test))]
const fn byte_table<const ROWS: usize>(lanes: usize, bytes: usize) -> [[u8; 16]; ROWS] {
  let mut table = [[BYTE_UNUSED; 16]; ROWS];
  let mut mask = 0;
  while mask < ROWS {
    let mut out = 0;
    let mut lane = 0;
    while lane < lanes {
      if mask & (1 << lane) != 0 {
        let mut b = 0;
        while b < bytes {
          table[mask][out] = (lane * bytes + b) as u8;
          out += 1;
          b += 1;
        }
      }
      lane += 1;
    }
    mask += 1;
  }
  table
}

// AVX2: 8 x 32-bit lanes
#[cfg(any(target_arch = "x86_64", test))]
pub(crate) static COMPRESS_8X32: WordPermutations<256> = WordPermutations(word_table::<256>(8, 1));

// AVX2: 4 x 64-bit lanes, expressed as word pairs
#[cfg(any(target_arch = "x86_64", test))]
pub(crate) static COMPRESS_4X64: WordPermutations<16> = WordPermutations(word_table::<16>(4, 2));

// NEON: 8 x 16-bit lanes
#[cfg(any(target_arch = "aarch64", test))]
pub(crate) static COMPRESS_8X16: BytePermutations<256> = BytePermutations(byte_table::<256>(8, 2));

// NEON: 4 x 32-bit lanes
#[cfg(any(target_arch = "aarch64", test))]
pub(crate) static COMPRESS_4X32: BytePermutations<16> = BytePermutations(byte_table::<16>(4, 4));

// NEON: 2 x 64-bit lanes
#[cfg(any(target_arch = "aarch64", test))]
pub(crate) static COMPRESS_2X64: BytePermutations<4> = BytePermutations(byte_table::<4>(2, 8));
