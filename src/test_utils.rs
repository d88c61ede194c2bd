// SPDX-License-Identifier: Apache-2.0

//! Test-only helpers.
//!
//! Keep this module lightweight so `cargo test` works out of the box: a
//! deterministic data generator, naive left-to-right reference versions of
//! the kernels, and the lengths every path test walks through.

use crate::element::Element;

pub fn config_test_logger() {
  // Intentionally a no-op.
  // Some tests call this to enable logging in downstream repos; FPX doesn't require
  // a logger for correctness.
}

/// Lengths around every lane count, accumulator block and size threshold,
/// plus a few that are not a multiple of any vector width.
pub const TEST_LENGTHS: &[usize] = &[
  0, 1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 47, 63, 64, 65, 127, 128, 129, 130, 255, 256,
  257, 1000, 1003, 4099,
];

/// Conversions the generic tests need on top of [`Element`].
pub trait Sample: Element {
  /// `v as Self`: wraps for narrow and unsigned integers.
  fn from_i64(v: i64) -> Self;
  /// `v as Self`
  fn from_f64(v: f64) -> Self;
  fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
  ($($t:ty),*) => {
    $(
      impl Sample for $t {
        #[inline]
        fn from_i64(v: i64) -> Self {
          v as $t
        }

        #[inline]
        fn from_f64(v: f64) -> Self {
          v as $t
        }

        #[inline]
        fn to_f64(self) -> f64 {
          self as f64
        }
      }
    )*
  };
}

impl_sample!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Deterministic values in `[-range, range]`, converted with `as`.
///
/// Small integer-valued floats keep every partial sum exact, so float results
/// can be compared exactly regardless of summation order.
pub fn sample_values<T: Sample>(len: usize, seed: u64, range: i64) -> Vec<T> {
  let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
  (0..len)
    .map(|_| {
      state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
      let v = ((state >> 33) % (2 * range as u64 + 1)) as i64 - range;
      T::from_i64(v)
    })
    .collect()
}

/// Values whose product is exact in any order: mostly `1` and `-1`, with a
/// sparse `2` and `3` (integers) or `2` and `0.5` (floats).
pub fn product_values<T: Sample>(len: usize) -> Vec<T> {
  let rare = if T::KIND.is_float() {
    T::from_f64(0.5)
  } else {
    T::from_i64(3)
  };
  (0..len)
    .map(|i| {
      if i % 97 == 5 {
        T::from_i64(2)
      } else if i % 89 == 7 {
        rare
      } else if i % 3 == 0 {
        T::from_i64(-1)
      } else {
        T::ONE
      }
    })
    .collect()
}

// =============================================================================
// NAIVE REFERENCES
// =============================================================================

pub fn naive_sum<T: Element>(values: &[T]) -> T {
  values.iter().fold(T::ZERO, |acc, &x| acc.lane_add(x))
}

pub fn naive_product<T: Element>(values: &[T]) -> T {
  values.iter().fold(T::ONE, |acc, &x| acc.lane_mul(x))
}

pub fn naive_min<T: Element>(values: &[T]) -> T {
  values.iter().fold(T::MIN_IDENTITY, |acc, &x| if x < acc { x } else { acc })
}

pub fn naive_max<T: Element>(values: &[T]) -> T {
  values.iter().fold(T::MAX_IDENTITY, |acc, &x| if x > acc { x } else { acc })
}

pub fn naive_sumsq<T: Element>(values: &[T]) -> T {
  values.iter().fold(T::ZERO, |acc, &x| acc.lane_add(x.lane_mul(x)))
}

pub fn naive_dotp<T: Element>(a: &[T], b: &[T]) -> T {
  a.iter()
    .zip(b)
    .fold(T::ZERO, |acc, (&x, &y)| acc.lane_add(x.lane_mul(y)))
}

pub fn naive_sad<T: Element>(a: &[T], b: &[T]) -> T {
  a.iter()
    .zip(b)
    .fold(T::ZERO, |acc, (&x, &y)| acc.lane_add(x.lane_abs_diff(y)))
}

pub fn naive_filter_gt<T: Element>(values: &[T], threshold: T) -> Vec<T> {
  values.iter().copied().filter(|&x| x > threshold).collect()
}
