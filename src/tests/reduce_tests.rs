// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::dispatch::{
    reduce_add, reduce_add_f32, reduce_add_f64, reduce_add_i16, reduce_add_i32, reduce_add_i64,
    reduce_add_i8, reduce_add_u16, reduce_add_u32, reduce_add_u64, reduce_add_u8, reduce_max,
    reduce_max_f32, reduce_max_f64, reduce_max_i8, reduce_max_u64, reduce_min, reduce_min_f32,
    reduce_min_f64, reduce_min_i64, reduce_min_u8, reduce_mul, reduce_mul_i8, reduce_mul_i32,
    reduce_mul_u16,
  };
  use crate::test_utils::{
    config_test_logger, naive_max, naive_min, naive_product, naive_sum, product_values,
    sample_values, Sample, TEST_LENGTHS,
  };

  // =============================================================================
  //   DUAL-PATH TEST HELPERS
  // =============================================================================

  /// Small inputs stay below the SIMD threshold, large ones cross it; every
  /// length in between exercises a different tail shape.
  fn check_reduce_paths<T: Sample>() {
    config_test_logger();
    for &len in TEST_LENGTHS {
      let values = sample_values::<T>(len, len as u64 + 11, 100);
      assert_eq!(
        reduce_add(&values).unwrap(),
        naive_sum(&values),
        "reduce_add {:?} len={}",
        T::KIND,
        len
      );
      assert_eq!(
        reduce_min(&values).unwrap(),
        naive_min(&values),
        "reduce_min {:?} len={}",
        T::KIND,
        len
      );
      assert_eq!(
        reduce_max(&values).unwrap(),
        naive_max(&values),
        "reduce_max {:?} len={}",
        T::KIND,
        len
      );

      let factors = product_values::<T>(len);
      assert_eq!(
        reduce_mul(&factors).unwrap(),
        naive_product(&factors),
        "reduce_mul {:?} len={}",
        T::KIND,
        len
      );
    }
  }

  fn check_reduce_identities<T: Sample>() {
    let empty: [T; 0] = [];
    assert_eq!(reduce_add(&empty).unwrap(), T::ZERO);
    assert_eq!(reduce_mul(&empty).unwrap(), T::ONE);
    assert_eq!(reduce_min(&empty).unwrap(), T::MIN_IDENTITY);
    assert_eq!(reduce_max(&empty).unwrap(), T::MAX_IDENTITY);
  }

  fn check_reduce_small_scenarios<T: Sample>() {
    let values: Vec<T> = [1, 2, 3, 4, 5].iter().map(|&v| T::from_i64(v)).collect();
    assert_eq!(reduce_add(&values).unwrap(), T::from_i64(15), "{:?}", T::KIND);

    let factors: Vec<T> = [2, 3, 4, 5].iter().map(|&v| T::from_i64(v)).collect();
    assert_eq!(reduce_mul(&factors).unwrap(), T::from_i64(120), "{:?}", T::KIND);

    // Same values padded past the SIMD threshold with identities
    let mut long_values = values.clone();
    long_values.resize(1003, T::ZERO);
    assert_eq!(reduce_add(&long_values).unwrap(), T::from_i64(15), "{:?}", T::KIND);

    let mut long_factors = factors.clone();
    long_factors.resize(1003, T::ONE);
    assert_eq!(reduce_mul(&long_factors).unwrap(), T::from_i64(120), "{:?}", T::KIND);
  }

  fn check_reduce_singleton<T: Sample>() {
    for v in [-7, 0, 42] {
      let x = T::from_i64(v);
      assert_eq!(reduce_min(&[x]).unwrap(), x);
      assert_eq!(reduce_max(&[x]).unwrap(), x);
      assert_eq!(reduce_add(&[x]).unwrap(), x);
      assert_eq!(reduce_mul(&[x]).unwrap(), x);
    }
  }

  /// Extreme value placed at every position of a SIMD-sized buffer, so each
  /// accumulator, the half-width chunk and the scalar tail all get a turn.
  fn check_extreme_at_every_position<T: Sample>() {
    let len = 203;
    let base = sample_values::<T>(len, 3, 50);
    for pos in 0..len {
      // MIN_IDENTITY is the largest value of the type, MAX_IDENTITY the smallest
      let mut values = base.clone();
      values[pos] = T::MIN_IDENTITY;
      assert_eq!(reduce_max(&values).unwrap(), naive_max(&values), "{:?} pos={}", T::KIND, pos);

      values[pos] = T::MAX_IDENTITY;
      assert_eq!(reduce_min(&values).unwrap(), naive_min(&values), "{:?} pos={}", T::KIND, pos);
    }
  }

  macro_rules! reduce_type_tests {
    ($($m:ident: $t:ty),*) => {
      $(
        mod $m {
          #[test]
          fn test_reduce_matches_reference_all_lengths() {
            super::check_reduce_paths::<$t>();
          }

          #[test]
          fn test_reduce_empty_returns_identity() {
            super::check_reduce_identities::<$t>();
          }

          #[test]
          fn test_reduce_small_scenarios() {
            super::check_reduce_small_scenarios::<$t>();
          }

          #[test]
          fn test_reduce_singleton() {
            super::check_reduce_singleton::<$t>();
          }

          #[test]
          fn test_reduce_extreme_at_every_position() {
            super::check_extreme_at_every_position::<$t>();
          }
        }
      )*
    };
  }

  reduce_type_tests!(
    for_i8: i8,
    for_u8: u8,
    for_i16: i16,
    for_u16: u16,
    for_i32: i32,
    for_u32: u32,
    for_i64: i64,
    for_u64: u64,
    for_f32: f32,
    for_f64: f64
  );

  // =============================================================================
  // FLAT API SCENARIOS
  // =============================================================================

  #[test]
  fn test_reduce_add_flat_basic() {
    assert_eq!(reduce_add_i8(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_u8(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_i16(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_u16(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_i32(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_u32(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_i64(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_u64(&[1, 2, 3, 4, 5]).unwrap(), 15);
    assert_eq!(reduce_add_f32(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 15.0);
    assert_eq!(reduce_add_f64(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 15.0);
  }

  #[test]
  fn test_reduce_mul_flat_basic() {
    assert_eq!(reduce_mul_i8(&[2, 3, 4, 5]).unwrap(), 120);
    assert_eq!(reduce_mul_u16(&[2, 3, 4, 5]).unwrap(), 120);
    assert_eq!(reduce_mul_i32(&[2, 3, 4, 5]).unwrap(), 120);
  }

  #[test]
  fn test_reduce_add_i8_wraps() {
    let values = vec![100i8; 1000];
    for len in [10, 1000] {
      let expected = (0..len).fold(0i8, |acc, _| acc.wrapping_add(100));
      assert_eq!(reduce_add_i8(&values[..len]).unwrap(), expected);
    }
  }

  #[test]
  fn test_reduce_mul_wraps_like_narrow_type() {
    // 3^1000 mod 2^8, 2^16, 2^32
    let values = vec![3i32; 1000];
    let expected = (0..1000).fold(1i32, |acc, _| acc.wrapping_mul(3));
    assert_eq!(reduce_mul_i32(&values).unwrap(), expected);

    let values = vec![3i8; 1000];
    let expected = (0..1000).fold(1i8, |acc, _| acc.wrapping_mul(3));
    assert_eq!(reduce_mul_i8(&values).unwrap(), expected);

    let values = vec![3u16; 1003];
    let expected = (0..1003).fold(1u16, |acc, _| acc.wrapping_mul(3));
    assert_eq!(reduce_mul_u16(&values).unwrap(), expected);
  }

  #[test]
  fn test_reduce_mul_u64_wraps() {
    let values: Vec<u64> = (1..=300u64).map(|v| v * 0x1_0000_0001).collect();
    let expected = values.iter().fold(1u64, |acc, &v| acc.wrapping_mul(v));
    assert_eq!(reduce_mul(&values).unwrap(), expected);
    let signed: Vec<i64> = values.iter().map(|&v| v as i64 * -1).collect();
    let expected = signed.iter().fold(1i64, |acc, &v| acc.wrapping_mul(v));
    assert_eq!(reduce_mul(&signed).unwrap(), expected);
  }

  #[test]
  fn test_reduce_min_max_integer_extremes() {
    let mut values = vec![0i64; 1003];
    values[1002] = i64::MIN;
    values[17] = i64::MAX;
    assert_eq!(reduce_min_i64(&values).unwrap(), i64::MIN);
    assert_eq!(reduce_max(&values).unwrap(), i64::MAX);

    let mut bytes = vec![128u8; 1003];
    bytes[500] = 255;
    bytes[999] = 0;
    assert_eq!(reduce_min_u8(&bytes).unwrap(), 0);
    assert_eq!(reduce_max(&bytes).unwrap(), 255);

    let mut unsigned = vec![1u64 << 63; 77];
    unsigned[3] = u64::MAX;
    unsigned[76] = 1;
    assert_eq!(reduce_max_u64(&unsigned).unwrap(), u64::MAX);
    assert_eq!(reduce_min(&unsigned).unwrap(), 1);

    let signed = vec![-128i8, 127, -1, 0];
    assert_eq!(reduce_max_i8(&signed).unwrap(), 127);
    assert_eq!(reduce_min(&signed).unwrap(), -128);
  }

  // =============================================================================
  // FLOAT EDGE CASES
  // =============================================================================

  #[test]
  fn test_reduce_min_max_ignore_nan() {
    for &len in TEST_LENGTHS.iter().filter(|&&len| len > 0) {
      let mut values = sample_values::<f32>(len, 99, 100);
      for i in (0..len).step_by(3) {
        values[i] = f32::NAN;
      }
      let finite: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
      assert_eq!(reduce_min_f32(&values).unwrap(), naive_min(&finite), "len={}", len);
      assert_eq!(reduce_max_f32(&values).unwrap(), naive_max(&finite), "len={}", len);
    }
  }

  #[test]
  fn test_reduce_min_max_nan_first_and_last() {
    let mut values = sample_values::<f64>(1003, 5, 1000);
    values[0] = f64::NAN;
    values[1002] = f64::NAN;
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    assert_eq!(reduce_min_f64(&values).unwrap(), naive_min(&finite));
    assert_eq!(reduce_max_f64(&values).unwrap(), naive_max(&finite));
  }

  #[test]
  fn test_reduce_min_max_all_nan_returns_identity() {
    for len in [1, 5, 64, 1003] {
      let values = vec![f32::NAN; len];
      assert_eq!(reduce_min_f32(&values).unwrap(), f32::INFINITY);
      assert_eq!(reduce_max_f32(&values).unwrap(), f32::NEG_INFINITY);
      let values = vec![f64::NAN; len];
      assert_eq!(reduce_min_f64(&values).unwrap(), f64::INFINITY);
      assert_eq!(reduce_max_f64(&values).unwrap(), f64::NEG_INFINITY);
    }
  }

  #[test]
  fn test_reduce_add_propagates_nan_and_infinity() {
    let mut values = vec![1.0f64; 1003];
    values[700] = f64::NAN;
    assert!(reduce_add_f64(&values).unwrap().is_nan());

    let mut values = vec![1.0f32; 1003];
    values[3] = f32::INFINITY;
    assert_eq!(reduce_add_f32(&values).unwrap(), f32::INFINITY);
  }

  #[test]
  fn test_reduce_add_f32_relative_tolerance() {
    let values: Vec<f32> = (0..100_000).map(|i| ((i % 1000) as f32) * 0.125 + 0.5).collect();
    let reference: f64 = values.iter().map(|&v| v as f64).sum();
    let result = reduce_add_f32(&values).unwrap() as f64;
    assert!(
      ((result - reference) / reference).abs() < 1e-6,
      "expected {}, got {}",
      reference,
      result
    );
  }

  #[test]
  fn test_reduce_signed_zero_and_negative_floats() {
    let values = vec![-0.0f64, -1.5, -2.5, -0.25];
    assert_eq!(reduce_add_f64(&values).unwrap(), -4.25);
    assert_eq!(reduce_min_f64(&values).unwrap(), -2.5);
    assert_eq!(reduce_max_f64(&values).unwrap(), -0.0);
  }
}
