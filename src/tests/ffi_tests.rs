// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use core::ptr;

  use crate::dispatch::{fold_dotp_f64, reduce_add_u16};
  use crate::ffi::*;
  use crate::test_utils::sample_values;

  #[test]
  fn test_ffi_reductions() {
    let values: Vec<i32> = (1..=1000).collect();
    unsafe {
      assert_eq!(fpx_reduce_add_i32(values.as_ptr(), values.len()), 500_500);
      assert_eq!(fpx_reduce_min_i32(values.as_ptr(), values.len()), 1);
      assert_eq!(fpx_reduce_max_i32(values.as_ptr(), values.len()), 1000);
      assert_eq!(fpx_reduce_mul_i32(values.as_ptr(), 5), 120);
    }

    let wide = sample_values::<u16>(333, 8, 1000);
    unsafe {
      assert_eq!(fpx_reduce_add_u16(wide.as_ptr(), wide.len()), reduce_add_u16(&wide).unwrap());
    }
  }

  #[test]
  fn test_ffi_null_with_zero_length_returns_identity() {
    unsafe {
      assert_eq!(fpx_reduce_add_i64(ptr::null(), 0), 0);
      assert_eq!(fpx_reduce_mul_u8(ptr::null(), 0), 1);
      assert_eq!(fpx_reduce_min_i16(ptr::null(), 0), i16::MAX);
      assert_eq!(fpx_reduce_max_u32(ptr::null(), 0), 0);
      assert_eq!(fpx_reduce_min_f32(ptr::null(), 0), f32::INFINITY);
      assert_eq!(fpx_reduce_max_f64(ptr::null(), 0), f64::NEG_INFINITY);
      assert_eq!(fpx_fold_dotp_f32(ptr::null(), ptr::null(), 0), 0.0);
      assert_eq!(fpx_fold_sad_i8(ptr::null(), ptr::null(), 0), 0);
      assert_eq!(fpx_filter_gt_u64(ptr::null(), 0, 5, ptr::null_mut()), 0);
      assert_eq!(fpx_partition_gt_i32(ptr::null(), 0, 5, ptr::null_mut(), ptr::null_mut()), 0);
      assert!(!fpx_any_gt_i8(ptr::null(), 0, 0));
      assert!(fpx_all_gt_f64(ptr::null(), 0, 0.0));
      fpx_map_axpy_f32(ptr::null(), ptr::null(), 0, 2.0, ptr::null_mut());
      fpx_scan_add_u16(ptr::null(), 0, ptr::null_mut());
      assert!(fpx_all_eq_i16(ptr::null(), 0, 3));
      assert!(fpx_all_gt_zip_u8(ptr::null(), ptr::null(), 0));
      assert_eq!(fpx_take_while_gt_i64(ptr::null(), 0, 0, ptr::null_mut()), 0);
      assert_eq!(fpx_drop_while_gt_f32(ptr::null(), 0, 0.0, ptr::null_mut()), 0);
      fpx_map_sqrt_f64(ptr::null(), 0, ptr::null_mut());
    }
  }

  #[test]
  fn test_ffi_folds() {
    let a = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    let b = [2.0f64, 3.0, 4.0, 5.0, 6.0];
    unsafe {
      assert_eq!(fpx_fold_dotp_f64(a.as_ptr(), b.as_ptr(), 5), 70.0);
      assert_eq!(fpx_fold_sad_f64(a.as_ptr(), b.as_ptr(), 5), 5.0);
      assert_eq!(fpx_fold_sumsq_f64(a.as_ptr(), 5), 55.0);
    }

    let a: Vec<f64> = (0..1003).map(|i| (i % 17) as f64).collect();
    let b: Vec<f64> = (0..1003).map(|i| (i % 5) as f64 - 2.0).collect();
    unsafe {
      assert_eq!(fpx_fold_dotp_f64(a.as_ptr(), b.as_ptr(), 1003), fold_dotp_f64(&a, &b).unwrap());
    }

    let x = [1i8, 2, 3, 4, 5];
    let y = [10i8, 20, 30, 40, 50];
    unsafe {
      assert_eq!(fpx_fold_sad_i8(x.as_ptr(), y.as_ptr(), 5), -121);
    }
  }

  #[test]
  fn test_ffi_maps_write_n_elements() {
    let x: Vec<u32> = (0..100).collect();
    let y: Vec<u32> = (0..100).map(|i| i * 10).collect();
    let mut out = vec![7u32; 101];
    unsafe {
      fpx_map_axpy_u32(x.as_ptr(), y.as_ptr(), 100, 3, out.as_mut_ptr());
    }
    for i in 0..100 {
      assert_eq!(out[i], 13 * i as u32);
    }
    assert_eq!(out[100], 7);

    unsafe {
      fpx_map_scale_u32(x.as_ptr(), 100, 2, out.as_mut_ptr());
      assert_eq!(out[99], 198);
      fpx_map_offset_u32(x.as_ptr(), 100, 5, out.as_mut_ptr());
      assert_eq!(out[99], 104);
      fpx_map_add_u32(x.as_ptr(), y.as_ptr(), 100, out.as_mut_ptr());
      assert_eq!(out[99], 1089);
    }

    let signed: Vec<i16> = (-50..50).collect();
    let mut out = vec![0i16; 100];
    unsafe {
      fpx_map_abs_i16(signed.as_ptr(), 100, out.as_mut_ptr());
      assert_eq!(out[0], 50);
      fpx_map_clamp_i16(signed.as_ptr(), 100, -10, 10, out.as_mut_ptr());
    }
    assert_eq!(out[0], -10);
    assert_eq!(out[55], 5);
    assert_eq!(out[99], 10);
  }

  #[test]
  fn test_ffi_compaction() {
    let values: Vec<u32> = [500u32, 200, 800, 100, 900].iter().copied().cycle().take(1003).collect();
    let mut out = vec![0u32; 1003];
    let count = unsafe { fpx_filter_gt_u32(values.as_ptr(), values.len(), 500, out.as_mut_ptr()) };
    let expected: Vec<u32> = values.iter().copied().filter(|&v| v > 500).collect();
    assert_eq!(&out[..count], &expected[..]);

    let mut pass = vec![0u32; 1003];
    let mut fail = vec![0u32; 1003];
    let passed = unsafe {
      fpx_partition_gt_u32(values.as_ptr(), values.len(), 500, pass.as_mut_ptr(), fail.as_mut_ptr())
    };
    assert_eq!(passed, expected.len());
    assert_eq!(&pass[..passed], &expected[..]);
    assert!(fail[..1003 - passed].iter().all(|&v| v <= 500));

    unsafe {
      assert!(fpx_any_gt_u32(values.as_ptr(), values.len(), 800));
      assert!(!fpx_any_gt_u32(values.as_ptr(), values.len(), 900));
      assert!(fpx_all_gt_u32(values.as_ptr(), values.len(), 99));
      assert!(!fpx_all_gt_u32(values.as_ptr(), values.len(), 100));
    }
  }

  #[test]
  fn test_ffi_early_exit_and_zip_predicates() {
    let mut values: Vec<i64> = (0..1000).map(|i| 100 + i).collect();
    values[600] = 10;
    let mut out = vec![0i64; 1000];
    unsafe {
      let taken = fpx_take_while_gt_i64(values.as_ptr(), values.len(), 50, out.as_mut_ptr());
      assert_eq!(taken, 600);
      assert_eq!(&out[..taken], &values[..600]);

      let rest = fpx_drop_while_gt_i64(values.as_ptr(), values.len(), 50, out.as_mut_ptr());
      assert_eq!(rest, 400);
      assert_eq!(&out[..rest], &values[600..]);

      let same = vec![3i32; 77];
      assert!(fpx_all_eq_i32(same.as_ptr(), same.len(), 3));
      assert!(!fpx_all_eq_i32(same.as_ptr(), same.len(), 4));

      let lower: Vec<i64> = values.iter().map(|&v| v - 1).collect();
      assert!(fpx_all_gt_zip_i64(values.as_ptr(), lower.as_ptr(), values.len()));
      assert!(!fpx_all_gt_zip_i64(lower.as_ptr(), values.as_ptr(), values.len()));
    }
  }

  #[test]
  fn test_ffi_map_sqrt_writes_n_elements() {
    let x: Vec<f32> = (0..100).map(|i| (i * i) as f32).collect();
    let mut out = vec![-1.0f32; 101];
    unsafe {
      fpx_map_sqrt_f32(x.as_ptr(), x.len(), out.as_mut_ptr());
    }
    for i in 0..100 {
      assert_eq!(out[i], i as f32);
    }
    assert_eq!(out[100], -1.0);
  }

  #[test]
  fn test_ffi_scan() {
    let values = [1.5f32, 2.5, -1.0, 4.0];
    let mut out = [0.0f32; 4];
    unsafe {
      fpx_scan_add_f32(values.as_ptr(), 4, out.as_mut_ptr());
    }
    assert_eq!(out, [1.5, 4.0, 3.0, 7.0]);
  }
}
