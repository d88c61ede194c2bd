// SPDX-License-Identifier: Apache-2.0

//! # Compaction
//!
//! `filter_gt` writes the elements greater than a threshold to the front of
//! the output, in input order, and returns how many it wrote.
//!
//! Per chunk: one comparison gives a lane bitmask, the register's
//! `compress_store` moves the selected lanes to the front and stores the whole
//! register at the cursor, and the cursor advances by the popcount. The store
//! may spill unselected lanes past the cursor; they are overwritten by the next
//! chunk or left in the unspecified region. Since the cursor never passes the
//! read offset, `out.len() >= values.len()` keeps every store in bounds.
//!
//! NaN compares false, so NaN elements are never selected.
//!
//! The same mask drives `partition_gt` (selected lanes to one output, the rest
//! to another) and the `any_gt` / `all_gt` predicates. `all_eq` uses the
//! equality mask, `all_gt_zip` compares two inputs chunk against chunk.
//!
//! `take_while_gt` and `drop_while_gt` split at the first element that is not
//! greater than the threshold. The split point is found from the inverted mask
//! of the first chunk that is not all-pass; its lowest set bit is the stopping
//! lane.

#![allow(unsafe_op_in_unsafe_fn)]

use crate::element::Element;
#[cfg(target_arch = "x86_64")]
use crate::frame::WideFrame;
use crate::vector::{lane_mask, SimdVector};

#[inline(always)]
unsafe fn filter_kernel<V: SimdVector>(
  values: &[V::Elem],
  out: &mut [V::Elem],
  threshold: V::Elem,
) -> usize {
  let len = values.len();
  debug_assert!(out.len() >= len);
  let lanes = V::LANES;
  let t = V::splat(threshold);

  let full = len - len % lanes;
  let src = values.as_ptr();
  let dst = out.as_mut_ptr();
  let mut cursor = 0;
  let mut offset = 0;
  while offset < full {
    let chunk = V::load(src.add(offset));
    let mask = chunk.gt_mask(t);
    cursor += chunk.compress_store(mask, dst.add(cursor));
    offset += lanes;
  }

  for &x in &values[full..] {
    if x > threshold {
      out[cursor] = x;
      cursor += 1;
    }
  }
  cursor
}

#[inline(always)]
unsafe fn partition_kernel<V: SimdVector>(
  values: &[V::Elem],
  pass: &mut [V::Elem],
  fail: &mut [V::Elem],
  threshold: V::Elem,
) -> (usize, usize) {
  let len = values.len();
  debug_assert!(pass.len() >= len && fail.len() >= len);
  let lanes = V::LANES;
  let all = lane_mask(lanes);
  let t = V::splat(threshold);

  let full = len - len % lanes;
  let src = values.as_ptr();
  let pass_ptr = pass.as_mut_ptr();
  let fail_ptr = fail.as_mut_ptr();
  let (mut passed, mut failed) = (0, 0);
  let mut offset = 0;
  while offset < full {
    let chunk = V::load(src.add(offset));
    let mask = chunk.gt_mask(t);
    passed += chunk.compress_store(mask, pass_ptr.add(passed));
    failed += chunk.compress_store(!mask & all, fail_ptr.add(failed));
    offset += lanes;
  }

  for &x in &values[full..] {
    if x > threshold {
      pass[passed] = x;
      passed += 1;
    } else {
      fail[failed] = x;
      failed += 1;
    }
  }
  (passed, failed)
}

#[inline(always)]
unsafe fn any_kernel<V: SimdVector>(values: &[V::Elem], threshold: V::Elem) -> bool {
  let len = values.len();
  let lanes = V::LANES;
  let t = V::splat(threshold);
  let full = len - len % lanes;
  let src = values.as_ptr();

  let mut offset = 0;
  while offset < full {
    if V::load(src.add(offset)).gt_mask(t) != 0 {
      return true;
    }
    offset += lanes;
  }
  values[full..].iter().any(|&x| x > threshold)
}

#[inline(always)]
unsafe fn all_kernel<V: SimdVector>(values: &[V::Elem], threshold: V::Elem) -> bool {
  let len = values.len();
  let lanes = V::LANES;
  let all = lane_mask(lanes);
  let t = V::splat(threshold);
  let full = len - len % lanes;
  let src = values.as_ptr();

  let mut offset = 0;
  while offset < full {
    if V::load(src.add(offset)).gt_mask(t) != all {
      return false;
    }
    offset += lanes;
  }
  values[full..].iter().all(|&x| x > threshold)
}

#[inline(always)]
unsafe fn all_eq_kernel<V: SimdVector>(values: &[V::Elem], value: V::Elem) -> bool {
  let len = values.len();
  let lanes = V::LANES;
  let all = lane_mask(lanes);
  let v = V::splat(value);
  let full = len - len % lanes;
  let src = values.as_ptr();

  let mut offset = 0;
  while offset < full {
    if V::load(src.add(offset)).eq_mask(v) != all {
      return false;
    }
    offset += lanes;
  }
  values[full..].iter().all(|&x| x == value)
}

#[inline(always)]
unsafe fn all_gt_zip_kernel<V: SimdVector>(a: &[V::Elem], b: &[V::Elem]) -> bool {
  let len = a.len();
  debug_assert!(b.len() == len);
  let lanes = V::LANES;
  let all = lane_mask(lanes);
  let full = len - len % lanes;
  let pa = a.as_ptr();
  let pb = b.as_ptr();

  let mut offset = 0;
  while offset < full {
    if V::load(pa.add(offset)).gt_mask(V::load(pb.add(offset))) != all {
      return false;
    }
    offset += lanes;
  }
  a[full..].iter().zip(&b[full..]).all(|(&x, &y)| x > y)
}

// Length of the leading run of elements greater than `threshold`.
#[inline(always)]
unsafe fn leading_gt_kernel<V: SimdVector>(values: &[V::Elem], threshold: V::Elem) -> usize {
  let len = values.len();
  let lanes = V::LANES;
  let all = lane_mask(lanes);
  let t = V::splat(threshold);
  let full = len - len % lanes;
  let src = values.as_ptr();

  let mut offset = 0;
  while offset < full {
    let failed = !V::load(src.add(offset)).gt_mask(t) & all;
    if failed != 0 {
      return offset + failed.trailing_zeros() as usize;
    }
    offset += lanes;
  }
  full + leading_gt_scalar(&values[full..], threshold)
}

// =============================================================================
// AVX2 ENTRY POINTS
// =============================================================================
//
// # Safety
// Require AVX2 and FMA. Output slices must hold at least `values.len()` elements.

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn filter_gt_avx2<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
  let _frame = WideFrame::enter();
  filter_kernel::<T::Avx2>(values, out, threshold)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn partition_gt_avx2<T: Element>(
  values: &[T],
  pass: &mut [T],
  fail: &mut [T],
  threshold: T,
) -> (usize, usize) {
  let _frame = WideFrame::enter();
  partition_kernel::<T::Avx2>(values, pass, fail, threshold)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn any_gt_avx2<T: Element>(values: &[T], threshold: T) -> bool {
  let _frame = WideFrame::enter();
  any_kernel::<T::Avx2>(values, threshold)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn all_gt_avx2<T: Element>(values: &[T], threshold: T) -> bool {
  let _frame = WideFrame::enter();
  all_kernel::<T::Avx2>(values, threshold)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn all_eq_avx2<T: Element>(values: &[T], value: T) -> bool {
  let _frame = WideFrame::enter();
  all_eq_kernel::<T::Avx2>(values, value)
}

// `b.len() == a.len()`
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn all_gt_zip_avx2<T: Element>(a: &[T], b: &[T]) -> bool {
  let _frame = WideFrame::enter();
  all_gt_zip_kernel::<T::Avx2>(a, b)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn leading_gt_avx2<T: Element>(values: &[T], threshold: T) -> usize {
  let _frame = WideFrame::enter();
  leading_gt_kernel::<T::Avx2>(values, threshold)
}

// =============================================================================
// NEON ENTRY POINTS
// =============================================================================

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn filter_gt_neon<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
  filter_kernel::<T::Neon>(values, out, threshold)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn partition_gt_neon<T: Element>(
  values: &[T],
  pass: &mut [T],
  fail: &mut [T],
  threshold: T,
) -> (usize, usize) {
  partition_kernel::<T::Neon>(values, pass, fail, threshold)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn any_gt_neon<T: Element>(values: &[T], threshold: T) -> bool {
  any_kernel::<T::Neon>(values, threshold)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn all_gt_neon<T: Element>(values: &[T], threshold: T) -> bool {
  all_kernel::<T::Neon>(values, threshold)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn all_eq_neon<T: Element>(values: &[T], value: T) -> bool {
  all_eq_kernel::<T::Neon>(values, value)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn all_gt_zip_neon<T: Element>(a: &[T], b: &[T]) -> bool {
  all_gt_zip_kernel::<T::Neon>(a, b)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn leading_gt_neon<T: Element>(values: &[T], threshold: T) -> usize {
  leading_gt_kernel::<T::Neon>(values, threshold)
}

// =============================================================================
// SCALAR
// =============================================================================

pub(crate) fn filter_gt_scalar<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
  let mut cursor = 0;
  for &x in values {
    if x > threshold {
      out[cursor] = x;
      cursor += 1;
    }
  }
  cursor
}

pub(crate) fn partition_gt_scalar<T: Element>(
  values: &[T],
  pass: &mut [T],
  fail: &mut [T],
  threshold: T,
) -> (usize, usize) {
  let (mut passed, mut failed) = (0, 0);
  for &x in values {
    if x > threshold {
      pass[passed] = x;
      passed += 1;
    } else {
      fail[failed] = x;
      failed += 1;
    }
  }
  (passed, failed)
}

#[inline]
pub(crate) fn any_gt_scalar<T: Element>(values: &[T], threshold: T) -> bool {
  values.iter().any(|&x| x > threshold)
}

#[inline]
pub(crate) fn all_gt_scalar<T: Element>(values: &[T], threshold: T) -> bool {
  values.iter().all(|&x| x > threshold)
}

#[inline]
pub(crate) fn all_eq_scalar<T: Element>(values: &[T], value: T) -> bool {
  values.iter().all(|&x| x == value)
}

#[inline]
pub(crate) fn all_gt_zip_scalar<T: Element>(a: &[T], b: &[T]) -> bool {
  a.iter().zip(b).all(|(&x, &y)| x > y)
}

#[inline]
pub(crate) fn leading_gt_scalar<T: Element>(values: &[T], threshold: T) -> usize {
  values.iter().take_while(|&&x| x > threshold).count()
}
