// SPDX-License-Identifier: Apache-2.0

//! # Fused folds
//!
//! Sum of squares, dot product and sum of absolute differences. The
//! per-element transform is applied and accumulated in the same pass, with the
//! accumulator layout of the reductions. Floats use fused multiply-add.
//!
//! Unary folds are run as binary folds with `b == a`. Both inputs have the
//! same length; the dispatch layer checks it.

#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::needless_range_loop)]

#[cfg(target_arch = "x86_64")]
use crate::constants::ACCUMULATORS_AVX2;
#[cfg(target_arch = "aarch64")]
use crate::constants::ACCUMULATORS_NEON;
use crate::element::Element;
#[cfg(target_arch = "x86_64")]
use crate::frame::WideFrame;
use crate::vector::SimdVector;

pub(crate) trait FoldOp {
  fn scalar<T: Element>(a: T, b: T, acc: T) -> T;
  unsafe fn vector<V: SimdVector>(a: V, b: V, acc: V) -> V;
}

pub(crate) struct SumSq;
pub(crate) struct DotP;
pub(crate) struct Sad;

impl FoldOp for SumSq {
  #[inline(always)]
  fn scalar<T: Element>(a: T, _b: T, acc: T) -> T {
    a.lane_mul_add(a, acc)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(a: V, _b: V, acc: V) -> V {
    a.mul_add(a, acc)
  }
}

impl FoldOp for DotP {
  #[inline(always)]
  fn scalar<T: Element>(a: T, b: T, acc: T) -> T {
    a.lane_mul_add(b, acc)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(a: V, b: V, acc: V) -> V {
    a.mul_add(b, acc)
  }
}

impl FoldOp for Sad {
  #[inline(always)]
  fn scalar<T: Element>(a: T, b: T, acc: T) -> T {
    acc.lane_add(a.lane_abs_diff(b))
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(a: V, b: V, acc: V) -> V {
    acc.add(a.abs_diff(b))
  }
}

#[inline(always)]
unsafe fn fold_kernel<V: SimdVector, O: FoldOp, const K: usize>(
  a: &[V::Elem],
  b: &[V::Elem],
) -> V::Elem {
  debug_assert_eq!(a.len(), b.len());
  let len = a.len();
  let pa = a.as_ptr();
  let pb = b.as_ptr();
  let lanes = V::LANES;
  let zero = V::Elem::ZERO;

  let mut acc = [V::splat(zero); K];

  let block = lanes * K;
  let full_blocks = len / block;
  for block_idx in 0..full_blocks {
    let base = block_idx * block;
    for k in 0..K {
      let offset = base + k * lanes;
      acc[k] = O::vector(V::load(pa.add(offset)), V::load(pb.add(offset)), acc[k]);
    }
  }
  let mut offset = full_blocks * block;

  while offset + lanes <= len {
    acc[0] = O::vector(V::load(pa.add(offset)), V::load(pb.add(offset)), acc[0]);
    offset += lanes;
  }

  // Zero padding contributes nothing to any of the transforms
  let half = lanes / 2;
  if half > 0 && offset + half <= len {
    let va = V::load_partial(pa.add(offset), half, zero);
    let vb = V::load_partial(pb.add(offset), half, zero);
    acc[0] = O::vector(va, vb, acc[0]);
    offset += half;
  }

  let mut combined = acc[0];
  for k in 1..K {
    combined = combined.add(acc[k]);
  }
  let mut result = combined.reduce_lanes(V::Elem::lane_add);

  for i in offset..len {
    result = O::scalar(a[i], b[i], result);
  }
  result
}

// # Safety
// Requires AVX2 and FMA; `a.len() == b.len()`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn fold_avx2<T: Element, O: FoldOp>(a: &[T], b: &[T]) -> T {
  let _frame = WideFrame::enter();
  fold_kernel::<T::Avx2, O, ACCUMULATORS_AVX2>(a, b)
}

// # Safety
// Requires NEON; `a.len() == b.len()`.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fold_neon<T: Element, O: FoldOp>(a: &[T], b: &[T]) -> T {
  fold_kernel::<T::Neon, O, ACCUMULATORS_NEON>(a, b)
}

#[inline]
pub(crate) fn fold_scalar<T: Element, O: FoldOp>(a: &[T], b: &[T]) -> T {
  a.iter()
    .zip(b)
    .fold(T::ZERO, |acc, (&x, &y)| O::scalar(x, y, acc))
}
