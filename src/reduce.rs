// SPDX-License-Identifier: Apache-2.0

//! # Reductions
//!
//! Sum, product, min and max of a buffer, one kernel body for all ten element
//! types.
//!
//! Loop structure:
//! 1. `K` independent accumulators; chunk `i` of the main loop folds into
//!    accumulator `i mod K` so consecutive chunks do not wait on each other.
//! 2. Full vectors left over after the last `K`-block fold into accumulator 0.
//! 3. A half-width sub-chunk, loaded into an identity-padded scratch vector.
//! 4. The accumulators are combined once, the lanes are reduced pairwise and
//!    the last few elements are folded one at a time.
//!
//! Integer sums and products wrap. Float min/max ignore NaN, so an all-NaN
//! buffer returns the identity. An empty buffer returns the identity as well.

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

/// Combining rule of a reduction.
pub(crate) trait ReduceOp {
  fn identity<T: Element>() -> T;
  fn scalar<T: Element>(acc: T, x: T) -> T;
  /// `x` is the incoming chunk, `acc` the running value.
  unsafe fn vector<V: SimdVector>(x: V, acc: V) -> V;
}

pub(crate) struct Sum;
pub(crate) struct Product;
pub(crate) struct Min;
pub(crate) struct Max;

impl ReduceOp for Sum {
  #[inline(always)]
  fn identity<T: Element>() -> T {
    T::ZERO
  }

  #[inline(always)]
  fn scalar<T: Element>(acc: T, x: T) -> T {
    acc.lane_add(x)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, acc: V) -> V {
    x.add(acc)
  }
}

impl ReduceOp for Product {
  #[inline(always)]
  fn identity<T: Element>() -> T {
    T::ONE
  }

  #[inline(always)]
  fn scalar<T: Element>(acc: T, x: T) -> T {
    acc.lane_mul(x)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, acc: V) -> V {
    x.mul(acc)
  }
}

// The new element goes first: a NaN there yields the running value.
impl ReduceOp for Min {
  #[inline(always)]
  fn identity<T: Element>() -> T {
    T::MIN_IDENTITY
  }

  #[inline(always)]
  fn scalar<T: Element>(acc: T, x: T) -> T {
    x.lane_min(acc)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, acc: V) -> V {
    x.min(acc)
  }
}

impl ReduceOp for Max {
  #[inline(always)]
  fn identity<T: Element>() -> T {
    T::MAX_IDENTITY
  }

  #[inline(always)]
  fn scalar<T: Element>(acc: T, x: T) -> T {
    x.lane_max(acc)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, acc: V) -> V {
    x.max(acc)
  }
}

#[inline(always)]
unsafe fn reduce_kernel<V: SimdVector, O: ReduceOp, const K: usize>(values: &[V::Elem]) -> V::Elem {
  let len = values.len();
  let ptr = values.as_ptr();
  let lanes = V::LANES;

  let mut acc = [V::splat(O::identity()); K];

  // Main loop: K chunks per iteration, one per accumulator
  let block = lanes * K;
  let full_blocks = len / block;
  for block_idx in 0..full_blocks {
    let base = block_idx * block;
    for k in 0..K {
      let chunk = V::load(ptr.add(base + k * lanes));
      acc[k] = O::vector(chunk, acc[k]);
    }
  }
  let mut offset = full_blocks * block;

  // Remaining full vectors
  while offset + lanes <= len {
    acc[0] = O::vector(V::load(ptr.add(offset)), acc[0]);
    offset += lanes;
  }

  // Half-width sub-chunk
  let half = lanes / 2;
  if half > 0 && offset + half <= len {
    let chunk = V::load_partial(ptr.add(offset), half, O::identity());
    acc[0] = O::vector(chunk, acc[0]);
    offset += half;
  }

  let mut combined = acc[0];
  for k in 1..K {
    combined = O::vector(acc[k], combined);
  }
  let mut result = combined.reduce_lanes(O::scalar::<V::Elem>);

  // Scalar tail
  for &x in &values[offset..] {
    result = O::scalar(result, x);
  }
  result
}

// AVX2 reduction, all element types.
//
// # Safety
// Requires AVX2 and FMA. Use `is_x86_feature_detected!` before calling.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn reduce_avx2<T: Element, O: ReduceOp>(values: &[T]) -> T {
  let _frame = WideFrame::enter();
  reduce_kernel::<T::Avx2, O, ACCUMULATORS_AVX2>(values)
}

// NEON reduction, all element types.
//
// # Safety
// Requires NEON.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn reduce_neon<T: Element, O: ReduceOp>(values: &[T]) -> T {
  reduce_kernel::<T::Neon, O, ACCUMULATORS_NEON>(values)
}

#[inline]
pub(crate) fn reduce_scalar<T: Element, O: ReduceOp>(values: &[T]) -> T {
  values.iter().fold(O::identity(), |acc, &x| O::scalar(acc, x))
}
