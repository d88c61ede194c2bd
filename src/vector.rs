// SPDX-License-Identifier: Apache-2.0

//! Vector register abstraction the generic kernels are written against.
//!
//! One implementation per (element type, backend): `avx2.rs` provides the
//! 256-bit registers, `neon.rs` the 128-bit ones. All methods are
//! `#[inline(always)]` in the implementations so they are folded into the
//! `#[target_feature]` entry point that instantiates the kernel.

use crate::constants::SCRATCH_LANES;
use crate::element::Element;
use crate::frame::AlignedScratch;

/// A SIMD register holding `LANES` elements of `Elem`.
///
/// # Safety
/// Every method requires the instruction set of the implementing backend to be
/// available. Pointer arguments must be valid for `LANES` elements unless
/// stated otherwise.
pub trait SimdVector: Copy {
  type Elem: Element;
  const LANES: usize;

  unsafe fn splat(value: Self::Elem) -> Self;
  unsafe fn load(ptr: *const Self::Elem) -> Self;
  /// `ptr` must be aligned to the register width.
  unsafe fn load_aligned(ptr: *const Self::Elem) -> Self;
  unsafe fn store(self, ptr: *mut Self::Elem);
  /// `ptr` must be aligned to the register width.
  unsafe fn store_aligned(self, ptr: *mut Self::Elem);

  /// Lane-wise wrapping add.
  unsafe fn add(self, other: Self) -> Self;
  /// Lane-wise wrapping multiply (low half of the product).
  unsafe fn mul(self, other: Self) -> Self;
  /// `self * b + c`; a single rounding for floats.
  unsafe fn mul_add(self, b: Self, c: Self) -> Self;
  /// Lane-wise minimum. A NaN lane in `self` yields the lane of `other`.
  unsafe fn min(self, other: Self) -> Self;
  /// Lane-wise maximum. A NaN lane in `self` yields the lane of `other`.
  unsafe fn max(self, other: Self) -> Self;
  /// `|self - other|`, computed as `max - min` in the element width.
  unsafe fn abs_diff(self, other: Self) -> Self;
  /// Wrapping absolute value; identity for unsigned lanes.
  unsafe fn abs(self) -> Self;
  /// Bit `i` set when lane `i` of `self` is greater than lane `i` of `other`.
  /// Unordered (NaN) lanes compare false.
  unsafe fn gt_mask(self, other: Self) -> u64;
  /// Bit `i` set when lane `i` of `self` equals lane `i` of `other`.
  /// NaN lanes compare false.
  unsafe fn eq_mask(self, other: Self) -> u64;

  /// Loads `count < LANES` elements, filling the remaining lanes with `fill`.
  ///
  /// Goes through the aligned stack scratch so no lane past `count` is read
  /// from `ptr`.
  #[inline(always)]
  unsafe fn load_partial(ptr: *const Self::Elem, count: usize, fill: Self::Elem) -> Self {
    debug_assert!(count <= Self::LANES && Self::LANES <= SCRATCH_LANES);
    let mut scratch = AlignedScratch::filled(fill);
    core::ptr::copy_nonoverlapping(ptr, scratch.as_mut_ptr(), count);
    Self::load_aligned(scratch.as_ptr())
  }

  /// Horizontal reduction: pairwise tree over the lanes with `combine`.
  #[inline(always)]
  unsafe fn reduce_lanes<F>(self, combine: F) -> Self::Elem
  where
    F: Fn(Self::Elem, Self::Elem) -> Self::Elem,
  {
    let mut scratch = AlignedScratch::filled(Self::Elem::ZERO);
    self.store_aligned(scratch.as_mut_ptr());
    let lanes = &mut scratch.lanes;
    let mut width = Self::LANES;
    while width > 1 {
      width /= 2;
      for i in 0..width {
        lanes[i] = combine(lanes[i], lanes[i + width]);
      }
    }
    lanes[0]
  }

  /// Writes the lanes selected by `mask` to `dst` in lane order and returns how
  /// many were written.
  ///
  /// `dst` must have room for `LANES` elements: implementations may store a
  /// whole register and let the cursor overwrite the unselected tail.
  ///
  /// This default extracts set lanes one at a time; backends override it with
  /// a permutation table where the lane count keeps the table small.
  #[inline(always)]
  unsafe fn compress_store(self, mask: u64, dst: *mut Self::Elem) -> usize {
    let mut scratch = AlignedScratch::filled(Self::Elem::ZERO);
    self.store_aligned(scratch.as_mut_ptr());
    let mut bits = mask;
    let mut written = 0;
    while bits != 0 {
      let lane = bits.trailing_zeros() as usize;
      *dst.add(written) = scratch.lanes[lane];
      written += 1;
      bits &= bits - 1;
    }
    written
  }
}

/// Float registers: adds the operations integer lanes have no counterpart for.
pub trait FloatVector: SimdVector {
  /// Lane-wise IEEE square root; negative lanes give NaN.
  unsafe fn sqrt(self) -> Self;
}

/// Mask with the low `lanes` bits set.
#[inline(always)]
pub(crate) const fn lane_mask(lanes: usize) -> u64 {
  if lanes >= 64 {
    u64::MAX
  } else {
    (1u64 << lanes) - 1
  }
}
