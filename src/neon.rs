// SPDX-License-Identifier: Apache-2.0

//! NEON vector registers (128-bit) for the ten element types.
//!
//! Lane counts: 16 x 8-bit, 8 x 16-bit, 4 x 32-bit, 2 x 64-bit.
//!
//! NEON has no movemask; comparison masks are turned into bitmasks by AND-ing
//! with per-lane bit weights and summing across the register. 64-bit lanes
//! lack multiply and min/max, so those go through lane extracts and
//! compare-and-select.

#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]

use std::arch::aarch64::*;

use crate::constants::{
  LANES_NEON_16, LANES_NEON_32, LANES_NEON_64, LANES_NEON_BYTES, LANES_NEON_F32, LANES_NEON_F64,
  VECTOR_ALIGN_NEON,
};
use crate::frame::debug_assert_aligned;
use crate::tables::{BytePermutations, COMPRESS_2X64, COMPRESS_4X32, COMPRESS_8X16};
use crate::vector::{FloatVector, SimdVector};

// =============================================================================
// MASK EXTRACTION
// =============================================================================

const BIT_WEIGHTS_8: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];
const BIT_WEIGHTS_16: [u16; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
const BIT_WEIGHTS_32: [u32; 4] = [1, 2, 4, 8];
const BIT_WEIGHTS_64: [u64; 2] = [1, 2];

// Each half sums to at most 255, so reduce them separately.
#[inline(always)]
unsafe fn mask_8(m: uint8x16_t) -> u64 {
  let bits = vandq_u8(m, vld1q_u8(BIT_WEIGHTS_8.as_ptr()));
  let lo = vaddv_u8(vget_low_u8(bits)) as u64;
  let hi = vaddv_u8(vget_high_u8(bits)) as u64;
  lo | (hi << 8)
}

#[inline(always)]
unsafe fn mask_16(m: uint16x8_t) -> u64 {
  vaddvq_u16(vandq_u16(m, vld1q_u16(BIT_WEIGHTS_16.as_ptr()))) as u64
}

#[inline(always)]
unsafe fn mask_32(m: uint32x4_t) -> u64 {
  vaddvq_u32(vandq_u32(m, vld1q_u32(BIT_WEIGHTS_32.as_ptr()))) as u64
}

#[inline(always)]
unsafe fn mask_64(m: uint64x2_t) -> u64 {
  vaddvq_u64(vandq_u64(m, vld1q_u64(BIT_WEIGHTS_64.as_ptr())))
}

// =============================================================================
// COMPOSED 64-BIT OPERATIONS
// =============================================================================

macro_rules! neon_wide_lane_ops {
  (
    $mul:ident, $mla:ident, $min:ident, $max:ident, $abd:ident,
    $reg:ty, $get:ident, $set:ident, $dup:ident, $addq:ident, $subq:ident, $cgt:ident, $bsl:ident
  ) => {
    #[inline(always)]
    unsafe fn $mul(a: $reg, b: $reg) -> $reg {
      let lo = $get(a, 0).wrapping_mul($get(b, 0));
      let hi = $get(a, 1).wrapping_mul($get(b, 1));
      $set(hi, $set(lo, $dup(0), 0), 1)
    }

    #[inline(always)]
    unsafe fn $mla(c: $reg, a: $reg, b: $reg) -> $reg {
      $addq(c, $mul(a, b))
    }

    #[inline(always)]
    unsafe fn $min(a: $reg, b: $reg) -> $reg {
      $bsl($cgt(a, b), b, a)
    }

    #[inline(always)]
    unsafe fn $max(a: $reg, b: $reg) -> $reg {
      $bsl($cgt(a, b), a, b)
    }

    #[inline(always)]
    unsafe fn $abd(a: $reg, b: $reg) -> $reg {
      $subq($max(a, b), $min(a, b))
    }
  };
}

neon_wide_lane_ops!(
  mul_s64, mla_s64, min_s64, max_s64, abd_s64,
  int64x2_t, vgetq_lane_s64, vsetq_lane_s64, vdupq_n_s64, vaddq_s64, vsubq_s64, vcgtq_s64, vbslq_s64
);

neon_wide_lane_ops!(
  mul_u64, mla_u64, min_u64, max_u64, abd_u64,
  uint64x2_t, vgetq_lane_u64, vsetq_lane_u64, vdupq_n_u64, vaddq_u64, vsubq_u64, vcgtq_u64, vbslq_u64
);

#[inline(always)]
unsafe fn keep_lanes<V>(v: V) -> V {
  v
}

// =============================================================================
// TABLE-DRIVEN COMPACTION
// =============================================================================

#[inline(always)]
unsafe fn tbl_compress<const ROWS: usize>(
  bytes: uint8x16_t,
  table: &BytePermutations<ROWS>,
  mask: u64,
  dst: *mut u8,
) -> usize {
  let idx = vld1q_u8(table.0[mask as usize].as_ptr());
  vst1q_u8(dst, vqtbl1q_u8(bytes, idx));
  mask.count_ones() as usize
}

// =============================================================================
// REGISTERS
// =============================================================================

macro_rules! neon_vector {
  (
    $name:ident, $elem:ty, $lanes:expr, $reg:ty,
    dup: $dup:ident, ld: $ld:ident, st: $st:ident, add: $add:ident, mul: $mul:ident, mla: $mla:ident,
    min: $min:ident, max: $max:ident, abd: $abd:ident, abs: $abs:ident, gt: $gt:ident, eq: $eq:ident,
    mask: $mask:ident
    $(, compress: $as_bytes:ident => $table:ident)?
  ) => {
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name($reg);

    impl SimdVector for $name {
      type Elem = $elem;
      const LANES: usize = $lanes;

      #[inline(always)]
      unsafe fn splat(value: $elem) -> Self {
        Self($dup(value))
      }

      #[inline(always)]
      unsafe fn load(ptr: *const $elem) -> Self {
        Self($ld(ptr))
      }

      #[inline(always)]
      unsafe fn load_aligned(ptr: *const $elem) -> Self {
        debug_assert_aligned(ptr, VECTOR_ALIGN_NEON);
        Self($ld(ptr))
      }

      #[inline(always)]
      unsafe fn store(self, ptr: *mut $elem) {
        $st(ptr, self.0)
      }

      #[inline(always)]
      unsafe fn store_aligned(self, ptr: *mut $elem) {
        debug_assert_aligned(ptr, VECTOR_ALIGN_NEON);
        $st(ptr, self.0)
      }

      #[inline(always)]
      unsafe fn add(self, other: Self) -> Self {
        Self($add(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn mul(self, other: Self) -> Self {
        Self($mul(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn mul_add(self, b: Self, c: Self) -> Self {
        Self($mla(c.0, self.0, b.0))
      }

      #[inline(always)]
      unsafe fn min(self, other: Self) -> Self {
        Self($min(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn max(self, other: Self) -> Self {
        Self($max(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn abs_diff(self, other: Self) -> Self {
        Self($abd(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn abs(self) -> Self {
        Self($abs(self.0))
      }

      #[inline(always)]
      unsafe fn gt_mask(self, other: Self) -> u64 {
        $mask($gt(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn eq_mask(self, other: Self) -> u64 {
        $mask($eq(self.0, other.0))
      }

      $(
        #[inline(always)]
        unsafe fn compress_store(self, mask: u64, dst: *mut $elem) -> usize {
          tbl_compress($as_bytes(self.0), &$table, mask, dst as *mut u8)
        }
      )?
    }
  };
}

neon_vector!(
  I8x16, i8, LANES_NEON_BYTES, int8x16_t,
  dup: vdupq_n_s8, ld: vld1q_s8, st: vst1q_s8, add: vaddq_s8, mul: vmulq_s8, mla: vmlaq_s8,
  min: vminq_s8, max: vmaxq_s8, abd: vabdq_s8, abs: vabsq_s8, gt: vcgtq_s8, eq: vceqq_s8,
  mask: mask_8
);

neon_vector!(
  U8x16, u8, LANES_NEON_BYTES, uint8x16_t,
  dup: vdupq_n_u8, ld: vld1q_u8, st: vst1q_u8, add: vaddq_u8, mul: vmulq_u8, mla: vmlaq_u8,
  min: vminq_u8, max: vmaxq_u8, abd: vabdq_u8, abs: keep_lanes, gt: vcgtq_u8, eq: vceqq_u8,
  mask: mask_8
);

neon_vector!(
  I16x8, i16, LANES_NEON_16, int16x8_t,
  dup: vdupq_n_s16, ld: vld1q_s16, st: vst1q_s16, add: vaddq_s16, mul: vmulq_s16, mla: vmlaq_s16,
  min: vminq_s16, max: vmaxq_s16, abd: vabdq_s16, abs: vabsq_s16, gt: vcgtq_s16, eq: vceqq_s16,
  mask: mask_16,
  compress: vreinterpretq_u8_s16 => COMPRESS_8X16
);

neon_vector!(
  U16x8, u16, LANES_NEON_16, uint16x8_t,
  dup: vdupq_n_u16, ld: vld1q_u16, st: vst1q_u16, add: vaddq_u16, mul: vmulq_u16, mla: vmlaq_u16,
  min: vminq_u16, max: vmaxq_u16, abd: vabdq_u16, abs: keep_lanes, gt: vcgtq_u16, eq: vceqq_u16,
  mask: mask_16,
  compress: vreinterpretq_u8_u16 => COMPRESS_8X16
);

neon_vector!(
  I32x4, i32, LANES_NEON_32, int32x4_t,
  dup: vdupq_n_s32, ld: vld1q_s32, st: vst1q_s32, add: vaddq_s32, mul: vmulq_s32, mla: vmlaq_s32,
  min: vminq_s32, max: vmaxq_s32, abd: vabdq_s32, abs: vabsq_s32, gt: vcgtq_s32, eq: vceqq_s32,
  mask: mask_32,
  compress: vreinterpretq_u8_s32 => COMPRESS_4X32
);

neon_vector!(
  U32x4, u32, LANES_NEON_32, uint32x4_t,
  dup: vdupq_n_u32, ld: vld1q_u32, st: vst1q_u32, add: vaddq_u32, mul: vmulq_u32, mla: vmlaq_u32,
  min: vminq_u32, max: vmaxq_u32, abd: vabdq_u32, abs: keep_lanes, gt: vcgtq_u32, eq: vceqq_u32,
  mask: mask_32,
  compress: vreinterpretq_u8_u32 => COMPRESS_4X32
);

neon_vector!(
  I64x2, i64, LANES_NEON_64, int64x2_t,
  dup: vdupq_n_s64, ld: vld1q_s64, st: vst1q_s64, add: vaddq_s64, mul: mul_s64, mla: mla_s64,
  min: min_s64, max: max_s64, abd: abd_s64, abs: vabsq_s64, gt: vcgtq_s64, eq: vceqq_s64,
  mask: mask_64,
  compress: vreinterpretq_u8_s64 => COMPRESS_2X64
);

neon_vector!(
  U64x2, u64, LANES_NEON_64, uint64x2_t,
  dup: vdupq_n_u64, ld: vld1q_u64, st: vst1q_u64, add: vaddq_u64, mul: mul_u64, mla: mla_u64,
  min: min_u64, max: max_u64, abd: abd_u64, abs: keep_lanes, gt: vcgtq_u64, eq: vceqq_u64,
  mask: mask_64,
  compress: vreinterpretq_u8_u64 => COMPRESS_2X64
);

// vminnm/vmaxnm return the numeric operand when the other is NaN
neon_vector!(
  F32x4, f32, LANES_NEON_F32, float32x4_t,
  dup: vdupq_n_f32, ld: vld1q_f32, st: vst1q_f32, add: vaddq_f32, mul: vmulq_f32, mla: vfmaq_f32,
  min: vminnmq_f32, max: vmaxnmq_f32, abd: vabdq_f32, abs: vabsq_f32, gt: vcgtq_f32, eq: vceqq_f32,
  mask: mask_32,
  compress: vreinterpretq_u8_f32 => COMPRESS_4X32
);

neon_vector!(
  F64x2, f64, LANES_NEON_F64, float64x2_t,
  dup: vdupq_n_f64, ld: vld1q_f64, st: vst1q_f64, add: vaddq_f64, mul: vmulq_f64, mla: vfmaq_f64,
  min: vminnmq_f64, max: vmaxnmq_f64, abd: vabdq_f64, abs: vabsq_f64, gt: vcgtq_f64, eq: vceqq_f64,
  mask: mask_64,
  compress: vreinterpretq_u8_f64 => COMPRESS_2X64
);

impl FloatVector for F32x4 {
  #[inline(always)]
  unsafe fn sqrt(self) -> Self {
    Self(vsqrtq_f32(self.0))
  }
}

impl FloatVector for F64x2 {
  #[inline(always)]
  unsafe fn sqrt(self) -> Self {
    Self(vsqrtq_f64(self.0))
  }
}
