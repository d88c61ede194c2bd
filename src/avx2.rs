// SPDX-License-Identifier: Apache-2.0

//! AVX2 vector registers (256-bit) for the ten element types.
//!
//! Lane counts: 32 x 8-bit, 16 x 16-bit, 8 x 32-bit, 4 x 64-bit.
//!
//! AVX2 has no byte multiply, no 64-bit multiply, no 64-bit min/max and only
//! signed compares; those are composed below from the instructions it does
//! have. Unsigned compares flip the sign bit of both operands first.
//!
//! Floats need FMA in addition to AVX2; the dispatch layer only routes here
//! when both are present.

// Some clippy lints are noisy for low-level SIMD code; we opt out at the module level.
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]

// SIMD intrinsics: the set used here spans every integer width
use std::arch::x86_64::*;

use crate::constants::{
  LANES_AVX2_16, LANES_AVX2_32, LANES_AVX2_64, LANES_AVX2_BYTES, LANES_AVX2_F32, LANES_AVX2_F64,
  VECTOR_ALIGN_AVX2,
};
use crate::frame::debug_assert_aligned;
use crate::tables::{COMPRESS_4X64, COMPRESS_8X32};
use crate::vector::{FloatVector, SimdVector};

// =============================================================================
// COMPOSED INTEGER OPERATIONS
// =============================================================================

// Low byte of each 16-bit product is the wrapped 8-bit product; do even and odd bytes separately.
#[inline(always)]
unsafe fn mullo_epi8(a: __m256i, b: __m256i) -> __m256i {
  let even = _mm256_mullo_epi16(a, b);
  let odd = _mm256_mullo_epi16(_mm256_srli_epi16(a, 8), _mm256_srli_epi16(b, 8));
  _mm256_or_si256(
    _mm256_and_si256(even, _mm256_set1_epi16(0x00FF)),
    _mm256_slli_epi16(odd, 8),
  )
}

// lo*lo + ((hi*lo + lo*hi) << 32), all mod 2^64
#[inline(always)]
unsafe fn mullo_epi64(a: __m256i, b: __m256i) -> __m256i {
  let lo = _mm256_mul_epu32(a, b);
  let a_hi = _mm256_srli_epi64(a, 32);
  let b_hi = _mm256_srli_epi64(b, 32);
  let cross = _mm256_add_epi64(_mm256_mul_epu32(a_hi, b), _mm256_mul_epu32(a, b_hi));
  _mm256_add_epi64(lo, _mm256_slli_epi64(cross, 32))
}

#[inline(always)]
unsafe fn min_epi64(a: __m256i, b: __m256i) -> __m256i {
  _mm256_blendv_epi8(a, b, _mm256_cmpgt_epi64(a, b))
}

#[inline(always)]
unsafe fn max_epi64(a: __m256i, b: __m256i) -> __m256i {
  _mm256_blendv_epi8(b, a, _mm256_cmpgt_epi64(a, b))
}

#[inline(always)]
unsafe fn min_epu64(a: __m256i, b: __m256i) -> __m256i {
  _mm256_blendv_epi8(a, b, gt_epu64(a, b))
}

#[inline(always)]
unsafe fn max_epu64(a: __m256i, b: __m256i) -> __m256i {
  _mm256_blendv_epi8(b, a, gt_epu64(a, b))
}

// (x ^ s) - s with s = all-ones for negative lanes
#[inline(always)]
unsafe fn abs_epi64(a: __m256i) -> __m256i {
  let sign = _mm256_cmpgt_epi64(_mm256_setzero_si256(), a);
  _mm256_sub_epi64(_mm256_xor_si256(a, sign), sign)
}

#[inline(always)]
unsafe fn keep_lanes(a: __m256i) -> __m256i {
  a
}

#[inline(always)]
unsafe fn gt_epu8(a: __m256i, b: __m256i) -> __m256i {
  let bias = _mm256_set1_epi8(i8::MIN);
  _mm256_cmpgt_epi8(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_epu16(a: __m256i, b: __m256i) -> __m256i {
  let bias = _mm256_set1_epi16(i16::MIN);
  _mm256_cmpgt_epi16(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_epu32(a: __m256i, b: __m256i) -> __m256i {
  let bias = _mm256_set1_epi32(i32::MIN);
  _mm256_cmpgt_epi32(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_epu64(a: __m256i, b: __m256i) -> __m256i {
  let bias = _mm256_set1_epi64x(i64::MIN);
  _mm256_cmpgt_epi64(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

// =============================================================================
// MASK EXTRACTION
// =============================================================================

#[inline(always)]
unsafe fn movemask_8(m: __m256i) -> u64 {
  _mm256_movemask_epi8(m) as u32 as u64
}

// Narrow each 16-bit lane to a byte (packs works per 128-bit half, so restore
// quadword order), then one bit per byte.
#[inline(always)]
unsafe fn movemask_16(m: __m256i) -> u64 {
  let packed = _mm256_packs_epi16(m, _mm256_setzero_si256());
  let ordered = _mm256_permute4x64_epi64(packed, 0xD8);
  (_mm256_movemask_epi8(ordered) as u32 & 0xFFFF) as u64
}

#[inline(always)]
unsafe fn movemask_32(m: __m256i) -> u64 {
  _mm256_movemask_ps(_mm256_castsi256_ps(m)) as u32 as u64
}

#[inline(always)]
unsafe fn movemask_64(m: __m256i) -> u64 {
  _mm256_movemask_pd(_mm256_castsi256_pd(m)) as u32 as u64
}

// =============================================================================
// TABLE-DRIVEN COMPACTION
// =============================================================================

#[inline(always)]
unsafe fn compress_epi32(v: __m256i, mask: u64, dst: *mut __m256i) -> usize {
  let row = &COMPRESS_8X32.0[mask as usize];
  let idx = _mm256_load_si256(row.as_ptr() as *const __m256i);
  _mm256_storeu_si256(dst, _mm256_permutevar8x32_epi32(v, idx));
  mask.count_ones() as usize
}

#[inline(always)]
unsafe fn compress_epi64(v: __m256i, mask: u64, dst: *mut __m256i) -> usize {
  let row = &COMPRESS_4X64.0[mask as usize];
  let idx = _mm256_load_si256(row.as_ptr() as *const __m256i);
  _mm256_storeu_si256(dst, _mm256_permutevar8x32_epi32(v, idx));
  mask.count_ones() as usize
}

// =============================================================================
// INTEGER REGISTERS
// =============================================================================

macro_rules! avx2_int_vector {
  (
    $name:ident, $elem:ty, $lanes:expr, $repr:ty,
    splat: $set1:ident, add: $add:ident, sub: $sub:ident, mul: $mul:ident,
    min: $min:ident, max: $max:ident, abs: $abs:ident, gt: $gt:ident, eq: $eq:ident,
    movemask: $movemask:ident
    $(, compress: $compress:ident)?
  ) => {
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(__m256i);

    impl SimdVector for $name {
      type Elem = $elem;
      const LANES: usize = $lanes;

      #[inline(always)]
      unsafe fn splat(value: $elem) -> Self {
        Self($set1(value as $repr))
      }

      #[inline(always)]
      unsafe fn load(ptr: *const $elem) -> Self {
        Self(_mm256_loadu_si256(ptr as *const __m256i))
      }

      #[inline(always)]
      unsafe fn load_aligned(ptr: *const $elem) -> Self {
        debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
        Self(_mm256_load_si256(ptr as *const __m256i))
      }

      #[inline(always)]
      unsafe fn store(self, ptr: *mut $elem) {
        _mm256_storeu_si256(ptr as *mut __m256i, self.0)
      }

      #[inline(always)]
      unsafe fn store_aligned(self, ptr: *mut $elem) {
        debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
        _mm256_store_si256(ptr as *mut __m256i, self.0)
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
        Self($add($mul(self.0, b.0), c.0))
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
        Self($sub($max(self.0, other.0), $min(self.0, other.0)))
      }

      #[inline(always)]
      unsafe fn abs(self) -> Self {
        Self($abs(self.0))
      }

      #[inline(always)]
      unsafe fn gt_mask(self, other: Self) -> u64 {
        $movemask($gt(self.0, other.0))
      }

      #[inline(always)]
      unsafe fn eq_mask(self, other: Self) -> u64 {
        $movemask($eq(self.0, other.0))
      }

      $(
        #[inline(always)]
        unsafe fn compress_store(self, mask: u64, dst: *mut $elem) -> usize {
          $compress(self.0, mask, dst as *mut __m256i)
        }
      )?
    }
  };
}

avx2_int_vector!(
  I8x32, i8, LANES_AVX2_BYTES, i8,
  splat: _mm256_set1_epi8, add: _mm256_add_epi8, sub: _mm256_sub_epi8, mul: mullo_epi8,
  min: _mm256_min_epi8, max: _mm256_max_epi8, abs: _mm256_abs_epi8,
  gt: _mm256_cmpgt_epi8, eq: _mm256_cmpeq_epi8, movemask: movemask_8
);

avx2_int_vector!(
  U8x32, u8, LANES_AVX2_BYTES, i8,
  splat: _mm256_set1_epi8, add: _mm256_add_epi8, sub: _mm256_sub_epi8, mul: mullo_epi8,
  min: _mm256_min_epu8, max: _mm256_max_epu8, abs: keep_lanes,
  gt: gt_epu8, eq: _mm256_cmpeq_epi8, movemask: movemask_8
);

avx2_int_vector!(
  I16x16, i16, LANES_AVX2_16, i16,
  splat: _mm256_set1_epi16, add: _mm256_add_epi16, sub: _mm256_sub_epi16, mul: _mm256_mullo_epi16,
  min: _mm256_min_epi16, max: _mm256_max_epi16, abs: _mm256_abs_epi16,
  gt: _mm256_cmpgt_epi16, eq: _mm256_cmpeq_epi16, movemask: movemask_16
);

avx2_int_vector!(
  U16x16, u16, LANES_AVX2_16, i16,
  splat: _mm256_set1_epi16, add: _mm256_add_epi16, sub: _mm256_sub_epi16, mul: _mm256_mullo_epi16,
  min: _mm256_min_epu16, max: _mm256_max_epu16, abs: keep_lanes,
  gt: gt_epu16, eq: _mm256_cmpeq_epi16, movemask: movemask_16
);

avx2_int_vector!(
  I32x8, i32, LANES_AVX2_32, i32,
  splat: _mm256_set1_epi32, add: _mm256_add_epi32, sub: _mm256_sub_epi32, mul: _mm256_mullo_epi32,
  min: _mm256_min_epi32, max: _mm256_max_epi32, abs: _mm256_abs_epi32,
  gt: _mm256_cmpgt_epi32, eq: _mm256_cmpeq_epi32, movemask: movemask_32, compress: compress_epi32
);

avx2_int_vector!(
  U32x8, u32, LANES_AVX2_32, i32,
  splat: _mm256_set1_epi32, add: _mm256_add_epi32, sub: _mm256_sub_epi32, mul: _mm256_mullo_epi32,
  min: _mm256_min_epu32, max: _mm256_max_epu32, abs: keep_lanes,
  gt: gt_epu32, eq: _mm256_cmpeq_epi32, movemask: movemask_32, compress: compress_epi32
);

avx2_int_vector!(
  I64x4, i64, LANES_AVX2_64, i64,
  splat: _mm256_set1_epi64x, add: _mm256_add_epi64, sub: _mm256_sub_epi64, mul: mullo_epi64,
  min: min_epi64, max: max_epi64, abs: abs_epi64,
  gt: _mm256_cmpgt_epi64, eq: _mm256_cmpeq_epi64, movemask: movemask_64, compress: compress_epi64
);

avx2_int_vector!(
  U64x4, u64, LANES_AVX2_64, i64,
  splat: _mm256_set1_epi64x, add: _mm256_add_epi64, sub: _mm256_sub_epi64, mul: mullo_epi64,
  min: min_epu64, max: max_epu64, abs: keep_lanes,
  gt: gt_epu64, eq: _mm256_cmpeq_epi64, movemask: movemask_64, compress: compress_epi64
);

// =============================================================================
// FLOAT REGISTERS
// =============================================================================

#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x8(__m256);

impl SimdVector for F32x8 {
  type Elem = f32;
  const LANES: usize = LANES_AVX2_F32;

  #[inline(always)]
  unsafe fn splat(value: f32) -> Self {
    Self(_mm256_set1_ps(value))
  }

  #[inline(always)]
  unsafe fn load(ptr: *const f32) -> Self {
    Self(_mm256_loadu_ps(ptr))
  }

  #[inline(always)]
  unsafe fn load_aligned(ptr: *const f32) -> Self {
    debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
    Self(_mm256_load_ps(ptr))
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut f32) {
    _mm256_storeu_ps(ptr, self.0)
  }

  #[inline(always)]
  unsafe fn store_aligned(self, ptr: *mut f32) {
    debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
    _mm256_store_ps(ptr, self.0)
  }

  #[inline(always)]
  unsafe fn add(self, other: Self) -> Self {
    Self(_mm256_add_ps(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn mul(self, other: Self) -> Self {
    Self(_mm256_mul_ps(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn mul_add(self, b: Self, c: Self) -> Self {
    Self(_mm256_fmadd_ps(self.0, b.0, c.0))
  }

  // vminps returns the second operand when either is NaN
  #[inline(always)]
  unsafe fn min(self, other: Self) -> Self {
    Self(_mm256_min_ps(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn max(self, other: Self) -> Self {
    Self(_mm256_max_ps(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn abs_diff(self, other: Self) -> Self {
    Self(_mm256_sub_ps(self.0, other.0)).abs()
  }

  #[inline(always)]
  unsafe fn abs(self) -> Self {
    Self(_mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0))
  }

  #[inline(always)]
  unsafe fn gt_mask(self, other: Self) -> u64 {
    _mm256_movemask_ps(_mm256_cmp_ps(self.0, other.0, _CMP_GT_OQ)) as u32 as u64
  }

  #[inline(always)]
  unsafe fn eq_mask(self, other: Self) -> u64 {
    _mm256_movemask_ps(_mm256_cmp_ps(self.0, other.0, _CMP_EQ_OQ)) as u32 as u64
  }

  #[inline(always)]
  unsafe fn compress_store(self, mask: u64, dst: *mut f32) -> usize {
    let row = &COMPRESS_8X32.0[mask as usize];
    let idx = _mm256_load_si256(row.as_ptr() as *const __m256i);
    _mm256_storeu_ps(dst, _mm256_permutevar8x32_ps(self.0, idx));
    mask.count_ones() as usize
  }
}

impl FloatVector for F32x8 {
  #[inline(always)]
  unsafe fn sqrt(self) -> Self {
    Self(_mm256_sqrt_ps(self.0))
  }
}

#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x4(__m256d);

impl SimdVector for F64x4 {
  type Elem = f64;
  const LANES: usize = LANES_AVX2_F64;

  #[inline(always)]
  unsafe fn splat(value: f64) -> Self {
    Self(_mm256_set1_pd(value))
  }

  #[inline(always)]
  unsafe fn load(ptr: *const f64) -> Self {
    Self(_mm256_loadu_pd(ptr))
  }

  #[inline(always)]
  unsafe fn load_aligned(ptr: *const f64) -> Self {
    debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
    Self(_mm256_load_pd(ptr))
  }

  #[inline(always)]
  unsafe fn store(self, ptr: *mut f64) {
    _mm256_storeu_pd(ptr, self.0)
  }

  #[inline(always)]
  unsafe fn store_aligned(self, ptr: *mut f64) {
    debug_assert_aligned(ptr, VECTOR_ALIGN_AVX2);
    _mm256_store_pd(ptr, self.0)
  }

  #[inline(always)]
  unsafe fn add(self, other: Self) -> Self {
    Self(_mm256_add_pd(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn mul(self, other: Self) -> Self {
    Self(_mm256_mul_pd(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn mul_add(self, b: Self, c: Self) -> Self {
    Self(_mm256_fmadd_pd(self.0, b.0, c.0))
  }

  #[inline(always)]
  unsafe fn min(self, other: Self) -> Self {
    Self(_mm256_min_pd(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn max(self, other: Self) -> Self {
    Self(_mm256_max_pd(self.0, other.0))
  }

  #[inline(always)]
  unsafe fn abs_diff(self, other: Self) -> Self {
    Self(_mm256_sub_pd(self.0, other.0)).abs()
  }

  #[inline(always)]
  unsafe fn abs(self) -> Self {
    Self(_mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0))
  }

  #[inline(always)]
  unsafe fn gt_mask(self, other: Self) -> u64 {
    _mm256_movemask_pd(_mm256_cmp_pd(self.0, other.0, _CMP_GT_OQ)) as u32 as u64
  }

  #[inline(always)]
  unsafe fn eq_mask(self, other: Self) -> u64 {
    _mm256_movemask_pd(_mm256_cmp_pd(self.0, other.0, _CMP_EQ_OQ)) as u32 as u64
  }

  #[inline(always)]
  unsafe fn compress_store(self, mask: u64, dst: *mut f64) -> usize {
    compress_epi64(_mm256_castpd_si256(self.0), mask, dst as *mut __m256i)
  }
}

impl FloatVector for F64x4 {
  #[inline(always)]
  unsafe fn sqrt(self) -> Self {
    Self(_mm256_sqrt_pd(self.0))
  }
}
