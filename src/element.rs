// SPDX-License-Identifier: Apache-2.0

//! Scalar lane semantics of the ten element types.
//!
//! Every kernel is written once against [`Element`] (scalar tails and fallbacks)
//! and the crate-internal vector trait (SIMD bodies). The per-type vector
//! register for each backend is an associated type, so the choice of lane width
//! happens at compile time.
//!
//! Integer arithmetic wraps exactly like `wrapping_add` / `wrapping_mul` on the
//! element type. Float `lane_min` / `lane_max` drop a NaN in `self` in favour of
//! `other`; kernels always pass the running value as `other`, so NaN elements
//! are ignored.

use core::fmt::Debug;

use crate::types::ElementKind;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::vector::FloatVector;
use crate::vector::SimdVector;

mod private {
    pub trait Sealed {}
}

/// A fixed-width numeric type the kernels are instantiated for.
///
/// Sealed: implemented for `i8 u8 i16 u16 i32 u32 i64 u64 f32 f64`.
pub trait Element:
    Copy + Default + PartialOrd + Debug + Send + Sync + 'static + private::Sealed
{
    const KIND: ElementKind;
    const ZERO: Self;
    const ONE: Self;
    /// Identity of `min` (`T::MAX`, `+inf` for floats).
    const MIN_IDENTITY: Self;
    /// Identity of `max` (`T::MIN`, `-inf` for floats).
    const MAX_IDENTITY: Self;

    #[cfg(target_arch = "x86_64")]
    #[doc(hidden)]
    type Avx2: SimdVector<Elem = Self>;

    #[cfg(target_arch = "aarch64")]
    #[doc(hidden)]
    type Neon: SimdVector<Elem = Self>;

    fn lane_add(self, other: Self) -> Self;
    fn lane_mul(self, other: Self) -> Self;
    /// `self * b + c`, fused for floats.
    fn lane_mul_add(self, b: Self, c: Self) -> Self;
    fn lane_min(self, other: Self) -> Self;
    fn lane_max(self, other: Self) -> Self;
    /// `|self - other|` in the element width.
    fn lane_abs_diff(self, other: Self) -> Self;
    fn lane_abs(self) -> Self;
}

/// The floating-point element types, `f32` and `f64`.
///
/// Carries the operations with no integer counterpart. Sealed.
pub trait Float: Element {
    #[cfg(target_arch = "x86_64")]
    #[doc(hidden)]
    type Avx2Float: FloatVector<Elem = Self>;

    #[cfg(target_arch = "aarch64")]
    #[doc(hidden)]
    type NeonFloat: FloatVector<Elem = Self>;

    /// Correctly rounded square root; negative inputs give NaN.
    fn lane_sqrt(self) -> Self;
}

macro_rules! impl_int_element {
  ($t:ty, $kind:ident, $avx2:ident, $neon:ident, $abs:expr) => {
    impl private::Sealed for $t {}

    impl Element for $t {
      const KIND: ElementKind = ElementKind::$kind;
      const ZERO: Self = 0;
      const ONE: Self = 1;
      const MIN_IDENTITY: Self = <$t>::MAX;
      const MAX_IDENTITY: Self = <$t>::MIN;

      #[cfg(target_arch = "x86_64")]
      type Avx2 = crate::avx2::$avx2;

      #[cfg(target_arch = "aarch64")]
      type Neon = crate::neon::$neon;

      #[inline(always)]
      fn lane_add(self, other: Self) -> Self {
        self.wrapping_add(other)
      }

      #[inline(always)]
      fn lane_mul(self, other: Self) -> Self {
        self.wrapping_mul(other)
      }

      #[inline(always)]
      fn lane_mul_add(self, b: Self, c: Self) -> Self {
        self.wrapping_mul(b).wrapping_add(c)
      }

      #[inline(always)]
      fn lane_min(self, other: Self) -> Self {
        if other < self { other } else { self }
      }

      #[inline(always)]
      fn lane_max(self, other: Self) -> Self {
        if other > self { other } else { self }
      }

      // max - min, the same formula the vector bodies use
      #[inline(always)]
      fn lane_abs_diff(self, other: Self) -> Self {
        if self > other {
          self.wrapping_sub(other)
        } else {
          other.wrapping_sub(self)
        }
      }

      #[inline(always)]
      fn lane_abs(self) -> Self {
        ($abs)(self)
      }
    }
  };
}

macro_rules! impl_float_element {
  ($t:ident, $kind:ident, $avx2:ident, $neon:ident) => {
    impl private::Sealed for $t {}

    impl Element for $t {
      const KIND: ElementKind = ElementKind::$kind;
      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const MIN_IDENTITY: Self = $t::INFINITY;
      const MAX_IDENTITY: Self = $t::NEG_INFINITY;

      #[cfg(target_arch = "x86_64")]
      type Avx2 = crate::avx2::$avx2;

      #[cfg(target_arch = "aarch64")]
      type Neon = crate::neon::$neon;

      #[inline(always)]
      fn lane_add(self, other: Self) -> Self {
        self + other
      }

      #[inline(always)]
      fn lane_mul(self, other: Self) -> Self {
        self * other
      }

      #[inline(always)]
      fn lane_mul_add(self, b: Self, c: Self) -> Self {
        self.mul_add(b, c)
      }

      // NaN in self compares false and yields other
      #[inline(always)]
      fn lane_min(self, other: Self) -> Self {
        if self < other { self } else { other }
      }

      #[inline(always)]
      fn lane_max(self, other: Self) -> Self {
        if self > other { self } else { other }
      }

      #[inline(always)]
      fn lane_abs_diff(self, other: Self) -> Self {
        (self - other).abs()
      }

      #[inline(always)]
      fn lane_abs(self) -> Self {
        self.abs()
      }
    }

    impl Float for $t {
      #[cfg(target_arch = "x86_64")]
      type Avx2Float = crate::avx2::$avx2;

      #[cfg(target_arch = "aarch64")]
      type NeonFloat = crate::neon::$neon;

      #[inline(always)]
      fn lane_sqrt(self) -> Self {
        self.sqrt()
      }
    }
  };
}

impl_int_element!(i8, I8, I8x32, I8x16, |x: i8| x.wrapping_abs());
impl_int_element!(u8, U8, U8x32, U8x16, |x: u8| x);
impl_int_element!(i16, I16, I16x16, I16x8, |x: i16| x.wrapping_abs());
impl_int_element!(u16, U16, U16x16, U16x8, |x: u16| x);
impl_int_element!(i32, I32, I32x8, I32x4, |x: i32| x.wrapping_abs());
impl_int_element!(u32, U32, U32x8, U32x4, |x: u32| x);
impl_int_element!(i64, I64, I64x4, I64x2, |x: i64| x.wrapping_abs());
impl_int_element!(u64, U64, U64x4, U64x2, |x: u64| x);
impl_float_element!(f32, F32, F32x8, F32x4);
impl_float_element!(f64, F64, F64x4, F64x2);
