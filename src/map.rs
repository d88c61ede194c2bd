// SPDX-License-Identifier: Apache-2.0

//! # Fused maps
//!
//! Elementwise transforms into a caller-supplied output: `c*x + y`, `c*x`,
//! `x + c`, `x + y`, `|x|` and `clamp(x, lo, hi)`. Float inputs also have
//! `sqrt(x)`, which runs its own unary loop over the float registers.
//!
//! Every op is written as `f(x, y, k)` with up to two broadcast constants `k`;
//! unary ops are run with `y == x`. Only `out[..x.len()]` is written and `out`
//! is never read.

#![allow(unsafe_op_in_unsafe_fn)]

use crate::element::{Element, Float};
#[cfg(target_arch = "x86_64")]
use crate::frame::WideFrame;
use crate::vector::{FloatVector, SimdVector};

pub(crate) trait MapOp {
  fn scalar<T: Element>(x: T, y: T, k: [T; 2]) -> T;
  unsafe fn vector<V: SimdVector>(x: V, y: V, k: [V; 2]) -> V;
}

pub(crate) struct Axpy;
pub(crate) struct Scale;
pub(crate) struct Offset;
pub(crate) struct Add;
pub(crate) struct Abs;
pub(crate) struct Clamp;

impl MapOp for Axpy {
  #[inline(always)]
  fn scalar<T: Element>(x: T, y: T, k: [T; 2]) -> T {
    x.lane_mul_add(k[0], y)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, y: V, k: [V; 2]) -> V {
    x.mul_add(k[0], y)
  }
}

impl MapOp for Scale {
  #[inline(always)]
  fn scalar<T: Element>(x: T, _y: T, k: [T; 2]) -> T {
    x.lane_mul(k[0])
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, _y: V, k: [V; 2]) -> V {
    x.mul(k[0])
  }
}

impl MapOp for Offset {
  #[inline(always)]
  fn scalar<T: Element>(x: T, _y: T, k: [T; 2]) -> T {
    x.lane_add(k[0])
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, _y: V, k: [V; 2]) -> V {
    x.add(k[0])
  }
}

impl MapOp for Add {
  #[inline(always)]
  fn scalar<T: Element>(x: T, y: T, _k: [T; 2]) -> T {
    x.lane_add(y)
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, y: V, _k: [V; 2]) -> V {
    x.add(y)
  }
}

impl MapOp for Abs {
  #[inline(always)]
  fn scalar<T: Element>(x: T, _y: T, _k: [T; 2]) -> T {
    x.lane_abs()
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, _y: V, _k: [V; 2]) -> V {
    x.abs()
  }
}

// k = [lo, hi]; NaN lanes become lo
impl MapOp for Clamp {
  #[inline(always)]
  fn scalar<T: Element>(x: T, _y: T, k: [T; 2]) -> T {
    x.lane_max(k[0]).lane_min(k[1])
  }

  #[inline(always)]
  unsafe fn vector<V: SimdVector>(x: V, _y: V, k: [V; 2]) -> V {
    x.max(k[0]).min(k[1])
  }
}

#[inline(always)]
unsafe fn map_kernel<V: SimdVector, O: MapOp>(
  x: &[V::Elem],
  y: &[V::Elem],
  out: &mut [V::Elem],
  k: [V::Elem; 2],
) {
  let len = x.len();
  debug_assert!(y.len() == len && out.len() >= len);
  let lanes = V::LANES;
  let kv = [V::splat(k[0]), V::splat(k[1])];

  let full = len - len % lanes;
  let px = x.as_ptr();
  let py = y.as_ptr();
  let po = out.as_mut_ptr();
  let mut offset = 0;
  while offset < full {
    let r = O::vector(V::load(px.add(offset)), V::load(py.add(offset)), kv);
    r.store(po.add(offset));
    offset += lanes;
  }

  for i in full..len {
    out[i] = O::scalar(x[i], y[i], k);
  }
}

// # Safety
// Requires AVX2 and FMA; `y.len() == x.len()` and `out.len() >= x.len()`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn map_avx2<T: Element, O: MapOp>(x: &[T], y: &[T], out: &mut [T], k: [T; 2]) {
  let _frame = WideFrame::enter();
  map_kernel::<T::Avx2, O>(x, y, out, k)
}

// # Safety
// Requires NEON; `y.len() == x.len()` and `out.len() >= x.len()`.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn map_neon<T: Element, O: MapOp>(x: &[T], y: &[T], out: &mut [T], k: [T; 2]) {
  map_kernel::<T::Neon, O>(x, y, out, k)
}

#[inline]
pub(crate) fn map_scalar<T: Element, O: MapOp>(x: &[T], y: &[T], out: &mut [T], k: [T; 2]) {
  for ((o, &a), &b) in out.iter_mut().zip(x).zip(y) {
    *o = O::scalar(a, b, k);
  }
}

// =============================================================================
// SQUARE ROOT
// =============================================================================

#[inline(always)]
unsafe fn sqrt_kernel<V: FloatVector>(x: &[V::Elem], out: &mut [V::Elem])
where
  V::Elem: Float,
{
  let len = x.len();
  debug_assert!(out.len() >= len);
  let lanes = V::LANES;
  let full = len - len % lanes;
  let px = x.as_ptr();
  let po = out.as_mut_ptr();
  let mut offset = 0;
  while offset < full {
    V::load(px.add(offset)).sqrt().store(po.add(offset));
    offset += lanes;
  }

  for i in full..len {
    out[i] = x[i].lane_sqrt();
  }
}

// # Safety
// Requires AVX2 and FMA; `out.len() >= x.len()`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn sqrt_avx2<T: Float>(x: &[T], out: &mut [T]) {
  let _frame = WideFrame::enter();
  sqrt_kernel::<T::Avx2Float>(x, out)
}

// # Safety
// Requires NEON; `out.len() >= x.len()`.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn sqrt_neon<T: Float>(x: &[T], out: &mut [T]) {
  sqrt_kernel::<T::NeonFloat>(x, out)
}

#[inline]
pub(crate) fn sqrt_scalar<T: Float>(x: &[T], out: &mut [T]) {
  for (o, &a) in out.iter_mut().zip(x) {
    *o = a.lane_sqrt();
  }
}
