// SPDX-License-Identifier: Apache-2.0

//! # FPX dispatch framework
//!
//! This module is the public face of the kernels: it checks buffer lengths,
//! picks between the scalar implementation and a SIMD backend based on target
//! capabilities and input size, and exposes both a generic API
//! (`reduce_add::<i32>`) and flat per-type functions (`reduce_add_i32`).
//!
//! Inputs shorter than the `SIMD_THRESHOLD_*` constants go straight to scalar
//! code; the vector setup does not pay off there. With the `disable-fpx`
//! feature every threshold is `usize::MAX` and only scalar code runs.
//!
//! ## Notes on numeric behavior
//! - Integer arithmetic wraps in the element width.
//! - Float `min`/`max` ignore NaN; `filter_gt` and the predicates never select NaN,
//!   and NaN is never equal to anything.
//! - Empty inputs return the identity of the operation.
//! - Float results may differ from a sequential left fold in the low-order bits,
//!   since the SIMD paths reassociate.

use log::{debug, trace};
use std::sync::atomic::{AtomicU8, Ordering};

use super::constants::*;

#[cfg(target_arch = "aarch64")]
use std::arch::is_aarch64_feature_detected;

use crate::element::{Element, Float};
use crate::filter;
use crate::fold::{self, DotP, FoldOp, Sad, SumSq};
use crate::map::{self, Abs, Add, Axpy, Clamp, MapOp, Offset, Scale};
use crate::reduce::{self, Max, Min, Product, ReduceOp, Sum};
use crate::scan;
use crate::types::{FpxError, Result, SimdLevel};

// =============================================================================
//  HARDWARE DETECTION & SIMD CAPABILITIES
// =============================================================================

/// Hardware capability detection used by the FPX dispatch layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareCapabilities {
    /// AVX2 together with FMA; the x86_64 kernels need both.
    pub has_avx2: bool,
    pub has_neon: bool,
}

/// Detect SIMD capabilities at runtime.
///
/// AVX2 is only reported when FMA is present as well, since the float kernels
/// fuse multiply and add. NEON is always present on aarch64.
impl HardwareCapabilities {
    #[inline]
    pub fn detect() -> Self {
        HardwareCapabilities {
            has_avx2: Self::detect_avx2(),
            has_neon: Self::detect_neon(),
        }
    }

    fn detect_avx2() -> bool {
        #[allow(unused_mut)]
        let mut detected_avx2 = false;

        #[cfg(target_arch = "x86_64")]
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            detected_avx2 = true;
        }

        detected_avx2
    }

    fn detect_neon() -> bool {
        #[allow(unused_mut)]
        let mut detected_neon = false;

        #[cfg(target_arch = "aarch64")]
        if is_aarch64_feature_detected!("neon") {
            detected_neon = true;
        }

        detected_neon
    }

    /// Best backend these capabilities allow.
    #[inline]
    pub fn best_level(&self) -> SimdLevel {
        if self.has_avx2 {
            SimdLevel::Avx2
        } else if self.has_neon {
            SimdLevel::Neon
        } else {
            SimdLevel::Scalar
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Get information about available SIMD capabilities
#[inline]
pub fn get_hw_capabilities() -> HardwareCapabilities {
    HardwareCapabilities::detect()
}

/// Check whether a named instruction set is usable on this machine.
///
/// Known names: `"avx2"`, `"fma"`, `"neon"`. Anything else is `false`.
pub fn has_hw_support(instruction_set: &str) -> bool {
    match instruction_set {
        "avx2" => {
            #[cfg(target_arch = "x86_64")]
            return is_x86_feature_detected!("avx2");
            #[cfg(not(target_arch = "x86_64"))]
            return false;
        }
        "fma" => {
            #[cfg(target_arch = "x86_64")]
            return is_x86_feature_detected!("fma");
            #[cfg(not(target_arch = "x86_64"))]
            return false;
        }
        "neon" => {
            #[cfg(target_arch = "aarch64")]
            return is_aarch64_feature_detected!("neon");
            #[cfg(not(target_arch = "aarch64"))]
            return false;
        }
        _ => false,
    }
}

/// Backend the kernels are routed to above their size thresholds.
///
/// Detected once and cached for the lifetime of the process.
#[inline]
pub fn simd_level() -> SimdLevel {
    // Use a static atomic for one-time detection and caching
    static LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNKNOWN); // 0 = unknown, otherwise level + 1

    let cached = LEVEL.load(Ordering::Relaxed);
    if cached != LEVEL_UNKNOWN {
        return level_from_tag(cached);
    }

    let caps = get_hw_capabilities();
    let level = caps.best_level();
    debug!(
        "FPX capabilities: avx2+fma={} neon={} -> {:?}",
        caps.has_avx2, caps.has_neon, level
    );
    LEVEL.store(level_tag(level), Ordering::Relaxed);
    level
}

const LEVEL_UNKNOWN: u8 = 0;

#[inline]
fn level_tag(level: SimdLevel) -> u8 {
    match level {
        SimdLevel::Scalar => 1,
        SimdLevel::Avx2 => 2,
        SimdLevel::Neon => 3,
    }
}

#[inline]
fn level_from_tag(tag: u8) -> SimdLevel {
    match tag {
        2 => SimdLevel::Avx2,
        3 => SimdLevel::Neon,
        _ => SimdLevel::Scalar,
    }
}

#[inline]
fn check_same_len(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(FpxError::LengthMismatch { left, right });
    }
    Ok(())
}

#[inline]
fn check_output(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(FpxError::OutputTooSmall { needed, actual });
    }
    Ok(())
}

// =============================================================================
// ROUTING
// =============================================================================
//
// Unchecked: callers have validated lengths. The SIMD arms are only taken when
// `simd_level()` reported the instruction set, which is what the kernels'
// safety contracts require.

#[inline]
pub(crate) fn route_reduce<T: Element, O: ReduceOp>(values: &[T]) -> T {
    if values.len() < SIMD_THRESHOLD_REDUCE {
        return reduce::reduce_scalar::<T, O>(values);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { reduce::reduce_avx2::<T, O>(values) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { reduce::reduce_neon::<T, O>(values) },
        _ => reduce::reduce_scalar::<T, O>(values),
    }
}

#[inline]
pub(crate) fn route_fold<T: Element, O: FoldOp>(a: &[T], b: &[T]) -> T {
    if a.len() < SIMD_THRESHOLD_FOLD {
        return fold::fold_scalar::<T, O>(a, b);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { fold::fold_avx2::<T, O>(a, b) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { fold::fold_neon::<T, O>(a, b) },
        _ => fold::fold_scalar::<T, O>(a, b),
    }
}

#[inline]
pub(crate) fn route_map<T: Element, O: MapOp>(x: &[T], y: &[T], out: &mut [T], k: [T; 2]) {
    if x.len() < SIMD_THRESHOLD_MAP {
        return map::map_scalar::<T, O>(x, y, out, k);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { map::map_avx2::<T, O>(x, y, out, k) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { map::map_neon::<T, O>(x, y, out, k) },
        _ => map::map_scalar::<T, O>(x, y, out, k),
    }
}

#[inline]
pub(crate) fn route_filter_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
    if values.len() < SIMD_THRESHOLD_FILTER {
        return filter::filter_gt_scalar(values, out, threshold);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::filter_gt_avx2(values, out, threshold) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::filter_gt_neon(values, out, threshold) },
        _ => filter::filter_gt_scalar(values, out, threshold),
    }
}

#[inline]
pub(crate) fn route_partition_gt<T: Element>(
    values: &[T],
    pass: &mut [T],
    fail: &mut [T],
    threshold: T,
) -> (usize, usize) {
    if values.len() < SIMD_THRESHOLD_FILTER {
        return filter::partition_gt_scalar(values, pass, fail, threshold);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::partition_gt_avx2(values, pass, fail, threshold) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::partition_gt_neon(values, pass, fail, threshold) },
        _ => filter::partition_gt_scalar(values, pass, fail, threshold),
    }
}

#[inline]
pub(crate) fn route_any_gt<T: Element>(values: &[T], threshold: T) -> bool {
    if values.len() < SIMD_THRESHOLD_PREDICATE {
        return filter::any_gt_scalar(values, threshold);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::any_gt_avx2(values, threshold) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::any_gt_neon(values, threshold) },
        _ => filter::any_gt_scalar(values, threshold),
    }
}

#[inline]
pub(crate) fn route_all_gt<T: Element>(values: &[T], threshold: T) -> bool {
    if values.len() < SIMD_THRESHOLD_PREDICATE {
        return filter::all_gt_scalar(values, threshold);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::all_gt_avx2(values, threshold) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::all_gt_neon(values, threshold) },
        _ => filter::all_gt_scalar(values, threshold),
    }
}

#[inline]
pub(crate) fn route_all_eq<T: Element>(values: &[T], value: T) -> bool {
    if values.len() < SIMD_THRESHOLD_PREDICATE {
        return filter::all_eq_scalar(values, value);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::all_eq_avx2(values, value) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::all_eq_neon(values, value) },
        _ => filter::all_eq_scalar(values, value),
    }
}

#[inline]
pub(crate) fn route_all_gt_zip<T: Element>(a: &[T], b: &[T]) -> bool {
    if a.len() < SIMD_THRESHOLD_PREDICATE {
        return filter::all_gt_zip_scalar(a, b);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::all_gt_zip_avx2(a, b) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::all_gt_zip_neon(a, b) },
        _ => filter::all_gt_zip_scalar(a, b),
    }
}

#[inline]
pub(crate) fn route_leading_gt<T: Element>(values: &[T], threshold: T) -> usize {
    if values.len() < SIMD_THRESHOLD_FILTER {
        return filter::leading_gt_scalar(values, threshold);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { filter::leading_gt_avx2(values, threshold) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { filter::leading_gt_neon(values, threshold) },
        _ => filter::leading_gt_scalar(values, threshold),
    }
}

// `out.len() >= values.len()`
#[inline]
pub(crate) fn route_take_while_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
    let stop = route_leading_gt(values, threshold);
    out[..stop].copy_from_slice(&values[..stop]);
    stop
}

// `out.len() >= values.len()`
#[inline]
pub(crate) fn route_drop_while_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> usize {
    let stop = route_leading_gt(values, threshold);
    let rest = &values[stop..];
    out[..rest.len()].copy_from_slice(rest);
    rest.len()
}

#[inline]
pub(crate) fn route_sqrt<T: Float>(x: &[T], out: &mut [T]) {
    if x.len() < SIMD_THRESHOLD_MAP {
        return map::sqrt_scalar(x, out);
    }

    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe { map::sqrt_avx2(x, out) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { map::sqrt_neon(x, out) },
        _ => map::sqrt_scalar(x, out),
    }
}

// =============================================================================
// REDUCTIONS
// =============================================================================

/// Sum of all elements using HW acceleration with threshold-based dispatching.
///
/// Integer sums wrap on overflow. Returns `0` for an empty slice.
///
/// # Examples
/// ```rust
/// assert_eq!(fpx::reduce_add(&[1i32, 2, 3, 4, 5]).unwrap(), 15);
/// ```
#[inline]
pub fn reduce_add<T: Element>(values: &[T]) -> Result<T> {
    trace!("REDUCE_ADD DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_reduce::<T, Sum>(values))
}

/// Product of all elements. Integer products wrap. Returns `1` for an empty slice.
#[inline]
pub fn reduce_mul<T: Element>(values: &[T]) -> Result<T> {
    trace!("REDUCE_MUL DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_reduce::<T, Product>(values))
}

/// Smallest element.
///
/// NaN elements are skipped. An empty slice, or one holding only NaN, yields
/// `T::MAX` (`+inf` for floats).
#[inline]
pub fn reduce_min<T: Element>(values: &[T]) -> Result<T> {
    trace!("REDUCE_MIN DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_reduce::<T, Min>(values))
}

/// Largest element.
///
/// NaN elements are skipped. An empty slice, or one holding only NaN, yields
/// `T::MIN` (`-inf` for floats).
#[inline]
pub fn reduce_max<T: Element>(values: &[T]) -> Result<T> {
    trace!("REDUCE_MAX DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_reduce::<T, Max>(values))
}

// =============================================================================
// FUSED FOLDS
// =============================================================================

/// Sum of squares, computed in one pass without an intermediate buffer.
#[inline]
pub fn fold_sumsq<T: Element>(values: &[T]) -> Result<T> {
    trace!("FOLD_SUMSQ DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_fold::<T, SumSq>(values, values))
}

/// Dot product `sum(a[i] * b[i])`.
///
/// Floats use a fused multiply-add per lane. Integer results wrap.
///
/// # Errors
/// [`FpxError::LengthMismatch`] when `a` and `b` differ in length.
///
/// # Examples
/// ```rust
/// let a = [1i64, 2, 3, 4, 5];
/// let b = [2i64, 3, 4, 5, 6];
/// assert_eq!(fpx::fold_dotp(&a, &b).unwrap(), 70);
/// ```
#[inline]
pub fn fold_dotp<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    trace!("FOLD_DOTP DISPATCH: kind={:?} a.len()={} b.len()={}", T::KIND, a.len(), b.len());
    check_same_len(a.len(), b.len())?;
    Ok(route_fold::<T, DotP>(a, b))
}

/// Sum of absolute differences `sum(|a[i] - b[i]|)`.
///
/// Each difference is `max - min` in the element width, so narrow integer
/// types wrap: for `i8`, `sad([1,2,3,4,5], [10,20,30,40,50])` is `-121`.
///
/// # Errors
/// [`FpxError::LengthMismatch`] when `a` and `b` differ in length.
#[inline]
pub fn fold_sad<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    trace!("FOLD_SAD DISPATCH: kind={:?} a.len()={} b.len()={}", T::KIND, a.len(), b.len());
    check_same_len(a.len(), b.len())?;
    Ok(route_fold::<T, Sad>(a, b))
}

// =============================================================================
// FUSED MAPS
// =============================================================================

/// `out[i] = c * x[i] + y[i]`, fused for floats.
///
/// # Errors
/// [`FpxError::LengthMismatch`] when `x` and `y` differ in length,
/// [`FpxError::OutputTooSmall`] when `out` is shorter than `x`.
#[inline]
pub fn map_axpy<T: Element>(x: &[T], y: &[T], out: &mut [T], c: T) -> Result<()> {
    trace!("MAP_AXPY DISPATCH: kind={:?} x.len()={} y.len()={}", T::KIND, x.len(), y.len());
    check_same_len(x.len(), y.len())?;
    check_output(x.len(), out.len())?;
    route_map::<T, Axpy>(x, y, out, [c, T::ZERO]);
    Ok(())
}

/// `out[i] = c * x[i]`
#[inline]
pub fn map_scale<T: Element>(x: &[T], out: &mut [T], c: T) -> Result<()> {
    trace!("MAP_SCALE DISPATCH: kind={:?} x.len()={}", T::KIND, x.len());
    check_output(x.len(), out.len())?;
    route_map::<T, Scale>(x, x, out, [c, T::ZERO]);
    Ok(())
}

/// `out[i] = x[i] + c`
#[inline]
pub fn map_offset<T: Element>(x: &[T], out: &mut [T], c: T) -> Result<()> {
    trace!("MAP_OFFSET DISPATCH: kind={:?} x.len()={}", T::KIND, x.len());
    check_output(x.len(), out.len())?;
    route_map::<T, Offset>(x, x, out, [c, T::ZERO]);
    Ok(())
}

/// `out[i] = x[i] + y[i]`
#[inline]
pub fn map_add<T: Element>(x: &[T], y: &[T], out: &mut [T]) -> Result<()> {
    trace!("MAP_ADD DISPATCH: kind={:?} x.len()={} y.len()={}", T::KIND, x.len(), y.len());
    check_same_len(x.len(), y.len())?;
    check_output(x.len(), out.len())?;
    route_map::<T, Add>(x, y, out, [T::ZERO, T::ZERO]);
    Ok(())
}

/// `out[i] = |x[i]|`; wraps for signed integers (`i8::MIN` stays `i8::MIN`),
/// identity for unsigned ones.
#[inline]
pub fn map_abs<T: Element>(x: &[T], out: &mut [T]) -> Result<()> {
    trace!("MAP_ABS DISPATCH: kind={:?} x.len()={}", T::KIND, x.len());
    check_output(x.len(), out.len())?;
    route_map::<T, Abs>(x, x, out, [T::ZERO, T::ZERO]);
    Ok(())
}

/// `out[i] = min(max(x[i], lo), hi)`.
///
/// NaN inputs become `lo`. With `lo > hi` every element becomes `hi`.
#[inline]
pub fn map_clamp<T: Element>(x: &[T], out: &mut [T], lo: T, hi: T) -> Result<()> {
    trace!("MAP_CLAMP DISPATCH: kind={:?} x.len()={}", T::KIND, x.len());
    check_output(x.len(), out.len())?;
    route_map::<T, Clamp>(x, x, out, [lo, hi]);
    Ok(())
}

/// `out[i] = sqrt(x[i])`, correctly rounded. Negative inputs give NaN.
///
/// Defined for `f32` and `f64` only.
///
/// # Examples
/// ```rust
/// let mut out = [0.0f64; 4];
/// fpx::map_sqrt(&[1.0, 4.0, 9.0, 16.0], &mut out).unwrap();
/// assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
/// ```
#[inline]
pub fn map_sqrt<T: Float>(x: &[T], out: &mut [T]) -> Result<()> {
    trace!("MAP_SQRT DISPATCH: kind={:?} x.len()={}", T::KIND, x.len());
    check_output(x.len(), out.len())?;
    route_sqrt(x, out);
    Ok(())
}

// =============================================================================
// COMPACTION & PREDICATES
// =============================================================================

/// Copy the elements greater than `threshold` to the front of `out`, in input
/// order, and return how many were copied.
///
/// `out` must be at least as long as `values`; the SIMD path stores whole
/// registers at the output cursor. `out[count..]` is left unspecified.
///
/// # Examples
/// ```rust
/// let values = [500u32, 200, 800, 100, 900];
/// let mut out = [0u32; 5];
/// let count = fpx::filter_gt(&values, &mut out, 500).unwrap();
/// assert_eq!(&out[..count], &[800, 900]);
/// ```
#[inline]
pub fn filter_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> Result<usize> {
    trace!("FILTER_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    check_output(values.len(), out.len())?;
    Ok(route_filter_gt(values, out, threshold))
}

/// Split `values` into the elements greater than `threshold` (front of `pass`)
/// and the rest (front of `fail`), both in input order.
///
/// Returns `(pass_count, fail_count)`; they always sum to `values.len()`.
/// NaN goes to `fail`. Both outputs must be at least as long as `values`.
#[inline]
pub fn partition_gt<T: Element>(
    values: &[T],
    pass: &mut [T],
    fail: &mut [T],
    threshold: T,
) -> Result<(usize, usize)> {
    trace!("PARTITION_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    check_output(values.len(), pass.len())?;
    check_output(values.len(), fail.len())?;
    Ok(route_partition_gt(values, pass, fail, threshold))
}

/// Whether any element is greater than `threshold`. `false` for an empty slice.
#[inline]
pub fn any_gt<T: Element>(values: &[T], threshold: T) -> Result<bool> {
    trace!("ANY_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_any_gt(values, threshold))
}

/// Whether every element is greater than `threshold`. `true` for an empty slice.
#[inline]
pub fn all_gt<T: Element>(values: &[T], threshold: T) -> Result<bool> {
    trace!("ALL_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_all_gt(values, threshold))
}

/// Whether every element equals `value`. `true` for an empty slice; a NaN
/// element or a NaN `value` makes it `false`.
#[inline]
pub fn all_eq<T: Element>(values: &[T], value: T) -> Result<bool> {
    trace!("ALL_EQ DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    Ok(route_all_eq(values, value))
}

/// Whether `a[i] > b[i]` at every index. `true` for empty inputs.
///
/// # Errors
/// [`FpxError::LengthMismatch`] when `a` and `b` differ in length.
#[inline]
pub fn all_gt_zip<T: Element>(a: &[T], b: &[T]) -> Result<bool> {
    trace!("ALL_GT_ZIP DISPATCH: kind={:?} a.len()={} b.len()={}", T::KIND, a.len(), b.len());
    check_same_len(a.len(), b.len())?;
    Ok(route_all_gt_zip(a, b))
}

/// Copy the leading run of elements greater than `threshold` to the front of
/// `out` and return its length. Stops at the first element that is not greater
/// (NaN included); nothing after it is copied.
///
/// `out` must be at least as long as `values`.
///
/// # Examples
/// ```rust
/// let mut out = [0i64; 6];
/// let count = fpx::take_while_gt(&[9i64, 8, 7, 1, 9, 9], &mut out, 5).unwrap();
/// assert_eq!(&out[..count], &[9, 8, 7]);
/// ```
#[inline]
pub fn take_while_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> Result<usize> {
    trace!("TAKE_WHILE_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    check_output(values.len(), out.len())?;
    Ok(route_take_while_gt(values, out, threshold))
}

/// Skip the leading run of elements greater than `threshold`, copy everything
/// from the first element that is not greater to the front of `out`, and return
/// how many were copied.
///
/// `out` must be at least as long as `values`.
#[inline]
pub fn drop_while_gt<T: Element>(values: &[T], out: &mut [T], threshold: T) -> Result<usize> {
    trace!("DROP_WHILE_GT DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    check_output(values.len(), out.len())?;
    Ok(route_drop_while_gt(values, out, threshold))
}

// =============================================================================
// SCAN
// =============================================================================

/// Inclusive prefix sum: `out[i] = values[0] + ... + values[i]`, wrapping for
/// integers.
#[inline]
pub fn scan_add<T: Element>(values: &[T], out: &mut [T]) -> Result<()> {
    trace!("SCAN_ADD DISPATCH: kind={:?} values.len()={}", T::KIND, values.len());
    check_output(values.len(), out.len())?;
    scan::scan_add_scalar(values, out);
    Ok(())
}

// =============================================================================
// FLAT PER-TYPE API
// =============================================================================

macro_rules! flat_api {
    (
        $t:ty;
        $reduce_add:ident, $reduce_mul:ident, $reduce_min:ident, $reduce_max:ident,
        $fold_sumsq:ident, $fold_dotp:ident, $fold_sad:ident,
        $map_axpy:ident, $map_scale:ident, $map_offset:ident,
        $map_add:ident, $map_abs:ident, $map_clamp:ident,
        $filter_gt:ident, $partition_gt:ident, $any_gt:ident, $all_gt:ident,
        $all_eq:ident, $all_gt_zip:ident, $take_while_gt:ident, $drop_while_gt:ident,
        $scan_add:ident
    ) => {
        #[doc = concat!("[`reduce_add`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $reduce_add(values: &[$t]) -> Result<$t> {
            reduce_add(values)
        }

        #[doc = concat!("[`reduce_mul`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $reduce_mul(values: &[$t]) -> Result<$t> {
            reduce_mul(values)
        }

        #[doc = concat!("[`reduce_min`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $reduce_min(values: &[$t]) -> Result<$t> {
            reduce_min(values)
        }

        #[doc = concat!("[`reduce_max`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $reduce_max(values: &[$t]) -> Result<$t> {
            reduce_max(values)
        }

        #[doc = concat!("[`fold_sumsq`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $fold_sumsq(values: &[$t]) -> Result<$t> {
            fold_sumsq(values)
        }

        #[doc = concat!("[`fold_dotp`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $fold_dotp(a: &[$t], b: &[$t]) -> Result<$t> {
            fold_dotp(a, b)
        }

        #[doc = concat!("[`fold_sad`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $fold_sad(a: &[$t], b: &[$t]) -> Result<$t> {
            fold_sad(a, b)
        }

        #[doc = concat!("[`map_axpy`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_axpy(x: &[$t], y: &[$t], out: &mut [$t], c: $t) -> Result<()> {
            map_axpy(x, y, out, c)
        }

        #[doc = concat!("[`map_scale`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_scale(x: &[$t], out: &mut [$t], c: $t) -> Result<()> {
            map_scale(x, out, c)
        }

        #[doc = concat!("[`map_offset`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_offset(x: &[$t], out: &mut [$t], c: $t) -> Result<()> {
            map_offset(x, out, c)
        }

        #[doc = concat!("[`map_add`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_add(x: &[$t], y: &[$t], out: &mut [$t]) -> Result<()> {
            map_add(x, y, out)
        }

        #[doc = concat!("[`map_abs`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_abs(x: &[$t], out: &mut [$t]) -> Result<()> {
            map_abs(x, out)
        }

        #[doc = concat!("[`map_clamp`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_clamp(x: &[$t], out: &mut [$t], lo: $t, hi: $t) -> Result<()> {
            map_clamp(x, out, lo, hi)
        }

        #[doc = concat!("[`filter_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $filter_gt(values: &[$t], out: &mut [$t], threshold: $t) -> Result<usize> {
            filter_gt(values, out, threshold)
        }

        #[doc = concat!("[`partition_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $partition_gt(
            values: &[$t],
            pass: &mut [$t],
            fail: &mut [$t],
            threshold: $t,
        ) -> Result<(usize, usize)> {
            partition_gt(values, pass, fail, threshold)
        }

        #[doc = concat!("[`any_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $any_gt(values: &[$t], threshold: $t) -> Result<bool> {
            any_gt(values, threshold)
        }

        #[doc = concat!("[`all_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $all_gt(values: &[$t], threshold: $t) -> Result<bool> {
            all_gt(values, threshold)
        }

        #[doc = concat!("[`all_eq`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $all_eq(values: &[$t], value: $t) -> Result<bool> {
            all_eq(values, value)
        }

        #[doc = concat!("[`all_gt_zip`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $all_gt_zip(a: &[$t], b: &[$t]) -> Result<bool> {
            all_gt_zip(a, b)
        }

        #[doc = concat!("[`take_while_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $take_while_gt(values: &[$t], out: &mut [$t], threshold: $t) -> Result<usize> {
            take_while_gt(values, out, threshold)
        }

        #[doc = concat!("[`drop_while_gt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $drop_while_gt(values: &[$t], out: &mut [$t], threshold: $t) -> Result<usize> {
            drop_while_gt(values, out, threshold)
        }

        #[doc = concat!("[`scan_add`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $scan_add(values: &[$t], out: &mut [$t]) -> Result<()> {
            scan_add(values, out)
        }
    };
}

flat_api!(i8;
    reduce_add_i8, reduce_mul_i8, reduce_min_i8, reduce_max_i8,
    fold_sumsq_i8, fold_dotp_i8, fold_sad_i8,
    map_axpy_i8, map_scale_i8, map_offset_i8, map_add_i8, map_abs_i8, map_clamp_i8,
    filter_gt_i8, partition_gt_i8, any_gt_i8, all_gt_i8,
    all_eq_i8, all_gt_zip_i8, take_while_gt_i8, drop_while_gt_i8,
    scan_add_i8
);

flat_api!(u8;
    reduce_add_u8, reduce_mul_u8, reduce_min_u8, reduce_max_u8,
    fold_sumsq_u8, fold_dotp_u8, fold_sad_u8,
    map_axpy_u8, map_scale_u8, map_offset_u8, map_add_u8, map_abs_u8, map_clamp_u8,
    filter_gt_u8, partition_gt_u8, any_gt_u8, all_gt_u8,
    all_eq_u8, all_gt_zip_u8, take_while_gt_u8, drop_while_gt_u8,
    scan_add_u8
);

flat_api!(i16;
    reduce_add_i16, reduce_mul_i16, reduce_min_i16, reduce_max_i16,
    fold_sumsq_i16, fold_dotp_i16, fold_sad_i16,
    map_axpy_i16, map_scale_i16, map_offset_i16, map_add_i16, map_abs_i16, map_clamp_i16,
    filter_gt_i16, partition_gt_i16, any_gt_i16, all_gt_i16,
    all_eq_i16, all_gt_zip_i16, take_while_gt_i16, drop_while_gt_i16,
    scan_add_i16
);

flat_api!(u16;
    reduce_add_u16, reduce_mul_u16, reduce_min_u16, reduce_max_u16,
    fold_sumsq_u16, fold_dotp_u16, fold_sad_u16,
    map_axpy_u16, map_scale_u16, map_offset_u16, map_add_u16, map_abs_u16, map_clamp_u16,
    filter_gt_u16, partition_gt_u16, any_gt_u16, all_gt_u16,
    all_eq_u16, all_gt_zip_u16, take_while_gt_u16, drop_while_gt_u16,
    scan_add_u16
);

flat_api!(i32;
    reduce_add_i32, reduce_mul_i32, reduce_min_i32, reduce_max_i32,
    fold_sumsq_i32, fold_dotp_i32, fold_sad_i32,
    map_axpy_i32, map_scale_i32, map_offset_i32, map_add_i32, map_abs_i32, map_clamp_i32,
    filter_gt_i32, partition_gt_i32, any_gt_i32, all_gt_i32,
    all_eq_i32, all_gt_zip_i32, take_while_gt_i32, drop_while_gt_i32,
    scan_add_i32
);

flat_api!(u32;
    reduce_add_u32, reduce_mul_u32, reduce_min_u32, reduce_max_u32,
    fold_sumsq_u32, fold_dotp_u32, fold_sad_u32,
    map_axpy_u32, map_scale_u32, map_offset_u32, map_add_u32, map_abs_u32, map_clamp_u32,
    filter_gt_u32, partition_gt_u32, any_gt_u32, all_gt_u32,
    all_eq_u32, all_gt_zip_u32, take_while_gt_u32, drop_while_gt_u32,
    scan_add_u32
);

flat_api!(i64;
    reduce_add_i64, reduce_mul_i64, reduce_min_i64, reduce_max_i64,
    fold_sumsq_i64, fold_dotp_i64, fold_sad_i64,
    map_axpy_i64, map_scale_i64, map_offset_i64, map_add_i64, map_abs_i64, map_clamp_i64,
    filter_gt_i64, partition_gt_i64, any_gt_i64, all_gt_i64,
    all_eq_i64, all_gt_zip_i64, take_while_gt_i64, drop_while_gt_i64,
    scan_add_i64
);

flat_api!(u64;
    reduce_add_u64, reduce_mul_u64, reduce_min_u64, reduce_max_u64,
    fold_sumsq_u64, fold_dotp_u64, fold_sad_u64,
    map_axpy_u64, map_scale_u64, map_offset_u64, map_add_u64, map_abs_u64, map_clamp_u64,
    filter_gt_u64, partition_gt_u64, any_gt_u64, all_gt_u64,
    all_eq_u64, all_gt_zip_u64, take_while_gt_u64, drop_while_gt_u64,
    scan_add_u64
);

flat_api!(f32;
    reduce_add_f32, reduce_mul_f32, reduce_min_f32, reduce_max_f32,
    fold_sumsq_f32, fold_dotp_f32, fold_sad_f32,
    map_axpy_f32, map_scale_f32, map_offset_f32, map_add_f32, map_abs_f32, map_clamp_f32,
    filter_gt_f32, partition_gt_f32, any_gt_f32, all_gt_f32,
    all_eq_f32, all_gt_zip_f32, take_while_gt_f32, drop_while_gt_f32,
    scan_add_f32
);

flat_api!(f64;
    reduce_add_f64, reduce_mul_f64, reduce_min_f64, reduce_max_f64,
    fold_sumsq_f64, fold_dotp_f64, fold_sad_f64,
    map_axpy_f64, map_scale_f64, map_offset_f64, map_add_f64, map_abs_f64, map_clamp_f64,
    filter_gt_f64, partition_gt_f64, any_gt_f64, all_gt_f64,
    all_eq_f64, all_gt_zip_f64, take_while_gt_f64, drop_while_gt_f64,
    scan_add_f64
);

macro_rules! float_api {
    ($t:ty; $map_sqrt:ident) => {
        #[doc = concat!("[`map_sqrt`] over `", stringify!($t), "`.")]
        #[inline]
        pub fn $map_sqrt(x: &[$t], out: &mut [$t]) -> Result<()> {
            map_sqrt(x, out)
        }
    };
}

float_api!(f32; map_sqrt_f32);
float_api!(f64; map_sqrt_f64);
