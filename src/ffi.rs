// SPDX-License-Identifier: Apache-2.0

//! Flat C ABI over the kernels.
//!
//! Naming: `fpx_<category>_<op>_<type>`, e.g. `fpx_reduce_add_i32`. Arguments
//! follow one order: input pointers, element count `n`, scalar constants, then
//! output pointers.
//!
//! # Safety
//! Preconditions are the caller's, and none are checked here:
//! - every input pointer is valid for `n` reads of its element type;
//! - every output pointer is valid for `n` writes and does not overlap an input;
//! - pointers may be null only when `n == 0`.
//!
//! Violating them is undefined behavior. `n == 0` returns the identity of the
//! operation (`0`, `1`, `T::MAX` / `+inf`, `T::MIN` / `-inf`).

#![allow(clippy::missing_safety_doc)]

use core::slice;

use crate::dispatch::{
    route_all_eq, route_all_gt, route_all_gt_zip, route_any_gt, route_drop_while_gt,
    route_filter_gt, route_fold, route_map, route_partition_gt, route_reduce, route_sqrt,
    route_take_while_gt,
};
use crate::element::Element;
use crate::fold::{DotP, Sad, SumSq};
use crate::map::{Abs, Add, Axpy, Clamp, Offset, Scale};
use crate::reduce::{Max, Min, Product, Sum};
use crate::scan::scan_add_scalar;

#[inline(always)]
unsafe fn input<'a, T>(ptr: *const T, n: usize) -> &'a [T] {
    if n == 0 {
        &[]
    } else {
        slice::from_raw_parts(ptr, n)
    }
}

#[inline(always)]
unsafe fn output<'a, T>(ptr: *mut T, n: usize) -> &'a mut [T] {
    if n == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(ptr, n)
    }
}

macro_rules! ffi_exports {
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
        #[no_mangle]
        pub unsafe extern "C" fn $reduce_add(values: *const $t, n: usize) -> $t {
            route_reduce::<$t, Sum>(input(values, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $reduce_mul(values: *const $t, n: usize) -> $t {
            route_reduce::<$t, Product>(input(values, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $reduce_min(values: *const $t, n: usize) -> $t {
            route_reduce::<$t, Min>(input(values, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $reduce_max(values: *const $t, n: usize) -> $t {
            route_reduce::<$t, Max>(input(values, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $fold_sumsq(values: *const $t, n: usize) -> $t {
            let values = input(values, n);
            route_fold::<$t, SumSq>(values, values)
        }

        #[no_mangle]
        pub unsafe extern "C" fn $fold_dotp(a: *const $t, b: *const $t, n: usize) -> $t {
            route_fold::<$t, DotP>(input(a, n), input(b, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $fold_sad(a: *const $t, b: *const $t, n: usize) -> $t {
            route_fold::<$t, Sad>(input(a, n), input(b, n))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_axpy(
            x: *const $t,
            y: *const $t,
            n: usize,
            c: $t,
            out: *mut $t,
        ) {
            route_map::<$t, Axpy>(input(x, n), input(y, n), output(out, n), [c, <$t>::ZERO])
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_scale(x: *const $t, n: usize, c: $t, out: *mut $t) {
            let x = input(x, n);
            route_map::<$t, Scale>(x, x, output(out, n), [c, <$t>::ZERO])
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_offset(x: *const $t, n: usize, c: $t, out: *mut $t) {
            let x = input(x, n);
            route_map::<$t, Offset>(x, x, output(out, n), [c, <$t>::ZERO])
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_add(x: *const $t, y: *const $t, n: usize, out: *mut $t) {
            route_map::<$t, Add>(input(x, n), input(y, n), output(out, n), [<$t>::ZERO; 2])
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_abs(x: *const $t, n: usize, out: *mut $t) {
            let x = input(x, n);
            route_map::<$t, Abs>(x, x, output(out, n), [<$t>::ZERO; 2])
        }

        #[no_mangle]
        pub unsafe extern "C" fn $map_clamp(x: *const $t, n: usize, lo: $t, hi: $t, out: *mut $t) {
            let x = input(x, n);
            route_map::<$t, Clamp>(x, x, output(out, n), [lo, hi])
        }

        /// Returns the number of elements written to `out`.
        #[no_mangle]
        pub unsafe extern "C" fn $filter_gt(
            values: *const $t,
            n: usize,
            threshold: $t,
            out: *mut $t,
        ) -> usize {
            route_filter_gt(input(values, n), output(out, n), threshold)
        }

        /// Returns the number of elements written to `pass`; `fail` receives the
        /// remaining `n - count`.
        #[no_mangle]
        pub unsafe extern "C" fn $partition_gt(
            values: *const $t,
            n: usize,
            threshold: $t,
            pass: *mut $t,
            fail: *mut $t,
        ) -> usize {
            route_partition_gt(input(values, n), output(pass, n), output(fail, n), threshold).0
        }

        #[no_mangle]
        pub unsafe extern "C" fn $any_gt(values: *const $t, n: usize, threshold: $t) -> bool {
            route_any_gt(input(values, n), threshold)
        }

        #[no_mangle]
        pub unsafe extern "C" fn $all_gt(values: *const $t, n: usize, threshold: $t) -> bool {
            route_all_gt(input(values, n), threshold)
        }

        #[no_mangle]
        pub unsafe extern "C" fn $all_eq(values: *const $t, n: usize, value: $t) -> bool {
            route_all_eq(input(values, n), value)
        }

        #[no_mangle]
        pub unsafe extern "C" fn $all_gt_zip(a: *const $t, b: *const $t, n: usize) -> bool {
            route_all_gt_zip(input(a, n), input(b, n))
        }

        /// Returns the length of the copied leading run.
        #[no_mangle]
        pub unsafe extern "C" fn $take_while_gt(
            values: *const $t,
            n: usize,
            threshold: $t,
            out: *mut $t,
        ) -> usize {
            route_take_while_gt(input(values, n), output(out, n), threshold)
        }

        /// Returns the number of elements written to `out`, `n` minus the
        /// skipped leading run.
        #[no_mangle]
        pub unsafe extern "C" fn $drop_while_gt(
            values: *const $t,
            n: usize,
            threshold: $t,
            out: *mut $t,
        ) -> usize {
            route_drop_while_gt(input(values, n), output(out, n), threshold)
        }

        #[no_mangle]
        pub unsafe extern "C" fn $scan_add(values: *const $t, n: usize, out: *mut $t) {
            scan_add_scalar(input(values, n), output(out, n))
        }
    };
}

ffi_exports!(i8;
    fpx_reduce_add_i8, fpx_reduce_mul_i8, fpx_reduce_min_i8, fpx_reduce_max_i8,
    fpx_fold_sumsq_i8, fpx_fold_dotp_i8, fpx_fold_sad_i8,
    fpx_map_axpy_i8, fpx_map_scale_i8, fpx_map_offset_i8,
    fpx_map_add_i8, fpx_map_abs_i8, fpx_map_clamp_i8,
    fpx_filter_gt_i8, fpx_partition_gt_i8, fpx_any_gt_i8, fpx_all_gt_i8,
    fpx_all_eq_i8, fpx_all_gt_zip_i8, fpx_take_while_gt_i8, fpx_drop_while_gt_i8,
    fpx_scan_add_i8
);

ffi_exports!(u8;
    fpx_reduce_add_u8, fpx_reduce_mul_u8, fpx_reduce_min_u8, fpx_reduce_max_u8,
    fpx_fold_sumsq_u8, fpx_fold_dotp_u8, fpx_fold_sad_u8,
    fpx_map_axpy_u8, fpx_map_scale_u8, fpx_map_offset_u8,
    fpx_map_add_u8, fpx_map_abs_u8, fpx_map_clamp_u8,
    fpx_filter_gt_u8, fpx_partition_gt_u8, fpx_any_gt_u8, fpx_all_gt_u8,
    fpx_all_eq_u8, fpx_all_gt_zip_u8, fpx_take_while_gt_u8, fpx_drop_while_gt_u8,
    fpx_scan_add_u8
);

ffi_exports!(i16;
    fpx_reduce_add_i16, fpx_reduce_mul_i16, fpx_reduce_min_i16, fpx_reduce_max_i16,
    fpx_fold_sumsq_i16, fpx_fold_dotp_i16, fpx_fold_sad_i16,
    fpx_map_axpy_i16, fpx_map_scale_i16, fpx_map_offset_i16,
    fpx_map_add_i16, fpx_map_abs_i16, fpx_map_clamp_i16,
    fpx_filter_gt_i16, fpx_partition_gt_i16, fpx_any_gt_i16, fpx_all_gt_i16,
    fpx_all_eq_i16, fpx_all_gt_zip_i16, fpx_take_while_gt_i16, fpx_drop_while_gt_i16,
    fpx_scan_add_i16
);

ffi_exports!(u16;
    fpx_reduce_add_u16, fpx_reduce_mul_u16, fpx_reduce_min_u16, fpx_reduce_max_u16,
    fpx_fold_sumsq_u16, fpx_fold_dotp_u16, fpx_fold_sad_u16,
    fpx_map_axpy_u16, fpx_map_scale_u16, fpx_map_offset_u16,
    fpx_map_add_u16, fpx_map_abs_u16, fpx_map_clamp_u16,
    fpx_filter_gt_u16, fpx_partition_gt_u16, fpx_any_gt_u16, fpx_all_gt_u16,
    fpx_all_eq_u16, fpx_all_gt_zip_u16, fpx_take_while_gt_u16, fpx_drop_while_gt_u16,
    fpx_scan_add_u16
);

ffi_exports!(i32;
    fpx_reduce_add_i32, fpx_reduce_mul_i32, fpx_reduce_min_i32, fpx_reduce_max_i32,
    fpx_fold_sumsq_i32, fpx_fold_dotp_i32, fpx_fold_sad_i32,
    fpx_map_axpy_i32, fpx_map_scale_i32, fpx_map_offset_i32,
    fpx_map_add_i32, fpx_map_abs_i32, fpx_map_clamp_i32,
    fpx_filter_gt_i32, fpx_partition_gt_i32, fpx_any_gt_i32, fpx_all_gt_i32,
    fpx_all_eq_i32, fpx_all_gt_zip_i32, fpx_take_while_gt_i32, fpx_drop_while_gt_i32,
    fpx_scan_add_i32
);

ffi_exports!(u32;
    fpx_reduce_add_u32, fpx_reduce_mul_u32, fpx_reduce_min_u32, fpx_reduce_max_u32,
    fpx_fold_sumsq_u32, fpx_fold_dotp_u32, fpx_fold_sad_u32,
    fpx_map_axpy_u32, fpx_map_scale_u32, fpx_map_offset_u32,
    fpx_map_add_u32, fpx_map_abs_u32, fpx_map_clamp_u32,
    fpx_filter_gt_u32, fpx_partition_gt_u32, fpx_any_gt_u32, fpx_all_gt_u32,
    fpx_all_eq_u32, fpx_all_gt_zip_u32, fpx_take_while_gt_u32, fpx_drop_while_gt_u32,
    fpx_scan_add_u32
);

ffi_exports!(i64;
    fpx_reduce_add_i64, fpx_reduce_mul_i64, fpx_reduce_min_i64, fpx_reduce_max_i64,
    fpx_fold_sumsq_i64, fpx_fold_dotp_i64, fpx_fold_sad_i64,
    fpx_map_axpy_i64, fpx_map_scale_i64, fpx_map_offset_i64,
    fpx_map_add_i64, fpx_map_abs_i64, fpx_map_clamp_i64,
    fpx_filter_gt_i64, fpx_partition_gt_i64, fpx_any_gt_i64, fpx_all_gt_i64,
    fpx_all_eq_i64, fpx_all_gt_zip_i64, fpx_take_while_gt_i64, fpx_drop_while_gt_i64,
    fpx_scan_add_i64
);

ffi_exports!(u64;
    fpx_reduce_add_u64, fpx_reduce_mul_u64, fpx_reduce_min_u64, fpx_reduce_max_u64,
    fpx_fold_sumsq_u64, fpx_fold_dotp_u64, fpx_fold_sad_u64,
    fpx_map_axpy_u64, fpx_map_scale_u64, fpx_map_offset_u64,
    fpx_map_add_u64, fpx_map_abs_u64, fpx_map_clamp_u64,
    fpx_filter_gt_u64, fpx_partition_gt_u64, fpx_any_gt_u64, fpx_all_gt_u64,
    fpx_all_eq_u64, fpx_all_gt_zip_u64, fpx_take_while_gt_u64, fpx_drop_while_gt_u64,
    fpx_scan_add_u64
);

ffi_exports!(f32;
    fpx_reduce_add_f32, fpx_reduce_mul_f32, fpx_reduce_min_f32, fpx_reduce_max_f32,
    fpx_fold_sumsq_f32, fpx_fold_dotp_f32, fpx_fold_sad_f32,
    fpx_map_axpy_f32, fpx_map_scale_f32, fpx_map_offset_f32,
    fpx_map_add_f32, fpx_map_abs_f32, fpx_map_clamp_f32,
    fpx_filter_gt_f32, fpx_partition_gt_f32, fpx_any_gt_f32, fpx_all_gt_f32,
    fpx_all_eq_f32, fpx_all_gt_zip_f32, fpx_take_while_gt_f32, fpx_drop_while_gt_f32,
    fpx_scan_add_f32
);

ffi_exports!(f64;
    fpx_reduce_add_f64, fpx_reduce_mul_f64, fpx_reduce_min_f64, fpx_reduce_max_f64,
    fpx_fold_sumsq_f64, fpx_fold_dotp_f64, fpx_fold_sad_f64,
    fpx_map_axpy_f64, fpx_map_scale_f64, fpx_map_offset_f64,
    fpx_map_add_f64, fpx_map_abs_f64, fpx_map_clamp_f64,
    fpx_filter_gt_f64, fpx_partition_gt_f64, fpx_any_gt_f64, fpx_all_gt_f64,
    fpx_all_eq_f64, fpx_all_gt_zip_f64, fpx_take_while_gt_f64, fpx_drop_while_gt_f64,
    fpx_scan_add_f64
);

macro_rules! float_exports {
    ($t:ty; $map_sqrt:ident) => {
        #[no_mangle]
        pub unsafe extern "C" fn $map_sqrt(x: *const $t, n: usize, out: *mut $t) {
            route_sqrt(input(x, n), output(out, n))
        }
    };
}

float_exports!(f32; fpx_map_sqrt_f32);
float_exports!(f64; fpx_map_sqrt_f64);
