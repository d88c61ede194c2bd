// SPDX-License-Identifier: Apache-2.0

//! FPX library
//!
//! Fixed-width numeric kernels with hardware-accelerated implementations.
//! Every kernel has a scalar fallback and SIMD backends selected at runtime.
//!
//! - Reductions: sum, product, min, max
//! - Fused folds: sum of squares, dot product, sum of absolute differences
//! - Fused maps: `c*x + y`, `c*x`, `x + c`, `x + y`, `|x|`, clamp, and `sqrt` for floats
//! - Compaction: `filter_gt`, `partition_gt`, `take_while_gt` / `drop_while_gt`
//! - Predicates: `any_gt`, `all_gt`, `all_eq`, `all_gt_zip`
//! - Inclusive prefix sum
//!
//! All kernels are implemented for `i8 u8 i16 u16 i32 u32 i64 u64 f32 f64`, once,
//! generically; the lane width per type is chosen at compile time.
//!
//! ## Hardware support
//! - **AVX2 + FMA** on x86_64 (256-bit registers)
//! - **NEON** on aarch64 (128-bit registers)
//! - Scalar everywhere else, for inputs below the size thresholds, and for
//!   every input with the `disable-fpx` feature
//!
//! ## Usage
//!
//! ```rust
//! // Generic API
//! let values = [1i32, 2, 3, 4, 5];
//! assert_eq!(fpx::reduce_add(&values).unwrap(), 15);
//!
//! // Flat per-type API
//! let x = [1.0f32, 2.0, 3.0, 4.0, 5.0];
//! let y = [10.0f32, 20.0, 30.0, 40.0, 50.0];
//! let mut out = [0.0f32; 5];
//! fpx::map_axpy_f32(&x, &y, &mut out, 2.0).unwrap();
//! assert_eq!(out, [12.0, 24.0, 36.0, 48.0, 60.0]);
//!
//! // Stream compaction
//! let mut selected = [0u16; 5];
//! let count = fpx::filter_gt_u16(&[500, 200, 800, 100, 900], &mut selected, 500).unwrap();
//! assert_eq!(&selected[..count], &[800, 900]);
//!
//! // Check available SIMD capabilities
//! let caps = fpx::get_hw_capabilities();
//! println!("Has AVX2: {}", caps.has_avx2);
//! ```

#![allow(clippy::missing_safety_doc)]

#[cfg(target_arch = "x86_64")]
mod avx2;
pub mod constants;
pub mod dispatch;
pub mod element;
pub mod ffi;
mod filter;
mod fold;
mod frame;
pub mod hof;
mod map;
#[cfg(target_arch = "aarch64")]
mod neon;
mod reduce;
mod scan;
mod tables;
pub mod types;
mod vector;

pub use element::{Element, Float};
pub use types::*;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
#[path = "tests/reduce_tests.rs"]
mod reduce_tests;
#[cfg(test)]
#[path = "tests/fold_tests.rs"]
mod fold_tests;
#[cfg(test)]
#[path = "tests/map_tests.rs"]
mod map_tests;
#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod filter_tests;
#[cfg(test)]
#[path = "tests/scan_tests.rs"]
mod scan_tests;
#[cfg(test)]
#[path = "tests/kernel_tests.rs"]
mod kernel_tests;
#[cfg(test)]
#[path = "tests/hof_tests.rs"]
mod hof_tests;
#[cfg(test)]
#[path = "tests/ffi_tests.rs"]
mod ffi_tests;
#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod dispatch_tests;

pub use dispatch::*;
