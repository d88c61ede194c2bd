// SPDX-License-Identifier: Apache-2.0

//! Common constants used across implementations
//!
//! This module centralizes lane counts, accumulator counts, thresholds and
//! scratch sizes used by the scalar and SIMD paths.

// =============================================================================
// SIMD Lane Counts by Architecture
// =============================================================================

// x86_64 Constants (AVX2, 256-bit registers)
#[cfg(target_arch = "x86_64")]
pub use x86_constants::*;
#[cfg(target_arch = "x86_64")]
mod x86_constants {
    pub const LANES_AVX2_F64: usize = 4; // 256/64 = 4 f64 elements
    pub const LANES_AVX2_F32: usize = 8; // 256/32 = 8 f32 elements
    pub const LANES_AVX2_64: usize = 4; // 256/64 = 4 i64/u64 elements
    pub const LANES_AVX2_32: usize = 8; // 256/32 = 8 i32/u32 elements
    pub const LANES_AVX2_16: usize = 16; // 256/16 = 16 i16/u16 elements
    pub const LANES_AVX2_BYTES: usize = 32; // 256/8 = 32 byte elements

    // Independent vector accumulators in reduction/fold loops.
    // Add/FMA latency is 4 cycles with two ports, so four chains keep one port busy.
    pub const ACCUMULATORS_AVX2: usize = 4;

    // Natural alignment of a YMM register.
    pub const VECTOR_ALIGN_AVX2: usize = 32;
}

// NEON Constants (ARM64 only, 128-bit registers)
#[cfg(target_arch = "aarch64")]
pub use neon_constants::*;
#[cfg(target_arch = "aarch64")]
mod neon_constants {
    pub const LANES_NEON_F64: usize = 2; // 128/64 = 2 f64 elements
    pub const LANES_NEON_F32: usize = 4; // 128/32 = 4 f32 elements
    pub const LANES_NEON_64: usize = 2; // 128/64 = 2 i64/u64 elements
    pub const LANES_NEON_32: usize = 4; // 128/32 = 4 i32/u32 elements
    pub const LANES_NEON_16: usize = 8; // 128/16 = 8 i16/u16 elements
    pub const LANES_NEON_BYTES: usize = 16; // 128/8 = 16 byte elements

    pub const ACCUMULATORS_NEON: usize = 4;

    pub const VECTOR_ALIGN_NEON: usize = 16;
}

// =============================================================================
// Scratch Space
// =============================================================================

/// Lane capacity of the aligned stack scratch used for spills and partial loads.
/// Must cover the widest vector of the narrowest element (32 x u8 on AVX2).
pub const SCRATCH_LANES: usize = 32;

/// Alignment of the stack scratch. Covers both YMM (32) and Q (16) registers.
pub const SCRATCH_ALIGN: usize = 32;

// =============================================================================
// SIMD Performance Thresholds
// =============================================================================

// When disable-fpx feature is enabled, set all thresholds to usize::MAX to force scalar implementations
#[cfg(feature = "disable-fpx")]
mod thresholds {
    pub const SIMD_THRESHOLD_REDUCE: usize = usize::MAX; // Sum, product, min, max
    pub const SIMD_THRESHOLD_FOLD: usize = usize::MAX; // Sum of squares, dot product, SAD
    pub const SIMD_THRESHOLD_MAP: usize = usize::MAX; // Element-wise maps
    pub const SIMD_THRESHOLD_FILTER: usize = usize::MAX; // Compaction and partition
    pub const SIMD_THRESHOLD_PREDICATE: usize = usize::MAX; // any/all predicates
}

// Normal thresholds when SIMD is enabled (default)
#[cfg(not(feature = "disable-fpx"))]
mod thresholds {
    pub const SIMD_THRESHOLD_REDUCE: usize = 32; // Sum, product, min, max
    pub const SIMD_THRESHOLD_FOLD: usize = 32; // Sum of squares, dot product, SAD
    pub const SIMD_THRESHOLD_MAP: usize = 16; // Element-wise maps
    pub const SIMD_THRESHOLD_FILTER: usize = 32; // Compaction and partition
    pub const SIMD_THRESHOLD_PREDICATE: usize = 32; // any/all predicates
}

// Re-export the thresholds at the module level
pub use thresholds::*;

// =============================================================================
// Scalar Processing Constants
// =============================================================================

// Unroll factor of the sequential prefix-sum loop
pub const UNROLL_FACTOR_SCAN: usize = 4;
