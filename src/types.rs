// SPDX-License-Identifier: Apache-2.0

// types.rs for fpx
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FpxError {
    #[error("input length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("output buffer too small: need {needed}, got {actual}")]
    OutputTooSmall { needed: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, FpxError>;

/// Register width class of an element type.
///
/// Governs how many lanes fit in one vector and therefore loop unrolling and
/// tail thresholds. It never changes buffer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthClass {
    W8,
    W16,
    W32,
    W64,
}

impl WidthClass {
    #[inline]
    pub const fn bits(self) -> usize {
        match self {
            WidthClass::W8 => 8,
            WidthClass::W16 => 16,
            WidthClass::W32 => 32,
            WidthClass::W64 => 64,
        }
    }

    /// Lanes per vector register of `register_bits` width.
    #[inline]
    pub const fn lanes_in(self, register_bits: usize) -> usize {
        register_bits / self.bits()
    }
}

/// The ten element types the kernels are instantiated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ElementKind {
    pub const ALL: [ElementKind; 10] = [
        ElementKind::I8,
        ElementKind::U8,
        ElementKind::I16,
        ElementKind::U16,
        ElementKind::I32,
        ElementKind::U32,
        ElementKind::I64,
        ElementKind::U64,
        ElementKind::F32,
        ElementKind::F64,
    ];

    #[inline]
    pub const fn width_class(self) -> WidthClass {
        match self {
            ElementKind::I8 | ElementKind::U8 => WidthClass::W8,
            ElementKind::I16 | ElementKind::U16 => WidthClass::W16,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => WidthClass::W32,
            ElementKind::I64 | ElementKind::U64 | ElementKind::F64 => WidthClass::W64,
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            ElementKind::U8 | ElementKind::U16 | ElementKind::U32 | ElementKind::U64
        )
    }

    /// Number of elements processed per vector operation at `level`.
    #[inline]
    pub const fn lanes(self, level: SimdLevel) -> usize {
        match level {
            SimdLevel::Scalar => 1,
            _ => self.width_class().lanes_in(level.register_bits()),
        }
    }
}

/// Instruction set a kernel call is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimdLevel {
    Scalar,
    Avx2,
    Neon,
}

impl SimdLevel {
    /// Width of one vector register. Scalar code uses a general-purpose register.
    #[inline]
    pub const fn register_bits(self) -> usize {
        match self {
            SimdLevel::Scalar => 64,
            SimdLevel::Avx2 => 256,
            SimdLevel::Neon => 128,
        }
    }
}
