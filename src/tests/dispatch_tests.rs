// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
  use crate::constants::*;
  use crate::dispatch::{get_hw_capabilities, has_hw_support, simd_level, HardwareCapabilities};
  use crate::types::{ElementKind, FpxError, SimdLevel, WidthClass};
  use crate::Element;

  #[test]
  fn test_capabilities_agree_with_named_support() {
    let caps = get_hw_capabilities();
    assert_eq!(caps, HardwareCapabilities::detect());
    assert_eq!(caps.has_avx2, has_hw_support("avx2") && has_hw_support("fma"));
    assert_eq!(caps.has_neon, has_hw_support("neon"));
    assert!(!(caps.has_avx2 && caps.has_neon));
    assert!(!has_hw_support("avx512f"));
    assert!(!has_hw_support(""));
  }

  #[test]
  fn test_simd_level_is_cached_and_consistent() {
    let first = simd_level();
    assert_eq!(first, get_hw_capabilities().best_level());
    for _ in 0..10 {
      assert_eq!(simd_level(), first);
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    assert_eq!(first, SimdLevel::Scalar);
  }

  #[test]
  fn test_best_level_preference() {
    let both = HardwareCapabilities {
      has_avx2: true,
      has_neon: true,
    };
    assert_eq!(both.best_level(), SimdLevel::Avx2);
    let neon = HardwareCapabilities {
      has_avx2: false,
      has_neon: true,
    };
    assert_eq!(neon.best_level(), SimdLevel::Neon);
    let none = HardwareCapabilities {
      has_avx2: false,
      has_neon: false,
    };
    assert_eq!(none.best_level(), SimdLevel::Scalar);
  }

  #[test]
  fn test_element_kind_lanes() {
    assert_eq!(ElementKind::I8.lanes(SimdLevel::Avx2), 32);
    assert_eq!(ElementKind::U16.lanes(SimdLevel::Avx2), 16);
    assert_eq!(ElementKind::F32.lanes(SimdLevel::Avx2), 8);
    assert_eq!(ElementKind::U64.lanes(SimdLevel::Avx2), 4);
    assert_eq!(ElementKind::U8.lanes(SimdLevel::Neon), 16);
    assert_eq!(ElementKind::F64.lanes(SimdLevel::Neon), 2);
    for kind in ElementKind::ALL {
      assert_eq!(kind.lanes(SimdLevel::Scalar), 1);
    }

    #[cfg(target_arch = "x86_64")]
    {
      assert_eq!(ElementKind::I8.lanes(SimdLevel::Avx2), LANES_AVX2_BYTES);
      assert_eq!(ElementKind::I16.lanes(SimdLevel::Avx2), LANES_AVX2_16);
      assert_eq!(ElementKind::I32.lanes(SimdLevel::Avx2), LANES_AVX2_32);
      assert_eq!(ElementKind::F32.lanes(SimdLevel::Avx2), LANES_AVX2_F32);
      assert_eq!(ElementKind::I64.lanes(SimdLevel::Avx2), LANES_AVX2_64);
      assert_eq!(ElementKind::F64.lanes(SimdLevel::Avx2), LANES_AVX2_F64);
      assert_eq!(SimdLevel::Avx2.register_bits() / 8, VECTOR_ALIGN_AVX2);
    }
    #[cfg(target_arch = "aarch64")]
    {
      assert_eq!(ElementKind::I8.lanes(SimdLevel::Neon), LANES_NEON_BYTES);
      assert_eq!(ElementKind::I16.lanes(SimdLevel::Neon), LANES_NEON_16);
      assert_eq!(ElementKind::I32.lanes(SimdLevel::Neon), LANES_NEON_32);
      assert_eq!(ElementKind::F32.lanes(SimdLevel::Neon), LANES_NEON_F32);
      assert_eq!(ElementKind::I64.lanes(SimdLevel::Neon), LANES_NEON_64);
      assert_eq!(ElementKind::F64.lanes(SimdLevel::Neon), LANES_NEON_F64);
      assert_eq!(SimdLevel::Neon.register_bits() / 8, VECTOR_ALIGN_NEON);
    }

    // The scratch must hold the widest register of the narrowest lane
    assert_eq!(SCRATCH_LANES, ElementKind::U8.lanes(SimdLevel::Avx2));
    assert_eq!(SCRATCH_ALIGN, SimdLevel::Avx2.register_bits() / 8);
  }

  #[test]
  fn test_element_kind_classification() {
    assert_eq!(<i8 as Element>::KIND, ElementKind::I8);
    assert_eq!(<f64 as Element>::KIND, ElementKind::F64);
    assert_eq!(ElementKind::U32.width_class(), WidthClass::W32);
    assert_eq!(ElementKind::F32.width_class(), WidthClass::W32);
    assert_eq!(ElementKind::I64.width_class().bits(), 64);
    assert!(ElementKind::F32.is_float());
    assert!(!ElementKind::I32.is_float());
    assert!(ElementKind::I16.is_signed());
    assert!(ElementKind::F64.is_signed());
    assert!(!ElementKind::U8.is_signed());
  }

  #[test]
  fn test_element_identities() {
    assert_eq!(<u8 as Element>::MIN_IDENTITY, u8::MAX);
    assert_eq!(<u8 as Element>::MAX_IDENTITY, 0);
    assert_eq!(<i32 as Element>::MAX_IDENTITY, i32::MIN);
    assert_eq!(<f32 as Element>::MIN_IDENTITY, f32::INFINITY);
    assert_eq!(<f64 as Element>::MAX_IDENTITY, f64::NEG_INFINITY);
  }

  #[test]
  fn test_serde_names() {
    assert_eq!(serde_json::to_string(&ElementKind::U16).unwrap(), "\"u16\"");
    assert_eq!(serde_json::to_string(&SimdLevel::Avx2).unwrap(), "\"avx2\"");
    assert_eq!(serde_json::to_string(&WidthClass::W64).unwrap(), "\"w64\"");

    let kinds: Vec<ElementKind> = serde_json::from_str("[\"i8\",\"f64\"]").unwrap();
    assert_eq!(kinds, vec![ElementKind::I8, ElementKind::F64]);
    let level: SimdLevel = serde_json::from_str("\"neon\"").unwrap();
    assert_eq!(level, SimdLevel::Neon);
    assert!(serde_json::from_str::<SimdLevel>("\"avx512\"").is_err());

    for kind in ElementKind::ALL {
      let json = serde_json::to_string(&kind).unwrap();
      assert_eq!(serde_json::from_str::<ElementKind>(&json).unwrap(), kind);
    }
  }

  #[test]
  fn test_error_display() {
    let err = FpxError::LengthMismatch { left: 3, right: 4 };
    assert_eq!(err.to_string(), "input length mismatch: 3 vs 4");
    let err = FpxError::OutputTooSmall {
      needed: 10,
      actual: 2,
    };
    assert_eq!(err.to_string(), "output buffer too small: need 10, got 2");

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().contains("need 10"));
  }

  #[test]
  fn test_thresholds() {
    #[cfg(not(feature = "disable-fpx"))]
    {
      assert_eq!(SIMD_THRESHOLD_REDUCE, 32);
      assert_eq!(SIMD_THRESHOLD_MAP, 16);
    }
    #[cfg(feature = "disable-fpx")]
    {
      assert_eq!(SIMD_THRESHOLD_REDUCE, usize::MAX);
      assert_eq!(SIMD_THRESHOLD_FILTER, usize::MAX);
    }
    assert_eq!(SIMD_THRESHOLD_FOLD, SIMD_THRESHOLD_REDUCE);
    assert_eq!(SIMD_THRESHOLD_PREDICATE, SIMD_THRESHOLD_FILTER);
  }
}
