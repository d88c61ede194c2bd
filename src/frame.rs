// SPDX-License-Identifier: Apache-2.0

//! Entry/exit discipline shared by every vectorized kernel.
//!
//! Callee-saved general-purpose and vector registers are preserved by the Rust
//! ABI, so kernels never spell out prologues. What the compiler does not decide
//! for us lives here:
//!
//! - [`AlignedScratch`]: stack spill space aligned to the vector register so
//!   spills, partial loads and horizontal reductions can use aligned
//!   loads/stores.
//! - [`WideFrame`]: held for the whole body of a 256-bit kernel; dropping it
//!   issues `vzeroupper`, so every exit path hands back a clean upper vector
//!   state to SSE code in the caller.
//!
//! Neither is checked at runtime. A misaligned aligned access or a missing
//! transition is a latent bug, not an error.

use crate::constants::{SCRATCH_ALIGN, SCRATCH_LANES};

/// Stack scratch for one vector of any element type, aligned for
/// `load_aligned` / `store_aligned`.
#[repr(C, align(32))]
pub(crate) struct AlignedScratch<T: Copy> {
  pub(crate) lanes: [T; SCRATCH_LANES],
}

const _: () = assert!(core::mem::align_of::<AlignedScratch<u8>>() == SCRATCH_ALIGN);

impl<T: Copy> AlignedScratch<T> {
  #[inline(always)]
  pub(crate) fn filled(value: T) -> Self {
    Self {
      lanes: [value; SCRATCH_LANES],
    }
  }

  #[inline(always)]
  pub(crate) fn as_ptr(&self) -> *const T {
    self.lanes.as_ptr()
  }

  #[inline(always)]
  pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
    self.lanes.as_mut_ptr()
  }
}

/// Debug-only check that `ptr` honours `align` before an aligned vector access.
#[inline(always)]
pub(crate) fn debug_assert_aligned<T>(ptr: *const T, align: usize) {
  debug_assert!(
    (ptr as usize) % align == 0,
    "aligned vector access at {:p} needs {}-byte alignment",
    ptr,
    align
  );
}

/// Guard for kernels that execute 256-bit instructions.
///
/// Create it first thing in the kernel so it is dropped last.
#[cfg(target_arch = "x86_64")]
pub(crate) struct WideFrame {
  _not_send: core::marker::PhantomData<*const ()>,
}

#[cfg(target_arch = "x86_64")]
impl WideFrame {
  /// # Safety
  /// The CPU must support AVX.
  #[inline(always)]
  pub(crate) unsafe fn enter() -> Self {
    WideFrame {
      _not_send: core::marker::PhantomData,
    }
  }
}

#[cfg(target_arch = "x86_64")]
impl Drop for WideFrame {
  #[inline(always)]
  fn drop(&mut self) {
    // SAFETY: a WideFrame only exists inside an AVX2 kernel, see `enter`.
    unsafe { leave_wide_state() }
  }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
#[inline]
unsafe fn leave_wide_state() {
  std::arch::x86_64::_mm256_zeroupper();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scratch_is_register_aligned() {
    let scratch = AlignedScratch::<u8>::filled(0);
    assert_eq!(scratch.as_ptr() as usize % SCRATCH_ALIGN, 0);
    let scratch = AlignedScratch::<f64>::filled(0.0);
    assert_eq!(scratch.as_ptr() as usize % SCRATCH_ALIGN, 0);
    assert_eq!(scratch.lanes.len(), SCRATCH_LANES);
  }
}
