// SPDX-License-Identifier: Apache-2.0

//! Inclusive prefix sum.
//!
//! Each output depends on the previous one, so this stays scalar; the input is
//! walked in blocks of `UNROLL_FACTOR_SCAN` to keep the loop body branch-free.

use crate::constants::UNROLL_FACTOR_SCAN;
use crate::element::Element;

/// `out[i] = values[0] + ... + values[i]`, wrapping for integers.
///
/// `out` must hold at least `values.len()` elements; the rest is untouched.
pub(crate) fn scan_add_scalar<T: Element>(values: &[T], out: &mut [T]) {
  let out = &mut out[..values.len()];
  let mut running = T::ZERO;

  let mut src_blocks = values.chunks_exact(UNROLL_FACTOR_SCAN);
  let mut dst_blocks = out.chunks_exact_mut(UNROLL_FACTOR_SCAN);
  for (src, dst) in (&mut src_blocks).zip(&mut dst_blocks) {
    for (s, d) in src.iter().zip(dst.iter_mut()) {
      running = running.lane_add(*s);
      *d = running;
    }
  }

  for (s, d) in src_blocks.remainder().iter().zip(dst_blocks.into_remainder()) {
    running = running.lane_add(*s);
    *d = running;
  }
}
