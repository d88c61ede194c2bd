// SPDX-License-Identifier: Apache-2.0

//! Closure-driven fold/map/filter/zip over arbitrary element types.
//!
//! These work on any `T` (records, tuples, strings) at scalar speed and share
//! the buffer rules of the numeric kernels: inputs are borrowed, outputs are
//! caller-supplied slices, and nothing is allocated.
//!
//! ```rust
//! #[derive(Clone, Copy)]
//! struct Item {
//!     id: u32,
//!     score: f64,
//! }
//!
//! let items = [Item { id: 1, score: 0.5 }, Item { id: 2, score: 0.9 }];
//! let total = fpx::hof::foldl(&items, 0.0, |acc, item| acc + item.score);
//! assert!((total - 1.4).abs() < 1e-12);
//!
//! let mut ids = [0u32; 2];
//! fpx::hof::map_into(&items, &mut ids, |item| item.id).unwrap();
//! assert_eq!(ids, [1, 2]);
//! ```

use log::trace;

use crate::types::{FpxError, Result};

/// Left fold: `f(f(f(init, v0), v1), v2)...`
#[inline]
pub fn foldl<T, A, F>(values: &[T], init: A, mut f: F) -> A
where
  F: FnMut(A, &T) -> A,
{
  trace!("HOF FOLDL: values.len()={}", values.len());
  let mut acc = init;
  for v in values {
    acc = f(acc, v);
  }
  acc
}

/// `out[i] = f(&values[i])`. Elements of `out` past `values.len()` are untouched.
pub fn map_into<T, U, F>(values: &[T], out: &mut [U], mut f: F) -> Result<()>
where
  F: FnMut(&T) -> U,
{
  trace!("HOF MAP: values.len()={}", values.len());
  if out.len() < values.len() {
    return Err(FpxError::OutputTooSmall {
      needed: values.len(),
      actual: out.len(),
    });
  }
  for (o, v) in out.iter_mut().zip(values) {
    *o = f(v);
  }
  Ok(())
}

/// Copies the elements accepted by `predicate` to the front of `out`, in order,
/// and returns how many were copied.
///
/// `out` must be at least as long as `values`, like the numeric compaction.
pub fn filter_into<T, P>(values: &[T], out: &mut [T], mut predicate: P) -> Result<usize>
where
  T: Clone,
  P: FnMut(&T) -> bool,
{
  trace!("HOF FILTER: values.len()={}", values.len());
  if out.len() < values.len() {
    return Err(FpxError::OutputTooSmall {
      needed: values.len(),
      actual: out.len(),
    });
  }
  let mut count = 0;
  for v in values {
    if predicate(v) {
      out[count] = v.clone();
      count += 1;
    }
  }
  Ok(count)
}

/// `out[i] = f(&a[i], &b[i])`
pub fn zip_with_into<A, B, U, F>(a: &[A], b: &[B], out: &mut [U], mut f: F) -> Result<()>
where
  F: FnMut(&A, &B) -> U,
{
  trace!("HOF ZIP_WITH: a.len()={} b.len()={}", a.len(), b.len());
  if a.len() != b.len() {
    return Err(FpxError::LengthMismatch {
      left: a.len(),
      right: b.len(),
    });
  }
  if out.len() < a.len() {
    return Err(FpxError::OutputTooSmall {
      needed: a.len(),
      actual: out.len(),
    });
  }
  for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
    *o = f(x, y);
  }
  Ok(())
}
