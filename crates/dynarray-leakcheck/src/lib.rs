// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Scoped leak detection for `dynarray`.
//!
//! A [`LeakChecker`] owns a ledger of every allocation made through the
//! [`TrackingAlloc`] handles it hands out. Arrays built with the `*_in`
//! constructors route their storage through such a handle; once they are
//! gone, [`LeakChecker::finish`] tells whether any block is still
//! outstanding.
//!
//! There is no global state: each test creates its own checker.
//!
//! # Example
//!
//! ```rust
//! use dynarray::DynamicArray;
//! use dynarray_leakcheck::LeakChecker;
//!
//! let checker = LeakChecker::new();
//!
//! let mut array = DynamicArray::with_capacity_in(2, checker.allocator());
//! for value in [100, 784, 7, 8, 84, 40] {
//!     array.push_back(value);
//! }
//! assert_eq!(array.capacity(), 8);
//! drop(array);
//!
//! let report = checker.finish().expect("no block may outlive the array");
//! assert_eq!(report.allocations(), 3);
//! assert!(report.is_clean());
//! ```
//!
//! # Failure Injection
//!
//! [`TrackingAlloc::fail_after`] makes the handle refuse allocations once a
//! number of them succeeded, which drives `try_reserve` into its error path.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod checker;
mod error;
mod tracking_alloc;

#[cfg(test)]
mod tests;

pub use checker::{LeakChecker, LeakReport};
pub use error::LeakError;
pub use tracking_alloc::TrackingAlloc;
