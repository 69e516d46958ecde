// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! A resizable array with manual memory management and index-based cursors.
//!
//! `DynamicArray<T>` owns a raw block of `capacity` slots and tracks how many
//! of them hold live values. Appends double the capacity when the block is
//! full; every reallocation builds a complete replacement and swaps it in.
//!
//! # Core Guarantees
//!
//! - **`len <= capacity`** after every operation.
//! - **No leaks on panicking clone**: if `T::clone` panics while an array is
//!   being cloned, the elements cloned so far are dropped in reverse order
//!   and the new block is released.
//! - **Copy-and-swap assignment**: `clone_from` only replaces the target once
//!   the complete copy exists.
//! - **Reverse-order destruction**: `clear()` and drop destroy elements back
//!   to front.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use dynarray::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! array.push_back(100);
//! array.push_back(101);
//! array.push_back(101);
//!
//! assert_eq!(array[0], 100);
//! assert_eq!(array[1], 101);
//! assert_eq!(array.len(), 3);
//! assert_eq!(array.capacity(), dynarray::DEFAULT_CAPACITY);
//! ```
//!
//! # Example: Checked Access
//!
//! ```rust
//! use dynarray::{BoundsError, DynamicArray};
//!
//! fn example() -> Result<(), BoundsError> {
//!     let mut array = DynamicArray::from_elem(1, String::from("hello"));
//!     *array.at_mut(0)? = String::from("test");
//!
//!     let err = array.at(1).unwrap_err();
//!     assert!(err.what().starts_with("Array out of bounds exception."));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Cursors
//!
//! ```rust
//! use dynarray::DynamicArray;
//!
//! let array = DynamicArray::from_slice(&[1, 2, 3, 4]);
//! let begin = array.begin();
//!
//! assert_eq!(begin[2], 3);
//! assert_eq!(*(begin + 3), 4);
//! assert_eq!(*array.rbegin(), 4);
//!
//! let copy = DynamicArray::from_cursors(array.begin() + 1, array.end());
//! assert_eq!(copy.as_slice(), &[2, 3, 4]);
//! ```
//!
//! # Allocation Strategy
//!
//! Storage comes from a [`RawAlloc`] implementation, [`Global`] by default.
//! The `*_in` constructors take any other strategy, such as the tracking
//! allocator of `dynarray-leakcheck`.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod cursor;
mod dynamic_array;
mod error;
mod into_iter;
mod raw_alloc;
mod raw_storage;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, CursorMut};
pub use dynamic_array::{DEFAULT_CAPACITY, DynamicArray};
pub use error::{BoundsError, ReserveError};
pub use into_iter::IntoIter;
pub use raw_alloc::{AllocError, Global, RawAlloc};
