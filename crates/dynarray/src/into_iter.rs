// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::iter::FusedIterator;
use core::ptr;

use crate::dynamic_array::DynamicArray;
use crate::raw_alloc::{Global, RawAlloc};
use crate::raw_storage::RawStorage;

/// Owning iterator returned by `DynamicArray::into_iter`.
///
/// Elements not yielded are dropped with the iterator, then the block is
/// released.
pub struct IntoIter<T, A: RawAlloc = Global> {
    buf: RawStorage<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: RawAlloc> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [start, end) are live
        unsafe { core::slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: RawAlloc> IntoIterator for DynamicArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<T, A: RawAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;
        self.start += 1;
        // SAFETY (PRECONDITIONS ARE MET): slot `index` is live and no longer tracked
        Some(unsafe { ptr::read(self.buf.ptr().add(index)) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: RawAlloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY (PRECONDITIONS ARE MET): slot `end` is live and no longer tracked
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T, A: RawAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: RawAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // Remaining elements back to front; RawStorage releases the block.
        while self.end > self.start {
            self.end -= 1;
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): slot `end` is live and no longer tracked
                ptr::drop_in_place(self.buf.ptr().add(self.end));
            }
        }
    }
}
