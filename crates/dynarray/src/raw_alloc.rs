// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

/// Marker returned when an allocation strategy cannot serve a request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AllocError;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("allocation failed")
    }
}

impl core::error::Error for AllocError {}

/// Allocation strategy backing a [`DynamicArray`](crate::DynamicArray).
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and that stay valid
/// until passed back to [`RawAlloc::deallocate`] on the same strategy (or a
/// clone of it).
pub unsafe trait RawAlloc {
    /// Allocates a block described by `layout`. `layout.size()` is never zero.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`RawAlloc::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this strategy with the same `layout`,
    /// and must not have been released already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process heap, through `alloc::alloc`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Global;

unsafe impl RawAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0);

        // SAFETY (PRECONDITIONS ARE MET): layout has a non-zero size
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr/layout come from `allocate`
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded contract
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
