// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::ReserveError;
use crate::raw_alloc::RawAlloc;

/// An owned, untyped block of `capacity` slots for `T`.
///
/// `RawStorage` only owns memory. It never constructs or drops a `T`; the
/// owner tracks which slots are live. Zero-sized types and zero capacity
/// never touch the allocator and use a dangling pointer.
pub(crate) struct RawStorage<T, A: RawAlloc> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: RawStorage exclusively owns its block, like Box<[T]>
unsafe impl<T: Send, A: RawAlloc + Send> Send for RawStorage<T, A> {}
// SAFETY: shared access only hands out shared access to the block
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawStorage<T, A> {}

impl<T, A: RawAlloc> RawStorage<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Storage without a block.
    pub(crate) fn empty_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Allocates a block of exactly `capacity` slots.
    ///
    /// Aborts through `handle_alloc_error` if the strategy fails, and panics
    /// on capacity overflow.
    pub(crate) fn allocate_in(capacity: usize, alloc: A) -> Self {
        let mut storage = Self::empty_in(alloc);
        storage.rebuild(capacity, 0);
        storage
    }

    fn layout_for(capacity: usize) -> Result<Layout, ReserveError> {
        Layout::array::<T>(capacity).map_err(|_| ReserveError::CapacityOverflow)
    }

    fn allocate_block(&self, capacity: usize) -> Result<NonNull<T>, ReserveError> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(NonNull::dangling());
        }

        let layout = Self::layout_for(capacity)?;
        self.alloc
            .allocate(layout)
            .map(NonNull::cast)
            .map_err(|_| ReserveError::AllocFailed {
                bytes: layout.size(),
                align: layout.align(),
            })
    }

    fn release_block(&self, ptr: NonNull<T>, capacity: usize) {
        if Self::IS_ZST || capacity == 0 {
            return;
        }

        let layout = Self::layout_for(capacity)
            .expect("infallible: layout was validated when the block was allocated");
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): ptr was returned by allocate_block(capacity)
            self.alloc.deallocate(ptr.cast(), layout);
        }
    }

    /// Replaces the block with a new one of exactly `capacity` slots, moving
    /// the first `live` slots across. Slots past `live` are not touched.
    ///
    /// On error the current block is left unchanged.
    pub(crate) fn try_rebuild(&mut self, capacity: usize, live: usize) -> Result<(), ReserveError> {
        debug_assert!(live <= self.cap && live <= capacity);

        if Self::IS_ZST {
            self.cap = capacity;
            return Ok(());
        }

        let new_ptr = self.allocate_block(capacity)?;
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): both blocks hold at least `live` slots and
            // were allocated separately
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live);
        }

        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_cap = mem::replace(&mut self.cap, capacity);
        self.release_block(old_ptr, old_cap);

        Ok(())
    }

    /// Infallible [`RawStorage::try_rebuild`].
    pub(crate) fn rebuild(&mut self, capacity: usize, live: usize) {
        match self.try_rebuild(capacity, live) {
            Ok(()) => {}
            Err(ReserveError::CapacityOverflow) => capacity_overflow(),
            Err(ReserveError::AllocFailed { bytes, align }) => {
                let layout = Layout::from_size_align(bytes, align)
                    .expect("infallible: reported layout came from Layout::array");
                alloc::alloc::handle_alloc_error(layout)
            }
        }
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether a real block is held.
    #[inline(always)]
    pub(crate) fn is_allocated(&self) -> bool {
        !Self::IS_ZST && self.cap != 0
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: RawAlloc> Drop for RawStorage<T, A> {
    fn drop(&mut self) {
        self.release_block(self.ptr, self.cap);
    }
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
