// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::mem::{self, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::cursor::{Cursor, CursorMut, Direction};
use crate::error::{BoundsError, ReserveError};
use crate::raw_alloc::{Global, RawAlloc};
use crate::raw_storage::{RawStorage, capacity_overflow};

/// Number of slots allocated by [`DynamicArray::new`].
pub const DEFAULT_CAPACITY: usize = 64;

/// An owning, contiguous, resizable array with amortized O(1) append.
///
/// Slots `[0, len)` hold live values, slots `[len, capacity)` are allocated
/// but uninitialized. Capacity doubles when an append finds the array full
/// and only shrinks through [`DynamicArray::resize`].
///
/// Every reallocation builds a complete replacement block, moves the live
/// elements across and swaps it in, so a failed allocation leaves the array
/// untouched.
///
/// # Example
///
/// ```rust
/// use dynarray::DynamicArray;
///
/// let mut array = DynamicArray::with_capacity(2);
/// for value in [100, 784, 7, 8, 84, 40] {
///     array.push_back(value);
/// }
///
/// assert_eq!(array.len(), 6);
/// assert_eq!(array.capacity(), 8);
/// assert_eq!(array.to_string(), "100 784 7 8 84 40");
/// ```
pub struct DynamicArray<T, A: RawAlloc = Global> {
    buf: RawStorage<T, A>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a full array of `capacity` clones of `value`.
    ///
    /// ```rust
    /// use dynarray::DynamicArray;
    ///
    /// let array = DynamicArray::from_elem(2, String::from("hello"));
    /// assert_eq!(array.len(), 2);
    /// assert_eq!(array.capacity(), 2);
    /// assert!(array.iter().all(|s| s == "hello"));
    /// ```
    pub fn from_elem(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(capacity, value, Global)
    }

    /// Creates an array holding clones of `src`, with no spare capacity.
    pub fn from_slice(src: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(src, Global)
    }

    /// Creates an array holding clones of the elements in `[begin, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `begin` is past `end` or the cursors walk in different
    /// directions.
    pub fn from_cursors<B: RawAlloc>(begin: Cursor<'_, T, B>, end: Cursor<'_, T, B>) -> Self
    where
        T: Clone,
    {
        Self::from_cursors_in(begin, end, Global)
    }
}

impl<T, A: RawAlloc> DynamicArray<T, A> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots from `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates an empty array with exactly `capacity` slots from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self {
            buf: RawStorage::allocate_in(capacity, alloc),
            len: 0,
        }
    }

    /// Creates an array without a block, as left behind by [`DynamicArray::take`].
    pub fn empty_in(alloc: A) -> Self {
        Self {
            buf: RawStorage::empty_in(alloc),
            len: 0,
        }
    }

    /// [`DynamicArray::from_elem`] with an explicit allocation strategy.
    pub fn from_elem_in(capacity: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(capacity, alloc);
        if capacity == 0 {
            return array;
        }

        for _ in 1..capacity {
            // SAFETY (PRECONDITIONS ARE MET): at most capacity - 1 writes so far
            unsafe { array.write_back(value.clone()) };
        }
        // SAFETY (PRECONDITIONS ARE MET): exactly one slot left
        unsafe { array.write_back(value) };

        array
    }

    /// [`DynamicArray::from_slice`] with an explicit allocation strategy.
    pub fn from_slice_in(src: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(src.len(), alloc);
        for value in src {
            // SAFETY (PRECONDITIONS ARE MET): capacity == src.len()
            unsafe { array.write_back(value.clone()) };
        }

        array
    }

    /// [`DynamicArray::from_cursors`] with an explicit allocation strategy.
    pub fn from_cursors_in<B: RawAlloc>(
        begin: Cursor<'_, T, B>,
        end: Cursor<'_, T, B>,
        alloc: A,
    ) -> Self
    where
        T: Clone,
    {
        assert_eq!(
            begin.is_reverse(),
            end.is_reverse(),
            "cursors walk in different directions"
        );
        assert!(begin <= end, "begin cursor is past end cursor");

        let mut array = Self::with_capacity_in((end - begin).unsigned_abs(), alloc);
        let mut it = begin;
        while it != end {
            // SAFETY (PRECONDITIONS ARE MET): the range holds exactly capacity elements
            unsafe { array.write_back((*it).clone()) };
            it.inc();
        }

        array
    }

    /// Constructs `value` in the first free slot.
    ///
    /// # Safety
    ///
    /// `self.len() < self.capacity()`.
    #[inline(always)]
    unsafe fn write_back(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());

        unsafe {
            // SAFETY: caller guarantees a free slot at `len`
            let slot = self.buf.ptr().add(self.len);
            ptr::write(slot, value);
            // Only count the element once it is live
            self.len += 1;
            &mut *slot
        }
    }

    #[inline(always)]
    fn grow_if_full(&mut self) {
        if self.len < self.capacity() {
            return;
        }

        let new_capacity = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).unwrap_or_else(|| capacity_overflow()),
        };
        self.resize(new_capacity);
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest number of elements an array of `T` can ever hold.
    #[inline]
    pub const fn max_len(&self) -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    /// Returns `true` only when the array holds [`DynamicArray::max_len`] elements.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.max_len()
    }

    /// Returns the allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Appends `value`, doubling the capacity first if the array is full.
    pub fn push_back(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }

    /// Appends the value built by `make`, constructing it directly in its slot.
    ///
    /// Growth happens before `make` runs.
    ///
    /// ```rust
    /// use dynarray::DynamicArray;
    ///
    /// struct Complex {
    ///     re: f32,
    ///     im: f32,
    /// }
    ///
    /// let mut array = DynamicArray::with_capacity(0);
    /// let c = array.emplace_back_with(|| Complex { re: 543.87, im: 890.341 });
    /// c.im = 1.0;
    ///
    /// assert_eq!(array.len(), 1);
    /// assert_eq!(array.capacity(), 1);
    /// assert_eq!(array[0].im, 1.0);
    /// ```
    pub fn emplace_back_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.grow_if_full();
        // SAFETY (PRECONDITIONS ARE MET): grow_if_full leaves at least one free slot
        unsafe { self.write_back(make()) }
    }

    /// Removes the last element and returns it, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and is no longer counted
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Drops every element in reverse order. The block is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops the elements past `len` in reverse order. No-op if `len >= self.len()`.
    ///
    /// If an element's drop panics, the elements below it are still dropped
    /// while unwinding.
    pub fn truncate(&mut self, len: usize) {
        if !mem::needs_drop::<T>() {
            self.len = self.len.min(len);
            return;
        }

        let mut tail = TailDrop { array: self, keep: len };
        tail.run();
    }

    /// Rebuilds the array in a block of exactly `new_capacity` slots.
    ///
    /// The first `min(len, new_capacity)` elements are kept in order, the rest
    /// are dropped. A `new_capacity` equal to `len()` is a no-op; anything else
    /// is a full O(len) rebuild.
    ///
    /// ```rust
    /// use dynarray::DynamicArray;
    ///
    /// let mut array = DynamicArray::from_elem(2, String::from("hello"));
    /// array.resize(1);
    ///
    /// assert_eq!(array.len(), 1);
    /// assert_eq!(array[0], "hello");
    /// ```
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity == self.len {
            return;
        }

        self.truncate(new_capacity);
        self.buf.rebuild(new_capacity, self.len);
    }

    /// Grows the block to exactly `new_capacity` slots. Never shrinks.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.buf.rebuild(new_capacity, self.len);
        }
    }

    /// Fallible [`DynamicArray::reserve`].
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::CapacityOverflow`] if `new_capacity` slots do not fit
    /// in `isize::MAX` bytes, and [`ReserveError::AllocFailed`] if the allocation
    /// strategy refuses the block. The array is unchanged on error.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), ReserveError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        self.buf.try_rebuild(new_capacity, self.len)
    }

    /// Releases the spare capacity.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len {
            self.buf.rebuild(self.len, self.len);
        }
    }

    /// Moves the contents out, leaving `self` without a block.
    ///
    /// ```rust
    /// use dynarray::DynamicArray;
    ///
    /// let mut a = DynamicArray::from_slice(&[9, 9, 9]);
    /// let b = a.take();
    ///
    /// assert_eq!(a.len(), 0);
    /// assert_eq!(a.capacity(), 0);
    /// assert_eq!(b.as_slice(), &[9, 9, 9]);
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::empty_in(self.allocator().clone());
        mem::replace(self, empty)
    }

    /// Exchanges blocks and contents with `other`. Never panics.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Replaces the contents with a copy of `source`.
    ///
    /// Reuses the current block when it holds at least `source.len()` slots,
    /// otherwise rebuilds into a block of `source.capacity()` slots first.
    pub fn assign_copy<B: RawAlloc>(&mut self, source: &DynamicArray<T, B>)
    where
        T: Copy,
    {
        self.clear();
        if self.capacity() < source.len() {
            self.buf.rebuild(source.capacity(), 0);
        }

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): distinct blocks, capacity >= source.len(),
            // T: Copy has no drop glue
            ptr::copy_nonoverlapping(source.as_ptr(), self.buf.ptr(), source.len());
        }
        self.len = source.len();
    }

    /// Checked access against `len()`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if `index >= self.len()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> Result<&T, BoundsError> {
        match self.as_slice().get(index) {
            Some(value) => Ok(value),
            None => Err(BoundsError::here(
                "Array out of bounds exception.",
                "DynamicArray::at",
            )),
        }
    }

    /// Mutable checked access against `len()`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if `index >= self.len()`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BoundsError> {
        match self.as_mut_slice().get_mut(index) {
            Some(value) => Ok(value),
            None => Err(BoundsError::here(
                "Array out of bounds exception.",
                "DynamicArray::at_mut",
            )),
        }
    }

    /// Checked access to any allocated slot, live or not, against `capacity()`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if `index >= self.capacity()`.
    #[track_caller]
    pub fn slot(&self, index: usize) -> Result<&MaybeUninit<T>, BoundsError> {
        if index >= self.capacity() {
            return Err(BoundsError::here(
                "Array out of bounds exception.",
                "DynamicArray::slot",
            ));
        }

        // SAFETY (PRECONDITIONS ARE MET): index < capacity, MaybeUninit<T> has T's layout
        Ok(unsafe { &*self.buf.ptr().add(index).cast::<MaybeUninit<T>>() })
    }

    /// The uninitialized slots `[len, capacity)`.
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slots past len are allocated and not live
            slice::from_raw_parts_mut(
                self.buf.ptr().add(self.len).cast::<MaybeUninit<T>>(),
                self.capacity() - self.len,
            )
        }
    }

    /// Sets the number of live elements.
    ///
    /// # Safety
    ///
    /// `new_len <= capacity()` and slots `[0, new_len)` must be initialized.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// First element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// First element, mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Last element, mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) are live, ptr is aligned and non-null
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Returns the live elements mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) are live, ptr is aligned and non-null
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Returns `true` if both arrays are backed by the same block.
    ///
    /// This is an identity check, not a comparison of contents; use `==` for
    /// element-wise equality. Arrays without a block only share storage with
    /// themselves.
    pub fn shares_storage_with<B: RawAlloc>(&self, other: &DynamicArray<T, B>) -> bool {
        if self.buf.is_allocated() {
            ptr::eq(self.buf.ptr().cast_const(), other.buf.ptr().cast_const())
        } else {
            ptr::addr_eq(ptr::from_ref(self), ptr::from_ref(other))
        }
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, 0, Direction::Forward)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.len_as_offset(), Direction::Forward)
    }

    /// Reverse cursor at the last element.
    pub fn rbegin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.len_as_offset() - 1, Direction::Reverse)
    }

    /// Reverse cursor one before the first element.
    pub fn rend(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, -1, Direction::Reverse)
    }

    /// Mutable cursor at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, 0, Direction::Forward)
    }

    /// Mutable cursor one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T, A> {
        let offset = self.len_as_offset();
        CursorMut::new(self, offset, Direction::Forward)
    }

    /// Mutable reverse cursor at the last element.
    pub fn rbegin_mut(&mut self) -> CursorMut<'_, T, A> {
        let offset = self.len_as_offset() - 1;
        CursorMut::new(self, offset, Direction::Reverse)
    }

    /// Mutable reverse cursor one before the first element.
    pub fn rend_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, -1, Direction::Reverse)
    }

    #[inline(always)]
    fn len_as_offset(&self) -> isize {
        // len <= max_len <= isize::MAX for sized T
        isize::try_from(self.len).unwrap_or(isize::MAX)
    }

    pub(crate) fn into_raw_parts(self) -> (RawStorage<T, A>, usize) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY (PRECONDITIONS ARE MET): `this` is never dropped, so buf is moved out once
        let buf = unsafe { ptr::read(&this.buf) };
        (buf, this.len)
    }
}

/// Drops live elements from the back down to `keep`. Whatever `run` leaves
/// behind because an element's drop panicked is finished when the guard
/// itself is dropped during unwinding.
struct TailDrop<'a, T, A: RawAlloc> {
    array: &'a mut DynamicArray<T, A>,
    keep: usize,
}

impl<T, A: RawAlloc> TailDrop<'_, T, A> {
    fn run(&mut self) {
        while self.array.len > self.keep {
            self.array.len -= 1;
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and is no longer counted
                ptr::drop_in_place(self.array.buf.ptr().add(self.array.len));
            }
        }
    }
}

impl<T, A: RawAlloc> Drop for TailDrop<'_, T, A> {
    fn drop(&mut self) {
        self.run();
    }
}

impl<T, A: RawAlloc> Drop for DynamicArray<T, A> {
    fn drop(&mut self) {
        // Elements first, in reverse order. The block is released by RawStorage.
        self.clear();
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: RawAlloc + Clone> Clone for DynamicArray<T, A> {
    /// Clones the live elements into a block of the same capacity.
    ///
    /// If an element's `clone` panics, the elements cloned so far are dropped
    /// in reverse order and the new block is released before unwinding
    /// continues.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity_in(self.capacity(), self.allocator().clone());
        for value in self.as_slice() {
            // SAFETY (PRECONDITIONS ARE MET): copy.capacity() >= self.len()
            unsafe { copy.write_back(value.clone()) };
        }

        copy
    }

    /// Copy-and-swap: `self` is only replaced once the full copy exists.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T, A: RawAlloc> Deref for DynamicArray<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for DynamicArray<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, U, A: RawAlloc, B: RawAlloc> PartialEq<DynamicArray<U, B>> for DynamicArray<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAlloc> Eq for DynamicArray<T, A> {}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("data", &self.as_slice())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T: fmt::Display, A: RawAlloc> fmt::Display for DynamicArray<T, A> {
    /// Live elements separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.iter();
        if let Some(first) = values.next() {
            fmt::Display::fmt(first, f)?;
        }
        for value in values {
            f.write_str(" ")?;
            fmt::Display::fmt(value, f)?;
        }

        Ok(())
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        for value in values {
            // SAFETY (PRECONDITIONS ARE MET): capacity == N
            unsafe { array.write_back(value) };
        }

        array
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity(iter.size_hint().0);
        array.extend(iter);
        array
    }
}

impl<T, A: RawAlloc> Extend<T> for DynamicArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let wanted = self.len.saturating_add(iter.size_hint().0);
        self.reserve(wanted);

        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a DynamicArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut DynamicArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
