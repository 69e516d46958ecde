// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Random-access cursors over a [`DynamicArray`].
//!
//! A cursor is an index wrapper, not an address wrapper: it holds a
//! back-reference to its array and a signed offset, and resolves the element
//! through the array on every access. Reverse cursors walk the same range
//! backwards; all arithmetic and ordering is expressed in their direction.
//!
//! Equality and ordering compare the direction first, then the position in
//! that direction: cursors of different directions are never equal, and
//! forward cursors order before reverse ones. Comparing cursors of different
//! arrays compares their positions only.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign};

use crate::dynamic_array::DynamicArray;
use crate::raw_alloc::{Global, RawAlloc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    #[inline(always)]
    fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// Maps a signed offset to a slice index. Negative offsets map to an index
/// no slice can hold, so indexing panics instead of wrapping.
#[inline(always)]
fn to_index(offset: isize) -> usize {
    usize::try_from(offset).unwrap_or(usize::MAX)
}

/// Read-only random-access cursor.
///
/// # Example
///
/// ```rust
/// use dynarray::DynamicArray;
///
/// let array = DynamicArray::from_elem(20, 9);
/// let mut it = array.begin();
/// while it != array.end() {
///     assert_eq!(*it, 9);
///     it.inc();
/// }
///
/// assert_eq!(array.end() - array.begin(), 20);
/// ```
pub struct Cursor<'a, T, A: RawAlloc = Global> {
    array: &'a DynamicArray<T, A>,
    offset: isize,
    direction: Direction,
}

impl<'a, T, A: RawAlloc> Cursor<'a, T, A> {
    pub(crate) fn new(array: &'a DynamicArray<T, A>, offset: isize, direction: Direction) -> Self {
        Self {
            array,
            offset,
            direction,
        }
    }

    /// Index of the designated element in the array.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Returns `true` for cursors created by `rbegin()`/`rend()`.
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.direction == Direction::Reverse
    }

    /// Returns `true` once the cursor has walked past the last element in its
    /// direction.
    pub fn is_end(&self) -> bool {
        match self.direction {
            Direction::Forward => to_index(self.offset) >= self.array.len(),
            Direction::Reverse => self.offset < 0,
        }
    }

    /// The designated element, or `None` when out of range.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.array.get(to_index(self.offset))
    }

    /// Pre-increment.
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        *self += 1;
        self
    }

    /// Pre-decrement.
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        *self -= 1;
        self
    }

    /// Post-increment: advances and returns the previous position.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let previous = *self;
        *self += 1;
        previous
    }

    /// Post-decrement: steps back and returns the previous position.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let previous = *self;
        *self -= 1;
        previous
    }

    #[inline(always)]
    fn shifted(&self, n: isize) -> isize {
        self.offset + n * self.direction.step()
    }

    #[inline(always)]
    fn position(&self) -> isize {
        self.offset * self.direction.step()
    }

    #[inline(always)]
    fn key(&self) -> (Direction, isize) {
        (self.direction, self.position())
    }
}

impl<T, A: RawAlloc> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: RawAlloc> Copy for Cursor<'_, T, A> {}

impl<T, A: RawAlloc> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl<T, A: RawAlloc> Deref for Cursor<'_, T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.array[to_index(self.offset)]
    }
}

impl<T, A: RawAlloc> Index<isize> for Cursor<'_, T, A> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        &self.array[to_index(self.shifted(n))]
    }
}

impl<T, A: RawAlloc> AddAssign<isize> for Cursor<'_, T, A> {
    fn add_assign(&mut self, n: isize) {
        self.offset = self.shifted(n);
    }
}

impl<T, A: RawAlloc> SubAssign<isize> for Cursor<'_, T, A> {
    fn sub_assign(&mut self, n: isize) {
        self.offset = self.shifted(-n);
    }
}

impl<T, A: RawAlloc> Add<isize> for Cursor<'_, T, A> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T, A: RawAlloc> Sub<isize> for Cursor<'_, T, A> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T, A: RawAlloc> Sub for Cursor<'_, T, A> {
    type Output = isize;

    /// Signed distance from `other` to `self`.
    fn sub(self, other: Self) -> isize {
        self.position() - other.position()
    }
}

impl<T, A: RawAlloc> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T, A: RawAlloc> Eq for Cursor<'_, T, A> {}

impl<T, A: RawAlloc> PartialOrd for Cursor<'_, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, A: RawAlloc> Ord for Cursor<'_, T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Random-access cursor with write access to the designated element.
///
/// Holds the array's unique borrow, so only one mutable cursor exists per
/// array at a time. Use [`CursorMut::is_end`] where a read-only cursor would
/// compare against `end()`.
///
/// # Example
///
/// ```rust
/// use dynarray::DynamicArray;
///
/// let mut array = DynamicArray::from_slice(&[1, 2, 3]);
/// let mut it = array.rbegin_mut();
/// while !it.is_end() {
///     *it *= 10;
///     it.inc();
/// }
///
/// assert_eq!(array.as_slice(), &[10, 20, 30]);
/// ```
pub struct CursorMut<'a, T, A: RawAlloc = Global> {
    array: &'a mut DynamicArray<T, A>,
    offset: isize,
    direction: Direction,
}

impl<'a, T, A: RawAlloc> CursorMut<'a, T, A> {
    pub(crate) fn new(
        array: &'a mut DynamicArray<T, A>,
        offset: isize,
        direction: Direction,
    ) -> Self {
        Self {
            array,
            offset,
            direction,
        }
    }

    /// Index of the designated element in the array.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Returns `true` for cursors created by `rbegin_mut()`/`rend_mut()`.
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.direction == Direction::Reverse
    }

    /// Returns `true` once the cursor has walked past the last element in its
    /// direction.
    pub fn is_end(&self) -> bool {
        self.as_cursor().is_end()
    }

    /// Read-only view at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self.array, self.offset, self.direction)
    }

    /// The designated element, or `None` when out of range.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.array.get(to_index(self.offset))
    }

    /// The designated element mutably, or `None` when out of range.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.array.get_mut(to_index(self.offset))
    }

    /// Pre-increment.
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        *self += 1;
        self
    }

    /// Pre-decrement.
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        *self -= 1;
        self
    }

    /// Post-increment. The cursor cannot be duplicated, so the previous
    /// offset is returned instead of the previous cursor.
    #[inline]
    pub fn post_inc(&mut self) -> isize {
        let previous = self.offset;
        *self += 1;
        previous
    }

    /// Post-decrement, returning the previous offset.
    #[inline]
    pub fn post_dec(&mut self) -> isize {
        let previous = self.offset;
        *self -= 1;
        previous
    }

    #[inline(always)]
    fn shifted(&self, n: isize) -> isize {
        self.offset + n * self.direction.step()
    }

    #[inline(always)]
    fn position(&self) -> isize {
        self.offset * self.direction.step()
    }

    #[inline(always)]
    fn key(&self) -> (Direction, isize) {
        (self.direction, self.position())
    }
}

impl<T, A: RawAlloc> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("offset", &self.offset)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl<T, A: RawAlloc> Deref for CursorMut<'_, T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.array[to_index(self.offset)]
    }
}

impl<T, A: RawAlloc> DerefMut for CursorMut<'_, T, A> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.array[to_index(self.offset)]
    }
}

impl<T, A: RawAlloc> Index<isize> for CursorMut<'_, T, A> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        &self.array[to_index(self.shifted(n))]
    }
}

impl<T, A: RawAlloc> IndexMut<isize> for CursorMut<'_, T, A> {
    fn index_mut(&mut self, n: isize) -> &mut T {
        let index = to_index(self.shifted(n));
        &mut self.array[index]
    }
}

impl<T, A: RawAlloc> AddAssign<isize> for CursorMut<'_, T, A> {
    fn add_assign(&mut self, n: isize) {
        self.offset = self.shifted(n);
    }
}

impl<T, A: RawAlloc> SubAssign<isize> for CursorMut<'_, T, A> {
    fn sub_assign(&mut self, n: isize) {
        self.offset = self.shifted(-n);
    }
}

impl<T, A: RawAlloc> Add<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T, A: RawAlloc> Sub<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T, A: RawAlloc> Sub for &CursorMut<'_, T, A> {
    type Output = isize;

    /// Signed distance from `other` to `self`.
    fn sub(self, other: Self) -> isize {
        self.position() - other.position()
    }
}

impl<T, A: RawAlloc> PartialEq for CursorMut<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T, A: RawAlloc> Eq for CursorMut<'_, T, A> {}

impl<T, A: RawAlloc> PartialOrd for CursorMut<'_, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, A: RawAlloc> Ord for CursorMut<'_, T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
