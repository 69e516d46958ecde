// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

use dynarray_test_utils::{CloneBomb, DropLog, Tracked};

use crate::{DEFAULT_CAPACITY, DynamicArray};

// =============================================================================
// new(), with_capacity()
// =============================================================================

#[test]
fn test_new() {
    let array: DynamicArray<u32> = DynamicArray::new();

    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), DEFAULT_CAPACITY);
    assert!(array.is_empty());
}

#[test]
fn test_default_matches_new() {
    let array: DynamicArray<u32> = DynamicArray::default();

    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 64);
}

#[test]
fn test_with_capacity() {
    let array: DynamicArray<String> = DynamicArray::with_capacity(10);

    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 10);
}

#[test]
fn test_with_capacity_zero() {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(0);
    assert_eq!(array.capacity(), 0);

    array.push_back(1);
    assert_eq!(array.capacity(), 1);
    assert_eq!(array.as_slice(), &[1]);
}

// =============================================================================
// from_elem()
// =============================================================================

#[test]
fn test_from_elem_fills_every_slot() {
    let array = DynamicArray::from_elem(2, String::from("hello"));

    assert_eq!(array.len(), 2);
    assert_eq!(array.capacity(), 2);
    assert_eq!(array[0], "hello");
    assert_eq!(array[1], "hello");
}

#[test]
fn test_from_elem_zero_capacity_drops_value() {
    let log = DropLog::new();
    let array = DynamicArray::from_elem(0, log.track(1));

    assert!(array.is_empty());
    assert_eq!(log.live(), 0);
}

#[test]
fn test_from_elem_struct() {
    #[derive(Debug, Clone, PartialEq)]
    struct MyStruct {
        i: i32,
    }

    let array = DynamicArray::from_elem(8, MyStruct { i: 354 });

    assert_eq!(array.len(), 8);
    assert_eq!(array.capacity(), 8);
    assert!(array.iter().all(|s| s.i == 354));
}

// =============================================================================
// from_slice(), From, FromIterator
// =============================================================================

#[test]
fn test_from_slice_round_trip() {
    let src = [5, 4, 3, 2, 1];
    let array = DynamicArray::from_slice(&src);

    assert_eq!(array.len(), src.len());
    assert_eq!(array.capacity(), src.len());
    assert_eq!(array.iter().copied().collect::<Vec<_>>(), src);
}

#[test]
fn test_from_array_moves_values() {
    let log = DropLog::new();
    let array = DynamicArray::from([log.track(1), log.track(2)]);

    assert_eq!(array.len(), 2);
    assert_eq!(log.live(), 2);
    assert_eq!(log.drop_count(), 0);
}

#[test]
fn test_from_iterator() {
    let array: DynamicArray<u32> = (0..10).collect();

    assert_eq!(array.len(), 10);
    assert_eq!(array.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_extend_appends_in_order() {
    let mut array = DynamicArray::with_capacity(1);
    array.push_back(1);
    array.extend([2, 3, 4]);

    assert_eq!(array.as_slice(), &[1, 2, 3, 4]);
    assert!(array.len() <= array.capacity());
}

// =============================================================================
// push_back()
// =============================================================================

#[test]
fn test_push_back_doubles_capacity() {
    let mut array = DynamicArray::with_capacity(2);
    let mut capacities = Vec::new();

    for value in [100, 784, 7, 8, 84, 40] {
        array.push_back(value);
        capacities.push(array.capacity());
    }

    assert_eq!(capacities, [2, 2, 4, 4, 8, 8]);
    assert_eq!(array.len(), 6);
    assert_eq!(array.as_slice(), &[100, 784, 7, 8, 84, 40]);
}

#[test]
fn test_push_back_on_default() {
    let mut array = DynamicArray::new();
    array.push_back(100);
    array.push_back(101);
    array.push_back(101);

    assert_eq!(array[0], 100);
    assert_eq!(array[1], 101);
    assert_eq!(array.len(), 3);
}

#[test]
fn test_push_back_growth_preserves_values() {
    let mut array = DynamicArray::with_capacity(4);
    for i in 0..4 {
        array.push_back(i.to_string());
    }
    assert_eq!(array.len(), array.capacity());

    array.push_back(String::from("4"));

    assert_eq!(array.capacity(), 8);
    assert_eq!(array.len(), 5);
    assert_eq!(array.as_slice(), &["0", "1", "2", "3", "4"]);
}

#[test]
fn test_push_back_many() {
    let mut array = DynamicArray::with_capacity(2);
    for i in 0..1000 {
        array.push_back(i);
    }

    assert_eq!(array.len(), 1000);
    assert_eq!(array.capacity(), 1024);
    assert!(array.iter().enumerate().all(|(i, v)| i == *v));
}

#[test]
fn test_push_back_zero_sized() {
    let mut array = DynamicArray::with_capacity(0);
    for _ in 0..5 {
        array.push_back(());
    }

    assert_eq!(array.len(), 5);
    assert_eq!(array.capacity(), 8);
    assert_eq!(array.pop_back(), Some(()));
}

// =============================================================================
// emplace_back_with()
// =============================================================================

#[test]
fn test_emplace_back_with() {
    #[derive(Debug, PartialEq)]
    struct Complex {
        re: f32,
        im: f32,
    }

    let mut array = DynamicArray::with_capacity(1);
    array.emplace_back_with(|| Complex { re: 543.87, im: 890.341 });
    let second = array.emplace_back_with(|| Complex { re: 54.5, im: 98.25 });
    second.re += 1.0;

    assert_eq!(array.len(), 2);
    assert_eq!(array.capacity(), 2);
    assert_eq!(array[0], Complex { re: 543.87, im: 890.341 });
    assert_eq!(array[1], Complex { re: 55.5, im: 98.25 });
}

#[test]
fn test_emplace_back_with_panicking_constructor_keeps_len() {
    let mut array = DynamicArray::from_slice(&[1u32, 2]);

    let result = catch_unwind(AssertUnwindSafe(|| {
        array.emplace_back_with(|| panic!("constructor failed"));
    }));

    assert!(result.is_err());
    assert_eq!(array.as_slice(), &[1, 2]);
    assert_eq!(array.capacity(), 4);
}

// =============================================================================
// pop_back()
// =============================================================================

#[test]
fn test_pop_back() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);

    assert_eq!(array.pop_back(), Some(3));
    assert_eq!(array.pop_back(), Some(2));
    assert_eq!(array.len(), 1);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn test_pop_back_empty() {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(4);

    assert_eq!(array.pop_back(), None);
    assert_eq!(array.len(), 0);
}

#[test]
fn test_pop_back_drops_when_discarded() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1), log.track(2)]);

    array.pop_back();

    assert_eq!(log.dropped(), [2]);
    assert_eq!(array.len(), 1);
}

// =============================================================================
// clear(), truncate()
// =============================================================================

#[test]
fn test_clear_drops_in_reverse_order() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1), log.track(2), log.track(3)]);

    array.clear();

    assert_eq!(log.dropped(), [3, 2, 1]);
    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 3);
}

#[test]
fn test_clear_trivial_type_keeps_capacity() {
    let mut array = DynamicArray::from_elem(16, 7u64);

    array.clear();

    assert!(array.is_empty());
    assert_eq!(array.capacity(), 16);
}

#[test]
fn test_truncate() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1), log.track(2), log.track(3)]);

    array.truncate(5);
    assert_eq!(array.len(), 3);

    array.truncate(1);
    assert_eq!(log.dropped(), [3, 2]);
    assert_eq!(array.len(), 1);
}

#[test]
fn test_drop_releases_everything_in_reverse_order() {
    let log = DropLog::new();
    {
        let mut array = DynamicArray::with_capacity(1);
        for id in 0..5 {
            array.push_back(log.track(id));
        }
    }

    assert_eq!(log.dropped(), [4, 3, 2, 1, 0]);
    assert_eq!(log.live(), 0);
}

#[test]
fn test_drop_continues_past_panicking_element() {
    let log = DropLog::new();
    let array = DynamicArray::from([
        log.track(0),
        log.track(1),
        log.track_panicking(2),
        log.track(3),
        log.track(4),
    ]);

    let result = catch_unwind(AssertUnwindSafe(|| drop(array)));

    assert!(result.is_err());
    assert_eq!(log.dropped(), [4, 3, 2, 1, 0]);
    assert_eq!(log.live(), 0);
}

#[test]
fn test_truncate_continues_past_panicking_element() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([
        log.track(0),
        log.track_panicking(1),
        log.track(2),
        log.track(3),
    ]);

    let result = catch_unwind(AssertUnwindSafe(|| array.truncate(1)));

    assert!(result.is_err());
    assert_eq!(log.dropped(), [3, 2, 1]);
    assert_eq!(array.len(), 1);
    assert_eq!(array[0].id(), 0);
}

// =============================================================================
// resize(), reserve(), shrink_to_fit()
// =============================================================================

#[test]
fn test_resize_down_truncates() {
    let mut array = DynamicArray::from_elem(2, String::from("hello"));

    array.resize(1);

    assert_eq!(array.len(), 1);
    assert_eq!(array.capacity(), 1);
    assert_eq!(array[0], "hello");
}

#[test]
fn test_resize_down_drops_discarded_tail() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1), log.track(2), log.track(3), log.track(4)]);

    array.resize(2);

    assert_eq!(log.dropped(), [4, 3]);
    assert_eq!(array.iter().map(Tracked::id).collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn test_resize_up_preserves_values() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);

    array.resize(10);

    assert_eq!(array.capacity(), 10);
    assert_eq!(array.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_resize_to_len_is_noop() {
    let mut array = DynamicArray::with_capacity(8);
    array.push_back(1);
    array.push_back(2);
    let before = array.as_ptr();

    array.resize(2);

    assert_eq!(array.capacity(), 8);
    assert_eq!(array.as_ptr(), before);
    assert_eq!(array.as_slice(), &[1, 2]);
}

#[test]
fn test_resize_empty_to_zero_keeps_block() {
    let mut array: DynamicArray<u32> = DynamicArray::new();

    array.resize(0);

    assert_eq!(array.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_resize_to_current_capacity_rebuilds() {
    let mut array = DynamicArray::with_capacity(4);
    array.push_back(1);

    array.resize(4);

    assert_eq!(array.capacity(), 4);
    assert_eq!(array.as_slice(), &[1]);
}

#[test]
fn test_resize_to_zero() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1)]);

    array.resize(0);

    assert_eq!(array.capacity(), 0);
    assert!(array.is_empty());
    assert_eq!(log.live(), 0);
}

#[test]
fn test_resize_does_not_clone_or_drop_kept_elements() {
    let log = DropLog::new();
    let mut array = DynamicArray::from([log.track(1), log.track(2)]);

    array.resize(8);

    assert_eq!(log.drop_count(), 0);
    assert_eq!(log.live(), 2);
}

#[test]
fn test_reserve_grows_exactly() {
    let mut array = DynamicArray::with_capacity(2);
    array.push_back(5437);

    array.reserve(64);

    assert_eq!(array.capacity(), 64);
    assert_eq!(array[0], 5437);
}

#[test]
fn test_reserve_never_shrinks() {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(16);

    array.reserve(4);

    assert_eq!(array.capacity(), 16);
}

#[test]
fn test_shrink_to_fit() {
    let mut array = DynamicArray::new();
    array.push_back(1);
    array.push_back(2);

    array.shrink_to_fit();

    assert_eq!(array.capacity(), 2);
    assert_eq!(array.as_slice(), &[1, 2]);
}

#[test]
fn test_shrink_to_fit_when_already_tight() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);
    let before = array.as_ptr();

    array.shrink_to_fit();

    assert_eq!(array.capacity(), 3);
    assert_eq!(array.as_ptr(), before);
}

#[test]
fn test_shrink_to_fit_empty_releases_block() {
    let mut array: DynamicArray<u32> = DynamicArray::new();

    array.shrink_to_fit();

    assert_eq!(array.capacity(), 0);
}

// =============================================================================
// Clone
// =============================================================================

#[test]
fn test_clone_copies_live_elements_and_capacity() {
    let mut array = DynamicArray::with_capacity(8);
    array.push_back(String::from("a"));
    array.push_back(String::from("b"));

    let copy = array.clone();

    assert_eq!(copy.len(), 2);
    assert_eq!(copy.capacity(), 8);
    assert_eq!(copy, array);
    assert!(!copy.shares_storage_with(&array));
}

#[test]
fn test_clone_is_independent() {
    let mut a = DynamicArray::from_elem(1, String::from("hello"));
    let mut b = a.clone();

    *a.at_mut(0).unwrap() = String::from("test");
    *b.at_mut(0).unwrap() = String::from("helloflower");

    assert_ne!(a[0], b[0]);
    assert_eq!(a[0], "test");
    assert_eq!(b[0], "helloflower");
}

#[test]
fn test_clone_panic_drops_partial_copy() {
    let bomb = CloneBomb::new(0, 0);
    let mut array = DynamicArray::with_capacity(4);
    array.push_back(bomb.sibling(1));
    array.push_back(bomb.sibling(2));
    array.push_back(bomb.sibling(3));
    assert_eq!(bomb.live(), 4);

    // Two clones succeed, the third panics
    bomb.arm(2);
    let result = catch_unwind(AssertUnwindSafe(|| array.clone()));

    assert!(result.is_err());
    assert_eq!(bomb.live(), 4);
    assert_eq!(array.len(), 3);
    assert_eq!(array.iter().map(CloneBomb::value).collect::<Vec<_>>(), [1, 2, 3]);
}

// =============================================================================
// clone_from(), assign_copy()
// =============================================================================

#[test]
fn test_clone_from_replaces_contents() {
    let source = DynamicArray::from_slice(&[String::from("x"), String::from("y")]);
    let mut target = DynamicArray::from_elem(5, String::from("old"));

    target.clone_from(&source);

    assert_eq!(target, source);
    assert_eq!(target.capacity(), source.capacity());
}

#[test]
fn test_clone_from_panic_leaves_target_untouched() {
    let bomb = CloneBomb::new(0, 0);
    let mut source = DynamicArray::with_capacity(2);
    source.push_back(bomb.sibling(1));
    source.push_back(bomb.sibling(2));

    let mut target = DynamicArray::with_capacity(1);
    target.push_back(bomb.sibling(9));

    bomb.arm(1);
    let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

    assert!(result.is_err());
    assert_eq!(target.len(), 1);
    assert_eq!(target[0].value(), 9);
    assert_eq!(bomb.live(), 4);
}

#[test]
fn test_assign_copy_reuses_block() {
    let source = DynamicArray::from_slice(&[1, 2, 3]);
    let mut target = DynamicArray::from_elem(8, 0);
    let block = target.as_ptr();

    target.assign_copy(&source);

    assert_eq!(target.as_slice(), &[1, 2, 3]);
    assert_eq!(target.capacity(), 8);
    assert_eq!(target.as_ptr(), block);
}

#[test]
fn test_assign_copy_grows_when_too_small() {
    let source = DynamicArray::from_elem(20, 9);
    let mut target = DynamicArray::from_slice(&[1]);

    target.assign_copy(&source);

    assert_eq!(target, source);
    assert_eq!(target.capacity(), 20);
}

// =============================================================================
// take(), swap()
// =============================================================================

#[test]
fn test_take_empties_source() {
    let mut a = DynamicArray::from_elem(20, 9);

    let b = a.take();

    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 0);
    assert_eq!(b.len(), 20);
    assert!(b.iter().all(|v| *v == 9));
}

#[test]
fn test_taken_from_array_is_reusable() {
    let mut a = DynamicArray::from_slice(&[1, 2]);
    let _b = a.take();

    a.push_back(3);

    assert_eq!(a.as_slice(), &[3]);
    assert_eq!(a.capacity(), 1);
}

#[test]
fn test_swap() {
    let mut a = DynamicArray::from_slice(&[1, 2, 3]);
    let mut b = DynamicArray::with_capacity(10);
    b.push_back(7);

    a.swap(&mut b);

    assert_eq!(a.as_slice(), &[7]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(b.as_slice(), &[1, 2, 3]);
    assert_eq!(b.capacity(), 3);
}

#[test]
fn test_move_assign_by_swap_hands_old_storage_to_source() {
    let log = DropLog::new();
    let mut target = DynamicArray::from([log.track(1)]);
    let mut source = DynamicArray::from([log.track(2)]);

    target.swap(&mut source);
    assert_eq!(log.drop_count(), 0);

    drop(source);
    assert_eq!(log.dropped(), [1]);
    assert_eq!(target[0].id(), 2);
}

// =============================================================================
// at(), at_mut(), slot()
// =============================================================================

#[test]
fn test_at_in_range() {
    let array = DynamicArray::from_slice(&[10, 20]);

    assert_eq!(array.at(1), Ok(&20));
}

#[test]
fn test_at_past_len_fails() {
    let mut array = DynamicArray::with_capacity(4);
    array.push_back(1);

    let err = array.at(1).unwrap_err();

    assert!(err.what().starts_with("Array out of bounds exception."));
    assert_eq!(err.context(), "DynamicArray::at");
    assert!(err.file().ends_with("dynamic_array.rs"));
}

#[test]
fn test_at_mut_past_len_fails() {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(4);

    let err = array.at_mut(0).unwrap_err();

    assert_eq!(err.context(), "DynamicArray::at_mut");
}

#[test]
fn test_at_reports_caller_line() {
    let array: DynamicArray<u8> = DynamicArray::with_capacity(1);

    let line = line!() + 1;
    let err = array.at(3).unwrap_err();

    assert_eq!(err.line(), line);
}

#[test]
fn test_slot_checks_capacity_not_len() {
    let mut array = DynamicArray::with_capacity(4);
    array.push_back(11u32);

    // Live slot
    assert_eq!(unsafe { array.slot(0).unwrap().assume_init_read() }, 11);
    // Allocated but uninitialized slots are reachable
    assert!(array.slot(1).is_ok());
    assert!(array.slot(3).is_ok());
    // Past capacity
    assert!(array.slot(4).is_err());
}

#[test]
fn test_spare_capacity_and_set_len() {
    let mut array = DynamicArray::with_capacity(4);
    array.push_back(1u32);

    let spare = array.spare_capacity_mut();
    assert_eq!(spare.len(), 3);
    spare[0].write(2);
    spare[1].write(3);
    unsafe { array.set_len(3) };

    assert_eq!(array.as_slice(), &[1, 2, 3]);
}

// =============================================================================
// front(), back(), index
// =============================================================================

#[test]
fn test_front_back() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);

    assert_eq!(array.front(), Some(&1));
    assert_eq!(array.back(), Some(&3));

    *array.front_mut().unwrap() = 10;
    *array.back_mut().unwrap() = 30;
    assert_eq!(array.as_slice(), &[10, 2, 30]);
}

#[test]
fn test_front_back_empty() {
    let array: DynamicArray<u8> = DynamicArray::new();

    assert_eq!(array.front(), None);
    assert_eq!(array.back(), None);
}

#[test]
#[should_panic]
fn test_index_past_len_panics() {
    let array: DynamicArray<u8> = DynamicArray::with_capacity(4);
    let _ = array[0];
}

#[test]
fn test_index_mut() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);
    array[1] = 20;

    assert_eq!(array.as_slice(), &[1, 20, 3]);
    assert_eq!(unsafe { *array.get_unchecked(1) }, 20);
}

// =============================================================================
// is_full(), max_len()
// =============================================================================

#[test]
fn test_is_full_only_at_max_len() {
    let array = DynamicArray::from_elem(4, 0u64);

    assert_eq!(array.len(), array.capacity());
    assert!(!array.is_full());
    assert_eq!(array.max_len(), isize::MAX as usize / 8);
}

// =============================================================================
// shares_storage_with(), PartialEq
// =============================================================================

#[test]
fn test_shares_storage_is_identity_not_value() {
    let a = DynamicArray::from_elem(20, 9);
    let b = a.clone();

    assert!(a.shares_storage_with(&a));
    assert!(!a.shares_storage_with(&b));
    assert_eq!(a, b);
}

#[test]
fn test_shares_storage_without_block() {
    let mut a = DynamicArray::from_slice(&[1]);
    let _taken = a.take();
    let mut b = DynamicArray::from_slice(&[2]);
    let _taken = b.take();

    assert!(a.shares_storage_with(&a));
    assert!(!a.shares_storage_with(&b));
}

#[test]
fn test_value_equality_ignores_capacity() {
    let mut a = DynamicArray::with_capacity(2);
    a.push_back(1);
    let b = DynamicArray::from_slice(&[1]);

    assert_eq!(a, b);
    assert_ne!(a, DynamicArray::from_slice(&[2]));
}

// =============================================================================
// Display, Debug
// =============================================================================

#[test]
fn test_display_separates_with_spaces() {
    let array = DynamicArray::from_slice(&[100, 784, 7]);

    assert_eq!(array.to_string(), "100 784 7");
    assert_eq!(DynamicArray::<u8>::new().to_string(), "");
}

#[test]
fn test_debug() {
    let mut array = DynamicArray::with_capacity(3);
    array.push_back(1);

    assert_eq!(
        std::format!("{array:?}"),
        "DynamicArray { data: [1], len: 1, capacity: 3 }"
    );
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn test_iter_and_iter_mut() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]);
    for value in &mut array {
        *value *= 2;
    }

    let collected: Vec<_> = (&array).into_iter().copied().collect();
    assert_eq!(collected, [2, 4, 6]);
    assert_eq!(array.iter().rev().copied().collect::<Vec<_>>(), [6, 4, 2]);
}
