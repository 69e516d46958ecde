// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;
use core::alloc::Layout;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use dynarray::{AllocError, Global, RawAlloc};

const NEVER_FAIL: usize = usize::MAX;

/// Shared counters behind a checker and all of its handles.
#[derive(Debug)]
pub(crate) struct Ledger {
    pub(crate) allocations: AtomicUsize,
    pub(crate) deallocations: AtomicUsize,
    pub(crate) bytes_allocated: AtomicUsize,
    pub(crate) bytes_released: AtomicUsize,
    pub(crate) refused: AtomicUsize,
    successes_left: AtomicUsize,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self {
            allocations: AtomicUsize::new(0),
            deallocations: AtomicUsize::new(0),
            bytes_allocated: AtomicUsize::new(0),
            bytes_released: AtomicUsize::new(0),
            refused: AtomicUsize::new(0),
            successes_left: AtomicUsize::new(NEVER_FAIL),
        }
    }

    /// Consumes one success from the failure budget, if one is set.
    fn admit(&self) -> bool {
        self.successes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                NEVER_FAIL => Some(NEVER_FAIL),
                0 => None,
                left => Some(left - 1),
            })
            .is_ok()
    }
}

/// Allocation strategy that records every block in its checker's ledger.
///
/// Handles are cheap to clone and all clones share one ledger. Memory itself
/// comes from [`Global`].
#[derive(Debug, Clone)]
pub struct TrackingAlloc {
    ledger: Arc<Ledger>,
}

impl TrackingAlloc {
    pub(crate) fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Lets `n` more allocations succeed, then refuses every later one.
    ///
    /// The budget is shared by all handles of the same checker.
    pub fn fail_after(&self, n: usize) {
        // usize::MAX is reserved for "never"
        self.ledger
            .successes_left
            .store(n.min(NEVER_FAIL - 1), Ordering::SeqCst);
    }

    /// Removes any budget set by [`TrackingAlloc::fail_after`].
    pub fn never_fail(&self) {
        self.ledger.successes_left.store(NEVER_FAIL, Ordering::SeqCst);
    }
}

// SAFETY: blocks come from Global unchanged; the ledger only observes them
unsafe impl RawAlloc for TrackingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if !self.ledger.admit() {
            self.ledger.refused.fetch_add(1, Ordering::SeqCst);
            return Err(AllocError);
        }

        let ptr = Global.allocate(layout)?;
        self.ledger.allocations.fetch_add(1, Ordering::SeqCst);
        self.ledger
            .bytes_allocated
            .fetch_add(layout.size(), Ordering::SeqCst);

        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.ledger.deallocations.fetch_add(1, Ordering::SeqCst);
        self.ledger
            .bytes_released
            .fetch_add(layout.size(), Ordering::SeqCst);

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller's contract
            Global.deallocate(ptr, layout);
        }
    }
}
