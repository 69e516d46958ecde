// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::Ordering;

use crate::error::LeakError;
use crate::tracking_alloc::{Ledger, TrackingAlloc};

/// Owns a ledger and hands out [`TrackingAlloc`] handles that write to it.
#[derive(Debug)]
pub struct LeakChecker {
    ledger: Arc<Ledger>,
}

impl LeakChecker {
    /// Creates a checker with an empty ledger.
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Ledger::new()),
        }
    }

    /// A new handle recording into this checker's ledger.
    pub fn allocator(&self) -> TrackingAlloc {
        TrackingAlloc::new(Arc::clone(&self.ledger))
    }

    /// Snapshot of the ledger.
    pub fn report(&self) -> LeakReport {
        let ledger = &self.ledger;
        LeakReport {
            allocations: ledger.allocations.load(Ordering::SeqCst),
            deallocations: ledger.deallocations.load(Ordering::SeqCst),
            bytes_allocated: ledger.bytes_allocated.load(Ordering::SeqCst),
            bytes_released: ledger.bytes_released.load(Ordering::SeqCst),
            refused: ledger.refused.load(Ordering::SeqCst),
        }
    }

    /// Ends the check.
    ///
    /// # Errors
    ///
    /// Returns [`LeakError::Leaked`] if any block allocated through this
    /// checker's handles has not been released.
    pub fn finish(self) -> Result<LeakReport, LeakError> {
        let report = self.report();
        if report.is_clean() {
            Ok(report)
        } else {
            Err(LeakError::Leaked(report))
        }
    }
}

impl Default for LeakChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ledger counters at one point in time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LeakReport {
    allocations: usize,
    deallocations: usize,
    bytes_allocated: usize,
    bytes_released: usize,
    refused: usize,
}

impl LeakReport {
    /// Blocks handed out so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Blocks released so far.
    pub fn deallocations(&self) -> usize {
        self.deallocations
    }

    /// Bytes handed out so far.
    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated
    }

    /// Allocation requests refused by failure injection.
    pub fn refused(&self) -> usize {
        self.refused
    }

    /// Blocks not yet released.
    pub fn outstanding_allocations(&self) -> usize {
        self.allocations.saturating_sub(self.deallocations)
    }

    /// Bytes not yet released.
    pub fn outstanding_bytes(&self) -> usize {
        self.bytes_allocated.saturating_sub(self.bytes_released)
    }

    /// Every block and byte handed out was released, and nothing was
    /// released twice.
    pub fn is_clean(&self) -> bool {
        self.allocations == self.deallocations && self.bytes_allocated == self.bytes_released
    }
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(
                f,
                "no leaks ({} allocations, {} bytes)",
                self.allocations, self.bytes_allocated
            );
        }

        write!(
            f,
            "leaking: {} of {} allocations outstanding ({} of {} bytes)",
            self.outstanding_allocations(),
            self.allocations,
            self.outstanding_bytes(),
            self.bytes_allocated
        )?;

        if self.deallocations > self.allocations {
            write!(
                f,
                ", {} more releases than allocations",
                self.deallocations - self.allocations
            )?;
        }

        Ok(())
    }
}
