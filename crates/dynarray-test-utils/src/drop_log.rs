// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Ledger {
    created: Cell<usize>,
    dropped: RefCell<Vec<u32>>,
}

/// Shared record of every [`Tracked`] value created from it and the order in
/// which they were dropped.
#[derive(Debug, Clone, Default)]
pub struct DropLog {
    ledger: Rc<Ledger>,
}

impl DropLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value with the given id, recorded by this log.
    pub fn track(&self, id: u32) -> Tracked {
        self.make(id, false)
    }

    /// Like [`DropLog::track`], but the value panics after recording its drop.
    pub fn track_panicking(&self, id: u32) -> Tracked {
        self.make(id, true)
    }

    fn make(&self, id: u32, panics_on_drop: bool) -> Tracked {
        self.ledger.created.set(self.ledger.created.get() + 1);

        Tracked {
            id,
            panics_on_drop,
            ledger: Rc::clone(&self.ledger),
        }
    }

    /// Ids in drop order.
    pub fn dropped(&self) -> Vec<u32> {
        self.ledger.dropped.borrow().clone()
    }

    /// Number of drops recorded.
    pub fn drop_count(&self) -> usize {
        self.ledger.dropped.borrow().len()
    }

    /// Values created (including clones) and not yet dropped.
    pub fn live(&self) -> usize {
        self.ledger.created.get() - self.drop_count()
    }

    /// Forgets the drops recorded so far.
    pub fn reset_dropped(&self) {
        let forgotten = self.ledger.dropped.take().len();
        self.ledger.created.set(self.ledger.created.get() - forgotten);
    }
}

/// A value that reports its drop to a [`DropLog`]. Clones share the id but
/// never panic on drop.
#[derive(Debug)]
pub struct Tracked {
    id: u32,
    panics_on_drop: bool,
    ledger: Rc<Ledger>,
}

impl Tracked {
    /// The id given at creation.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.created.set(self.ledger.created.get() + 1);

        Self {
            id: self.id,
            panics_on_drop: false,
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.dropped.borrow_mut().push(self.id);

        if self.panics_on_drop {
            panic!("Tracked: drop of {} panicked", self.id);
        }
    }
}
