// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::rc::Rc;

/// A value whose `clone` panics once a shared budget of clones is spent.
///
/// All clones share the budget of the value they came from. Live instances
/// are counted so tests can check that nothing leaks across the panic.
#[derive(Debug)]
pub struct CloneBomb {
    value: u32,
    budget: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
}

impl CloneBomb {
    /// Creates a value that allows `budget` clones before panicking.
    pub fn new(value: u32, budget: usize) -> Self {
        Self::with_counters(value, Rc::new(Cell::new(budget)), Rc::new(Cell::new(0)))
    }

    fn with_counters(value: u32, budget: Rc<Cell<usize>>, live: Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self {
            value,
            budget,
            live,
        }
    }

    /// Creates a sibling sharing this value's budget and live count.
    pub fn sibling(&self, value: u32) -> Self {
        Self::with_counters(value, Rc::clone(&self.budget), Rc::clone(&self.live))
    }

    /// The payload this instance was created with.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Instances sharing this value's counters that are still alive.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Resets the remaining clone budget.
    pub fn arm(&self, budget: usize) {
        self.budget.set(budget);
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let remaining = self.budget.get();
        if remaining == 0 {
            panic!("CloneBomb: clone budget exhausted");
        }
        self.budget.set(remaining - 1);

        self.sibling(self.value)
    }
}

impl Drop for CloneBomb {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
