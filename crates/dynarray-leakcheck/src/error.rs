// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynarray-leakcheck.
use thiserror::Error;

use crate::checker::LeakReport;

/// Errors reported by [`crate::LeakChecker::finish`].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LeakError {
    /// Blocks were still outstanding when the checker finished.
    #[error("LeakError: {0}")]
    Leaked(LeakReport),
}

impl LeakError {
    /// The ledger state at the time of the check.
    pub fn report(&self) -> &LeakReport {
        match self {
            Self::Leaked(report) => report,
        }
    }
}
