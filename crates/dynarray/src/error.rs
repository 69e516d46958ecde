// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynarray.

use alloc::format;
use alloc::string::String;

use thiserror::Error;

/// Error returned by checked element access when the index is out of range.
///
/// All parts are formatted into a single message when the error is built.
/// The error is never mutated afterwards.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{formatted}")]
pub struct BoundsError {
    formatted: String,
    file: &'static str,
    context: &'static str,
    line: u32,
}

impl BoundsError {
    /// Creates an error from a message and the location that raised it.
    pub fn new(message: &str, file: &'static str, context: &'static str, line: u32) -> Self {
        Self {
            formatted: format!("{message} {file} !{context} @line:#{line}"),
            file,
            context,
            line,
        }
    }

    /// Creates an error located at the caller of the function raising it.
    #[track_caller]
    pub fn here(message: &str, context: &'static str) -> Self {
        let location = core::panic::Location::caller();
        Self::new(message, location.file(), context, location.line())
    }

    /// Returns the formatted message.
    pub fn what(&self) -> &str {
        &self.formatted
    }

    /// Source file that raised the error.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Name of the operation that raised the error.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Line that raised the error.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Error returned by [`DynamicArray::try_reserve`](crate::DynamicArray::try_reserve).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ReserveError {
    /// The requested capacity does not fit in `isize::MAX` bytes.
    #[error("Capacity overflow: requested capacity exceeds isize::MAX bytes")]
    CapacityOverflow,

    /// The allocation strategy could not provide the block.
    #[error("Allocation failed: {bytes} bytes (align {align})")]
    AllocFailed {
        /// Size of the rejected request in bytes.
        bytes: usize,
        /// Alignment of the rejected request.
        align: usize,
    },
}
