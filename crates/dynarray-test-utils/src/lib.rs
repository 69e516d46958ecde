// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for dynarray crates.
//!
//! Element types that record their own lifecycle, so container tests can
//! assert on drop order, leaked values and panicking clones.
//!
//! ## License
//!
//! GPL-3.0-only

mod clone_bomb;
mod drop_log;

pub use clone_bomb::CloneBomb;
pub use drop_log::{DropLog, Tracked};
