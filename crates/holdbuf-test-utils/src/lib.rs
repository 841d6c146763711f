// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for holdbuf crates.
//!
//! ## License
//!
//! GPL-3.0-only

mod counting_allocator;
mod permutations;

pub use counting_allocator::{AllocStats, CountingAllocator};
pub use permutations::{apply_permutation, index_permutations};
