// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Handle configuration.

/// Storage backend used by a [`BufferHandle`](crate::BufferHandle).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Backend {
    /// One heap allocation. Available everywhere.
    #[default]
    Portable,
    /// Anonymous mmap'd pages, optionally mlock'd. Unix only.
    Page {
        /// Lock the pages in RAM.
        locked: bool,
    },
    /// Unlocked pages where available, heap allocation otherwise or when the
    /// mapping cannot be created.
    Auto,
}

/// Options applied when creating a handle.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HandleConfig {
    backend: Backend,
}

impl HandleConfig {
    /// Default configuration: portable backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the storage backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Returns the configured backend.
    pub fn backend(&self) -> Backend {
        self.backend
    }
}
