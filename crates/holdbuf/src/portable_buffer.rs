// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PortableBuffer - Standard heap allocation buffer
//!
//! Works everywhere, no special memory protection.
//! Used as the default backend and as fallback when pages are not available.

use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::BufferError;
use crate::traits::Buffer;

/// A heap buffer backed by exactly one allocation of its length.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PortableBuffer {
    inner: Vec<u8>,
}

impl PortableBuffer {
    /// Allocates `len` zeroed bytes.
    ///
    /// Performs a single allocation (none when `len` is zero) and never
    /// grows afterwards.
    pub fn try_create(len: usize) -> Result<Self, BufferError> {
        let mut inner = Vec::new();

        inner
            .try_reserve_exact(len)
            .map_err(|_| BufferError::AllocationFailure { capacity: len })?;

        // Within the reserved capacity: no reallocation.
        inner.resize(len, 0);

        Ok(Self { inner })
    }

    /// Returns the number of bytes held by the underlying allocation.
    pub fn allocated(&self) -> usize {
        self.inner.capacity()
    }
}

impl core::fmt::Debug for PortableBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PortableBuffer")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Buffer for PortableBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(&self.inner)
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(&mut self.inner)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
