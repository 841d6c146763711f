// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PageBuffer - High-level buffer over an anonymous mapping.
//!
//! Provides the open/open_mut access pattern over a [`Page`], optionally
//! locked in RAM. The mapping is zeroized and released on drop.

use crate::error::{BufferError, PageError};
use crate::page::Page;
use crate::traits::Buffer;

/// A buffer backed by whole mmap'd pages.
pub struct PageBuffer {
    page: Page,
}

impl PageBuffer {
    /// Maps `len` bytes, locking them in RAM when `locked` is set.
    ///
    /// If locking fails the fresh mapping is released before returning.
    pub fn new(len: usize, locked: bool) -> Result<Self, PageError> {
        let page = Page::new(len)?;

        if locked {
            page.lock()?;
        }

        Ok(Self { page })
    }

    /// Returns true if the pages are locked in RAM.
    pub fn is_locked(&self) -> bool {
        self.page.is_locked()
    }

    /// Bytes actually mapped, rounded up to whole pages.
    pub fn mapped_len(&self) -> usize {
        self.page.mapped_len()
    }
}

impl core::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("len", &self.page.len())
            .field("locked", &self.page.is_locked())
            .finish_non_exhaustive()
    }
}

impl Buffer for PageBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        // Disposal only happens in Drop, so the page is live here.
        let slice = unsafe { self.page.as_slice() };
        f(slice)
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        let slice = unsafe { self.page.as_mut_slice() };
        f(slice)
    }

    fn len(&self) -> usize {
        self.page.len()
    }
}
