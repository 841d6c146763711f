// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! BufferHandle - Sole owner of one fixed-capacity block of storage.
//!
//! The block is acquired when the handle is created and released exactly
//! once when the handle is dropped, on every exit path of the owning scope.
//! There is no resize operation: the block holds `capacity` bytes for the
//! whole lifetime of the handle.

use tracing::{debug, trace, warn};

use crate::config::{Backend, HandleConfig};
use crate::error::BufferError;
use crate::portable_buffer::PortableBuffer;
use crate::traits::Buffer;

#[cfg(unix)]
use crate::page_buffer::PageBuffer;

enum Storage {
    Portable(PortableBuffer),
    #[cfg(unix)]
    Page(PageBuffer),
}

/// A handle owning a block of `capacity` bytes.
///
/// # Example
///
/// ```rust
/// use holdbuf::{Buffer, BufferError, BufferHandle};
///
/// fn example() -> Result<(), BufferError> {
///     let mut handle = BufferHandle::create(16, b"hi")?;
///     assert_eq!(handle.capacity(), 16);
///
///     handle.open_mut(&mut |bytes: &mut [u8]| {
///         bytes[0] = 7;
///         Ok(())
///     })?;
///
///     // Storage is zeroized and released here.
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct BufferHandle {
    storage: Storage,
    capacity: usize,
    backend: Backend,
}

impl BufferHandle {
    /// Creates a handle owning `capacity` bytes on the portable backend.
    ///
    /// `initial` is accepted but not copied into storage: the block starts
    /// out zeroed, whatever `initial` holds.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if the block cannot be allocated.
    /// No handle and no storage survive a failure.
    pub fn create(capacity: usize, initial: &[u8]) -> Result<Self, BufferError> {
        Self::create_with(&HandleConfig::default(), capacity, initial)
    }

    /// Creates a handle owning `capacity` bytes on the configured backend.
    ///
    /// See [`BufferHandle::create`] for the treatment of `initial`.
    ///
    /// # Errors
    ///
    /// - [`BufferError::AllocationFailure`] if the block cannot be allocated.
    /// - [`BufferError::Page`] if locked pages cannot be locked.
    /// - [`BufferError::BackendUnavailable`] for [`Backend::Page`] off unix.
    pub fn create_with(
        config: &HandleConfig,
        capacity: usize,
        initial: &[u8],
    ) -> Result<Self, BufferError> {
        let (storage, backend) = match allocate(config.backend(), capacity) {
            Ok(allocated) => allocated,
            Err(e) => {
                warn!(capacity, backend = ?config.backend(), error = %e, "buffer allocation failed");
                return Err(e);
            }
        };

        debug!(
            capacity,
            backend = ?backend,
            ignored_initial = initial.len(),
            "buffer handle created"
        );

        Ok(Self {
            storage,
            capacity,
            backend,
        })
    }

    /// Returns the number of bytes owned, fixed at creation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the backend actually holding the storage.
    ///
    /// [`Backend::Auto`] resolves to the backend chosen at creation.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    fn storage_mut(&mut self) -> &mut dyn Buffer {
        match &mut self.storage {
            Storage::Portable(buffer) => buffer,
            #[cfg(unix)]
            Storage::Page(buffer) => buffer,
        }
    }
}

fn allocate(backend: Backend, capacity: usize) -> Result<(Storage, Backend), BufferError> {
    match backend {
        Backend::Portable => {
            let buffer = PortableBuffer::try_create(capacity)?;
            Ok((Storage::Portable(buffer), Backend::Portable))
        }
        #[cfg(unix)]
        Backend::Page { locked } => {
            let buffer = PageBuffer::new(capacity, locked)
                .map_err(|e| BufferError::from_page_creation(e, capacity))?;
            Ok((Storage::Page(buffer), backend))
        }
        #[cfg(not(unix))]
        Backend::Page { .. } => Err(BufferError::BackendUnavailable),
        #[cfg(unix)]
        Backend::Auto => match PageBuffer::new(capacity, false) {
            Ok(buffer) => Ok((Storage::Page(buffer), Backend::Page { locked: false })),
            Err(e) => {
                debug!(capacity, error = %e, "pages unavailable, falling back to portable");
                allocate(Backend::Portable, capacity)
            }
        },
        #[cfg(not(unix))]
        Backend::Auto => allocate(Backend::Portable, capacity),
    }
}

impl core::fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BufferHandle")
            .field("data", &"REDACTED")
            .field("capacity", &self.capacity)
            .field("backend", &self.backend)
            .finish()
    }
}

impl Buffer for BufferHandle {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        self.storage_mut().open(f)
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        self.storage_mut().open_mut(f)
    }

    fn len(&self) -> usize {
        self.capacity
    }
}

impl Drop for BufferHandle {
    fn drop(&mut self) {
        // Storage releases itself when the field is dropped right after this.
        trace!(capacity = self.capacity, backend = ?self.backend, "releasing buffer handle");
    }
}
