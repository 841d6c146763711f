// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for holdbuf.
use alloc::boxed::Box;
use thiserror::Error;

/// Errors from page syscalls.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum PageError {
    /// The anonymous mapping could not be created.
    #[error("mmap failed")]
    Create = 0,

    /// The mapping could not be locked in RAM.
    #[error("mlock failed")]
    Lock = 1,
}

/// Errors that can occur when working with buffers.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The requested capacity could not be allocated.
    #[error("failed to allocate {capacity} bytes")]
    AllocationFailure {
        /// Capacity that was requested.
        capacity: usize,
    },

    /// An error occurred during a page operation.
    #[error("PageError: {0}")]
    Page(#[from] PageError),

    /// The requested backend does not exist on this platform.
    #[error("backend not available on this platform")]
    BackendUnavailable,

    /// An error occurred in a callback function.
    #[error("callback error: {0:?}")]
    CallbackError(Box<dyn core::fmt::Debug + Send + Sync + 'static>),
}

impl BufferError {
    /// Creates a CallbackError from any Debug + Send + Sync error.
    pub fn callback_error<E: core::fmt::Debug + Send + Sync + 'static>(e: E) -> Self {
        Self::CallbackError(Box::new(e))
    }

    /// Maps a page error raised while creating storage of `capacity` bytes.
    ///
    /// A failed mapping is an allocation failure; anything later is reported
    /// as the page error itself.
    #[cfg(unix)]
    pub(crate) fn from_page_creation(error: PageError, capacity: usize) -> Self {
        match error {
            PageError::Create => Self::AllocationFailure { capacity },
            other => Self::Page(other),
        }
    }
}
