// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fixed-capacity byte buffers owned by a single handle.
//!
//! A [`BufferHandle`] acquires one block of storage when it is created and
//! releases it exactly once when it goes out of scope. The block never grows
//! or shrinks, and it is only reachable through scoped closures, so no
//! reference to it outlives the handle.
//!
//! # Backends
//!
//! ## PortableBuffer
//!
//! - One heap allocation of exactly the requested length
//! - Zeroized on drop
//! - Available on all platforms
//!
//! ## PageBuffer (Unix only)
//!
//! - Anonymous `mmap`, rounded up to whole pages
//! - Optional `mlock` to prevent swapping to disk
//! - Zeroized, unlocked and unmapped on drop
//!
//! The backend is chosen through [`HandleConfig`]. [`Backend::Auto`] prefers
//! pages and falls back to the heap when no mapping can be created.
//!
//! # Example
//!
//! ```rust
//! use holdbuf::{Backend, Buffer, BufferError, BufferHandle, HandleConfig};
//!
//! fn example() -> Result<(), BufferError> {
//!     let config = HandleConfig::new().with_backend(Backend::Auto);
//!     let mut handle = BufferHandle::create_with(&config, 32, &[])?;
//!
//!     handle.open_mut(&mut |slice: &mut [u8]| {
//!         slice[0] = 42;
//!         Ok(())
//!     })?;
//!
//!     handle.open(&mut |slice: &[u8]| {
//!         assert_eq!(slice.len(), 32);
//!         assert_eq!(slice[0], 42);
//!         Ok(())
//!     })?;
//!
//!     // Storage is released on drop
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Logging
//!
//! Creation, fallback, failure and release are reported through `tracing`.
//! No subscriber is installed by this crate.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

#[cfg(unix)]
mod page;

#[cfg(unix)]
mod page_buffer;

mod config;
mod error;
mod handle;
mod portable_buffer;
mod traits;

#[cfg(unix)]
pub use page::page_size;
#[cfg(unix)]
pub use page_buffer::PageBuffer;

pub use config::{Backend, HandleConfig};
pub use error::{BufferError, PageError};
pub use handle::BufferHandle;
pub use portable_buffer::PortableBuffer;
pub use traits::Buffer;
