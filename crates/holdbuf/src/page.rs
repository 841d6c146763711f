// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Page - Low-level anonymous mapping with lock primitives.
//!
//! Wraps an mmap'd region rounded up to whole pages.
//! Each syscall is exposed separately for granular testing.

use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicBool, Ordering};

use zeroize::Zeroize;

use crate::error::PageError;

/// Mappings currently alive in this process.
#[cfg(test)]
pub(crate) static LIVE_MAPPINGS: core::sync::atomic::AtomicUsize =
    core::sync::atomic::AtomicUsize::new(0);

/// Returns the system page size.
pub fn page_size() -> usize {
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

/// An anonymous memory mapping holding `len` usable bytes.
///
/// A zero-length page maps nothing and points at a dangling address.
/// Tracks lock and disposal state internally.
#[derive(Debug)]
pub struct Page {
    ptr: NonNull<u8>,
    len: usize,
    mapped_len: usize,
    is_locked: AtomicBool,
    is_disposed: bool,
}

unsafe impl Send for Page {}
unsafe impl Sync for Page {}

impl Page {
    /// Maps enough whole pages for `len` bytes. Does NOT lock.
    pub fn new(len: usize) -> Result<Self, PageError> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
                mapped_len: 0,
                is_locked: AtomicBool::new(false),
                is_disposed: false,
            });
        }

        let mapped_len = len
            .checked_next_multiple_of(page_size())
            .ok_or(PageError::Create)?;

        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                mapped_len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(PageError::Create);
        }

        let ptr = NonNull::new(ptr as *mut u8).ok_or(PageError::Create)?;

        #[cfg(test)]
        LIVE_MAPPINGS.fetch_add(1, Ordering::SeqCst);

        // Anonymous mappings are zero-filled by the kernel.
        Ok(Self {
            ptr,
            len,
            mapped_len,
            is_locked: AtomicBool::new(false),
            is_disposed: false,
        })
    }

    /// Usable bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Bytes actually mapped (`len` rounded up to whole pages).
    pub fn mapped_len(&self) -> usize {
        self.mapped_len
    }

    /// Returns true if the mapping is locked in RAM.
    pub fn is_locked(&self) -> bool {
        self.is_locked.load(Ordering::Acquire)
    }

    /// Locks the mapping in RAM (prevents swapping to disk).
    pub fn lock(&self) -> Result<(), PageError> {
        if self.mapped_len == 0 {
            return Ok(());
        }

        let failed =
            unsafe { libc::mlock(self.ptr.as_ptr() as *const _, self.mapped_len) } != 0;

        if failed {
            return Err(PageError::Lock);
        }

        self.is_locked.store(true, Ordering::Release);

        Ok(())
    }

    /// Returns a slice view of the usable bytes.
    ///
    /// # Safety
    /// The page must not have been disposed.
    pub unsafe fn as_slice(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns a mutable slice view of the usable bytes.
    ///
    /// # Safety
    /// The page must not have been disposed.
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Zeroizes the whole mapping, including the tail past `len`.
    ///
    /// # Safety
    /// The page must not have been disposed.
    pub unsafe fn zeroize(&mut self) {
        let mapping =
            unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.mapped_len) };

        mapping.zeroize();
    }

    /// Returns true once the mapping has been released.
    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.is_disposed
    }

    /// Zeroizes, unlocks and unmaps. Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }

        self.is_disposed = true;

        if self.mapped_len == 0 {
            return;
        }

        unsafe { self.zeroize() };

        if self.is_locked() {
            self.munlock();
        }

        self.munmap();
    }

    fn munlock(&self) {
        unsafe { libc::munlock(self.ptr.as_ptr() as *const _, self.mapped_len) };
        self.is_locked.store(false, Ordering::Release);
    }

    fn munmap(&self) {
        unsafe { libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.mapped_len) };

        #[cfg(test)]
        LIVE_MAPPINGS.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.dispose();
    }
}
