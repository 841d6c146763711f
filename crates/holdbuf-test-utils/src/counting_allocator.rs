// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CountingAllocator - System allocator wrapper that records allocations.
//!
//! Install it as `#[global_allocator]` in an integration test binary and
//! wrap the code under test in [`CountingAllocator::measure`]. Only calls made
//! on the measuring thread are counted, so the test harness printing from
//! other threads does not show up in the numbers. Counters are process-wide:
//! tests that measure must still run serially.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

fn is_tracking() -> bool {
    TRACKING.try_with(Cell::get).unwrap_or(false)
}

/// Allocator activity, either cumulative or for one measured closure.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct AllocStats {
    /// Number of successful allocations.
    pub allocs: usize,
    /// Number of deallocations.
    pub deallocs: usize,
    /// Total bytes handed out.
    pub allocated_bytes: usize,
    /// Total bytes given back.
    pub released_bytes: usize,
}

impl AllocStats {
    /// Activity recorded between `earlier` and `self`.
    pub fn since(&self, earlier: &AllocStats) -> AllocStats {
        AllocStats {
            allocs: self.allocs - earlier.allocs,
            deallocs: self.deallocs - earlier.deallocs,
            allocated_bytes: self.allocated_bytes - earlier.allocated_bytes,
            released_bytes: self.released_bytes - earlier.released_bytes,
        }
    }
}

/// Global allocator that forwards to [`System`] and counts tracked calls.
pub struct CountingAllocator {
    allocs: AtomicUsize,
    deallocs: AtomicUsize,
    allocated_bytes: AtomicUsize,
    released_bytes: AtomicUsize,
}

impl CountingAllocator {
    /// Creates a counter with everything at zero.
    pub const fn new() -> Self {
        Self {
            allocs: AtomicUsize::new(0),
            deallocs: AtomicUsize::new(0),
            allocated_bytes: AtomicUsize::new(0),
            released_bytes: AtomicUsize::new(0),
        }
    }

    /// Reads the cumulative counters.
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocs: self.allocs.load(Ordering::SeqCst),
            deallocs: self.deallocs.load(Ordering::SeqCst),
            allocated_bytes: self.allocated_bytes.load(Ordering::SeqCst),
            released_bytes: self.released_bytes.load(Ordering::SeqCst),
        }
    }

    /// Runs `f` with tracking enabled on the current thread and returns its
    /// result along with the activity it caused.
    pub fn measure<R>(&self, f: impl FnOnce() -> R) -> (R, AllocStats) {
        let before = self.stats();

        TRACKING.with(|t| t.set(true));
        let result = f();
        TRACKING.with(|t| t.set(false));

        (result, self.stats().since(&before))
    }

    fn record_alloc(&self, size: usize) {
        if is_tracking() {
            self.allocs.fetch_add(1, Ordering::SeqCst);
            self.allocated_bytes.fetch_add(size, Ordering::SeqCst);
        }
    }

    fn record_dealloc(&self, size: usize) {
        if is_tracking() {
            self.deallocs.fetch_add(1, Ordering::SeqCst);
            self.released_bytes.fetch_add(size, Ordering::SeqCst);
        }
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };

        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }

        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };

        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }

        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };

        self.record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };

        // Counted as one release plus one acquisition.
        if !new_ptr.is_null() {
            self.record_dealloc(layout.size());
            self.record_alloc(new_size);
        }

        new_ptr
    }
}
