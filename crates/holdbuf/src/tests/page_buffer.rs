// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::sync::atomic::Ordering;

use serial_test::serial;

use crate::error::{BufferError, PageError};
use crate::page::{LIVE_MAPPINGS, page_size};
use crate::page_buffer::PageBuffer;
use crate::traits::Buffer;

// =============================================================================
// new()
// =============================================================================

#[test]
#[serial(page)]
fn test_new_unlocked() {
    let buffer = PageBuffer::new(32, false).expect("Failed to new(..)");

    assert_eq!(buffer.len(), 32);
    assert!(!buffer.is_locked());
    assert_eq!(buffer.mapped_len(), page_size());
}

#[test]
#[serial(page)]
fn test_new_locked() {
    let buffer = PageBuffer::new(32, true).expect("Failed to new(..)");

    assert!(buffer.is_locked());
}

#[test]
#[serial(page)]
fn test_new_zero_len() {
    let mut buffer = PageBuffer::new(0, true).expect("Failed to new(..)");

    assert!(buffer.is_empty());
    assert_eq!(buffer.mapped_len(), 0);

    buffer
        .open(&mut |slice| {
            assert!(slice.is_empty());
            Ok(())
        })
        .expect("Failed to open(..)");
}

#[test]
#[serial(page)]
fn test_new_fails_when_mapping_impossible() {
    let before = LIVE_MAPPINGS.load(Ordering::SeqCst);
    let result = PageBuffer::new(usize::MAX, false);

    assert!(matches!(result, Err(PageError::Create)));
    assert_eq!(LIVE_MAPPINGS.load(Ordering::SeqCst), before);
}

#[cfg(target_os = "linux")]
mod seccomp_lock {
    use super::*;
    use crate::tests::utils::{block_mlock, is_seccomp_available, run_test_as_subprocess};

    #[test]
    #[ignore]
    fn subprocess_test_new_locked_fails_and_releases_when_mlock_blocked() {
        let before = LIVE_MAPPINGS.load(Ordering::SeqCst);

        block_mlock();

        let result = PageBuffer::new(32, true);

        assert!(matches!(result, Err(PageError::Lock)));
        assert_eq!(LIVE_MAPPINGS.load(Ordering::SeqCst), before);
    }

    #[test]
    #[serial(page)]
    fn test_new_locked_fails_and_releases_when_mlock_blocked() {
        if !is_seccomp_available() {
            eprintln!("seccomp not available, skipping");
            return;
        }

        let exit_code = run_test_as_subprocess(
            "tests::page_buffer::seccomp_lock::subprocess_test_new_locked_fails_and_releases_when_mlock_blocked",
        );

        assert_eq!(
            exit_code,
            Some(0),
            "Subprocess should exit cleanly after assertion"
        );
    }
}

// =============================================================================
// open() / open_mut()
// =============================================================================

#[test]
#[serial(page)]
fn test_open_exposes_only_requested_len() {
    let mut buffer = PageBuffer::new(10, false).expect("Failed to new(..)");

    buffer
        .open(&mut |slice| {
            assert_eq!(slice.len(), 10);
            Ok(())
        })
        .expect("Failed to open(..)");
}

#[test]
#[serial(page)]
fn test_open_mut_then_open_sees_writes() {
    let mut buffer = PageBuffer::new(4, true).expect("Failed to new(..)");

    buffer
        .open_mut(&mut |slice| {
            slice.copy_from_slice(&[9, 8, 7, 6]);
            Ok(())
        })
        .expect("Failed to open_mut(..)");

    buffer
        .open(&mut |slice| {
            assert_eq!(slice, [9, 8, 7, 6]);
            Ok(())
        })
        .expect("Failed to open(..)");
}

#[test]
#[serial(page)]
fn test_open_mut_propagates_callback_error() {
    let mut buffer = PageBuffer::new(4, false).expect("Failed to new(..)");

    let result = buffer.open_mut(&mut |_| Err(BufferError::callback_error("nope")));

    assert!(matches!(result, Err(BufferError::CallbackError(_))));

    // Still usable afterwards.
    buffer
        .open(&mut |slice| {
            assert_eq!(slice.len(), 4);
            Ok(())
        })
        .expect("Failed to open(..)");
}

// =============================================================================
// Drop
// =============================================================================

#[test]
#[serial(page)]
fn test_drop_releases_mapping_once() {
    let before = LIVE_MAPPINGS.load(Ordering::SeqCst);

    let buffers: Vec<PageBuffer> = (1..=4)
        .map(|i| PageBuffer::new(i * 100, i % 2 == 0).expect("Failed to new(..)"))
        .collect();

    assert_eq!(LIVE_MAPPINGS.load(Ordering::SeqCst), before + 4);

    drop(buffers);

    assert_eq!(LIVE_MAPPINGS.load(Ordering::SeqCst), before);
}

#[test]
#[serial(page)]
fn test_debug_does_not_leak_contents() {
    let buffer = PageBuffer::new(4, false).expect("Failed to new(..)");
    let debug = format!("{:?}", buffer);

    assert!(debug.contains("PageBuffer"));
    assert!(debug.contains("len: 4"));
    assert!(debug.contains("locked: false"));
}
