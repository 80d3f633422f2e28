//! Rotation cursor for SEQUENCE routes.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Per-route rotation index.
///
/// Starts at -1 so the first advance selects index 0. Advancing is a single
/// `fetch_update`, so concurrent callers each observe a distinct consecutive
/// index with no lost updates.
pub struct SequenceCursor(AtomicI64);

fn next(current: i64, len: i64) -> i64 {
    // A cursor outside the range (only possible from the -1 start) restarts at 0
    if current < 0 || current >= len {
        0
    } else {
        (current + 1) % len
    }
}

impl SequenceCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicI64::new(-1))
    }

    /// Current cursor value without advancing; -1 before the first request
    #[must_use]
    pub fn peek(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }

    /// Advance the cursor modulo `len` and return the new index.
    ///
    /// Returns `None` when `len` is zero.
    #[must_use]
    pub fn advance(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = len as i64;
        let previous = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(next(current, len))
            })
            .unwrap_or_else(|e| {
                debug_assert!(false, "we never return None from fetch_update");
                e
            });
        Some(next(previous, len) as usize)
    }
}

impl Default for SequenceCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SequenceCursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("SequenceCursor").field(&self.peek()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_cursor_starts_before_first_index() {
        let cursor = SequenceCursor::new();
        assert_eq!(cursor.peek(), -1);
        assert_eq!(cursor.advance(3), Some(0));
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn test_cursor_cycles() {
        let cursor = SequenceCursor::new();
        let picked: Vec<_> = (0..7).map(|_| cursor.advance(3).unwrap()).collect();
        assert_eq!(picked, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_cursor_single_file() {
        let cursor = SequenceCursor::new();
        for _ in 0..5 {
            assert_eq!(cursor.advance(1), Some(0));
        }
    }

    #[test]
    fn test_cursor_zero_len() {
        let cursor = SequenceCursor::new();
        assert_eq!(cursor.advance(0), None);
        assert_eq!(cursor.peek(), -1);
    }

    #[test]
    fn test_cursor_concurrent_advances_are_balanced() {
        let cursor = Arc::new(SequenceCursor::new());
        let len = 4;
        let per_thread = 250;
        let threads = 8;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cursor = Arc::clone(&cursor);
                std::thread::spawn(move || {
                    (0..per_thread)
                        .map(|_| cursor.advance(len).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for handle in handles {
            for idx in handle.join().unwrap() {
                *counts.entry(idx).or_default() += 1;
            }
        }

        let total = per_thread * threads;
        assert_eq!(counts.len(), len);
        for idx in 0..len {
            assert_eq!(counts[&idx], total / len, "index {idx} selected unevenly");
        }
    }
}
