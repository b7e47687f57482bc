//! # Periscan Observation Log
//!
//! One bounded, lossy-FIFO log primitive, instantiated three times across
//! the system: dialogue turns, discovered network hosts, discovered radio
//! devices. Each producer owns its own instance; the three are never
//! cross-locked and a push to one never blocks a push to another.
//!
//! The log is a fixed-capacity ring: when full, a push evicts exactly the
//! oldest entry before inserting the new one. Iteration is always
//! oldest-to-newest. The internal lock covers the whole push-or-evict
//! sequence and the whole render, so snapshots are atomic and concurrent
//! pushes serialize strictly. The lock is never held across blocking I/O —
//! callers snapshot first, await later.

use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// A fixed-capacity, overwrite-oldest log of owned values.
///
/// `start`/`end` are cursors mod capacity; `empty` disambiguates the
/// cursor-equal case, which otherwise means "full". Fullness is tracked
/// explicitly, never inferred from cursor comparison.
pub struct BoundedLog<T> {
    inner: Mutex<Ring<T>>,
    /// A short name used in eviction warnings ("dialogue", "hosts", ...).
    name: &'static str,
}

struct Ring<T> {
    slots: Box<[Option<T>]>,
    start: usize,
    end: usize,
    empty: bool,
    /// Total pushes over the log's lifetime (survives eviction).
    seen: u64,
}

impl<T> BoundedLog<T> {
    /// Create a log holding at most `capacity` entries.
    ///
    /// Capacity is fixed for the life of the log.
    ///
    /// # Panics
    /// If `capacity` is zero. Capacities are compile-time or config-time
    /// constants; a zero-capacity log is a wiring bug, not a runtime state.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedLog capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            inner: Mutex::new(Ring {
                slots: slots.into_boxed_slice(),
                start: 0,
                end: 0,
                empty: true,
                seen: 0,
            }),
            name,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ring<T>> {
        // A poisoned lock means a panic mid-mutation elsewhere; the ring is
        // still structurally sound (every step leaves valid cursors).
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry, evicting the oldest one first only if the log is
    /// already full.
    pub fn push(&self, value: T) {
        let mut ring = self.lock();
        let capacity = ring.slots.len();

        if !ring.empty && ring.end == ring.start {
            let start = ring.start;
            warn!(
                log = self.name,
                index = start,
                "log full, overwriting oldest entry"
            );
            ring.slots[start] = None;
            ring.start = (start + 1) % capacity;
        }

        let end = ring.end;
        ring.slots[end] = Some(value);
        ring.end = (end + 1) % capacity;
        ring.empty = false;
        ring.seen += 1;
    }

    /// Number of entries currently held (≤ capacity).
    pub fn len(&self) -> usize {
        let ring = self.lock();
        if ring.empty {
            0
        } else if ring.end > ring.start {
            ring.end - ring.start
        } else {
            ring.slots.len() - ring.start + ring.end
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().empty
    }

    /// Maximum number of entries this log can hold.
    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    /// Total entries ever pushed, including ones since evicted.
    pub fn total_seen(&self) -> u64 {
        self.lock().seen
    }

    /// Visit every entry oldest-to-newest under the lock.
    ///
    /// The visitor must not block; it runs with the log locked so the
    /// traversal reflects a single atomic snapshot.
    pub fn for_each<F: FnMut(&T)>(&self, mut visitor: F) {
        let ring = self.lock();
        if ring.empty {
            return;
        }
        let capacity = ring.slots.len();
        let mut i = ring.start;
        loop {
            if let Some(value) = &ring.slots[i] {
                visitor(value);
            }
            i = (i + 1) % capacity;
            if i == ring.end {
                break;
            }
        }
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Clone out the current entries oldest-to-newest.
    pub fn snapshot(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.for_each(|v| out.push(v.clone()));
        out
    }
}

impl<T: Display> BoundedLog<T> {
    /// Flatten the log into one newline-joined string after `prefix`.
    ///
    /// An empty log renders the prefix line alone; there is never a
    /// trailing newline. The whole render happens under the lock, so no
    /// producer can interleave a push mid-snapshot.
    pub fn render_snapshot(&self, prefix: &str) -> String {
        use std::fmt::Write;

        let ring = self.lock();
        let mut out = String::from(prefix);
        if ring.empty {
            return out;
        }
        let capacity = ring.slots.len();
        let mut i = ring.start;
        loop {
            if let Some(value) = &ring.slots[i] {
                // Writing into a String cannot fail.
                let _ = write!(out, "\n{value}");
            }
            i = (i + 1) % capacity;
            if i == ring.end {
                break;
            }
        }
        out
    }
}
