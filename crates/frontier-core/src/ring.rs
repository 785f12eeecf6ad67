// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Generation Ring Buffer
// ─────────────────────────────────────────────────────────────────────
//! Fixed-capacity circular buffer of states shared by exactly one
//! writer (the stage that owns the generation) and one reader (the
//! next time slot's stage).
//!
//! # Invariants
//!
//! 1. **Two cursors, no counter**: `is_empty() ⇔ first == last` and
//!    `is_full() ⇔ (last + 1) % capacity == first`. One slot is always
//!    left unused, so the usable capacity is `capacity - 1`.
//!
//! 2. **Single writer, single reader**: only the writer stores `last`,
//!    only the reader stores `first`. The writer fills the slot before
//!    publishing it with a `Release` store of `last`; the reader loads
//!    `last` with `Acquire` before touching the slot, so it never sees
//!    a half-written entry.
//!
//! 3. **No unsafe**: each slot is a `parking_lot::Mutex` cell. Under the
//!    SPSC discipline a slot is never touched by both sides at once,
//!    so the lock is always uncontended.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use frontier_types::{FrontierError, FrontierResult, State};

/// Bounded SPSC ring of `Arc<State>`.
pub struct Ring {
    slots: Box<[Mutex<Option<Arc<State>>>]>,
    first: AtomicUsize,
    last: AtomicUsize,
    dimension: usize,
    closed: AtomicBool,
}

impl Ring {
    /// Allocate all `capacity` slots up front.
    pub fn new(capacity: usize, dimension: usize) -> FrontierResult<Self> {
        if capacity < 2 {
            return Err(FrontierError::InvalidConfig(format!(
                "ring capacity must be >= 2, got {capacity}"
            )));
        }
        if dimension < 1 {
            return Err(FrontierError::InvalidConfig(
                "ring state dimension must be >= 1".to_string(),
            ));
        }
        let slots = (0..capacity).map(|_| Mutex::new(None)).collect();
        Ok(Self {
            slots,
            first: AtomicUsize::new(0),
            last: AtomicUsize::new(0),
            dimension,
            closed: AtomicBool::new(false),
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn usable_capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.load(Ordering::Acquire) == self.last.load(Ordering::Acquire)
    }

    pub fn is_full(&self) -> bool {
        let last = self.last.load(Ordering::Acquire);
        self.advance(last) == self.first.load(Ordering::Acquire)
    }

    /// Number of live entries (a snapshot when the other side is active).
    pub fn len(&self) -> usize {
        let first = self.first.load(Ordering::Acquire);
        let last = self.last.load(Ordering::Acquire);
        (last + self.slots.len() - first) % self.slots.len()
    }

    /// Writer: append `state`. Returns `false` (and drops the state)
    /// when the ring is full; nothing already stored is overwritten.
    pub fn push(&self, state: Arc<State>) -> bool {
        debug_assert_eq!(
            state.dimension(),
            self.dimension,
            "ring push: state dimension mismatch"
        );
        let last = self.last.load(Ordering::Relaxed);
        let next = self.advance(last);
        if next == self.first.load(Ordering::Acquire) {
            return false;
        }
        *self.slots[last].lock() = Some(state);
        self.last.store(next, Ordering::Release);
        true
    }

    /// Reader: the oldest live entry, or `None` when empty.
    pub fn first(&self) -> Option<Arc<State>> {
        let first = self.first.load(Ordering::Relaxed);
        if first == self.last.load(Ordering::Acquire) {
            return None;
        }
        self.slots[first].lock().clone()
    }

    /// Reader: discard the oldest entry. No-op when empty.
    pub fn pop(&self) {
        let first = self.first.load(Ordering::Relaxed);
        if first == self.last.load(Ordering::Acquire) {
            return;
        }
        self.slots[first].lock().take();
        self.first.store(self.advance(first), Ordering::Release);
    }

    /// Reader: `first()` followed by `pop()`.
    pub fn take_first(&self) -> Option<Arc<State>> {
        let first = self.first.load(Ordering::Relaxed);
        if first == self.last.load(Ordering::Acquire) {
            return None;
        }
        let state = self.slots[first].lock().take();
        self.first.store(self.advance(first), Ordering::Release);
        state
    }

    /// The most recently pushed entry still live, or `None` when empty.
    pub fn last(&self) -> Option<Arc<State>> {
        let first = self.first.load(Ordering::Acquire);
        let last = self.last.load(Ordering::Acquire);
        if first == last {
            return None;
        }
        let idx = (last + self.slots.len() - 1) % self.slots.len();
        self.slots[idx].lock().clone()
    }

    /// Reader: remove every live entry, oldest first.
    pub fn drain(&self) -> Vec<Arc<State>> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(state) = self.take_first() {
            out.push(state);
        }
        out
    }

    /// Writer: mark the generation complete. No further pushes follow.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Check `is_closed()` before `is_empty()`: once closed is observed,
    /// every push preceding the close is visible.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Closed and fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.is_closed() && self.is_empty()
    }
}

impl std::fmt::Debug for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("dimension", &self.dimension)
            .field("closed", &self.is_closed())
            .finish()
    }
}
