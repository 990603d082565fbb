//! Module: pool
//! Responsibility: reusable scratch buffers for number digit rendering/parsing.
//! Does not own: buffer contents between acquisitions (always cleared).
//! Boundary: injected into each `Codec`; never process-global.

use serde::{Deserialize, Serialize};
use std::{
    ops::{Deref, DerefMut},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

///
/// BufferPool
///
/// Bounded free list of byte buffers. Access to one buffer is exclusive for
/// the lifetime of its `PooledBuffer` guard.
///

#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_retained: usize,
    max_buffer_capacity: usize,
    reuses: AtomicU64,
    allocations: AtomicU64,
}

impl BufferPool {
    pub const DEFAULT_MAX_RETAINED: usize = 64;
    pub const DEFAULT_BUFFER_CAPACITY: usize = 64;
    pub const DEFAULT_MAX_BUFFER_CAPACITY: usize = 64 * 1024;

    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Self::DEFAULT_MAX_RETAINED, Self::DEFAULT_MAX_BUFFER_CAPACITY)
    }

    /// Pool retaining at most `max_retained` idle buffers, each dropped
    /// instead of retained once it grew past `max_buffer_capacity`.
    #[must_use]
    pub fn with_limits(max_retained: usize, max_buffer_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
            max_buffer_capacity,
            reuses: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
        }
    }

    /// Take a cleared buffer; it returns to the pool when the guard drops,
    /// including on error and unwind paths.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let reused = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        let buf = if let Some(buf) = reused {
            self.reuses.fetch_add(1, Ordering::Relaxed);
            buf
        } else {
            self.allocations.fetch_add(1, Ordering::Relaxed);
            Vec::with_capacity(Self::DEFAULT_BUFFER_CAPACITY)
        };

        PooledBuffer { pool: self, buf }
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            retained: u64::try_from(self.retained()).unwrap_or(u64::MAX),
            reuses: self.reuses.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
        }
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.max_buffer_capacity {
            return;
        }
        buf.clear();

        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.max_retained {
            free.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

///
/// PooledBuffer
///
/// Scoped handle to one pooled buffer.
///

#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

///
/// PoolStats
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PoolStats {
    pub retained: u64,
    pub reuses: u64,
    pub allocations: u64,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn acquired_buffers_return_cleared() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"12345");
        }

        assert_eq!(pool.retained(), 1);
        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(pool.retained(), 0);

        let stats = pool.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.reuses, 1);
    }

    #[test]
    fn buffers_return_on_unwind() {
        let pool = BufferPool::new();
        let panicked = catch_unwind(AssertUnwindSafe(|| {
            let mut buf = pool.acquire();
            buf.push(7);
            panic!("intentional panic for guard test");
        }))
        .is_err();

        assert!(panicked);
        assert_eq!(pool.retained(), 1);
    }

    #[test]
    fn retention_is_bounded() {
        let pool = BufferPool::with_limits(2, 1024);
        {
            let _a = pool.acquire();
            let _b = pool.acquire();
            let _c = pool.acquire();
        }
        assert_eq!(pool.retained(), 2);

        {
            let mut big = pool.acquire();
            big.reserve(4096);
        }
        assert_eq!(pool.retained(), 1, "oversized buffers are dropped");
    }
}
