//! Thread-local pool of staging buffers.

use std::cell::RefCell;

/// Largest buffer kept in the pool when dropped (256 KiB).
pub const MAX_POOLED_CAPACITY: usize = 256 * 1024;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A fixed-size staging buffer with a filled window `start..end`.
///
/// Bytes are appended through [`spare_mut`](Buffer::spare_mut) +
/// [`commit`](Buffer::commit) and taken from the front through
/// [`filled`](Buffer::filled) + [`consume`](Buffer::consume). The backing
/// allocation comes from, and returns to, a small per-thread pool so that
/// readers and chains created in a loop do not reallocate.
pub struct Buffer {
    data: Vec<u8>,
    start: usize,
    end: usize,
}

impl Buffer {
    /// Takes a buffer of exactly `size` bytes from the thread-local pool or
    /// creates a new one.
    pub fn take(size: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.clear();
        data.resize(size, 0);

        Self {
            data,
            start: 0,
            end: 0,
        }
    }

    /// Returns the filled bytes.
    pub fn filled(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    /// Returns the writable space after the filled bytes.
    ///
    /// Call [`compact`](Buffer::compact) first to make all free space
    /// available.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.end..]
    }

    /// Marks `n` bytes of spare space as filled.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(self.end + n <= self.data.len());
        self.end += n;
    }

    /// Drops `n` bytes from the front of the filled window.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(self.start + n <= self.end);
        self.start += n;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }

    /// Moves the filled bytes to the front of the buffer.
    pub fn compact(&mut self) {
        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
    }

    /// Discards all filled bytes.
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    /// Returns the number of filled bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if nothing is filled.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if no more bytes can be appended, even after compacting.
    pub fn is_full(&self) -> bool {
        self.len() == self.data.len()
    }

    /// Returns the total size of the buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("filled", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Return the allocation to the pool if it's not too large
        if self.data.capacity() <= MAX_POOLED_CAPACITY {
            let data = std::mem::take(&mut self.data);
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(data);
                }
            });
        }
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
