//! Thread-local read buffer pool.

use std::cell::RefCell;

/// Buffers larger than this are freed instead of pooled.
pub const MAX_POOLED_CAPACITY: usize = 16 * 1024 * 1024;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, zero-initialized read buffer.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer of exactly `size` bytes from the thread-local pool or
    /// allocates a new one.
    pub fn take(size: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| {
                let mut pool = pool.borrow_mut();
                let pos = pool.iter().position(|buf| buf.capacity() >= size)?;
                Some(pool.swap_remove(pos))
            })
            .unwrap_or_else(|| Vec::with_capacity(size));
        data.resize(size, 0);
        Self { data }
    }

    /// Returns the buffer contents.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if self.data.capacity() <= MAX_POOLED_CAPACITY {
            self.data.clear();
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
