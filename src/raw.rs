//! The bare readers-writer protocol, without a payload.
//!
//! Two pieces of state: an entry mutex guarding the active-reader count,
//! and a one-permit writer gate. The gate is held either by a single writer
//! or by the reader group as a unit — its first member takes the gate, its
//! last member returns it. Readers in between never touch the gate.
//!
//! Acquire and release are manual here; misuse (releasing a mode that is
//! not held) is a contract violation the lock does not detect outside of
//! debug assertions. Prefer [`RwLock`](crate::RwLock), whose guards pair
//! every acquire with exactly one release.

use crate::semaphore::Semaphore;
use parking_lot::Mutex;

/// A readers-writer lock without data, driven by explicit
/// acquire/release calls.
///
/// # Contract
///
/// Every `acquire_read` must be paired with exactly one `release_read`, and
/// every `acquire_write` with exactly one `release_write`, including on
/// early-exit paths of the caller's critical section. Unpaired releases
/// corrupt the gate's permit count; debug builds assert on the cases that
/// are locally detectable.
#[derive(Debug)]
pub struct RawRwLock {
    /// Entry gate: serializes reader-count transitions.
    readers: Mutex<usize>,
    /// Exclusive territory: one permit, held by a writer or by the reader
    /// group via its first/last member.
    writer_gate: Semaphore,
}

impl Default for RawRwLock {
    fn default() -> Self {
        Self::new()
    }
}

impl RawRwLock {
    /// Creates a lock in the free state: no readers, gate available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            readers: Mutex::new(0),
            writer_gate: Semaphore::new(1),
        }
    }

    /// Registers the calling thread as a reader, blocking while a writer
    /// holds the gate.
    ///
    /// The first reader of a group acquires the writer gate while still
    /// holding the entry mutex, so a second reader arriving during that
    /// wait queues briefly behind it. Once any reader is active, further
    /// readers only bump the count.
    pub fn acquire_read(&self) {
        let mut count = self.readers.lock();
        *count += 1;
        if *count == 1 {
            // First reader claims exclusive territory for the whole group.
            self.writer_gate.acquire();
            tracing::trace!("first reader took the writer gate");
        }
    }

    /// Deregisters the calling thread as a reader.
    ///
    /// The last reader of the group returns the writer gate, unblocking a
    /// waiting writer or a future first reader.
    ///
    /// # Contract
    ///
    /// The caller must hold a read acquisition. Calling this with no
    /// readers active underflows the count (asserted in debug builds).
    pub fn release_read(&self) {
        let mut count = self.readers.lock();
        debug_assert!(*count > 0, "release_read with no active readers");
        *count -= 1;
        if *count == 0 {
            self.writer_gate.release();
            tracing::trace!("last reader returned the writer gate");
        }
    }

    /// Blocks until the calling thread holds exclusive access: no readers
    /// active, no other writer.
    ///
    /// Writers contend only on the gate and never touch the entry mutex.
    pub fn acquire_write(&self) {
        self.writer_gate.acquire();
        tracing::trace!("writer took the gate");
    }

    /// Releases exclusive access, making the gate available to the next
    /// waiting writer or arriving first reader.
    ///
    /// # Contract
    ///
    /// The caller must hold a write acquisition.
    pub fn release_write(&self) {
        debug_assert_eq!(
            self.writer_gate.available_permits(),
            0,
            "release_write with the gate not held"
        );
        self.writer_gate.release();
        tracing::trace!("writer returned the gate");
    }

    /// Number of readers currently registered.
    ///
    /// Diagnostic only: the value may be stale by the time it is observed.
    #[must_use]
    pub fn reader_count(&self) -> usize {
        *self.readers.lock()
    }
}
