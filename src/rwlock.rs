//! Data-owning readers-writer lock with guard-scoped release.
//!
//! [`RwLock<T>`] pairs the raw protocol with the value it protects. Access
//! goes through guards: [`RwLockReadGuard`] derefs shared, and
//! [`RwLockWriteGuard`] derefs exclusive; dropping a guard performs the
//! matching release. This removes the unmatched-acquire/release misuse
//! class that the raw interface leaves to the caller.
//!
//! ```
//! use rwgate::RwLock;
//!
//! let lock = RwLock::new(5);
//! {
//!     let a = lock.read();
//!     let b = lock.read();
//!     assert_eq!(*a + *b, 10);
//! }
//! *lock.write() += 1;
//! assert_eq!(lock.into_inner(), 6);
//! ```

use crate::raw::RawRwLock;
use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A readers-writer lock protecting a value of type `T`.
///
/// Any number of [`read`](Self::read) guards may be live at once; a
/// [`write`](Self::write) guard is exclusive against readers and other
/// writers. Both calls block uninterruptibly until access is granted.
///
/// The lock is reader-preferring: see the crate docs for the starvation
/// trade-off.
pub struct RwLock<T: ?Sized> {
    raw: RawRwLock,
    data: UnsafeCell<T>,
}

// Same bounds as std's RwLock: readers hand out &T from multiple threads,
// so T must be Sync; moving the lock or a write guard across threads
// moves T, so T must be Send.
unsafe impl<T: ?Sized + Send> Send for RwLock<T> {}
unsafe impl<T: ?Sized + Send + Sync> Sync for RwLock<T> {}

impl<T> RwLock<T> {
    /// Creates a lock in the free state holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            raw: RawRwLock::new(),
            data: UnsafeCell::new(value),
        }
    }

    /// Consumes the lock and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> RwLock<T> {
    /// Acquires shared access, blocking while a writer holds the lock.
    ///
    /// Multiple read guards may be live concurrently. The returned guard
    /// releases on drop.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.raw.acquire_read();
        RwLockReadGuard { lock: self }
    }

    /// Acquires exclusive access, blocking while any reader or another
    /// writer holds the lock.
    ///
    /// The returned guard releases on drop.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.raw.acquire_write();
        RwLockWriteGuard { lock: self }
    }

    /// Returns a mutable reference to the inner value.
    ///
    /// The borrow checker guarantees exclusivity, so no locking happens.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    /// Number of readers currently holding the lock.
    ///
    /// Diagnostic only: the value may be stale by the time it is observed.
    #[must_use]
    pub fn reader_count(&self) -> usize {
        self.raw.reader_count()
    }
}

impl<T: Default> Default for RwLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for RwLock<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized> fmt::Debug for RwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never touches the data: reading it would require taking the lock.
        f.debug_struct("RwLock")
            .field("readers", &self.raw.reader_count())
            .finish_non_exhaustive()
    }
}

/// Shared access to the data of an [`RwLock`]. Releases on drop.
#[must_use = "the read lock is released immediately if the guard is not held"]
pub struct RwLockReadGuard<'a, T: ?Sized> {
    lock: &'a RwLock<T>,
}

impl<T: ?Sized> Deref for RwLockReadGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        // Readers hold the lock in shared mode: no writer can be active.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for RwLockReadGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        self.lock.raw.release_read();
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RwLockReadGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Exclusive access to the data of an [`RwLock`]. Releases on drop.
#[must_use = "the write lock is released immediately if the guard is not held"]
pub struct RwLockWriteGuard<'a, T: ?Sized> {
    lock: &'a RwLock<T>,
}

impl<T: ?Sized> Deref for RwLockWriteGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> DerefMut for RwLockWriteGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        // The writer holds the gate exclusively: no reader or other writer
        // can observe the data while this guard is live.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for RwLockWriteGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        self.lock.raw.release_write();
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RwLockWriteGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn multiple_readers_allowed() {
        let lock = RwLock::new(42_u32);
        let a = lock.read();
        let b = lock.read();
        assert_eq!(*a, 42);
        assert_eq!(*b, 42);
        assert_eq!(lock.reader_count(), 2);
    }

    #[test]
    fn write_then_read_sees_modification() {
        let lock = RwLock::new(5_u32);
        {
            let mut guard = lock.write();
            *guard = 7;
        }
        assert_eq!(*lock.read(), 7);
    }

    #[test]
    fn read_guard_released_on_drop() {
        let lock = RwLock::new(0_u32);
        {
            let _guard = lock.read();
            assert_eq!(lock.reader_count(), 1);
        }
        assert_eq!(lock.reader_count(), 0);
        // Gate must be free again.
        drop(lock.write());
    }

    #[test]
    fn write_guard_released_on_drop() {
        let lock = RwLock::new(0_u32);
        drop(lock.write());
        drop(lock.read());
    }

    #[test]
    fn guards_move_across_threads() {
        // Guards are Send for Send + Sync data; the semaphore-based gate
        // has no owning thread.
        let lock = RwLock::new(1_u32);
        thread::scope(|s| {
            let guard = lock.read();
            let handle = s.spawn(move || *guard);
            assert_eq!(handle.join().unwrap(), 1);
        });
        assert_eq!(lock.reader_count(), 0);
    }

    #[test]
    fn get_mut_bypasses_locking() {
        let mut lock = RwLock::new(10_u32);
        *lock.get_mut() = 20;
        assert_eq!(*lock.read(), 20);
    }

    #[test]
    fn into_inner_returns_value() {
        let lock = RwLock::new(String::from("payload"));
        assert_eq!(lock.into_inner(), "payload");
    }

    #[test]
    fn default_and_from() {
        let lock: RwLock<u32> = RwLock::default();
        assert_eq!(*lock.read(), 0);
        let lock = RwLock::from(9_u32);
        assert_eq!(*lock.read(), 9);
    }

    #[test]
    fn debug_does_not_block() {
        let lock = RwLock::new(3_u32);
        let _write = lock.write();
        // Formatting while write-locked must not deadlock.
        let dbg = format!("{lock:?}");
        assert!(dbg.contains("RwLock"));
    }
}
