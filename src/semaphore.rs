//! Blocking counting semaphore.
//!
//! A semaphore controls access to a finite number of permits. `acquire`
//! blocks the calling thread until a permit is available; `release` returns
//! a permit and wakes one waiter.
//!
//! Unlike a mutex, a semaphore has no owner: the thread that releases a
//! permit need not be the thread that acquired it. The readers-writer
//! protocol depends on this — the first reader of a group acquires the
//! writer gate and the last reader (usually a different thread) releases
//! it — so no RAII permit type is offered here.
//!
//! # Example
//!
//! ```
//! use rwgate::Semaphore;
//!
//! let sem = Semaphore::new(2);
//! sem.acquire();
//! sem.acquire();
//! assert_eq!(sem.available_permits(), 0);
//! sem.release();
//! assert_eq!(sem.available_permits(), 1);
//! ```

use parking_lot::{Condvar, Mutex};

/// A blocking counting semaphore.
///
/// Waiters park on a condition variable; no wake order among them is
/// guaranteed.
#[derive(Debug)]
pub struct Semaphore {
    /// Number of available permits.
    permits: Mutex<usize>,
    /// Signaled whenever a permit is returned.
    available: Condvar,
}

impl Semaphore {
    /// Creates a semaphore with the given number of initial permits.
    ///
    /// `Semaphore::new(1)` is a binary gate: exactly one holder at a time.
    #[must_use]
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Takes one permit, blocking until one is available.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Returns one permit and wakes a single waiter, if any.
    ///
    /// The caller need not be the thread that acquired the permit.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        drop(permits);
        self.available.notify_one();
    }

    /// Current number of available permits.
    ///
    /// Diagnostic only: the value may be stale by the time it is observed.
    #[must_use]
    pub fn available_permits(&self) -> usize {
        *self.permits.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn permits_count_down_and_up() {
        let sem = Semaphore::new(3);
        sem.acquire();
        sem.acquire();
        assert_eq!(sem.available_permits(), 1);
        sem.release();
        sem.release();
        assert_eq!(sem.available_permits(), 3);
    }

    #[test]
    fn acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(0));
        let acquired = Arc::new(AtomicBool::new(false));

        let waiter = {
            let sem = Arc::clone(&sem);
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                sem.acquire();
                acquired.store(true, Ordering::Release);
            })
        };

        // With zero permits the waiter must still be parked.
        thread::sleep(Duration::from_millis(50));
        assert!(!acquired.load(Ordering::Acquire), "acquired without permit");

        sem.release();
        waiter.join().unwrap();
        assert!(acquired.load(Ordering::Acquire));
        assert_eq!(sem.available_permits(), 0);
    }

    #[test]
    fn release_from_another_thread() {
        // A permit acquired on one thread can be released on another.
        let sem = Arc::new(Semaphore::new(1));
        sem.acquire();

        let releaser = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || sem.release())
        };
        releaser.join().unwrap();

        assert_eq!(sem.available_permits(), 1);
    }

    #[test]
    fn each_release_wakes_one_waiter() {
        let sem = Arc::new(Semaphore::new(0));
        let mut waiters = Vec::new();
        for _ in 0..3 {
            let sem = Arc::clone(&sem);
            waiters.push(thread::spawn(move || sem.acquire()));
        }

        for _ in 0..3 {
            sem.release();
        }
        for waiter in waiters {
            waiter.join().unwrap();
        }
        assert_eq!(sem.available_permits(), 0);
    }
}
