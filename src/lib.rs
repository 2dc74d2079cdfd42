//! Blocking readers-writer lock with reader-preference.
//!
//! This crate implements the classic "first readers-writer problem"
//! solution: an entry mutex serializes reader bookkeeping, and a
//! one-permit writer gate arbitrates exclusive access. The first reader
//! takes the gate on behalf of the whole reader group; the last reader
//! returns it.
//!
//! # Reader-Preference Fairness
//!
//! This lock uses a **reader-preference** policy: as long as at least one
//! reader is active, newly arriving readers join the group without ever
//! contending for the writer gate. A waiting writer gets the gate only
//! when the active-reader count drops to zero.
//!
//! ## Fairness Characteristics
//!
//! | Scenario                  | Behavior                                      |
//! |---------------------------|-----------------------------------------------|
//! | No writer active          | Readers acquire immediately                   |
//! | Writer active             | First reader blocks on the gate; later readers queue behind it on the entry mutex |
//! | Existing readers + writer | Writer waits for all readers to release       |
//! | Multiple writers          | Writers contend on the gate; wake order is whatever the gate's condvar picks |
//!
//! ## Starvation Analysis
//!
//! - **Reader starvation**: Prevented while readers overlap. A reader never
//!   waits on the gate unless it is the first of its group.
//! - **Writer starvation**: Possible. Under continuous reader arrivals the
//!   active-reader count may never reach zero, and a writer waits
//!   indefinitely. This is inherent to the protocol and deliberately not
//!   papered over with a writer-preference policy.
//!
//! # Layers
//!
//! - [`Semaphore`]: blocking counting semaphore, the gate building block
//! - [`RawRwLock`]: the bare protocol, no payload, manual acquire/release
//! - [`RwLock`]: data-owning lock with [`RwLockReadGuard`] /
//!   [`RwLockWriteGuard`] scoped release
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use rwgate::RwLock;
//!
//! let lock = Arc::new(RwLock::new(vec![1, 2, 3]));
//!
//! // Multiple readers can access concurrently.
//! let r1 = lock.read();
//! let r2 = lock.read();
//! assert_eq!(r1.len(), r2.len());
//! drop((r1, r2));
//!
//! // A writer gets exclusive access.
//! let writer = {
//!     let lock = Arc::clone(&lock);
//!     thread::spawn(move || lock.write().push(4))
//! };
//! writer.join().unwrap();
//! assert_eq!(lock.read().len(), 4);
//! ```

#![warn(missing_docs)]

mod raw;
mod rwlock;
mod semaphore;

pub use raw::RawRwLock;
pub use rwlock::{RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use semaphore::Semaphore;
