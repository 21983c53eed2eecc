//! Priority-tiered, capacity-bounded admission lock.
//!
//! Three classes of callers share a lab: professors, teaching assistants and
//! students, in that order of priority. Professors occupy the lab exclusively.
//! TAs and students share [`CAPACITY`] seats; a queued TA keeps students out,
//! and a queued professor keeps everyone else out.
//!
//! Two variants implement [`Admission`]: [`LabLock`] retries under a raw
//! spinlock, [`BlockingLabLock`] parks waiters on a condition variable.

pub mod admission;
pub mod blocking;
pub mod error;
pub mod lab;
pub mod state;
pub mod sync;
pub mod types;

pub use admission::{Admission, LabPass};
pub use blocking::BlockingLabLock;
pub use error::LabError;
pub use lab::LabLock;
pub use state::LockState;
pub use sync::{RawMutex, RawSpinLock, SpinLock, SpinLockGuard};
pub use types::{Class, ExitPolicy, LabConfig, Occupancy, CAPACITY};
