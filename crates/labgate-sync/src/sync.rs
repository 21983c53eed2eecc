pub mod spinlock;

pub use spinlock::{RawSpinLock, SpinLock, SpinLockGuard};

/// Low-level mutual exclusion primitive the lab lock is built on.
///
/// # Safety
///
/// Implementors must guarantee that between a return from `acquire` and the
/// matching `release`, no other `acquire` on the same value returns.
pub unsafe trait RawMutex {
    /// Put the primitive into its unlocked state.
    fn init(&mut self);

    /// Block until exclusive ownership is obtained.
    fn acquire(&self);

    /// Release ownership.
    ///
    /// # Safety
    ///
    /// The caller must currently own the primitive through `acquire`.
    unsafe fn release(&self);
}
