use core::cell::UnsafeCell;
use core::hint;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use super::RawMutex;

/// Test-and-test-and-set spinlock.
#[derive(Debug, Default)]
pub struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

unsafe impl RawMutex for RawSpinLock {
    fn init(&mut self) {
        *self.locked.get_mut() = false;
    }

    fn acquire(&self) {
        loop {
            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }
            // Spin on a plain load so waiters don't fight over the cache line
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    unsafe fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

/// Data protected by a [`RawMutex`], spinlock by default.
pub struct SpinLock<T, R = RawSpinLock> {
    raw: R,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send, R: RawMutex + Sync> Sync for SpinLock<T, R> {}
unsafe impl<T: Send, R: RawMutex + Send> Send for SpinLock<T, R> {}

impl<T> SpinLock<T, RawSpinLock> {
    pub const fn new(data: T) -> Self {
        Self {
            raw: RawSpinLock::new(),
            data: UnsafeCell::new(data),
        }
    }
}

impl<T, R: RawMutex> SpinLock<T, R> {
    /// Bind `data` to a caller-supplied primitive, initializing it first.
    pub fn with_raw(mut raw: R, data: T) -> Self {
        raw.init();
        Self {
            raw,
            data: UnsafeCell::new(data),
        }
    }

    pub fn lock(&self) -> SpinLockGuard<'_, T, R> {
        self.raw.acquire();
        SpinLockGuard { lock: self }
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

pub struct SpinLockGuard<'a, T, R: RawMutex = RawSpinLock> {
    lock: &'a SpinLock<T, R>,
}

impl<'a, T, R: RawMutex> Deref for SpinLockGuard<'a, T, R> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'a, T, R: RawMutex> DerefMut for SpinLockGuard<'a, T, R> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<'a, T, R: RawMutex> Drop for SpinLockGuard<'a, T, R> {
    fn drop(&mut self) {
        // The guard only exists while `acquire` has returned and not been undone
        unsafe { self.lock.raw.release() }
    }
}
