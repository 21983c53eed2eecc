//! Lab lock whose waiters sleep on a condition variable instead of spinning.
//!
//! Admission predicates and counter updates are the same as [`LabLock`]'s.
//!
//! [`LabLock`]: crate::LabLock

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::admission::Admission;
use crate::error::LabError;
use crate::state::Lab;
use crate::types::{Class, LabConfig, Occupancy};

pub struct BlockingLabLock {
    lab: Mutex<Lab>,
    changed: Condvar,
}

impl BlockingLabLock {
    pub fn new() -> Self {
        Self::from_lab(Lab::new(LabConfig::default()))
    }

    pub fn with_config(config: LabConfig) -> Result<Self, LabError> {
        config.validate()?;
        Ok(Self::from_lab(Lab::new(config)))
    }

    fn from_lab(lab: Lab) -> Self {
        Self {
            lab: Mutex::new(lab),
            changed: Condvar::new(),
        }
    }

    pub fn config(&self) -> LabConfig {
        self.lock().config
    }

    // Every critical section leaves the counters consistent, so a panic
    // elsewhere while holding the mutex doesn't invalidate them.
    fn lock(&self) -> MutexGuard<'_, Lab> {
        self.lab.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BlockingLabLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Admission for BlockingLabLock {
    fn enter(&self, class: Class) {
        let mut lab = self.lock();
        lab.state.enqueue(class);
        let mut lab = self
            .changed
            .wait_while(lab, |lab| !lab.admits(class))
            .unwrap_or_else(PoisonError::into_inner);
        lab.state.admit(class);
        drop(lab);

        // A waiting counter just dropped, which can open the lab to lower classes
        if class != Class::Student {
            self.changed.notify_all();
        }
    }

    fn try_enter(&self, class: Class) -> bool {
        self.lock().try_admit(class)
    }

    fn exit(&self, class: Class) -> Result<(), LabError> {
        self.lock().release(class)?;
        self.changed.notify_all();
        Ok(())
    }

    fn occupancy(&self) -> Occupancy {
        self.lock().state.occupancy()
    }

    fn capacity(&self) -> usize {
        self.lock().config.capacity
    }
}
