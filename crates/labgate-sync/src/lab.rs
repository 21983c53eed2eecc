//! Spin-retry lab lock.
//!
//! Each attempt takes the mutex, tests the admission predicate and either
//! admits the caller or releases the mutex and yields before trying again.
//! The mutex is never held across the wait, so the occupant whose exit
//! unblocks the predicate can always get in.

use std::thread;

use crate::admission::Admission;
use crate::error::LabError;
use crate::state::Lab;
use crate::sync::{RawMutex, RawSpinLock, SpinLock};
use crate::types::{Class, LabConfig, Occupancy};

pub struct LabLock<R: RawMutex = RawSpinLock> {
    lab: SpinLock<Lab, R>,
}

impl<R: RawMutex> LabLock<R> {
    /// Zero every counter and bind `mutex`, initializing it.
    pub fn create(mutex: R) -> Self {
        Self {
            lab: SpinLock::with_raw(mutex, Lab::new(LabConfig::default())),
        }
    }

    pub fn with_config(mutex: R, config: LabConfig) -> Result<Self, LabError> {
        config.validate()?;
        Ok(Self {
            lab: SpinLock::with_raw(mutex, Lab::new(config)),
        })
    }

    pub fn config(&self) -> LabConfig {
        self.lab.lock().config
    }
}

impl LabLock<RawSpinLock> {
    pub fn new() -> Self {
        Self::create(RawSpinLock::new())
    }
}

impl Default for LabLock<RawSpinLock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RawMutex + Sync> Admission for LabLock<R> {
    fn enter(&self, class: Class) {
        let mut lab = self.lab.lock();
        lab.state.enqueue(class);
        while !lab.admits(class) {
            drop(lab);
            thread::yield_now();
            lab = self.lab.lock();
        }
        lab.state.admit(class);
    }

    fn try_enter(&self, class: Class) -> bool {
        self.lab.lock().try_admit(class)
    }

    fn exit(&self, class: Class) -> Result<(), LabError> {
        self.lab.lock().release(class)
    }

    fn occupancy(&self) -> Occupancy {
        self.lab.lock().state.occupancy()
    }

    fn capacity(&self) -> usize {
        self.lab.lock().config.capacity
    }
}
