//! Counters shared by every lock variant, and the admission rules over them.
//!
//! Nothing here synchronizes: callers hold their mutex around every method.

use log::{trace, warn};

use crate::error::LabError;
use crate::types::{Class, ExitPolicy, LabConfig, Occupancy};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockState {
    in_lab: [usize; 3],
    professors_waiting: usize,
    tas_waiting: usize,
}

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    fn count(&self, class: Class) -> usize {
        self.in_lab[class.index()]
    }

    fn shared(&self) -> usize {
        self.count(Class::TeachingAssistant) + self.count(Class::Student)
    }

    /// Admission predicate for `class` against `capacity`.
    pub fn admits(&self, class: Class, capacity: usize) -> bool {
        match class {
            Class::Professor => {
                self.count(Class::Professor) < capacity && self.shared() == 0
            }
            Class::TeachingAssistant => {
                self.shared() < capacity
                    && self.count(Class::Professor) == 0
                    && self.professors_waiting == 0
            }
            Class::Student => {
                self.shared() < capacity
                    && self.count(Class::Professor) == 0
                    && self.professors_waiting == 0
                    && self.tas_waiting == 0
            }
        }
    }

    /// Record a caller queueing to enter. Students are never tracked.
    pub fn enqueue(&mut self, class: Class) {
        match class {
            Class::Professor => self.professors_waiting += 1,
            Class::TeachingAssistant => self.tas_waiting += 1,
            Class::Student => {}
        }
    }

    /// Withdraw a queued caller without admitting it.
    pub fn dequeue(&mut self, class: Class) {
        match class {
            Class::Professor => {
                self.professors_waiting = self.professors_waiting.saturating_sub(1)
            }
            Class::TeachingAssistant => self.tas_waiting = self.tas_waiting.saturating_sub(1),
            Class::Student => {}
        }
    }

    /// Move a queued caller into the lab. The predicate must already hold.
    pub fn admit(&mut self, class: Class) {
        self.dequeue(class);
        self.in_lab[class.index()] += 1;
        trace!("{} admitted, lab now {:?}", class, self.in_lab);
    }

    /// One non-blocking admission attempt, leaving no waiting counter behind.
    pub fn try_admit(&mut self, class: Class, capacity: usize) -> bool {
        if self.admits(class, capacity) {
            self.in_lab[class.index()] += 1;
            trace!("{} admitted on first try, lab now {:?}", class, self.in_lab);
            true
        } else {
            false
        }
    }

    /// Remove one occupant of `class`, floor-clamped at zero.
    pub fn release(&mut self, class: Class, policy: ExitPolicy) -> Result<(), LabError> {
        let slot = &mut self.in_lab[class.index()];
        if *slot == 0 {
            return match policy {
                ExitPolicy::Clamp => {
                    warn!("{} exited an empty lab, count clamped at zero", class);
                    Ok(())
                }
                ExitPolicy::Strict => Err(LabError::UnbalancedExit { class }),
            };
        }
        *slot -= 1;
        trace!("{} left, lab now {:?}", class, self.in_lab);
        Ok(())
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            professors_in_lab: self.count(Class::Professor),
            tas_in_lab: self.count(Class::TeachingAssistant),
            students_in_lab: self.count(Class::Student),
            professors_waiting: self.professors_waiting,
            tas_waiting: self.tas_waiting,
        }
    }
}

/// State plus the config it is judged against.
#[derive(Debug)]
pub(crate) struct Lab {
    pub(crate) state: LockState,
    pub(crate) config: LabConfig,
}

impl Lab {
    pub(crate) fn new(config: LabConfig) -> Self {
        Self {
            state: LockState::new(),
            config,
        }
    }

    pub(crate) fn admits(&self, class: Class) -> bool {
        self.state.admits(class, self.config.capacity)
    }

    pub(crate) fn try_admit(&mut self, class: Class) -> bool {
        self.state.try_admit(class, self.config.capacity)
    }

    pub(crate) fn release(&mut self, class: Class) -> Result<(), LabError> {
        self.state.release(class, self.config.exit_policy)
    }
}
