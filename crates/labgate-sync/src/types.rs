use core::fmt;

use crate::error::LabError;

/// Default number of seats in the lab.
pub const CAPACITY: usize = 20;

/// Caller class, ordered from highest to lowest priority.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Class {
    Professor,
    TeachingAssistant,
    Student,
}

impl Class {
    pub const ALL: [Class; 3] = [Class::Professor, Class::TeachingAssistant, Class::Student];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Class::Professor => "professor",
            Class::TeachingAssistant => "teaching assistant",
            Class::Student => "student",
        };
        f.write_str(name)
    }
}

/// What to do when an exit call has no matching occupant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ExitPolicy {
    /// Keep the count at zero and carry on.
    #[default]
    Clamp,
    /// Keep the count at zero and report `LabError::UnbalancedExit`.
    Strict,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LabConfig {
    pub capacity: usize,
    pub exit_policy: ExitPolicy,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            capacity: CAPACITY,
            exit_policy: ExitPolicy::Clamp,
        }
    }
}

impl LabConfig {
    pub fn validate(&self) -> Result<(), LabError> {
        if self.capacity == 0 {
            return Err(LabError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Point-in-time copy of the lock counters, taken under the lock's mutex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Occupancy {
    pub professors_in_lab: usize,
    pub tas_in_lab: usize,
    pub students_in_lab: usize,
    pub professors_waiting: usize,
    pub tas_waiting: usize,
}

impl Occupancy {
    pub fn in_lab(&self, class: Class) -> usize {
        match class {
            Class::Professor => self.professors_in_lab,
            Class::TeachingAssistant => self.tas_in_lab,
            Class::Student => self.students_in_lab,
        }
    }

    /// Seats taken by TAs and students together.
    pub fn shared(&self) -> usize {
        self.tas_in_lab + self.students_in_lab
    }

    pub fn is_empty(&self) -> bool {
        self.professors_in_lab == 0 && self.shared() == 0
    }

    pub fn check(&self, capacity: usize) -> Result<(), LabError> {
        if self.shared() > capacity {
            return Err(LabError::InvariantViolated(format!(
                "{} TAs and {} students exceed capacity {}",
                self.tas_in_lab, self.students_in_lab, capacity
            )));
        }
        if self.professors_in_lab > capacity {
            return Err(LabError::InvariantViolated(format!(
                "{} professors exceed capacity {}",
                self.professors_in_lab, capacity
            )));
        }
        if self.professors_in_lab > 0 && self.shared() > 0 {
            return Err(LabError::InvariantViolated(format!(
                "{} professors share the lab with {} TAs and {} students",
                self.professors_in_lab, self.tas_in_lab, self.students_in_lab
            )));
        }
        Ok(())
    }
}
