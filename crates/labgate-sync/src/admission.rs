use log::warn;

use crate::error::LabError;
use crate::types::{Class, Occupancy};

/// Entry and exit operations shared by every lab lock.
pub trait Admission: Sync {
    /// Block until a caller of `class` is admitted.
    fn enter(&self, class: Class);

    /// Admit a caller of `class` only if it can enter right now.
    fn try_enter(&self, class: Class) -> bool;

    /// Remove one caller of `class` from the lab.
    fn exit(&self, class: Class) -> Result<(), LabError>;

    fn occupancy(&self) -> Occupancy;

    fn capacity(&self) -> usize;

    fn professor_enter(&self) {
        self.enter(Class::Professor)
    }

    fn professor_exit(&self) -> Result<(), LabError> {
        self.exit(Class::Professor)
    }

    fn ta_enter(&self) {
        self.enter(Class::TeachingAssistant)
    }

    fn ta_exit(&self) -> Result<(), LabError> {
        self.exit(Class::TeachingAssistant)
    }

    fn student_enter(&self) {
        self.enter(Class::Student)
    }

    fn student_exit(&self) -> Result<(), LabError> {
        self.exit(Class::Student)
    }

    /// Enter and return a pass that exits when dropped.
    fn pass(&self, class: Class) -> LabPass<'_, Self>
    where
        Self: Sized,
    {
        self.enter(class);
        LabPass { lock: self, class }
    }
}

/// One occupant of the lab. Leaves on drop.
#[must_use = "dropping the pass exits the lab immediately"]
pub struct LabPass<'a, L: Admission> {
    lock: &'a L,
    class: Class,
}

impl<'a, L: Admission> LabPass<'a, L> {
    pub fn class(&self) -> Class {
        self.class
    }
}

impl<'a, L: Admission> Drop for LabPass<'a, L> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.exit(self.class) {
            warn!("pass exit failed: {}", e);
        }
    }
}
