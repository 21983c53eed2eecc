use core::fmt;
use labgate_sync::{Class, Occupancy};
use std::time::Duration;

/// What a simulation run observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Completed visits per class, indexed by `Class::index`
    pub visits: [usize; 3],
    pub peak_in_lab: [usize; 3],
    /// Most TAs and students seen in the lab at once
    pub peak_shared: usize,
    pub samples: usize,
    pub elapsed: Duration,
}

impl Report {
    pub fn record(&mut self, occupancy: &Occupancy) {
        for class in Class::ALL {
            let peak = &mut self.peak_in_lab[class.index()];
            *peak = (*peak).max(occupancy.in_lab(class));
        }
        self.peak_shared = self.peak_shared.max(occupancy.shared());
        self.samples += 1;
    }

    pub fn visits(&self, class: Class) -> usize {
        self.visits[class.index()]
    }

    pub fn peak(&self, class: Class) -> usize {
        self.peak_in_lab[class.index()]
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {:>8} {:>10}", "class", "visits", "peak")?;
        for class in Class::ALL {
            writeln!(
                f,
                "{:<20} {:>8} {:>10}",
                class.to_string(),
                self.visits(class),
                self.peak(class)
            )?;
        }
        writeln!(f, "peak shared occupancy: {}", self.peak_shared)?;
        write!(f, "{} samples in {:?}", self.samples, self.elapsed)
    }
}
