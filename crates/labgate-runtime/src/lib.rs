pub mod error;
pub mod report;

pub use error::RuntimeError;
pub use report::Report;

use labgate_sync::{
    Admission, BlockingLabLock, Class, LabConfig, LabError, LabLock, RawSpinLock,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LockMode {
    /// Waiters retry under the raw spinlock.
    #[default]
    Spin,
    /// Waiters sleep on a condition variable.
    Blocking,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub lab: LabConfig,
    pub mode: LockMode,
    pub professors: usize,
    pub tas: usize,
    pub students: usize,
    /// Enter/exit cycles per visitor
    pub visits: usize,
    pub max_dwell: Duration,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lab: LabConfig::default(),
            mode: LockMode::Spin,
            professors: 2,
            tas: 6,
            students: 40,
            visits: 10,
            max_dwell: Duration::from_micros(200),
            seed: 391,
        }
    }
}

impl SimConfig {
    fn visitors(&self, class: Class) -> usize {
        match class {
            Class::Professor => self.professors,
            Class::TeachingAssistant => self.tas,
            Class::Student => self.students,
        }
    }
}

pub struct Runtime {
    config: SimConfig,
    lock: Box<dyn Admission + Send>,
}

impl Runtime {
    pub fn new(config: SimConfig) -> Result<Self, RuntimeError> {
        if config.visits == 0 {
            return Err(RuntimeError::InvalidConfig(
                "visits must be at least 1".into(),
            ));
        }

        let lock: Box<dyn Admission + Send> = match config.mode {
            LockMode::Spin => Box::new(LabLock::with_config(RawSpinLock::new(), config.lab)?),
            LockMode::Blocking => Box::new(BlockingLabLock::with_config(config.lab)?),
        };

        Ok(Self { config, lock })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run every visitor to completion while a monitor samples occupancy.
    pub fn run(&self) -> Result<Report, RuntimeError> {
        info!(
            "Simulating {} professors, {} TAs, {} students ({:?}, capacity {})",
            self.config.professors,
            self.config.tas,
            self.config.students,
            self.config.mode,
            self.lock.capacity()
        );

        let lock = self.lock.as_ref();
        let done = AtomicBool::new(false);
        let start = Instant::now();

        let (mut report, visits) = thread::scope(|s| -> Result<_, RuntimeError> {
            let sampler = thread::Builder::new()
                .name("monitor".into())
                .spawn_scoped(s, || monitor(lock, &done))?;
            let stop = StopMonitor(&done);

            let mut visitors = Vec::new();
            for class in Class::ALL {
                for index in 0..self.config.visitors(class) {
                    let seed = self.config.seed ^ (((class.index() as u64) << 32) | index as u64);
                    let handle = thread::Builder::new()
                        .name(format!("{:?}-{}", class, index))
                        .spawn_scoped(s, move || self.visit(lock, class, seed))?;
                    visitors.push((class, index, handle));
                }
            }

            let mut visits = [0usize; 3];
            let mut failure = None;
            for (class, index, handle) in visitors {
                match handle.join() {
                    Ok(Ok(count)) => visits[class.index()] += count,
                    Ok(Err(e)) => {
                        failure.get_or_insert(RuntimeError::Lab(e));
                    }
                    Err(_) => {
                        failure.get_or_insert(RuntimeError::VisitorPanicked { class, index });
                    }
                }
            }

            drop(stop);
            let report = sampler.join().map_err(|_| RuntimeError::MonitorPanicked)??;

            match failure {
                Some(e) => Err(e),
                None => Ok((report, visits)),
            }
        })?;

        report.visits = visits;
        report.elapsed = start.elapsed();

        let remaining = lock.occupancy();
        if !remaining.is_empty() {
            return Err(RuntimeError::Lab(LabError::InvariantViolated(format!(
                "lab not empty after all visitors left: {:?}",
                remaining
            ))));
        }

        info!("Simulation finished in {:?}", report.elapsed);
        Ok(report)
    }

    fn visit(&self, lock: &dyn Admission, class: Class, seed: u64) -> Result<usize, LabError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_dwell = self.config.max_dwell.as_micros() as u64;

        for _ in 0..self.config.visits {
            lock.enter(class);
            thread::sleep(Duration::from_micros(rng.gen_range(0..=max_dwell)));
            lock.exit(class)?;
            thread::yield_now();
        }

        debug!("{} finished {} visits", class, self.config.visits);
        Ok(self.config.visits)
    }
}

/// Stops the monitor when visitors are done, or when spawning them fails.
struct StopMonitor<'a>(&'a AtomicBool);

impl Drop for StopMonitor<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

fn monitor(lock: &dyn Admission, done: &AtomicBool) -> Result<Report, RuntimeError> {
    let capacity = lock.capacity();
    let mut report = Report::default();

    while !done.load(Ordering::Acquire) {
        let occupancy = lock.occupancy();
        occupancy.check(capacity)?;
        report.record(&occupancy);
        thread::sleep(Duration::from_micros(50));
    }

    Ok(report)
}
