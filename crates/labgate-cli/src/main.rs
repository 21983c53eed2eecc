use clap::{Parser, Subcommand, ValueEnum};
use labgate_runtime::{LockMode, Runtime, SimConfig};
use labgate_sync::{ExitPolicy, LabConfig, CAPACITY};
use log::debug;
use std::error::Error;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run professors, TAs and students against the lab lock
    Simulate {
        #[arg(long, default_value_t = 2)]
        professors: usize,

        #[arg(long, default_value_t = 6)]
        tas: usize,

        #[arg(long, default_value_t = 40)]
        students: usize,

        /// Enter/exit cycles per visitor
        #[arg(long, default_value_t = 10)]
        visits: usize,

        /// Seats shared by TAs and students
        #[arg(long, default_value_t = CAPACITY)]
        capacity: usize,

        #[arg(long, value_enum, default_value_t = Mode::Spin)]
        mode: Mode,

        /// How to treat an exit with nobody of that class in the lab
        #[arg(long, value_enum, default_value_t = Policy::Clamp)]
        policy: Policy,

        /// Longest time a visitor stays in the lab, in microseconds
        #[arg(long, default_value_t = 200)]
        max_dwell_us: u64,

        #[arg(long, default_value_t = 391)]
        seed: u64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Spin,
    Blocking,
}

impl From<Mode> for LockMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Spin => LockMode::Spin,
            Mode::Blocking => LockMode::Blocking,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Policy {
    Clamp,
    Strict,
}

impl From<Policy> for ExitPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Clamp => ExitPolicy::Clamp,
            Policy::Strict => ExitPolicy::Strict,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            professors,
            tas,
            students,
            visits,
            capacity,
            mode,
            policy,
            max_dwell_us,
            seed,
        } => {
            let config = SimConfig {
                lab: LabConfig {
                    capacity,
                    exit_policy: policy.into(),
                },
                mode: mode.into(),
                professors,
                tas,
                students,
                visits,
                max_dwell: Duration::from_micros(max_dwell_us),
                seed,
            };
            debug!("{:?}", config);

            println!(
                "Simulating {} professors, {} TAs, {} students in a lab of {}...",
                professors, tas, students, capacity
            );

            let runtime = Runtime::new(config)?;
            let report = runtime.run()?;

            println!("{}", report);
            println!("All occupancy invariants held.");
        }
    }

    Ok(())
}
