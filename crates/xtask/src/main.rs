use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "labgate developer tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every test in the workspace
    Test,
    /// Run the simulator with its default crowd
    Simulate {
        /// Park waiters on a condition variable instead of spinning
        #[arg(long)]
        blocking: bool,
    },
    /// Simulate a heavily oversubscribed lab with both lock variants
    Stress,
    /// Clean build artifacts
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    // Ensure we are in the project root
    let project_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .ok_or_else(|| anyhow::anyhow!("xtask is not inside the workspace"))?;
    sh.change_dir(project_root);

    match cli.command {
        Commands::Test => {
            cmd!(sh, "cargo test --workspace").run()?;
        }
        Commands::Simulate { blocking } => {
            let mode = if blocking { "blocking" } else { "spin" };
            cmd!(sh, "cargo run -p labgate-cli -- simulate --mode {mode}").run()?;
        }
        Commands::Stress => {
            cmd!(sh, "cargo build --release -p labgate-cli").run()?;
            for mode in ["spin", "blocking"] {
                println!("Stressing {} lock...", mode);
                cmd!(
                    sh,
                    "cargo run --release -p labgate-cli -- simulate --mode {mode} --policy strict --capacity 4 --professors 4 --tas 8 --students 64 --visits 50"
                )
                .run()?;
            }
        }
        Commands::Clean => {
            cmd!(sh, "cargo clean").run()?;
        }
    }

    Ok(())
}
