use clap::Parser;
use nnfprobe::cohort::{self, ProcessIdentity};
use nnfprobe::error::Error;
use nnfprobe::probe;
use nnfprobe::resolve::{self, Strategy};
use std::path::PathBuf;
use std::process;

/// Rank-aware test-file provisioning over externally mounted storage.
///
/// Resolves each storage path to a per-node test-file location, creates
/// the file, and preallocates a small extent in it, reporting this
/// process's rank within its cohort along the way.
#[derive(Parser)]
#[command(name = "nnfprobe", version)]
struct Cli {
    /// Storage mount paths to provision (one or two)
    paths: Vec<PathBuf>,

    /// Path-resolution strategy; give one for all paths, or one per path
    #[arg(long, value_enum)]
    strategy: Vec<Strategy>,

    /// Compute-node name for node-qualified resolution; falls back to
    /// SLURM_NODENAME / SLURMD_NODENAME
    #[arg(long)]
    node_name: Option<String>,
}

fn run(cli: &Cli, identity: &ProcessIdentity) -> Result<(), Error> {
    let strategies = resolve::strategies_for(cli.paths.len(), &cli.strategy)?;
    probe::banner(identity, &cli.paths);
    let node_name = cli.node_name.clone().or_else(cohort::node_name);
    probe::run(identity, &cli.paths, &strategies, node_name.as_deref())
}

fn main() {
    let cli = Cli::parse();
    let cohort = cohort::detect();
    let identity = ProcessIdentity::from_cohort(cohort.as_ref());

    if let Err(error) = run(&cli, &identity) {
        if error.is_usage() {
            // Usage problems go to stdout, as in the demo programs this
            // utility replaces.
            println!("{}", error);
        } else {
            eprintln!("rank {}: {}", identity.rank, error);
        }
        process::exit(error.exit_code());
    }
}
