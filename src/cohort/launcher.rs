//! Cohort identity recovered from launcher environment variables.
//!
//! `mpirun`, `srun`, and the PMI/PMIx layers they build on export the
//! world rank and size to every task they spawn. Reading those variables
//! answers the identity queries without linking an MPI library, which is
//! enough for a program that never exchanges messages between ranks.
//!
//! # Environment Variables
//!
//! | Launcher | Rank | Size |
//! |----------|------|------|
//! | Open MPI | `OMPI_COMM_WORLD_RANK` | `OMPI_COMM_WORLD_SIZE` |
//! | PMIx     | `PMIX_RANK` | — |
//! | PMI (MPICH) | `PMI_RANK` | `PMI_SIZE` |
//! | SLURM    | `SLURM_PROCID` | `SLURM_NTASKS` |

use super::comm::{hostname, Cohort};
use std::env;

const RANK_VARS: &[&str] = &["OMPI_COMM_WORLD_RANK", "PMIX_RANK", "PMI_RANK", "SLURM_PROCID"];
const SIZE_VARS: &[&str] = &["OMPI_COMM_WORLD_SIZE", "PMI_SIZE", "SLURM_NTASKS"];

fn env_usize(names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().and_then(|value| value.parse().ok()))
}

/// Get the name of the compute node this process is running on, from the
/// SLURM environment.
pub fn node_name() -> Option<String> {
    env::var("SLURM_NODENAME")
        .or_else(|_| env::var("SLURMD_NODENAME"))
        .ok()
}

/// Cohort identity read from the environment a launcher set up.
pub struct LauncherCohort {
    rank: usize,
    size: usize,
}

impl LauncherCohort {
    /// Returns `Some` when a launcher exported a rank for this process.
    /// A rank without a size yields a cohort just large enough to hold it.
    pub fn from_env() -> Option<Self> {
        let rank = env_usize(RANK_VARS)?;
        let size = env_usize(SIZE_VARS).unwrap_or(rank + 1);
        Some(Self { rank, size })
    }
}

impl Cohort for LauncherCohort {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn processor_name(&self) -> String {
        node_name().unwrap_or_else(hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All environment manipulation lives in this one test; cargo runs
    // tests concurrently and the variables are process-global.
    #[test]
    fn identity_from_launcher_environment() {
        for name in RANK_VARS.iter().chain(SIZE_VARS) {
            env::remove_var(name);
        }
        env::set_var("OMPI_COMM_WORLD_RANK", "2");
        env::set_var("OMPI_COMM_WORLD_SIZE", "4");
        let cohort = LauncherCohort::from_env().unwrap();
        assert_eq!(cohort.rank(), 2);
        assert_eq!(cohort.size(), 4);
        env::remove_var("OMPI_COMM_WORLD_RANK");
        env::remove_var("OMPI_COMM_WORLD_SIZE");

        env::set_var("SLURM_PROCID", "7");
        let cohort = LauncherCohort::from_env().unwrap();
        assert_eq!(cohort.rank(), 7);
        assert_eq!(cohort.size(), 8);
        env::remove_var("SLURM_PROCID");
    }
}
