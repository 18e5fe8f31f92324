//! A minimal seam over the message-passing runtime.
//!
//! This module exports the identity queries the prober needs, encapsulated
//! by the [`comm::Cohort`] trait. Implementors only need to answer for the
//! process's rank, the cohort size, and a processor name; the prober never
//! exchanges messages between ranks. Three backends are included: a real
//! MPI runtime behind a thin C shim (with the `mpi` feature), identity
//! recovered from launcher environment variables, and a solo fallback for
//! runs outside any launcher.

mod comm;
mod launcher;
#[cfg(feature = "mpi")]
mod mpi;
mod solo;

pub use comm::{hostname, Cohort, ProcessIdentity};
pub use launcher::{node_name, LauncherCohort};
#[cfg(feature = "mpi")]
pub use mpi::MpiCohort;
pub use solo::SoloCohort;

/// Attaches to the most capable runtime available: the MPI library when
/// the `mpi` feature is enabled and initializes, else the launcher
/// environment, else a solo cohort of one.
pub fn detect() -> Box<dyn Cohort> {
    #[cfg(feature = "mpi")]
    {
        if let Some(cohort) = MpiCohort::init() {
            return Box::new(cohort);
        }
    }
    match LauncherCohort::from_env() {
        Some(cohort) => Box::new(cohort),
        None => Box::new(SoloCohort::new()),
    }
}
