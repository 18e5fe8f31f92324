//! Rank-aware test-file provisioning over externally mounted storage.
//!
//! Compute nodes in a cluster see one or two rabbit storage mounts, and
//! each process in a cohort wants a small preallocated test file under a
//! per-node location inside those mounts. This crate resolves a storage
//! mount to a concrete test-file path with a configurable
//! [`resolve::Strategy`], creates the file, and reserves a fixed extent in
//! it, reporting the process's cohort identity along the way.
//!
//! The messaging runtime that assigns rank and cohort size is consumed
//! through the [`cohort::Cohort`] trait, never implemented here. A real
//! MPI library can sit behind that trait (with the `mpi` feature), but the
//! prober is equally happy reading the rank its launcher exported to the
//! environment, or running solo.

pub mod cohort;
pub mod error;
pub mod probe;
pub mod resolve;

pub use cohort::{Cohort, ProcessIdentity};
pub use error::{Error, Result};
pub use resolve::{Resolution, Strategy};
