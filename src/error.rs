//! Error types for the storage prober.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for prober operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a probe run. Every variant is terminal: the
/// prober never retries and never downgrades a failure to a warning.
#[derive(Error, Debug)]
pub enum Error {
    /// No storage path was given on the command line
    #[error("Storage parameter not supplied")]
    MissingStorage,

    /// More storage paths than the prober provisions
    #[error("too many storage paths supplied: {0} (at most 2)")]
    TooManyStorage(usize),

    /// Strategy flags that map to neither one target nor all of them
    #[error("supply one --strategy for all paths, or one per path")]
    StrategyMismatch,

    /// Node-qualified resolution with no node name from flag or environment
    #[error("node name not supplied (use --node-name or set SLURMD_NODENAME)")]
    MissingNodeName,

    /// The scan target could not be listed
    #[error("error opening directory '{path}': {source}")]
    DirectoryScan { path: PathBuf, source: io::Error },

    /// The scan target has no indexed subdirectories to pick from
    #[error("no indexed directories under '{0}'")]
    NoIndexedDirs(PathBuf),

    /// The test file could not be created
    #[error("error opening file '{path}': {source}")]
    FileCreate { path: PathBuf, source: io::Error },

    /// The test-file extent could not be reserved
    #[error("error allocating file '{path}': {source}")]
    Preallocate { path: PathBuf, source: io::Error },
}

impl Error {
    /// True for input-validation failures. The demo programs this utility
    /// replaces reported those on stdout rather than stderr, and the CLI
    /// keeps that behavior.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::MissingStorage
                | Error::TooManyStorage(_)
                | Error::StrategyMismatch
                | Error::MissingNodeName
        )
    }

    /// Process exit status for this error: negative for usage failures,
    /// the raw OS error code for I/O failures, 1 when the OS gave none.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingStorage
            | Error::TooManyStorage(_)
            | Error::StrategyMismatch
            | Error::MissingNodeName => -1,
            Error::NoIndexedDirs(_) => 1,
            Error::DirectoryScan { source, .. }
            | Error::FileCreate { source, .. }
            | Error::Preallocate { source, .. } => source.raw_os_error().unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_negative() {
        assert!(Error::MissingStorage.is_usage());
        assert_eq!(Error::MissingStorage.exit_code(), -1);
        assert_eq!(Error::TooManyStorage(3).exit_code(), -1);
        assert_eq!(Error::MissingNodeName.exit_code(), -1);
    }

    #[test]
    fn io_errors_carry_the_os_code() {
        let error = Error::FileCreate {
            path: PathBuf::from("/nnf/testfile"),
            source: io::Error::from_raw_os_error(libc::EACCES),
        };
        assert!(!error.is_usage());
        assert_eq!(error.exit_code(), libc::EACCES);
    }

    #[test]
    fn empty_scan_is_not_a_usage_error() {
        let error = Error::NoIndexedDirs(PathBuf::from("/nnf"));
        assert!(!error.is_usage());
        assert_eq!(error.exit_code(), 1);
    }
}
