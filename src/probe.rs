//! Test-file provisioning and the per-target run loop.

use crate::cohort::ProcessIdentity;
use crate::error::{Error, Result};
use crate::resolve::{self, Strategy};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Bytes reserved in every test file. Space only; no content is written.
pub const PREALLOCATE_BYTES: u64 = 100;

/// Prints the identity banner for this process, in the format the demo
/// programs this utility replaces used.
pub fn banner(identity: &ProcessIdentity, targets: &[PathBuf]) {
    let paths = targets
        .iter()
        .map(|target| target.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Hello world from processor {}, rank {} out of {} processors. \
         NNF storage path(s): {}, hostname: {}",
        identity.processor_name, identity.rank, identity.size, paths, identity.hostname
    );
}

/// Creates the test file at `path` if absent and reserves
/// [`PREALLOCATE_BYTES`] bytes in it starting at offset zero.
pub fn provision(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .map_err(|source| Error::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;
    preallocate(&file, PREALLOCATE_BYTES).map_err(|source| Error::Preallocate {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(target_os = "linux")]
fn preallocate(file: &File, len: u64) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;
    // posix_fallocate reports failure through its return value, not errno.
    let ret = unsafe { libc::posix_fallocate(file.as_raw_fd(), 0, len as libc::off_t) };
    if ret == 0 {
        Ok(())
    } else {
        Err(std::io::Error::from_raw_os_error(ret))
    }
}

/// Platforms without `posix_fallocate` get the portable best effort of
/// extending the file instead.
#[cfg(not(target_os = "linux"))]
fn preallocate(file: &File, len: u64) -> std::io::Result<()> {
    file.set_len(len)
}

/// Resolves and provisions every target in order, stopping at the first
/// failure: a failed first target means the second is never attempted.
/// Resolutions and outcomes go to stdout.
pub fn run(
    identity: &ProcessIdentity,
    targets: &[PathBuf],
    strategies: &[Strategy],
    node_name: Option<&str>,
) -> Result<()> {
    for (target, strategy) in targets.iter().zip(strategies) {
        let resolution = resolve::resolve(target, *strategy, node_name)?;
        for dir in &resolution.indexed_dirs {
            println!("Found indexed dir: {}", dir.display());
        }
        println!(
            "rank {}: test file: {}",
            identity.rank,
            resolution.file_path.display()
        );
        provision(&resolution.file_path)?;
        println!(
            "rank {}: wrote file to '{}'",
            identity.rank,
            resolution.file_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_identity() -> ProcessIdentity {
        ProcessIdentity {
            rank: 0,
            size: 1,
            processor_name: String::from("test-node"),
            hostname: String::from("test-node"),
        }
    }

    #[test]
    fn provision_reserves_the_full_extent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testfile");
        provision(&path).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() >= PREALLOCATE_BYTES);
    }

    #[test]
    fn provision_leaves_an_existing_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testfile");
        fs::write(&path, vec![7u8; 200]).unwrap();
        provision(&path).unwrap();
        // Create-without-truncate: the longer extent survives.
        assert_eq!(fs::metadata(&path).unwrap().len(), 200);
    }

    #[test]
    fn provision_into_a_missing_directory_fails_with_the_os_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("testfile");
        let error = provision(&path).unwrap_err();
        match error {
            Error::FileCreate { source, .. } => {
                assert_eq!(source.raw_os_error(), Some(libc::ENOENT))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn dual_targets_are_provisioned_independently() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let targets = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        run(
            &test_identity(),
            &targets,
            &[Strategy::Literal, Strategy::Literal],
            None,
        )
        .unwrap();
        assert!(first.path().join("testfile").exists());
        assert!(second.path().join("testfile").exists());
    }

    #[test]
    fn first_target_failure_prevents_the_second_attempt() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let targets = vec![first.path().join("gone"), second.path().to_path_buf()];
        let error = run(
            &test_identity(),
            &targets,
            &[Strategy::Literal, Strategy::Literal],
            None,
        )
        .unwrap_err();
        assert!(matches!(error, Error::FileCreate { .. }));
        assert!(!second.path().join("testfile").exists());
    }

    #[test]
    fn node_qualified_run_writes_under_the_node_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("rabbit-node-1-0")).unwrap();
        let targets = vec![dir.path().to_path_buf()];
        run(
            &test_identity(),
            &targets,
            &[Strategy::NodeQualified],
            Some("rabbit-node-1"),
        )
        .unwrap();
        assert!(dir.path().join("rabbit-node-1-0").join("testfile").exists());
    }
}
