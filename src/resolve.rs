//! Resolution of storage targets to concrete test-file paths.
//!
//! A storage target is an externally mounted path handed to the prober.
//! On the clusters this utility was written for, those are GFS2 mounts
//! carrying one indexed subdirectory per compute node that has access to
//! the storage, e.g. `/mnt/nnf/5d335081-…-0/rabbit-node-1-0/`. The three
//! strategies below cover the observed ways of descending from the mount
//! to a per-node test-file location.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the test file created under every resolved location.
pub const TEST_FILE_NAME: &str = "testfile";

/// How a storage target is turned into a test-file path. Always explicit
/// configuration, never inferred from the target itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Join the target with the test-file name directly.
    Literal,
    /// Scan the target's indexed subdirectories and pick the
    /// lexicographically last one. The filesystem lists children in an
    /// unspecified order, so the scan sorts before picking.
    ScanLast,
    /// Join the target with `{node}-0`, where `node` names this compute
    /// node.
    NodeQualified,
}

/// The outcome of resolving one storage target. Computed once per run and
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Full path of the test file to provision.
    pub file_path: PathBuf,
    /// Children seen while scanning, in sorted order. Empty for the
    /// non-scanning strategies.
    pub indexed_dirs: Vec<PathBuf>,
}

/// Resolves `target` with the given strategy. `node_name` is consulted
/// only by [`Strategy::NodeQualified`], and its absence is an error only
/// there.
pub fn resolve(target: &Path, strategy: Strategy, node_name: Option<&str>) -> Result<Resolution> {
    match strategy {
        Strategy::Literal => Ok(Resolution {
            file_path: target.join(TEST_FILE_NAME),
            indexed_dirs: Vec::new(),
        }),
        Strategy::ScanLast => {
            let indexed_dirs = scan_indexed_dirs(target)?;
            let file_path = match indexed_dirs.last() {
                Some(last) => last.join(TEST_FILE_NAME),
                None => return Err(Error::NoIndexedDirs(target.to_path_buf())),
            };
            Ok(Resolution {
                file_path,
                indexed_dirs,
            })
        }
        Strategy::NodeQualified => {
            let node = node_name.ok_or(Error::MissingNodeName)?;
            Ok(Resolution {
                file_path: target.join(format!("{}-0", node)).join(TEST_FILE_NAME),
                indexed_dirs: Vec::new(),
            })
        }
    }
}

/// Lists the immediate children of `target`, sorted by path name. The
/// `.`/`..` pseudo-entries never appear. Sorting makes the pick-last
/// selection deterministic across filesystems.
pub fn scan_indexed_dirs(target: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(target).map_err(|source| Error::DirectoryScan {
        path: target.to_path_buf(),
        source,
    })?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryScan {
            path: target.to_path_buf(),
            source,
        })?;
        dirs.push(entry.path());
    }
    dirs.sort();
    Ok(dirs)
}

/// Expands the strategy flags to one strategy per target and validates
/// the target count: one occurrence applies to every target, while
/// multiple occurrences map positionally.
pub fn strategies_for(target_count: usize, given: &[Strategy]) -> Result<Vec<Strategy>> {
    if target_count == 0 {
        return Err(Error::MissingStorage);
    }
    if target_count > 2 {
        return Err(Error::TooManyStorage(target_count));
    }
    match given.len() {
        0 => Ok(vec![Strategy::Literal; target_count]),
        1 => Ok(vec![given[0]; target_count]),
        n if n == target_count => Ok(given.to_vec()),
        _ => Err(Error::StrategyMismatch),
    }
}
