// gha-bump - Workflow file discovery

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("target {0} does not exist")]
    NotFound(PathBuf),
    #[error("no workflow directory at {0}")]
    MissingWorkflowsDir(PathBuf),
    #[error("no workflow files found in {0}")]
    NoWorkflowFiles(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolve the files to process.
///
/// A file target is returned as-is. A directory target is searched
/// (non-recursively) under its workflows directory for files with one of
/// the configured extensions, sorted by path.
pub fn discover(target: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !target.exists() {
        return Err(ScanError::NotFound(target.to_path_buf()));
    }
    if !target.is_dir() {
        return Ok(vec![target.to_path_buf()]);
    }

    let dir = target.join(&scan.workflows_dir);
    if !dir.is_dir() {
        return Err(ScanError::MissingWorkflowsDir(dir));
    }

    let io_err = |source: std::io::Error| ScanError::Io {
        path: dir.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| scan.extensions.iter().any(|e| e == ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ScanError::NoWorkflowFiles(dir));
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "Discovered workflow files");
    Ok(files)
}
