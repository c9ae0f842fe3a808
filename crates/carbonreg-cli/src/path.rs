//! Journal path checks shared by all commands.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a journal path is refused.
#[derive(Error, Debug)]
pub enum PathError {
    /// Empty path argument.
    #[error("path is empty")]
    Empty,
    /// Path names a directory.
    #[error("{0} is a directory")]
    Directory(String),
    /// Journal does not exist and the command needs one.
    #[error("{0} does not exist")]
    Missing(String),
}

/// Checks `journal` and returns it as a path.
///
/// Mutating commands create the journal on first use, so only queries pass
/// `must_exist`.
pub fn validate_journal_path(journal: &str, must_exist: bool) -> Result<PathBuf, PathError> {
    if journal.trim().is_empty() {
        return Err(PathError::Empty);
    }
    let path = PathBuf::from(journal);
    if path.is_dir() {
        return Err(PathError::Directory(sanitize_path_for_error(&path)));
    }
    if must_exist && !path.exists() {
        return Err(PathError::Missing(sanitize_path_for_error(&path)));
    }
    Ok(path)
}

/// File name of `path` for error messages, without parent directories.
pub fn sanitize_path_for_error(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<journal>".to_string())
}
