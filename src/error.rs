//! Fatal input errors raised before any file is scanned.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the input path given to a run. Any of these aborts the run
/// before output is written.
#[derive(Error, Debug)]
pub enum InputError {
    /// Path is neither an existing file nor an existing directory.
    #[error("wrong input: existing file or files directory is expected, got {}", .0.display())]
    NotFound(PathBuf),

    /// A single input file whose extension is not accepted.
    #[error("incorrect input: extension of {} should be one of {allowed:?}", .path.display())]
    DisallowedExtension { path: PathBuf, allowed: Vec<String> },

    /// The directory path could not be turned into a glob pattern.
    #[error("invalid directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
