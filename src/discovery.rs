use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::InputError;

/// Configuration for input file discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Accepted file extensions without the leading dot; empty accepts every file
    pub extensions: Vec<String>,
    /// Whether to fail fast on the first inaccessible entry or keep going
    pub fail_fast: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["tex".to_string()],
            fail_fast: false,
        }
    }
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Normalize user-supplied extensions: strip whitespace and leading dots and
/// drop empty entries, so `-e ""` means "no filter".
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|extension| extension.as_ref().trim().trim_start_matches('.').to_string())
        .filter(|extension| !extension.is_empty())
        .collect()
}

/// Check whether `path` ends with `.<ext>` for one of `extensions`.
/// An empty extension list accepts every path; empty entries are ignored.
pub fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    let extensions = normalize_extensions(extensions);
    if extensions.is_empty() {
        return true;
    }
    let name = path.to_string_lossy();
    extensions
        .iter()
        .any(|extension| name.ends_with(&format!(".{extension}")))
}

/// Discovers all files under `root_dir` (recursively) whose extension is accepted
/// by `config`. Entries come out in the lexical order `glob` walks them.
/// Hidden files and anything below hidden directories are not visited.
///
/// # Arguments
/// * `root_dir` - Directory to search recursively
/// * `config` - Extension filter and fail-fast behavior
///
/// # Returns
/// Stream of `FileValidation` results containing file paths and access status
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        }
    )
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
    finished: bool,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
            finished: false,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.finished {
            return None;
        }

        if self.glob_iter.is_none() {
            // Directory names may contain glob metacharacters
            let root = Pattern::escape(&self.root_dir.to_string_lossy());
            let pattern = format!("{root}/**/*");
            debug!("Starting file discovery with pattern: {}", pattern);

            // Dot-files and dot-directories (`.git`, `.backup`) are never scanned
            let options = MatchOptions {
                require_literal_leading_dot: true,
                ..MatchOptions::new()
            };

            match glob_with(&pattern, options) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("File discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(InputError::from(e).into()));
                }
            }
        }

        loop {
            let glob_iter = self.glob_iter.as_mut()?;
            match glob_iter.next() {
                Some(Ok(path)) => {
                    if !has_matching_extension(&path, &self.config.extensions) {
                        continue;
                    }
                    match self.validate_file(path).await {
                        Ok(Some(validation)) => return Some(Ok(validation)),
                        Ok(None) => continue,
                        Err(e) => {
                            self.finished = true;
                            return Some(Err(e));
                        }
                    }
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        self.finished = true;
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
                None => {
                    info!("File discovery completed");
                    self.finished = true;
                    return None;
                }
            }
        }
    }

    /// `Ok(None)` for entries that are not regular files (directories named
    /// like `chapters.tex/` for instance)
    async fn validate_file(&self, path: PathBuf) -> Result<Option<FileValidation>> {
        debug!("Validating file: {}", path.display());

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(FileValidation { path, error: None })),
            Ok(_) => {
                debug!("Skipping non-file entry: {}", path.display());
                Ok(None)
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);

                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(Some(FileValidation {
                        path,
                        error: Some(error),
                    }))
                }
            }
        }
    }
}

/// Collect all discovered files into a Vec for easier processing
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }

    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Turn the user's input path into the ordered list of files to scan.
///
/// A file is accepted only if its extension matches; a directory is searched
/// recursively. Anything else is an [`InputError`].
///
/// Directory entries that could not be inspected are kept in the list so the
/// scan reports them as failed files instead of dropping them silently.
pub async fn resolve_input_files(
    input: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();

    let metadata = match fs::metadata(input).await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("Cannot stat input {}: {}", input.display(), e);
            return Err(InputError::NotFound(input.to_path_buf()).into());
        }
    };

    if metadata.is_file() {
        if !has_matching_extension(input, &config.extensions) {
            return Err(InputError::DisallowedExtension {
                path: input.to_path_buf(),
                allowed: config.extensions,
            }
            .into());
        }
        info!("Input registered: single file {}", input.display());
        return Ok(vec![input.to_path_buf()]);
    }

    if metadata.is_dir() {
        let extensions = config.extensions.clone();
        let validations = collect_discovered_files(input, config).await?;
        let files: Vec<PathBuf> = validations
            .into_iter()
            .map(|v| {
                if let Some(ref error) = v.error {
                    warn!("Discovery issue with {}: {}", v.path.display(), error);
                }
                v.path
            })
            .collect();
        info!(
            "Input registered: directory {} with {} files matching {:?}",
            input.display(),
            files.len(),
            extensions
        );
        return Ok(files);
    }

    Err(InputError::NotFound(input.to_path_buf()).into())
}
