// WHY: Per-file and per-run scanning on top of the line-level abbreviation pipeline
// Files may be read concurrently but results are applied to the registry in input order

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::abbreviation::{has_round_brackets, scan_line, Abbreviation, AbbreviationRegistry};
use crate::reader::{AsyncFileReader, ReaderConfig};

/// Configuration for a scanning run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Abort the run on the first unreadable file instead of skipping it
    pub fail_fast: bool,
    /// Number of files read concurrently; 1 scans strictly one file at a time
    pub max_concurrent_files: usize,
    /// Draw a progress bar over files on stderr
    pub show_progress: bool,
    /// Read buffer size per file
    pub buffer_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_concurrent_files: num_cpus::get().max(1),
            show_progress: false,
            buffer_size: ReaderConfig::default().buffer_size,
        }
    }
}

/// Per-file scanning statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// File path as discovered
    pub path: String,
    pub lines_read: u64,
    /// Lines that passed the round bracket pre-filter
    pub lines_with_brackets: u64,
    /// Abbreviation occurrences found in this file, duplicates included
    pub abbreviations_found: u64,
    /// Occurrences whose long form was resolved
    pub abbreviations_resolved: u64,
    /// Short forms this file added to the registry
    pub abbreviations_registered: u64,
    pub processing_time_ms: u64,
    /// Processing status (success, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

/// Statistics for a whole run, written by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Run start as milliseconds since the Unix epoch
    pub run_start_unix_ms: u64,
    pub total_processing_time_ms: u64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub total_lines_read: u64,
    pub abbreviations_registered: u64,
    pub abbreviations_resolved: u64,
    pub file_stats: Vec<FileStats>,
}

/// Abbreviations found in one file, in line order
#[derive(Debug, Clone)]
pub struct FileScan {
    pub path: PathBuf,
    pub abbreviations: Vec<Abbreviation>,
    pub stats: FileStats,
}

/// Outcome of a run: the registry and its statistics
#[derive(Debug)]
pub struct ScanReport {
    pub registry: AbbreviationRegistry,
    pub stats: RunStats,
}

/// Scan already-read `lines` of `path`, tagging each abbreviation with its
/// 1-based line number. Each line is resolved against the line before it.
///
/// Returns the abbreviations in order of appearance and the number of lines
/// that passed the bracket pre-filter.
pub fn scan_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> (Vec<Abbreviation>, u64) {
    let mut abbreviations = Vec::new();
    let mut lines_with_brackets = 0u64;
    let mut previous_line = "";

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if has_round_brackets(line) {
            lines_with_brackets += 1;
            abbreviations.extend(
                scan_line(line, previous_line)
                    .into_iter()
                    .map(|abbreviation| abbreviation.with_location(path, index + 1)),
            );
        }
        previous_line = line;
    }

    (abbreviations, lines_with_brackets)
}

/// Read and scan a single file.
///
/// An unreadable file yields an empty `FileScan` marked as failed, unless the
/// reader is configured to fail fast, in which case the error is returned.
pub async fn scan_file(path: &Path, reader: &AsyncFileReader) -> Result<FileScan> {
    let start_time = Instant::now();
    let (lines, read_stats) = reader.read_file_lines(path).await?;

    if let Some(error) = read_stats.read_error {
        return Ok(FileScan {
            path: path.to_path_buf(),
            abbreviations: Vec::new(),
            stats: FileStats {
                path: path.display().to_string(),
                lines_read: read_stats.lines_read,
                lines_with_brackets: 0,
                abbreviations_found: 0,
                abbreviations_resolved: 0,
                abbreviations_registered: 0,
                processing_time_ms: start_time.elapsed().as_millis() as u64,
                status: "failed".to_string(),
                error: Some(error),
            },
        });
    }

    let (abbreviations, lines_with_brackets) = scan_lines(path, lines.as_slice());
    let resolved = abbreviations.iter().filter(|a| a.is_resolved()).count() as u64;

    let shorts: Vec<String> = abbreviations.iter().map(|a| a.to_string()).collect();
    debug!(
        "Scanned {}: {} lines, {} with brackets, abbreviations {:?}",
        path.display(),
        lines.len(),
        lines_with_brackets,
        shorts
    );

    Ok(FileScan {
        path: path.to_path_buf(),
        stats: FileStats {
            path: path.display().to_string(),
            lines_read: read_stats.lines_read,
            lines_with_brackets,
            abbreviations_found: abbreviations.len() as u64,
            abbreviations_resolved: resolved,
            abbreviations_registered: 0,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            status: "success".to_string(),
            error: None,
        },
        abbreviations,
    })
}

fn progress_bar(config: &ScanConfig, files: usize) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(files as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} files {wide_msg}") {
        bar.set_style(style);
    }
    bar
}

/// Scan `paths` in order and build the registry.
///
/// Up to `max_concurrent_files` files are read at once, but their results are
/// applied strictly in the order of `paths`, so which occurrence of a short
/// form wins never depends on timing.
pub async fn scan_files(paths: &[PathBuf], config: &ScanConfig) -> Result<ScanReport> {
    let start_time = Instant::now();
    let run_start_unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: config.fail_fast,
        buffer_size: config.buffer_size,
    });
    let progress = progress_bar(config, paths.len());

    info!("Scanning {} files, {} at a time", paths.len(), config.max_concurrent_files.max(1));

    let mut scans = Box::pin(
        stream::iter(paths)
            .map(|path| scan_file(path, &reader))
            .buffered(config.max_concurrent_files.max(1)),
    );

    let mut registry = AbbreviationRegistry::new();
    let mut file_stats = Vec::with_capacity(paths.len());

    while let Some(result) = scans.next().await {
        let mut file_scan = match result {
            Ok(file_scan) => file_scan,
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        if let Some(ref error) = file_scan.stats.error {
            warn!("Skipping {}: {}", file_scan.path.display(), error);
        }

        let mut registered = 0u64;
        for abbreviation in file_scan.abbreviations {
            if registry.register(abbreviation) {
                registered += 1;
            }
        }
        file_scan.stats.abbreviations_registered = registered;

        progress.set_message(file_scan.path.display().to_string());
        progress.inc(1);
        file_stats.push(file_scan.stats);
    }
    progress.finish_and_clear();

    let files_failed = file_stats.iter().filter(|s| s.error.is_some()).count() as u64;
    let stats = RunStats {
        run_start_unix_ms,
        total_processing_time_ms: start_time.elapsed().as_millis() as u64,
        files_processed: file_stats.len() as u64 - files_failed,
        files_failed,
        total_lines_read: file_stats.iter().map(|s| s.lines_read).sum(),
        abbreviations_registered: registry.len() as u64,
        abbreviations_resolved: registry.iter().filter(|a| a.is_resolved()).count() as u64,
        file_stats,
    };

    info!(
        "Scan complete: {} files processed, {} failed, {} abbreviations ({} resolved)",
        stats.files_processed,
        stats.files_failed,
        stats.abbreviations_registered,
        stats.abbreviations_resolved
    );

    Ok(ScanReport { registry, stats })
}
