use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether an unreadable file is an error or an empty result with stats
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one file read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

impl ReadStats {
    fn failed(path: &Path, lines_read: u64, bytes_read: u64, duration_ms: u64, error: String) -> Self {
        Self {
            file_path: path.display().to_string(),
            lines_read,
            bytes_read,
            duration_ms,
            read_error: Some(error),
        }
    }
}

/// Async reader producing a file's lines in order, without line terminators
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read all lines of `file_path`.
    ///
    /// Without `fail_fast`, an unreadable file yields no lines and the failure
    /// is recorded in `ReadStats::read_error`. A decoding error part way
    /// through discards the lines read so far: a file contributes all of its
    /// lines or none.
    pub async fn read_file_lines<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of file: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", path.display(), e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                let elapsed = start_time.elapsed().as_millis() as u64;
                return Ok((Vec::new(), ReadStats::failed(path, 0, 0, elapsed, error_msg)));
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut result_lines = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1; // +1 for newline
                    line_count += 1;
                    result_lines.push(line);
                }
                Ok(None) => break,
                Err(e) => {
                    let error_msg = format!("UTF-8 decoding error in {} at line {}: {}",
                                          path.display(), line_count + 1, e);
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Err(anyhow::anyhow!(error_msg));
                    }
                    let elapsed = start_time.elapsed().as_millis() as u64;
                    return Ok((
                        Vec::new(),
                        ReadStats::failed(path, line_count, byte_count, elapsed, error_msg),
                    ));
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        debug!(
            "Read {}: {} lines, {} bytes in {}ms",
            path.display(),
            line_count,
            byte_count,
            stats.duration_ms
        );

        Ok((result_lines, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf> {
        let file_path = dir.join(name);
        fs::write(&file_path, content).await?;
        Ok(file_path)
    }

    #[tokio::test]
    async fn test_read_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());

        let content = "Line 1\r\nLine (2)\nLine 3";
        let file_path = create_test_file(temp_dir.path(), "test.tex", content).await.unwrap();

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();

        assert_eq!(lines, vec!["Line 1", "Line (2)", "Line 3"]);
        assert_eq!(stats.lines_read, 3);
        assert!(stats.bytes_read > 0);
        assert!(stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "empty.tex", "").await.unwrap();

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();

        assert!(lines.is_empty());
        assert_eq!(stats.lines_read, 0);
        assert_eq!(stats.bytes_read, 0);
        assert!(stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());

        let file_path = temp_dir.path().join("nonexistent.tex");

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert!(lines.is_empty());
        assert!(stats.read_error.is_some());

        let strict = AsyncFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
        assert!(strict.read_file_lines(&file_path).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_utf8_drops_partial_lines() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());

        let file_path = temp_dir.path().join("broken.tex");
        let mut bytes = b"Fine line (OK)\n".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        std::fs::write(&file_path, bytes).unwrap();

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert!(lines.is_empty());
        assert_eq!(stats.lines_read, 1);
        assert!(stats.read_error.as_deref().unwrap().contains("line 2"));
    }

    #[tokio::test]
    async fn test_unicode_content() {
        let temp_dir = TempDir::new().unwrap();
        let content = "Größte Europäische Union (GEU)\n世界 (WW)";
        let file_path = create_test_file(temp_dir.path(), "unicode.tex", content).await.unwrap();

        let reader = AsyncFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
        let (lines, _stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "世界 (WW)");
    }

    #[tokio::test]
    async fn test_custom_buffer_size() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig { fail_fast: false, buffer_size: 1024 });

        let content = "x".repeat(2048) + "\n" + &"y".repeat(2048);
        let file_path = create_test_file(temp_dir.path(), "large.tex", &content).await.unwrap();

        let (lines, _stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2048);
        assert_eq!(lines[1].len(), 2048);
    }
}
