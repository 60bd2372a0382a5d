pub mod abbreviation;
pub mod discovery;
pub mod error;
pub mod export;
pub mod reader;
pub mod scan;

// Re-export main types for convenient access
pub use abbreviation::{
    Abbreviation,
    AbbreviationRegistry,
    SourceLocation,
    scan_line
};

pub use error::InputError;

// Re-export run-level entry points used by the CLI and integration tests
pub use scan::{
    ScanConfig, ScanReport, RunStats, FileStats,
    scan_file, scan_files, scan_lines
};

pub use export::{
    AbbreviationRecord, AbbreviationsDocument,
    to_json_string, write_abbreviations_json, read_abbreviations_json, write_run_stats
};
