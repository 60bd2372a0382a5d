// WHY: Core abbreviation pipeline for a single line of text
// Bracket scanning -> classification -> long form resolution, registry kept separate

use std::fmt;
use std::path::PathBuf;

pub mod brackets;
pub mod classifier;
pub mod registry;
pub mod resolver;

// Re-export core operations
pub use brackets::{bracketed_substrings, has_round_brackets, BracketedSubstrings};
pub use classifier::{count_capital_letters, is_abbreviation};
pub use registry::AbbreviationRegistry;
pub use resolver::resolve_long_form;

/// File and 1-based line where an abbreviation was first seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

/// One discovered abbreviation.
///
/// Identity is the `short` form alone: the registry treats two values with
/// equal `short` as the same abbreviation regardless of `long` or location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    pub short: String,
    pub long: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Abbreviation {
    pub fn new(short: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: None,
            location: None,
        }
    }

    pub fn with_long(mut self, long: Option<String>) -> Self {
        self.long = long;
        self
    }

    pub fn with_location(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.long.is_some()
    }
}

impl fmt::Display for Abbreviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.short)
    }
}

/// Find every abbreviation defined on `line`, resolving long forms against
/// `line` and `previous_line` (empty for the first line of a file).
///
/// Returned values carry no location; the caller knows file and line number.
/// Lines without both `(` and `)` are skipped before any scanning happens.
pub fn scan_line(line: &str, previous_line: &str) -> Vec<Abbreviation> {
    if !has_round_brackets(line) {
        return Vec::new();
    }

    bracketed_substrings(line)
        .filter(|candidate| is_abbreviation(candidate))
        .map(|short| {
            Abbreviation::new(short).with_long(resolve_long_form(line, previous_line, short))
        })
        .collect()
}
