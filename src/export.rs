// WHY: JSON document format shared by the exporter and importer
// {"abbreviations": [{short, long?, file?, line?}, ...]} pretty-printed with four-space indent

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::abbreviation::{Abbreviation, AbbreviationRegistry, SourceLocation};
use crate::scan::RunStats;

/// One exported abbreviation; optional fields are omitted when unknown
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationRecord {
    pub short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl From<&Abbreviation> for AbbreviationRecord {
    fn from(abbreviation: &Abbreviation) -> Self {
        Self {
            short: abbreviation.short.clone(),
            long: abbreviation.long.clone(),
            file: abbreviation
                .location
                .as_ref()
                .map(|location| location.file.display().to_string()),
            line: abbreviation.location.as_ref().map(|location| location.line),
        }
    }
}

impl From<AbbreviationRecord> for Abbreviation {
    fn from(record: AbbreviationRecord) -> Self {
        // A location needs both halves; a lone file or line is dropped
        let location = match (record.file, record.line) {
            (Some(file), Some(line)) => Some(SourceLocation {
                file: PathBuf::from(file),
                line,
            }),
            _ => None,
        };
        Self {
            short: record.short,
            long: record.long,
            location,
        }
    }
}

/// Top-level exported document
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationsDocument {
    pub abbreviations: Vec<AbbreviationRecord>,
}

impl AbbreviationsDocument {
    pub fn from_registry(registry: &AbbreviationRegistry) -> Self {
        Self {
            abbreviations: registry.iter().map(AbbreviationRecord::from).collect(),
        }
    }

    pub fn into_registry(self) -> AbbreviationRegistry {
        self.abbreviations.into_iter().map(Abbreviation::from).collect()
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Render the registry as the pretty-printed JSON document
pub fn to_json_string(registry: &AbbreviationRegistry) -> Result<String> {
    to_pretty_json(&AbbreviationsDocument::from_registry(registry))
}

async fn write_creating_parents(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the registry to `path`, creating parent directories as needed
pub async fn write_abbreviations_json(
    registry: &AbbreviationRegistry,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    write_creating_parents(path, to_json_string(registry)?).await?;
    info!("Wrote {} abbreviations to {}", registry.len(), path.display());
    Ok(())
}

/// Read a document previously written by [`write_abbreviations_json`]
pub async fn read_abbreviations_json(path: impl AsRef<Path>) -> Result<AbbreviationsDocument> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed abbreviations document {}", path.display()))
}

/// Write run statistics to `path`, creating parent directories as needed
pub async fn write_run_stats(stats: &RunStats, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_creating_parents(path, to_pretty_json(stats)?).await?;
    info!("Wrote run statistics to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_registry() -> AbbreviationRegistry {
        [
            Abbreviation::new("BBC")
                .with_long(Some("British Broadcasting Corporation ".to_string()))
                .with_location("docs/a.tex", 12),
            Abbreviation::new("XYZ").with_location("docs/b.tex", 1),
            Abbreviation::new("UN"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = to_json_string(&sample_registry()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let records = value["abbreviations"].as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["long"], "British Broadcasting Corporation ");
        assert_eq!(records[0]["line"], 12);
        assert!(records[1].get("long").is_none());
        assert_eq!(records[1]["file"], "docs/b.tex");
        assert_eq!(records[2].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_four_space_indent() {
        let json = to_json_string(&sample_registry()).unwrap();
        assert!(json.starts_with("{\n    \"abbreviations\": [\n        {"));
    }

    #[tokio::test]
    async fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested/output/abbr.json");
        let registry = sample_registry();

        write_abbreviations_json(&registry, &output).await.unwrap();
        let document = read_abbreviations_json(&output).await.unwrap();

        assert_eq!(document, AbbreviationsDocument::from_registry(&registry));
        let restored = document.into_registry();
        assert_eq!(restored.all(), registry.all());
    }

    #[tokio::test]
    async fn test_read_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        tokio::fs::write(&path, "{\"abbreviations\": 3}").await.unwrap();

        assert!(read_abbreviations_json(&path).await.is_err());
    }
}
