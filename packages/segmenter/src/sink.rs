//! Record sinks.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::default_output_path;
use crate::error::{Result, SegmenterError};
use crate::types::{DocumentTitle, StructuredRecord};

/// Accepts the ordered records of one document.
pub trait RecordSink {
    /// Persist the records and return a description of where they went.
    fn accept(&mut self, title: &DocumentTitle, records: &[StructuredRecord]) -> Result<String>;
}

/// Writes a JSON array of records to a file.
///
/// Output uses four-space indentation and keeps non-ASCII characters as
/// they are. The file is replaced atomically.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink writing to `laws_json_file/<title>.json`.
    #[must_use]
    pub fn for_title(title: &DocumentTitle) -> Self {
        Self::new(default_output_path(title.as_str()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, content: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "records.json".to_string());
        let temp_file = dir.join(format!(".{file_name}.tmp"));

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content)?;
            file.sync_all()?;
        }

        #[cfg(target_os = "windows")]
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }

        fs::rename(&temp_file, &self.path)
    }
}

impl RecordSink for JsonFileSink {
    fn accept(&mut self, title: &DocumentTitle, records: &[StructuredRecord]) -> Result<String> {
        let content = to_json(records)?;
        self.write_atomic(&content)
            .map_err(|source| SegmenterError::SinkWrite {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            title = %title,
            records = records.len(),
            path = %self.path.display(),
            "Wrote records"
        );
        Ok(self.path.display().to_string())
    }
}

/// Serialize records as a four-space indented JSON array.
pub fn to_json(records: &[StructuredRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Keeps accepted records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    documents: Vec<(DocumentTitle, Vec<StructuredRecord>)>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted documents in the order they arrived.
    #[must_use]
    pub fn documents(&self) -> &[(DocumentTitle, Vec<StructuredRecord>)] {
        &self.documents
    }

    /// All accepted records, across documents.
    pub fn records(&self) -> impl Iterator<Item = &StructuredRecord> {
        self.documents.iter().flat_map(|(_, records)| records)
    }
}

impl RecordSink for MemorySink {
    fn accept(&mut self, title: &DocumentTitle, records: &[StructuredRecord]) -> Result<String> {
        self.documents.push((title.clone(), records.to_vec()));
        Ok("memory".to_string())
    }
}
