/// Records handed to the host and progress counters
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One note-to-be: field contents plus tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Field name -> content, in mapping order
    pub fields: IndexMap<String, String>,

    /// Tags in the order they were produced
    pub tags: Vec<String>,
}

impl ImportRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a field, if it was set
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether every field value is empty
    pub fn has_no_content(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }
}

/// Progress update during an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    /// Total number of files that will be visited
    pub total_files: usize,

    /// Number of files visited so far (imported, excluded or skipped)
    pub processed_files: usize,

    /// Number of records created so far
    pub created_records: usize,

    /// Folder currently being processed
    pub current_folder: Option<PathBuf>,
}

impl ImportProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed_files >= self.total_files
    }

    pub fn percentage(&self) -> f32 {
        if self.total_files == 0 {
            return 100.0;
        }
        (self.processed_files as f32 / self.total_files as f32) * 100.0
    }
}
