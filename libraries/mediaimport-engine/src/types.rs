//! Run configuration and run results

use crate::{ImportError, Result};
use mediaimport_core::{
    ActionKind, ExtensionSets, FieldMapping, DEFAULT_PAIR_SUFFIX, TAGS_FIELD,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do with a primary file whose secondary file does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnpairedPolicy {
    /// Import the file on its own; `Media_2` fields stay empty
    #[default]
    Keep,

    /// Leave the file out of the import
    Skip,

    /// Stop the whole run
    Abort,
}

/// What to do when two files in a folder share a base name ("a.jpg", "a.png")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The file listed later replaces the earlier one
    #[default]
    Overwrite,

    /// Stop the whole run
    Reject,
}

/// What happens to already-created records when a run aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartialFailurePolicy {
    /// Keep every record created before the failure
    #[default]
    KeepCreated,

    /// Ask the record sink to remove the records of this run
    RollBack,
}

/// Immutable configuration for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Folder to import from
    pub root: PathBuf,

    /// Whether to descend into subfolders
    pub recursive: bool,

    /// Whether to follow symbolic links while walking
    pub follow_links: bool,

    /// Supported audio and image extensions
    pub extensions: ExtensionSets,

    /// Suffix identifying secondary files
    pub pair_suffix: String,

    /// Ordered mapping table
    pub mappings: Vec<FieldMapping>,

    pub unpaired_policy: UnpairedPolicy,
    pub duplicate_policy: DuplicatePolicy,
    pub partial_failure_policy: PartialFailurePolicy,
}

impl RunConfig {
    /// Create a recursive run over `root` with default extensions and policies
    pub fn new(root: impl Into<PathBuf>, mappings: Vec<FieldMapping>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            follow_links: false,
            extensions: ExtensionSets::default(),
            pair_suffix: DEFAULT_PAIR_SUFFIX.to_string(),
            mappings,
            unpaired_policy: UnpairedPolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
            partial_failure_policy: PartialFailurePolicy::default(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn extensions(mut self, extensions: ExtensionSets) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn pair_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.pair_suffix = suffix.into();
        self
    }

    pub fn unpaired_policy(mut self, policy: UnpairedPolicy) -> Self {
        self.unpaired_policy = policy;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn partial_failure_policy(mut self, policy: PartialFailurePolicy) -> Self {
        self.partial_failure_policy = policy;
        self
    }

    /// Whether secondary files are looked up at all
    ///
    /// Pairing is only enabled when some mapping uses the secondary media.
    pub fn pairing_enabled(&self) -> bool {
        self.mappings.iter().any(|m| m.action.uses_secondary())
    }

    /// Check the configuration before a run starts
    pub fn validate(&self) -> Result<()> {
        if self.pairing_enabled() && self.pair_suffix.is_empty() {
            return Err(ImportError::InvalidConfig(
                "secondary file suffix must not be empty".to_string(),
            ));
        }

        for mapping in &self.mappings {
            if mapping.is_special && mapping.target_field != TAGS_FIELD {
                return Err(ImportError::InvalidConfig(format!(
                    "unknown special target '{}'",
                    mapping.target_field
                )));
            }
            if mapping.is_tags_target() && mapping.action == ActionKind::Media {
                return Err(ImportError::InvalidConfig(
                    "tags cannot hold the media file".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RunOutcome {
    /// Every folder was processed
    Completed,

    /// A fatal failure stopped the run
    Aborted { reason: String, cause: AbortCause },

    /// The cancellation token was triggered
    Cancelled,
}

/// What stopped an aborted run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortCause {
    /// A folder was rejected by the unpaired or duplicate policy
    FolderRejected,

    /// The record sink refused a record
    RecordCreation,
}

/// Summary of an import run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRunResult {
    /// Records created (and not rolled back)
    pub created_count: usize,

    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,

    /// Whether a fatal failure stopped the run
    pub aborted: bool,

    pub outcome: RunOutcome,

    /// Folders whose files were listed
    pub folders_visited: usize,

    /// Files visited, including excluded ones
    pub files_visited: usize,

    /// Files excluded as non-media or left unpaired
    pub skipped_files: usize,

    /// Files that could not be stored in the media store
    pub failed_files: usize,

    /// Records removed again by the roll-back policy
    pub rolled_back: usize,
}

impl ImportRunResult {
    pub(crate) fn new() -> Self {
        Self {
            created_count: 0,
            elapsed_seconds: 0.0,
            aborted: false,
            outcome: RunOutcome::Completed,
            folders_visited: 0,
            files_visited: 0,
            skipped_files: 0,
            failed_files: 0,
            rolled_back: 0,
        }
    }

    pub fn summary_text(&self) -> String {
        match &self.outcome {
            RunOutcome::Completed => format!(
                "Created {} notes in {:.2} seconds.",
                self.created_count, self.elapsed_seconds
            ),
            RunOutcome::Aborted { reason, .. } => format!(
                "Import aborted after {} notes ({:.2} seconds): {}",
                self.created_count, self.elapsed_seconds, reason
            ),
            RunOutcome::Cancelled => format!(
                "Import cancelled after {} notes ({:.2} seconds).",
                self.created_count, self.elapsed_seconds
            ),
        }
    }
}
