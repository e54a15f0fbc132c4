/// Field mapping vocabulary
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// Name of the special target that receives tags instead of field content
pub const TAGS_FIELD: &str = "Tags";

/// What to put into a mapped field
///
/// The serialized keywords are persisted in user settings and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionKind {
    /// Leave the field alone
    #[default]
    #[serde(rename = "")]
    None,

    /// The primary media file
    #[serde(rename = "Media")]
    Media,

    /// The secondary media file of a pair
    #[serde(rename = "Media_2")]
    Media2,

    /// File name without extension
    #[serde(rename = "File Name")]
    FileName,

    /// File name with extension
    #[serde(rename = "File Name (full)")]
    FileNameFull,

    /// Lower-cased extension
    #[serde(rename = "Extension")]
    Extension,

    /// Extension as written
    #[serde(rename = "Extension (case-sensitive)")]
    ExtensionExact,

    /// Position of the file within its folder
    #[serde(rename = "Sequence")]
    Sequence,

    /// One tag per subfolder
    #[serde(rename = "Subfolder tags (individual)")]
    TagsIndividual,

    /// One `::`-joined tag for the subfolder path
    #[serde(rename = "Subfolder tag (hierarchical)")]
    TagsHierarchical,
}

impl ActionKind {
    /// Every action, in the order a picker lists them
    pub const ALL: [ActionKind; 10] = [
        ActionKind::None,
        ActionKind::Media,
        ActionKind::Media2,
        ActionKind::FileName,
        ActionKind::FileNameFull,
        ActionKind::Extension,
        ActionKind::ExtensionExact,
        ActionKind::Sequence,
        ActionKind::TagsIndividual,
        ActionKind::TagsHierarchical,
    ];

    /// Persisted keyword for this action
    pub fn keyword(self) -> &'static str {
        match self {
            ActionKind::None => "",
            ActionKind::Media => "Media",
            ActionKind::Media2 => "Media_2",
            ActionKind::FileName => "File Name",
            ActionKind::FileNameFull => "File Name (full)",
            ActionKind::Extension => "Extension",
            ActionKind::ExtensionExact => "Extension (case-sensitive)",
            ActionKind::Sequence => "Sequence",
            ActionKind::TagsIndividual => "Subfolder tags (individual)",
            ActionKind::TagsHierarchical => "Subfolder tag (hierarchical)",
        }
    }

    /// Parse a persisted keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.keyword() == keyword)
    }

    /// Human-readable explanation shown next to the keyword
    pub fn description(self) -> &'static str {
        match self {
            ActionKind::None => "Nothing",
            ActionKind::Media => "The media file\n(image / audio etc.)",
            ActionKind::Media2 => {
                "The secondary media file\n\
                 This file is denoted by a suffix (\"_2\" by default).\n\
                 e.g. primary file: \"image.jpg\" -> secondary file: \"image_2.jpg\""
            }
            ActionKind::FileName => {
                "The file name without extension\n(e.g. \"image.JPG\" -> \"image\")"
            }
            ActionKind::FileNameFull => {
                "The file name with extension\n(e.g. \"image.JPG\" -> \"image.JPG\")"
            }
            ActionKind::Extension => "The lower-case file extension\n(e.g. \"image.JPG\" -> \"jpg\")",
            ActionKind::ExtensionExact => "The file extension\n(e.g. \"image.JPG\" -> \"JPG\")",
            ActionKind::Sequence => "An increasing number\n(\"0\", \"1\", \"2\", ...)",
            ActionKind::TagsIndividual => {
                "Creates one tag for each subfolder\n\
                 (e.g. \"./f1/f2/f3/image.JPG\" -> [f1] [f2] [f3])"
            }
            ActionKind::TagsHierarchical => {
                "Creates a single tag from the subfolder path\n\
                 (e.g. \"./f1/f2/f3/image.JPG\" -> [f1::f2::f3])"
            }
        }
    }

    /// Whether the action needs a secondary file
    pub fn uses_secondary(self) -> bool {
        matches!(self, ActionKind::Media2)
    }

    /// Actions a picker should offer for a target
    ///
    /// Tags cannot hold the primary media reference, and the extension
    /// actions are only listed when the user enabled them.
    pub fn available_for(is_tags_target: bool, show_extension_actions: bool) -> Vec<ActionKind> {
        Self::ALL
            .into_iter()
            .filter(|a| !(is_tags_target && *a == ActionKind::Media))
            .filter(|a| {
                show_extension_actions
                    || !matches!(a, ActionKind::Extension | ActionKind::ExtensionExact)
            })
            .collect()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ActionKind {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s)
            .ok_or_else(|| HostError::invalid_input(format!("unknown action '{}'", s)))
    }
}

/// One row of the mapping table: which action fills which target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Field name in the note type, or a special target such as "Tags"
    pub target_field: String,

    /// Action producing the value
    pub action: ActionKind,

    /// Whether the target is not a note field
    pub is_special: bool,
}

impl FieldMapping {
    /// Map a regular note field
    pub fn field(target: impl Into<String>, action: ActionKind) -> Self {
        Self {
            target_field: target.into(),
            action,
            is_special: false,
        }
    }

    /// Map the special "Tags" target
    pub fn tags(action: ActionKind) -> Self {
        Self {
            target_field: TAGS_FIELD.to_string(),
            action,
            is_special: true,
        }
    }

    /// Whether values go to the record's tag list
    pub fn is_tags_target(&self) -> bool {
        self.is_special && self.target_field == TAGS_FIELD
    }
}

/// Value produced by evaluating an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Value as a list of tags (a single string becomes one tag)
    pub fn into_tags(self) -> Vec<String> {
        match self {
            FieldValue::Text(text) => vec![text],
            FieldValue::List(items) => items,
        }
    }

    /// Value as field content (lists are joined with single spaces)
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::List(items) => items.join(" "),
        }
    }
}
