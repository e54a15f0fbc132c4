//! Remembered field mappings per note type

use crate::Settings;
use indexmap::IndexMap;
use mediaimport_core::{ActionKind, FieldMapping, TAGS_FIELD};
use std::path::Path;

/// Mapping used for a field no stored setting mentions
pub const DEFAULT_FIELD_ACTIONS: &[(&str, ActionKind)] = &[
    ("Front", ActionKind::Media),
    ("Image", ActionKind::Media),
    ("Back", ActionKind::FileName),
    ("Back Extra", ActionKind::FileName),
    ("Text", ActionKind::FileName),
];

fn default_action(field: &str) -> Option<ActionKind> {
    DEFAULT_FIELD_ACTIONS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, action)| *action)
}

impl Settings {
    /// Build the mapping table for a note type
    ///
    /// One row per field in the given order, then the special "Tags" row.
    /// Each row takes the stored keyword for that note type if there is one,
    /// else the built-in default, else no action. A keyword that is unknown,
    /// or not offered for the row, maps to no action.
    pub fn mappings_for<S: AsRef<str>>(&self, note_type: &str, fields: &[S]) -> Vec<FieldMapping> {
        let stored = self.field_settings.get(note_type);

        let rows = fields
            .iter()
            .map(|f| (f.as_ref(), false))
            .chain(std::iter::once((TAGS_FIELD, true)));

        rows.map(|(name, special)| {
            let stored_keyword = stored.and_then(|s| s.get(name));
            let action = match stored_keyword {
                Some(keyword) => self.offered_action(name, keyword, special),
                None => default_action(name).unwrap_or_default(),
            };

            if special {
                FieldMapping::tags(action)
            } else {
                FieldMapping::field(name, action)
            }
        })
        .collect()
    }

    /// Remember the mapping, folder, and recursion flag of a started import
    pub fn remember(
        &mut self,
        note_type: &str,
        mappings: &[FieldMapping],
        folder: &Path,
        recursive: bool,
    ) {
        let fields: IndexMap<String, String> = mappings
            .iter()
            .map(|m| (m.target_field.clone(), m.action.keyword().to_string()))
            .collect();

        self.field_settings.insert(note_type.to_string(), fields);
        self.load_folder = folder.to_path_buf();
        self.include_subfolders = recursive;
    }

    fn offered_action(&self, field: &str, keyword: &str, special: bool) -> ActionKind {
        let Some(action) = ActionKind::from_keyword(keyword) else {
            tracing::warn!("Unknown action '{}' stored for field '{}'", keyword, field);
            return ActionKind::None;
        };

        if !ActionKind::available_for(special, self.show_extension_actions).contains(&action) {
            tracing::warn!("Action '{}' is not available for field '{}'", keyword, field);
            return ActionKind::None;
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_basic_note_type() {
        let settings = Settings::default();
        let mappings = settings.mappings_for("Basic", &["Front", "Back"]);

        assert_eq!(
            mappings,
            vec![
                FieldMapping::field("Front", ActionKind::Media),
                FieldMapping::field("Back", ActionKind::FileName),
                FieldMapping::tags(ActionKind::None),
            ]
        );
    }

    #[test]
    fn test_unknown_field_has_no_action() {
        let settings = Settings::default();
        let mappings = settings.mappings_for("Vocab", &["Word"]);
        assert_eq!(mappings[0], FieldMapping::field("Word", ActionKind::None));
    }

    #[test]
    fn test_stored_settings_override_defaults() {
        let mut settings = Settings::default();
        let mut basic = IndexMap::new();
        basic.insert("Front".to_string(), "Sequence".to_string());
        basic.insert("Tags".to_string(), "Subfolder tags (individual)".to_string());
        settings.field_settings.insert("Basic".to_string(), basic);

        let mappings = settings.mappings_for("Basic", &["Front", "Back"]);

        assert_eq!(mappings[0].action, ActionKind::Sequence);
        assert_eq!(mappings[1].action, ActionKind::FileName);
        assert_eq!(mappings[2], FieldMapping::tags(ActionKind::TagsIndividual));
    }

    #[test]
    fn test_unavailable_stored_actions_are_dropped() {
        let mut settings = Settings::default();
        let mut basic = IndexMap::new();
        basic.insert("Front".to_string(), "Extension".to_string());
        basic.insert("Back".to_string(), "Audio".to_string());
        basic.insert("Tags".to_string(), "Media".to_string());
        settings.field_settings.insert("Basic".to_string(), basic);

        let mappings = settings.mappings_for("Basic", &["Front", "Back"]);
        assert!(mappings.iter().all(|m| m.action == ActionKind::None));

        // Extension actions come back once they are enabled
        settings.show_extension_actions = true;
        let mappings = settings.mappings_for("Basic", &["Front", "Back"]);
        assert_eq!(mappings[0].action, ActionKind::Extension);
    }

    #[test]
    fn test_remember_then_restore() {
        let mut settings = Settings::default();
        let used = vec![
            FieldMapping::field("Front", ActionKind::Media2),
            FieldMapping::field("Back", ActionKind::FileNameFull),
            FieldMapping::tags(ActionKind::TagsHierarchical),
        ];

        settings.remember("Basic", &used, Path::new("/cards"), false);

        assert_eq!(settings.mappings_for("Basic", &["Front", "Back"]), used);
        assert_eq!(settings.load_folder, Path::new("/cards"));
        assert!(!settings.include_subfolders);
        assert_eq!(
            settings.field_settings["Basic"]["Back"],
            "File Name (full)".to_string()
        );
    }
}
