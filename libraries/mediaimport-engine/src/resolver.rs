//! Field value derivation from the mapping table

use mediaimport_core::{
    ActionKind, FieldMapping, FieldValue, FilePair, ImportRecord, MediaId, MediaKind,
};
use std::path::{Component, Path};

/// Everything an action can read while one pair is imported
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub pair: &'a FilePair,

    /// Zero-based position of the pair within its folder
    pub sequence: usize,

    /// Folder path relative to the import root (empty for the root itself)
    pub relative_folder: &'a Path,

    pub primary_media: &'a MediaId,
    pub secondary_media: Option<&'a MediaId>,
}

/// Evaluate one action, or `None` when the mapping is skipped
pub fn evaluate(action: ActionKind, ctx: &EvalContext<'_>) -> Option<FieldValue> {
    let primary = &ctx.pair.primary;
    let value = match action {
        ActionKind::None => return None,
        ActionKind::Media => FieldValue::Text(media_reference(primary.kind, ctx.primary_media)),
        ActionKind::Media2 => {
            let secondary = ctx.pair.secondary.as_ref()?;
            let media = ctx.secondary_media?;
            // Tag form follows the secondary file, so x.jpg + x_2.mp3 gives [sound:]
            FieldValue::Text(media_reference(secondary.kind, media))
        }
        ActionKind::FileName => FieldValue::Text(primary.base_name.clone()),
        ActionKind::FileNameFull => FieldValue::Text(primary.file_name.clone()),
        ActionKind::Extension => FieldValue::Text(primary.extension.clone()),
        ActionKind::ExtensionExact => FieldValue::Text(primary.extension_exact.clone()),
        ActionKind::Sequence => FieldValue::Text(ctx.sequence.to_string()),
        ActionKind::TagsIndividual => FieldValue::List(folder_segments(ctx.relative_folder)),
        ActionKind::TagsHierarchical => {
            let segments = folder_segments(ctx.relative_folder);
            if segments.is_empty() {
                FieldValue::List(Vec::new())
            } else {
                FieldValue::List(vec![segments.join("::")])
            }
        }
    };
    Some(value)
}

/// Evaluate every mapping and assemble the record
///
/// Values for the "Tags" target are appended as tags with spaces replaced by
/// underscores. Values for fields overwrite earlier values of the same field.
pub fn build_record(mappings: &[FieldMapping], ctx: &EvalContext<'_>) -> ImportRecord {
    let mut record = ImportRecord::new();

    for mapping in mappings {
        let Some(value) = evaluate(mapping.action, ctx) else {
            continue;
        };

        if mapping.is_tags_target() {
            record.tags.extend(
                value
                    .into_tags()
                    .into_iter()
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| tag.replace(' ', "_")),
            );
        } else {
            record
                .fields
                .insert(mapping.target_field.clone(), value.into_text());
        }
    }

    record
}

fn media_reference(kind: MediaKind, media: &MediaId) -> String {
    match kind {
        MediaKind::Audio => format!("[sound:{}]", media),
        MediaKind::Image => format!("<img src=\"{}\">", media),
    }
}

fn folder_segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaimport_core::MediaFile;
    use std::path::PathBuf;

    fn media(file_name: &str, base: &str, ext: &str, kind: MediaKind) -> MediaFile {
        MediaFile {
            path: PathBuf::from("/root").join(file_name),
            file_name: file_name.to_string(),
            base_name: base.to_string(),
            extension: ext.to_lowercase(),
            extension_exact: ext.to_string(),
            kind,
        }
    }

    fn image_pair() -> FilePair {
        FilePair::paired(
            media("Image.JPG", "Image", "JPG", MediaKind::Image),
            media("Image_2.mp3", "Image_2", "mp3", MediaKind::Audio),
        )
    }

    fn text(value: Option<FieldValue>) -> String {
        value.expect("value").into_text()
    }

    #[test]
    fn test_file_properties() {
        let pair = image_pair();
        let id = MediaId::new("Image.JPG");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &id,
            secondary_media: None,
        };

        assert_eq!(text(evaluate(ActionKind::FileName, &ctx)), "Image");
        assert_eq!(text(evaluate(ActionKind::FileNameFull, &ctx)), "Image.JPG");
        assert_eq!(text(evaluate(ActionKind::Extension, &ctx)), "jpg");
        assert_eq!(text(evaluate(ActionKind::ExtensionExact, &ctx)), "JPG");
        assert_eq!(evaluate(ActionKind::None, &ctx), None);
    }

    #[test]
    fn test_media_references_image_primary_audio_secondary() {
        let pair = image_pair();
        let primary = MediaId::new("Image-1.JPG");
        let secondary = MediaId::new("Image_2.mp3");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &primary,
            secondary_media: Some(&secondary),
        };

        assert_eq!(
            text(evaluate(ActionKind::Media, &ctx)),
            "<img src=\"Image-1.JPG\">"
        );
        assert_eq!(
            text(evaluate(ActionKind::Media2, &ctx)),
            "[sound:Image_2.mp3]"
        );
    }

    #[test]
    fn test_media2_uses_secondary_kind_for_audio_primary() {
        let pair = FilePair::paired(
            media("word.mp3", "word", "mp3", MediaKind::Audio),
            media("word_2.png", "word_2", "png", MediaKind::Image),
        );
        let primary = MediaId::new("word.mp3");
        let secondary = MediaId::new("word_2.png");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &primary,
            secondary_media: Some(&secondary),
        };

        assert_eq!(text(evaluate(ActionKind::Media, &ctx)), "[sound:word.mp3]");
        assert_eq!(
            text(evaluate(ActionKind::Media2, &ctx)),
            "<img src=\"word_2.png\">"
        );
    }

    #[test]
    fn test_media2_skipped_without_secondary() {
        let pair = FilePair::single(media("clip.mp3", "clip", "mp3", MediaKind::Audio));
        let id = MediaId::new("clip.mp3");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &id,
            secondary_media: None,
        };

        assert_eq!(text(evaluate(ActionKind::Media, &ctx)), "[sound:clip.mp3]");
        assert_eq!(evaluate(ActionKind::Media2, &ctx), None);
    }

    #[test]
    fn test_sequence() {
        let pair = image_pair();
        let id = MediaId::new("x");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 17,
            relative_folder: Path::new(""),
            primary_media: &id,
            secondary_media: None,
        };

        assert_eq!(text(evaluate(ActionKind::Sequence, &ctx)), "17");
    }

    #[test]
    fn test_folder_tags() {
        let pair = image_pair();
        let id = MediaId::new("x");
        let relative = PathBuf::from("f1").join("f2").join("f3");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: &relative,
            primary_media: &id,
            secondary_media: None,
        };

        assert_eq!(
            evaluate(ActionKind::TagsIndividual, &ctx),
            Some(FieldValue::List(vec![
                "f1".to_string(),
                "f2".to_string(),
                "f3".to_string()
            ]))
        );
        assert_eq!(
            evaluate(ActionKind::TagsHierarchical, &ctx),
            Some(FieldValue::List(vec!["f1::f2::f3".to_string()]))
        );
    }

    #[test]
    fn test_folder_tags_at_root() {
        let pair = image_pair();
        let id = MediaId::new("x");
        for root in [Path::new(""), Path::new(".")] {
            let ctx = EvalContext {
                pair: &pair,
                sequence: 0,
                relative_folder: root,
                primary_media: &id,
                secondary_media: None,
            };
            assert_eq!(
                evaluate(ActionKind::TagsIndividual, &ctx),
                Some(FieldValue::List(Vec::new()))
            );
            assert_eq!(
                evaluate(ActionKind::TagsHierarchical, &ctx),
                Some(FieldValue::List(Vec::new()))
            );
        }
    }

    #[test]
    fn test_build_record_assembles_fields_and_tags() {
        let pair = image_pair();
        let id = MediaId::new("Image.JPG");
        let relative = PathBuf::from("my folder").join("sub");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 2,
            relative_folder: &relative,
            primary_media: &id,
            secondary_media: None,
        };

        let mappings = vec![
            FieldMapping::field("Front", ActionKind::Media),
            FieldMapping::field("Back", ActionKind::FileName),
            FieldMapping::field("Extra", ActionKind::None),
            FieldMapping::field("Folders", ActionKind::TagsIndividual),
            FieldMapping::tags(ActionKind::TagsHierarchical),
            FieldMapping::tags(ActionKind::TagsIndividual),
            FieldMapping::tags(ActionKind::Sequence),
        ];

        let record = build_record(&mappings, &ctx);

        assert_eq!(record.field("Front"), Some("<img src=\"Image.JPG\">"));
        assert_eq!(record.field("Back"), Some("Image"));
        assert_eq!(record.field("Extra"), None);
        assert_eq!(record.field("Folders"), Some("my folder sub"));
        assert_eq!(
            record.tags,
            vec!["my_folder::sub", "my_folder", "sub", "2"]
        );
    }

    #[test]
    fn test_build_record_later_mapping_overwrites_field() {
        let pair = image_pair();
        let id = MediaId::new("x");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &id,
            secondary_media: None,
        };

        let mappings = vec![
            FieldMapping::field("Back", ActionKind::FileName),
            FieldMapping::field("Back", ActionKind::Extension),
        ];

        let record = build_record(&mappings, &ctx);
        assert_eq!(record.field("Back"), Some("jpg"));
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn test_root_hierarchical_tag_is_not_added() {
        let pair = image_pair();
        let id = MediaId::new("x");
        let ctx = EvalContext {
            pair: &pair,
            sequence: 0,
            relative_folder: Path::new(""),
            primary_media: &id,
            secondary_media: None,
        };

        let record = build_record(&[FieldMapping::tags(ActionKind::TagsHierarchical)], &ctx);
        assert!(record.tags.is_empty());
    }
}
