//! Media file classification

use mediaimport_core::{ExtensionSets, MediaFile};
use std::path::Path;

/// Decides which files of a folder take part in an import
#[derive(Debug, Clone, Copy)]
pub struct MediaClassifier<'a> {
    extensions: &'a ExtensionSets,
}

impl<'a> MediaClassifier<'a> {
    pub fn new(extensions: &'a ExtensionSets) -> Self {
        Self { extensions }
    }

    /// Classify a file of `folder`
    ///
    /// Returns `None` for files without an extension and for extensions that
    /// are neither audio nor image. Those files are skipped, not reported.
    pub fn classify(&self, folder: &Path, file_name: &str) -> Option<MediaFile> {
        let (base_name, extension) = split_extension(file_name);
        let extension = extension?;
        let kind = self.extensions.kind_of(extension)?;

        Some(MediaFile {
            path: folder.join(file_name),
            file_name: file_name.to_string(),
            base_name: base_name.to_string(),
            extension: extension.to_lowercase(),
            extension_exact: extension.to_string(),
            kind,
        })
    }

    /// Check whether a file name would be imported
    pub fn is_media_file(&self, file_name: &str) -> bool {
        split_extension(file_name)
            .1
            .and_then(|ext| self.extensions.kind_of(ext))
            .is_some()
    }
}

/// Split a file name at its last dot
///
/// Leading dots do not start an extension: ".jpg" and "..jpg" have none.
/// A trailing dot yields an empty extension.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    let Some(dot) = file_name.rfind('.') else {
        return (file_name, None);
    };
    if file_name[..dot].chars().all(|c| c == '.') {
        return (file_name, None);
    }
    (&file_name[..dot], Some(&file_name[dot + 1..]))
}
