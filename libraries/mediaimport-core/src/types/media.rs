/// Media files, supported extensions, and primary/secondary pairs
use crate::error::{HostError, HostResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Suffix that marks a secondary media file ("image.jpg" -> "image_2.png")
pub const DEFAULT_PAIR_SUFFIX: &str = "_2";

/// Audio/video extensions the host editor can embed as `[sound:...]`
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &[
    "3gp", "aac", "avi", "flac", "flv", "m4a", "mkv", "mov", "mp3", "mp4", "mpeg", "mpg", "oga",
    "ogg", "ogv", "ogx", "opus", "spx", "swf", "wav", "webm",
];

/// Image extensions the host editor can embed as `<img>`
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[
    "avif", "gif", "ico", "jpeg", "jpg", "png", "svg", "tif", "tiff", "webp",
];

/// How a media file is embedded into a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Image,
}

/// A classified media file inside one folder
///
/// Built once by the classifier and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Full path to the file
    pub path: PathBuf,

    /// File name with extension ("Image.JPG")
    pub file_name: String,

    /// File name without extension ("Image")
    pub base_name: String,

    /// Lower-cased extension without the dot ("jpg")
    pub extension: String,

    /// Extension exactly as written in the file name ("JPG")
    pub extension_exact: String,

    /// Audio or image
    pub kind: MediaKind,
}

/// A primary file and the secondary file matched to it, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePair {
    pub primary: MediaFile,
    pub secondary: Option<MediaFile>,
}

impl FilePair {
    /// A pair without a secondary file
    pub fn single(primary: MediaFile) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// A primary file matched with its secondary file
    pub fn paired(primary: MediaFile, secondary: MediaFile) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Number of files this pair covers (1 or 2)
    pub fn file_count(&self) -> usize {
        if self.secondary.is_some() {
            2
        } else {
            1
        }
    }
}

/// The two disjoint extension sets supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSets {
    audio: BTreeSet<String>,
    image: BTreeSet<String>,
}

impl Default for ExtensionSets {
    fn default() -> Self {
        Self {
            audio: DEFAULT_AUDIO_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            image: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl ExtensionSets {
    /// Build extension sets from host-supplied lists
    ///
    /// Extensions are stored lower-cased, with any leading dot removed.
    ///
    /// # Errors
    /// Returns `InvalidInput` if an extension appears in both sets
    pub fn new<A, I>(audio: A, image: I) -> HostResult<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let audio: BTreeSet<String> = audio.into_iter().map(|e| normalize(e.as_ref())).collect();
        let image: BTreeSet<String> = image.into_iter().map(|e| normalize(e.as_ref())).collect();

        if let Some(shared) = audio.intersection(&image).next() {
            return Err(HostError::invalid_input(format!(
                "extension '{}' is listed as both audio and image",
                shared
            )));
        }

        Ok(Self { audio, image })
    }

    /// Look up the media kind of an extension (case-insensitive)
    pub fn kind_of(&self, extension: &str) -> Option<MediaKind> {
        let ext = extension.to_lowercase();
        if self.audio.contains(&ext) {
            Some(MediaKind::Audio)
        } else if self.image.contains(&ext) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    /// Audio extensions, lower-cased and sorted
    pub fn audio(&self) -> impl Iterator<Item = &str> {
        self.audio.iter().map(String::as_str)
    }

    /// Image extensions, lower-cased and sorted
    pub fn image(&self) -> impl Iterator<Item = &str> {
        self.image.iter().map(String::as_str)
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets_are_disjoint() {
        let sets = ExtensionSets::default();
        for ext in sets.audio() {
            assert_eq!(sets.kind_of(ext), Some(MediaKind::Audio));
        }
        for ext in sets.image() {
            assert_eq!(sets.kind_of(ext), Some(MediaKind::Image));
        }
    }

    #[test]
    fn test_kind_of_is_case_insensitive() {
        let sets = ExtensionSets::default();
        assert_eq!(sets.kind_of("MP3"), Some(MediaKind::Audio));
        assert_eq!(sets.kind_of("Png"), Some(MediaKind::Image));
        assert_eq!(sets.kind_of("txt"), None);
        assert_eq!(sets.kind_of(""), None);
    }

    #[test]
    fn test_new_normalizes_extensions() {
        let sets = ExtensionSets::new([".OGG"], ["JPG"]).unwrap();
        assert_eq!(sets.audio().collect::<Vec<_>>(), vec!["ogg"]);
        assert_eq!(sets.kind_of("jpg"), Some(MediaKind::Image));
    }

    #[test]
    fn test_new_rejects_overlap() {
        let err = ExtensionSets::new(["webm"], ["WEBM"]).unwrap_err();
        assert!(matches!(err, HostError::InvalidInput(_)));
    }

    #[test]
    fn test_file_pair_count() {
        let file = MediaFile {
            path: PathBuf::from("/a/img.jpg"),
            file_name: "img.jpg".to_string(),
            base_name: "img".to_string(),
            extension: "jpg".to_string(),
            extension_exact: "jpg".to_string(),
            kind: MediaKind::Image,
        };
        assert_eq!(FilePair::single(file.clone()).file_count(), 1);
        assert_eq!(FilePair::paired(file.clone(), file).file_count(), 2);
    }
}
