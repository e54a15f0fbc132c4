//! Filesystem media store
//!
//! Copies imported files into a flat media folder, the way a note
//! collection keeps its media. Re-importing an identical file reuses the
//! stored copy; a different file with the same name gets a numbered name.

use mediaimport_core::{HostError, HostResult, MediaId, MediaStore};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Media store backed by a directory
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    media_dir: PathBuf,
}

impl FsMediaStore {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }
}

impl MediaStore for FsMediaStore {
    fn store(&mut self, source: &Path) -> HostResult<MediaId> {
        if !self.media_dir.exists() {
            fs::create_dir_all(&self.media_dir)?;
        }

        let original = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HostError::invalid_input("Invalid source filename"))?;
        let filename = sanitize_filename(original);
        if filename.is_empty() {
            return Err(HostError::invalid_input(format!(
                "'{}' has no usable file name",
                original
            )));
        }

        let source_hash = calculate_file_hash(source)?;
        let dest_path = match find_slot(&self.media_dir, &filename, &source_hash)? {
            Slot::Existing(path) => {
                tracing::debug!("{} already stored as {}", source.display(), path.display());
                path
            }
            Slot::Free(path) => {
                fs::copy(source, &path)?;
                path
            }
        };

        let stored_name = dest_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HostError::invalid_input("Invalid stored filename"))?;

        Ok(MediaId::new(stored_name))
    }
}

enum Slot {
    /// A file with identical content is already stored here
    Existing(PathBuf),
    /// Nothing is stored here yet
    Free(PathBuf),
}

/// Find where `filename` with content `hash` goes in `media_dir`
///
/// "song.mp3" -> "song-1.mp3" -> "song-2.mp3" etc.
fn find_slot(media_dir: &Path, filename: &str, hash: &str) -> HostResult<Slot> {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    for counter in 0..1000 {
        let candidate = match (counter, extension.is_empty()) {
            (0, _) => filename.to_string(),
            (_, true) => format!("{}-{}", stem, counter),
            (_, false) => format!("{}-{}.{}", stem, counter, extension),
        };

        let candidate_path = media_dir.join(&candidate);
        if !candidate_path.exists() {
            return Ok(Slot::Free(candidate_path));
        }
        if calculate_file_hash(&candidate_path)? == hash {
            return Ok(Slot::Existing(candidate_path));
        }
    }

    Err(HostError::rejected(format!(
        "Could not find a free name for {} after 1000 attempts",
        filename
    )))
}

/// Sanitize a file name for the media folder
///
/// Removes/replaces characters that are invalid on common filesystems
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            // Invalid on Windows: < > : " / \ | ? *
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            // Control characters
            c if c.is_control() => '_',
            // Keep everything else
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// SHA-256 of a file's content, hex encoded
pub fn calculate_file_hash(path: &Path) -> HostResult<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
