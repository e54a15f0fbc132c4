//! Folder traversal for an import run

use crate::{ImportError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One folder and the files directly inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    /// Absolute (or root-relative) path of the folder
    pub path: PathBuf,

    /// Path relative to the import root; empty for the root itself
    pub relative: PathBuf,

    /// File names in name order
    pub file_names: Vec<String>,
}

/// Enumerates the folders of an import root in pre-order
pub struct FolderWalker {
    /// Whether to descend into subfolders
    recursive: bool,

    /// Whether to follow symbolic links
    follow_links: bool,
}

impl Default for FolderWalker {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_links: false,
        }
    }
}

impl FolderWalker {
    /// Create a new recursive folder walker
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to visit subfolders
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// List every folder to visit, each with its files
    ///
    /// A folder's files are listed before any of its subfolders, and
    /// siblings are visited in name order. The root must be a readable
    /// directory; unreadable subfolders are listed without files and a
    /// warning.
    pub fn walk(&self, root: &Path) -> Result<Vec<FolderListing>> {
        if !root.exists() {
            return Err(ImportError::FileNotFound(root.display().to_string()));
        }

        if !root.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        // Files sit one level below their folder
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .max_depth(max_depth)
            .sort_by_file_name();

        let mut folders: Vec<FolderListing> = Vec::new();
        let mut positions: HashMap<PathBuf, usize> = HashMap::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if entry.depth() < max_depth {
                    positions.insert(entry.path().to_path_buf(), folders.len());
                    folders.push(FolderListing {
                        path: entry.path().to_path_buf(),
                        relative: entry
                            .path()
                            .strip_prefix(root)
                            .map(Path::to_path_buf)
                            .unwrap_or_default(),
                        file_names: Vec::new(),
                    });
                }
                continue;
            }

            // Symlinks count when they point at a regular file
            if !entry.path().is_file() {
                continue;
            }

            let Some(position) = entry.path().parent().and_then(|p| positions.get(p)) else {
                continue;
            };

            match entry.file_name().to_str() {
                Some(name) => folders[*position].file_names.push(name.to_string()),
                None => {
                    tracing::warn!("Skipping file with non UTF-8 name: {:?}", entry.file_name());
                }
            }
        }

        Ok(folders)
    }
}
