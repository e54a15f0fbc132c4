//! Primary/secondary file pairing within one folder
//!
//! A secondary file carries the primary's base name plus a suffix:
//! "image.jpg" pairs with "image_2.png". Names can chain ("image_2" pairs
//! with "image_2_2" when "image_2" was not consumed by "image"), so matching
//! runs in two passes:
//!
//! 1. Every trivial primary (base name without the suffix) claims
//!    `base + suffix`.
//! 2. Candidate secondaries that were not claimed are visited shortest
//!    first, each claiming its own `base + suffix`.
//!
//! Lookups go through a hash index, so a folder of n files costs
//! O(n log n) for the sort in the second pass.

use crate::{
    classifier::MediaClassifier, DuplicatePolicy, ImportError, Result, RunConfig, UnpairedPolicy,
};
use mediaimport_core::{FilePair, MediaFile};
use std::collections::HashMap;
use std::path::Path;

/// Pairs and leftovers of one folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderIndex {
    /// Pairs to import, in order
    pub pairs: Vec<FilePair>,

    /// Files that are not media files
    pub excluded: Vec<String>,

    /// Media files left out (unpaired under `Skip`, or replaced duplicates)
    pub dropped: Vec<String>,
}

impl FolderIndex {
    /// Number of listed files this index accounts for
    pub fn file_count(&self) -> usize {
        self.pairs.iter().map(FilePair::file_count).sum::<usize>()
            + self.excluded.len()
            + self.dropped.len()
    }
}

/// Builds the pair sequence of one folder
#[derive(Debug, Clone, Copy)]
pub struct FilePairIndexer<'a> {
    classifier: MediaClassifier<'a>,
    suffix: &'a str,
    pairing: bool,
    unpaired_policy: UnpairedPolicy,
    duplicate_policy: DuplicatePolicy,
}

impl<'a> FilePairIndexer<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            classifier: MediaClassifier::new(&config.extensions),
            suffix: &config.pair_suffix,
            pairing: config.pairing_enabled(),
            unpaired_policy: config.unpaired_policy,
            duplicate_policy: config.duplicate_policy,
        }
    }

    /// Index the files of `folder`, given in listing order
    ///
    /// Without pairing every media file becomes its own pair.
    pub fn index(&self, folder: &Path, file_names: &[String]) -> Result<FolderIndex> {
        if self.pairing {
            self.index_pairs(folder, file_names)
        } else {
            Ok(self.index_singles(folder, file_names))
        }
    }

    fn index_singles(&self, folder: &Path, file_names: &[String]) -> FolderIndex {
        let mut index = FolderIndex::default();
        for name in file_names {
            match self.classifier.classify(folder, name) {
                Some(file) => index.pairs.push(FilePair::single(file)),
                None => index.excluded.push(name.clone()),
            }
        }
        index
    }

    fn index_pairs(&self, folder: &Path, file_names: &[String]) -> Result<FolderIndex> {
        let mut index = FolderIndex::default();

        // Base name -> file, plus the base names split by pattern in listing order
        let mut files: HashMap<String, MediaFile> = HashMap::with_capacity(file_names.len());
        let mut primaries: Vec<String> = Vec::new();
        let mut candidates: Vec<String> = Vec::new();

        for name in file_names {
            let Some(file) = self.classifier.classify(folder, name) else {
                index.excluded.push(name.clone());
                continue;
            };

            let base = file.base_name.clone();
            if let Some(previous) = files.get(&base) {
                match self.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(ImportError::DuplicateBaseName {
                            folder: folder.to_path_buf(),
                            base_name: base,
                            first: previous.file_name.clone(),
                            second: file.file_name,
                        });
                    }
                    DuplicatePolicy::Overwrite => {
                        tracing::warn!(
                            "'{}' replaces '{}' in {}: both are named '{}'",
                            file.file_name,
                            previous.file_name,
                            folder.display(),
                            base
                        );
                        index.dropped.push(previous.file_name.clone());
                    }
                }
            } else if self.is_candidate_secondary(&base) {
                candidates.push(base.clone());
            } else {
                primaries.push(base.clone());
            }
            files.insert(base, file);
        }

        // A file leaves `files` once it is emitted, either as a primary or as
        // the secondary it was claimed as. Anything still present is unclaimed.
        for base in primaries {
            self.claim(folder, &base, &mut files, &mut index)?;
        }

        candidates.retain(|base| files.contains_key(base));
        candidates.sort_by_key(|base| base.chars().count());
        for base in candidates {
            if files.contains_key(&base) {
                self.claim(folder, &base, &mut files, &mut index)?;
            }
        }

        Ok(index)
    }

    /// Emit `base` as a primary, pairing it with `base + suffix` if present
    fn claim(
        &self,
        folder: &Path,
        base: &str,
        files: &mut HashMap<String, MediaFile>,
        index: &mut FolderIndex,
    ) -> Result<()> {
        let Some(primary) = files.remove(base) else {
            return Ok(());
        };

        let expected = format!("{}{}", base, self.suffix);
        if let Some(secondary) = files.remove(&expected) {
            tracing::debug!("Paired {} with {}", primary.file_name, secondary.file_name);
            index.pairs.push(FilePair::paired(primary, secondary));
            return Ok(());
        }

        match self.unpaired_policy {
            UnpairedPolicy::Keep => {
                tracing::debug!("No secondary file for {}", primary.file_name);
                index.pairs.push(FilePair::single(primary));
                Ok(())
            }
            UnpairedPolicy::Skip => {
                tracing::warn!(
                    "Skipping {}: no secondary file named '{}' in {}",
                    primary.file_name,
                    expected,
                    folder.display()
                );
                index.dropped.push(primary.file_name);
                Ok(())
            }
            UnpairedPolicy::Abort => Err(ImportError::MissingSecondary {
                folder: folder.to_path_buf(),
                primary: primary.file_name,
                expected,
            }),
        }
    }

    /// Base names ending in the suffix, with at least one character before it
    fn is_candidate_secondary(&self, base: &str) -> bool {
        base.len() > self.suffix.len() && base.ends_with(self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaimport_core::{ActionKind, FieldMapping};

    fn paired_config() -> RunConfig {
        RunConfig::new(
            "/root",
            vec![
                FieldMapping::field("Front", ActionKind::Media),
                FieldMapping::field("Back", ActionKind::Media2),
            ],
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn pair_names(index: &FolderIndex) -> Vec<(String, Option<String>)> {
        index
            .pairs
            .iter()
            .map(|p| {
                (
                    p.primary.file_name.clone(),
                    p.secondary.as_ref().map(|s| s.file_name.clone()),
                )
            })
            .collect()
    }

    #[test]
    fn test_without_pairing_every_media_file_is_single() {
        let config = RunConfig::new("/root", vec![FieldMapping::field("Front", ActionKind::Media)]);
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(Path::new("/root"), &names(&["b.jpg", "b_2.jpg", "notes.txt", "a.mp3"]))
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![
                ("b.jpg".to_string(), None),
                ("b_2.jpg".to_string(), None),
                ("a.mp3".to_string(), None),
            ]
        );
        assert_eq!(index.excluded, vec!["notes.txt"]);
        assert_eq!(index.file_count(), 4);
    }

    #[test]
    fn test_simple_pairs() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(
                Path::new("/root"),
                &names(&["img1.jpg", "img1_2.png", "img2.jpg", "img2_2.jpg", "readme.md"]),
            )
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![
                ("img1.jpg".to_string(), Some("img1_2.png".to_string())),
                ("img2.jpg".to_string(), Some("img2_2.jpg".to_string())),
            ]
        );
        assert_eq!(index.excluded, vec!["readme.md"]);
        assert!(index.dropped.is_empty());
        assert_eq!(index.file_count(), 5);
    }

    #[test]
    fn test_chained_suffixes() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        // "image" claims "image_2"; "image_2_2" then claims "image_2_2_2"
        let index = indexer
            .index(
                Path::new("/root"),
                &names(&["image.jpg", "image_2.jpg", "image_2_2.jpg", "image_2_2_2.jpg"]),
            )
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![
                ("image.jpg".to_string(), Some("image_2.jpg".to_string())),
                ("image_2_2.jpg".to_string(), Some("image_2_2_2.jpg".to_string())),
            ]
        );
    }

    #[test]
    fn test_secondary_without_primary_pairs_with_its_own_suffix() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        // No "card.jpg": "card_2" is a candidate that claims "card_2_2"
        let index = indexer
            .index(Path::new("/root"), &names(&["card_2_2.png", "card_2.jpg"]))
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![("card_2.jpg".to_string(), Some("card_2_2.png".to_string()))]
        );
    }

    #[test]
    fn test_second_pass_runs_shortest_first() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        // Listed longest first; sorting by length lets "x_2" claim "x_2_2"
        // before "x_2_2" gets a chance to claim "x_2_2_2".
        let index = indexer
            .index(
                Path::new("/root"),
                &names(&["x_2_2_2.jpg", "x_2_2.jpg", "x_2.jpg"]),
            )
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![
                ("x_2.jpg".to_string(), Some("x_2_2.jpg".to_string())),
                ("x_2_2_2.jpg".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_bare_suffix_is_a_primary() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(Path::new("/root"), &names(&["_2.jpg", "_2_2.jpg"]))
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![("_2.jpg".to_string(), Some("_2_2.jpg".to_string()))]
        );
    }

    #[test]
    fn test_unpaired_keep() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(Path::new("/root"), &names(&["clip.mp3"]))
            .unwrap();

        assert_eq!(pair_names(&index), vec![("clip.mp3".to_string(), None)]);
    }

    #[test]
    fn test_unpaired_skip() {
        let config = paired_config().unpaired_policy(UnpairedPolicy::Skip);
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(Path::new("/root"), &names(&["a.jpg", "a_2.jpg", "clip.mp3"]))
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![("a.jpg".to_string(), Some("a_2.jpg".to_string()))]
        );
        assert_eq!(index.dropped, vec!["clip.mp3"]);
        assert_eq!(index.file_count(), 3);
    }

    #[test]
    fn test_unpaired_abort() {
        let config = paired_config().unpaired_policy(UnpairedPolicy::Abort);
        let indexer = FilePairIndexer::new(&config);

        let err = indexer
            .index(Path::new("/root"), &names(&["clip.mp3"]))
            .unwrap_err();

        match err {
            ImportError::MissingSecondary {
                primary, expected, ..
            } => {
                assert_eq!(primary, "clip.mp3");
                assert_eq!(expected, "clip_2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_base_name_overwrite() {
        let config = paired_config();
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(
                Path::new("/root"),
                &names(&["a.jpg", "a.png", "a_2.jpg"]),
            )
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![("a.png".to_string(), Some("a_2.jpg".to_string()))]
        );
        assert_eq!(index.dropped, vec!["a.jpg"]);
        assert_eq!(index.file_count(), 3);
    }

    #[test]
    fn test_duplicate_base_name_reject() {
        let config = paired_config().duplicate_policy(DuplicatePolicy::Reject);
        let indexer = FilePairIndexer::new(&config);

        let err = indexer
            .index(Path::new("/root"), &names(&["a.jpg", "a.png"]))
            .unwrap_err();

        assert!(matches!(err, ImportError::DuplicateBaseName { ref base_name, .. } if base_name == "a"));
    }

    #[test]
    fn test_custom_suffix() {
        let config = paired_config().pair_suffix("-back");
        let indexer = FilePairIndexer::new(&config);

        let index = indexer
            .index(Path::new("/root"), &names(&["card.jpg", "card-back.jpg"]))
            .unwrap();

        assert_eq!(
            pair_names(&index),
            vec![("card.jpg".to_string(), Some("card-back.jpg".to_string()))]
        );
    }
}
