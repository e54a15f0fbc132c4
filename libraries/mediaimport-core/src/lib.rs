//! MediaImport Core
//!
//! Host-agnostic types, collaborator traits, and error handling shared by the
//! import engine and its hosts.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaFile`, `FilePair`, `ActionKind`, `FieldMapping`, `ImportRecord`
//! - **Collaborator Traits**: `MediaStore`, `RecordSink`, `ProgressSink`
//! - **Error Handling**: `HostError` for failures reported by a host
//!
//! # Example
//!
//! ```rust
//! use mediaimport_core::{ActionKind, ExtensionSets, FieldMapping, MediaKind};
//!
//! let sets = ExtensionSets::default();
//! assert_eq!(sets.kind_of("JPG"), Some(MediaKind::Image));
//! assert_eq!(sets.kind_of("txt"), None);
//!
//! let mapping = FieldMapping::field("Front", ActionKind::Media);
//! assert!(!mapping.is_tags_target());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{HostError, HostResult};
pub use traits::{MediaStore, NullProgress, ProgressSink, RecordSink};
pub use types::{
    ActionKind, ExtensionSets, FieldMapping, FieldValue, FilePair, ImportProgress, ImportRecord,
    MediaFile, MediaId, MediaKind, RecordId, DEFAULT_AUDIO_EXTENSIONS, DEFAULT_IMAGE_EXTENSIONS,
    DEFAULT_PAIR_SUFFIX, TAGS_FIELD,
};
