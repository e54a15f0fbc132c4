//! Domain types for MediaImport

mod action;
mod ids;
mod media;
mod record;

pub use action::{ActionKind, FieldMapping, FieldValue, TAGS_FIELD};
pub use ids::{MediaId, RecordId};
pub use media::{
    ExtensionSets, FilePair, MediaFile, MediaKind, DEFAULT_AUDIO_EXTENSIONS,
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_PAIR_SUFFIX,
};
pub use record::{ImportProgress, ImportRecord};
