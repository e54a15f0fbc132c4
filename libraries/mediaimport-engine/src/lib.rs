//! Media Import Engine
//!
//! This crate turns a folder of images and audio files into note records,
//! one record per file (or per file pair).
//!
//! # Features
//!
//! - Folder traversal (recursive or top level only) in a deterministic order
//! - Media classification by extension
//! - Pairing of primary files with `<base><suffix>` secondaries
//! - Field mapping actions (media references, file names, sequence, tags)
//! - Media storage with duplicate detection via file hashing
//! - Progress reporting and cooperative cancellation
//!
//! # Architecture
//!
//! - `walker`: Folder enumeration
//! - `classifier`: Extension parsing and media kinds
//! - `pairing`: Per-folder primary/secondary pairing
//! - `resolver`: Evaluating mapping actions into record fields and tags
//! - `importer`: Orchestration of the import run
//! - `media_store`, `record_sink`: Filesystem and JSON-lines host adapters

mod error;
mod types;

// Core modules
pub mod cancel;
pub mod classifier;
pub mod importer;
pub mod pairing;
pub mod resolver;
pub mod walker;

// Host adapters
pub mod media_store;
pub mod record_sink;

pub use cancel::CancellationToken;
pub use error::ImportError;
pub use importer::MediaImporter;
pub use media_store::FsMediaStore;
pub use record_sink::JsonLinesRecordSink;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
