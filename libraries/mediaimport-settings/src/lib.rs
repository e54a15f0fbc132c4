//! MediaImport Settings
//!
//! Persisted importer settings: the last import folder, the recursion flag,
//! the secondary file suffix, and the mapping last used for each note type.
//!
//! Settings are only read and written at the process boundary. An import
//! run receives a fixed `RunConfig` built from them.

mod error;
pub mod mappings;
pub mod store;

pub use error::{Result, SettingsError};
pub use mappings::DEFAULT_FIELD_ACTIONS;
pub use store::{FieldSettings, Settings};
