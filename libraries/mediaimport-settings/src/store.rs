//! Settings files on disk
//!
//! Settings are split over two JSON files in the settings directory:
//!
//! - `config.json` holds what the user edits directly (the secondary file
//!   suffix and whether extension actions are offered)
//! - `user_data/transient_settings.json` holds what the importer remembers
//!   between runs (last folder, recursion flag, field mappings) plus any key
//!   this version does not know
//!
//! Loading never fails: missing or broken files and fields fall back to
//! defaults with a warning, so an old or hand-edited file still works.

use crate::error::{Result, SettingsError};
use indexmap::IndexMap;
use mediaimport_core::DEFAULT_PAIR_SUFFIX;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Default filename of the user settings
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Folder (inside the settings directory) for settings the user never edits
pub const USER_DATA_DIR: &str = "user_data";
/// Default filename of the transient settings
pub const TRANSIENT_FILE_NAME: &str = "transient_settings.json";

const LOAD_FOLDER: &str = "loadFolder";
const INCLUDE_SUBFOLDERS: &str = "includeSubfolders";
const FIELD_SETTINGS: &str = "fieldSettings";
const SECOND_MEDIA_SUFFIX: &str = "secondMediaSuffix";
const SHOW_EXTENSION_ACTIONS: &str = "showExtensionActions";

/// Note type -> field name -> action keyword
pub type FieldSettings = IndexMap<String, IndexMap<String, String>>;

/// Merged importer settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Most recent import folder
    pub load_folder: PathBuf,

    /// Whether the last import included subfolders
    pub include_subfolders: bool,

    /// Most recently used mapping per note type
    pub field_settings: FieldSettings,

    /// Suffix identifying secondary media files
    pub second_media_suffix: String,

    /// Whether the extension actions are offered
    pub show_extension_actions: bool,

    /// Keys this version does not know, kept as they were read
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            load_folder: dirs::home_dir().unwrap_or_default(),
            include_subfolders: true,
            field_settings: FieldSettings::new(),
            second_media_suffix: DEFAULT_PAIR_SUFFIX.to_string(),
            show_extension_actions: false,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Platform settings directory (e.g. `~/.config/mediaimport`)
    pub fn default_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("mediaimport"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings from `dir`, filling anything missing from defaults
    ///
    /// Transient settings are applied first and user settings last, so a
    /// key present in both files takes the user's value.
    pub fn load(dir: &Path) -> Self {
        let mut settings = Self::default();

        for path in [transient_path(dir), dir.join(CONFIG_FILE_NAME)] {
            match read_object(&path) {
                Ok(Some(object)) => settings.merge(object),
                Ok(None) => tracing::debug!("No settings file at {}", path.display()),
                Err(e) => tracing::warn!("Ignoring settings file: {}", e),
            }
        }

        settings
    }

    /// Apply every key of `object` on top of the current values
    ///
    /// A known key with a value of the wrong type keeps the current value.
    /// Merging the same object twice gives the same result as merging it once.
    pub fn merge(&mut self, object: Map<String, Value>) {
        for (key, value) in object {
            match key.as_str() {
                LOAD_FOLDER => match value.as_str() {
                    Some(folder) => self.load_folder = PathBuf::from(folder),
                    None => warn_type(&key, "a string"),
                },
                INCLUDE_SUBFOLDERS => match value.as_bool() {
                    Some(flag) => self.include_subfolders = flag,
                    None => warn_type(&key, "a boolean"),
                },
                FIELD_SETTINGS => match serde_json::from_value::<FieldSettings>(value) {
                    Ok(field_settings) => self.field_settings = field_settings,
                    Err(e) => tracing::warn!("Ignoring setting '{}': {}", key, e),
                },
                SECOND_MEDIA_SUFFIX => match value.as_str() {
                    Some(suffix) => self.second_media_suffix = suffix.to_string(),
                    None => warn_type(&key, "a string"),
                },
                SHOW_EXTENSION_ACTIONS => match value.as_bool() {
                    Some(flag) => self.show_extension_actions = flag,
                    None => warn_type(&key, "a boolean"),
                },
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
    }

    /// Write both settings files, creating the directories as needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        let user_data = dir.join(USER_DATA_DIR);
        fs::create_dir_all(&user_data).map_err(|source| SettingsError::CreateDir {
            path: user_data.clone(),
            source,
        })?;

        write_object(&dir.join(CONFIG_FILE_NAME), &self.user_object())?;
        write_object(&transient_path(dir), &self.transient_object()?)?;

        tracing::debug!("Saved settings to {}", dir.display());
        Ok(())
    }

    /// The import folder to start from: the last one if it still exists,
    /// the home directory otherwise
    pub fn start_folder(&self) -> PathBuf {
        if self.load_folder.is_dir() {
            return self.load_folder.clone();
        }
        tracing::warn!(
            "Last import folder {} is gone, starting from the home directory",
            self.load_folder.display()
        );
        dirs::home_dir().unwrap_or_default()
    }

    /// Both files merged into one object, user keys last
    pub fn to_json(&self) -> Result<Value> {
        let mut object = self.transient_object()?;
        object.extend(self.user_object());
        Ok(Value::Object(object))
    }

    fn user_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert(
            SECOND_MEDIA_SUFFIX.to_string(),
            Value::String(self.second_media_suffix.clone()),
        );
        object.insert(
            SHOW_EXTENSION_ACTIONS.to_string(),
            Value::Bool(self.show_extension_actions),
        );
        object
    }

    fn transient_object(&self) -> Result<Map<String, Value>> {
        let mut object = Map::new();
        object.insert(
            LOAD_FOLDER.to_string(),
            Value::String(self.load_folder.to_string_lossy().into_owned()),
        );
        object.insert(
            INCLUDE_SUBFOLDERS.to_string(),
            Value::Bool(self.include_subfolders),
        );
        object.insert(
            FIELD_SETTINGS.to_string(),
            serde_json::to_value(&self.field_settings)?,
        );
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        Ok(object)
    }
}

fn transient_path(dir: &Path) -> PathBuf {
    dir.join(USER_DATA_DIR).join(TRANSIENT_FILE_NAME)
}

fn warn_type(key: &str, expected: &str) {
    tracing::warn!("Ignoring setting '{}': expected {}", key, expected);
}

/// Read a JSON object, or `None` when the file does not exist
fn read_object(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(object) => Ok(Some(object)),
        _ => Err(SettingsError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Write a JSON object with a 4-space indent
fn write_object(path: &Path, object: &Map<String, Value>) -> Result<()> {
    let mut data = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"    "));
    object.serialize(&mut serializer)?;
    data.push(b'\n');

    fs::write(path, data).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}
