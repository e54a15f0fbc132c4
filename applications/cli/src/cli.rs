//! Command line arguments

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mediaimport_core::{ActionKind, FieldMapping};
use mediaimport_engine::{DuplicatePolicy, UnpairedPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediaimport")]
#[command(about = "Create notes from a folder of images and audio files", long_about = None)]
pub struct Cli {
    /// Settings directory (defaults to the platform configuration directory)
    #[arg(long, global = true, env = "MEDIAIMPORT_SETTINGS_DIR")]
    pub settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a folder of media files
    Import(ImportArgs),
    /// List the available field actions
    Actions {
        /// List the actions offered for the Tags row
        #[arg(long)]
        tags: bool,
        /// Include the file extension actions
        #[arg(long)]
        show_extension_actions: bool,
    },
    /// Print the merged settings
    Settings,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Folder to import (defaults to the last imported folder)
    pub dir: Option<PathBuf>,

    /// Note type the records are created for
    #[arg(short = 't', long)]
    pub note_type: String,

    /// Fields of the note type, in order
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub fields: Vec<String>,

    /// Set the action of one row (FIELD=KEYWORD, "Tags" for the tag row)
    #[arg(short, long = "map", value_parser = parse_mapping)]
    pub mappings: Vec<(String, ActionKind)>,

    /// Include subfolders
    #[arg(short, long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only import the top folder
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Suffix identifying secondary media files
    #[arg(long)]
    pub suffix: Option<String>,

    /// Folder the media files are copied to
    #[arg(long)]
    pub media_dir: PathBuf,

    /// Write records to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to do with a file whose secondary file is missing
    #[arg(long, value_enum, default_value_t)]
    pub on_unpaired: UnpairedArg,

    /// What to do with files sharing a name in one folder
    #[arg(long, value_enum, default_value_t)]
    pub on_duplicate: DuplicateArg,
}

impl ImportArgs {
    /// Folder from the command line, or `start` when none is given
    pub fn dir_or(&self, start: impl FnOnce() -> PathBuf) -> PathBuf {
        self.dir.clone().unwrap_or_else(start)
    }

    /// Recursion from the flags, or the remembered value when neither is given
    pub fn recursive_or(&self, remembered: bool) -> bool {
        if self.recursive {
            true
        } else if self.no_recursive {
            false
        } else {
            remembered
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnpairedArg {
    #[default]
    Keep,
    Skip,
    Abort,
}

impl From<UnpairedArg> for UnpairedPolicy {
    fn from(arg: UnpairedArg) -> Self {
        match arg {
            UnpairedArg::Keep => UnpairedPolicy::Keep,
            UnpairedArg::Skip => UnpairedPolicy::Skip,
            UnpairedArg::Abort => UnpairedPolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicateArg {
    #[default]
    Overwrite,
    Reject,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

/// Parse `FIELD=KEYWORD`; an empty keyword clears the row
fn parse_mapping(s: &str) -> Result<(String, ActionKind), String> {
    let (field, keyword) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=KEYWORD, got '{}'", s))?;

    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }

    let action = keyword.trim().parse::<ActionKind>().map_err(|e| e.to_string())?;
    Ok((field.to_string(), action))
}

/// Apply `--map` overrides on top of the remembered mapping table
pub fn apply_overrides(
    mappings: &mut [FieldMapping],
    overrides: &[(String, ActionKind)],
) -> anyhow::Result<()> {
    for (field, action) in overrides {
        let Some(mapping) = mappings.iter_mut().find(|m| &m.target_field == field) else {
            bail!("'{}' is not a field of the selected note type", field);
        };
        mapping.action = *action;
    }
    Ok(())
}
