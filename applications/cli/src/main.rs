/// MediaImport - create notes from a folder of media files
use anyhow::Context;
use clap::Parser;
use mediaimport_core::ActionKind;
use mediaimport_engine::{
    AbortCause, FsMediaStore, ImportRunResult, JsonLinesRecordSink, MediaImporter, RunConfig, RunOutcome,
};
use mediaimport_settings::Settings;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod progress;

use cli::{apply_overrides, Cli, Commands, ImportArgs};
use progress::ConsoleProgress;

const FAILURE_GUIDANCE: &str = "Failed to generate cards and no media files were imported. \
Please ensure the note type you selected is able to generate cards by using a valid card \
template (https://docs.ankiweb.net/templates/intro.html).";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the records
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mediaimport=info,mediaimport_engine=info,mediaimport_settings=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let settings_dir = match cli.settings_dir {
        Some(dir) => dir,
        None => Settings::default_dir()?,
    };

    match cli.command {
        Commands::Import(args) => {
            import(&settings_dir, args).await?;
        }
        Commands::Actions {
            tags,
            show_extension_actions,
        } => {
            list_actions(tags, show_extension_actions);
        }
        Commands::Settings => {
            let settings = Settings::load(&settings_dir);
            println!("{}", serde_json::to_string_pretty(&settings.to_json()?)?);
        }
    }

    Ok(())
}

async fn import(settings_dir: &Path, args: ImportArgs) -> anyhow::Result<()> {
    let mut settings = Settings::load(settings_dir);

    let recursive = args.recursive_or(settings.include_subfolders);
    let suffix = args
        .suffix
        .clone()
        .unwrap_or_else(|| settings.second_media_suffix.clone());

    let dir = args.dir_or(|| settings.start_folder());

    let mut mappings = settings.mappings_for(&args.note_type, &args.fields);
    apply_overrides(&mut mappings, &args.mappings)?;

    // Remember the mapping as soon as the import starts
    settings.remember(&args.note_type, &mappings, &dir, recursive);
    if let Err(e) = settings.save(settings_dir) {
        tracing::warn!("Could not save settings: {}", e);
    }

    let config = RunConfig::new(&dir, mappings)
        .recursive(recursive)
        .pair_suffix(suffix)
        .unpaired_policy(args.on_unpaired.into())
        .duplicate_policy(args.on_duplicate.into());

    let mut importer = MediaImporter::new(config);
    let token = importer.cancellation_token();
    let media_dir = args.media_dir;
    let output = args.output;

    let mut worker = tokio::task::spawn_blocking(move || {
        run_import(&mut importer, media_dir, output.as_deref())
    });

    let result = tokio::select! {
        joined = &mut worker => joined??,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, stopping after the current file");
            token.cancel();
            worker.await??
        }
    };

    match result.outcome {
        RunOutcome::Completed | RunOutcome::Cancelled => {
            eprintln!("{}", result.summary_text());
            Ok(())
        }
        RunOutcome::Aborted { cause, .. } => {
            if let Some(guidance) = abort_guidance(cause) {
                eprintln!("{}", guidance);
            }
            anyhow::bail!("{}", result.summary_text())
        }
    }
}

/// Extra advice for an aborted run; the summary already carries the reason
fn abort_guidance(cause: AbortCause) -> Option<&'static str> {
    match cause {
        AbortCause::RecordCreation => Some(FAILURE_GUIDANCE),
        AbortCause::FolderRejected => None,
    }
}

fn run_import(
    importer: &mut MediaImporter,
    media_dir: PathBuf,
    output: Option<&Path>,
) -> anyhow::Result<ImportRunResult> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut media = FsMediaStore::new(media_dir);
    let mut records = JsonLinesRecordSink::new(writer);
    let mut progress = ConsoleProgress::new();

    Ok(importer.run(&mut media, &mut records, &mut progress)?)
}

fn list_actions(tags: bool, show_extension_actions: bool) {
    for action in ActionKind::available_for(tags, show_extension_actions) {
        let keyword = match action {
            ActionKind::None => "(none)",
            _ => action.keyword(),
        };
        println!("{:<30} {}", keyword, action.description().replace('\n', " "));
    }
}
