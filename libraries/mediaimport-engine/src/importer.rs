//! Import orchestration - brings together walking, pairing, field mapping and the host

use crate::{
    cancel::CancellationToken,
    pairing::FilePairIndexer,
    resolver::{build_record, EvalContext},
    walker::{FolderListing, FolderWalker},
    AbortCause, ImportRunResult, PartialFailurePolicy, Result, RunConfig, RunOutcome,
};
use mediaimport_core::{
    FilePair, HostError, ImportProgress, MediaStore, ProgressSink, RecordId, RecordSink,
};
use std::time::Instant;

/// Media importer orchestrator
///
/// Runs are strictly sequential: `run` takes `&mut self`, so one importer
/// never has two runs in flight.
pub struct MediaImporter {
    config: RunConfig,
    cancel: CancellationToken,
}

/// Why the folder loop stopped early
enum Stop {
    Aborted(AbortCause, String),
    Cancelled,
}

impl MediaImporter {
    /// Create a new media importer
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops the current run when cancelled
    ///
    /// The flag is cleared when a run finishes.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Import every folder of the configured root
    ///
    /// Returns an error only when the run cannot start (invalid
    /// configuration, missing root). Failures during the run end it with an
    /// `Aborted` outcome and the number of records created so far.
    pub fn run<M, R, P>(
        &mut self,
        media: &mut M,
        records: &mut R,
        progress: &mut P,
    ) -> Result<ImportRunResult>
    where
        M: MediaStore + ?Sized,
        R: RecordSink + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let start_time = Instant::now();
        self.config.validate()?;

        let folders = FolderWalker::new()
            .recursive(self.config.recursive)
            .follow_links(self.config.follow_links)
            .walk(&self.config.root)?;
        let total_files = folders.iter().map(|f| f.file_names.len()).sum();

        tracing::info!(
            "Importing {} files in {} folders from {} (pairing: {})",
            total_files,
            folders.len(),
            self.config.root.display(),
            self.config.pairing_enabled()
        );

        let mut run = Run {
            config: &self.config,
            cancel: &self.cancel,
            indexer: FilePairIndexer::new(&self.config),
            media,
            records,
            sink: progress,
            progress: ImportProgress::new(total_files),
            result: ImportRunResult::new(),
            created: Vec::new(),
        };

        // Send initial progress
        run.sink.report(&run.progress);

        let stopped = folders.iter().try_for_each(|folder| run.import_folder(folder));
        let mut result = run.finish(stopped);
        self.cancel.reset();
        result.elapsed_seconds = start_time.elapsed().as_secs_f64();

        tracing::info!("{}", result.summary_text());
        Ok(result)
    }
}

/// State of one run in progress
struct Run<'a, M: ?Sized, R: ?Sized, P: ?Sized> {
    config: &'a RunConfig,
    cancel: &'a CancellationToken,
    indexer: FilePairIndexer<'a>,
    media: &'a mut M,
    records: &'a mut R,
    sink: &'a mut P,
    progress: ImportProgress,
    result: ImportRunResult,
    created: Vec<RecordId>,
}

impl<M, R, P> Run<'_, M, R, P>
where
    M: MediaStore + ?Sized,
    R: RecordSink + ?Sized,
    P: ProgressSink + ?Sized,
{
    fn import_folder(&mut self, folder: &FolderListing) -> std::result::Result<(), Stop> {
        self.result.folders_visited += 1;
        self.progress.current_folder = Some(folder.path.clone());

        let index = self
            .indexer
            .index(&folder.path, &folder.file_names)
            .map_err(|e| {
                tracing::error!("Failed to index {}: {}", folder.path.display(), e);
                Stop::Aborted(AbortCause::FolderRejected, e.to_string())
            })?;

        let skipped = index.excluded.len() + index.dropped.len();
        if skipped > 0 {
            tracing::debug!("Skipping {} files in {}", skipped, folder.path.display());
            self.result.skipped_files += skipped;
            self.advance(skipped);
        }

        for (sequence, pair) in index.pairs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!("Import cancelled in {}", folder.path.display());
                return Err(Stop::Cancelled);
            }
            self.import_pair(folder, sequence, pair)?;
        }

        Ok(())
    }

    fn import_pair(
        &mut self,
        folder: &FolderListing,
        sequence: usize,
        pair: &FilePair,
    ) -> std::result::Result<(), Stop> {
        tracing::debug!("Importing {}", pair.primary.path.display());

        let primary_media = match self.media.store(&pair.primary.path) {
            Ok(id) => id,
            Err(e) => {
                self.media_failed(pair, &e);
                return Ok(());
            }
        };

        let secondary_media = match &pair.secondary {
            Some(secondary) => match self.media.store(&secondary.path) {
                Ok(id) => Some(id),
                Err(e) => {
                    self.media_failed(pair, &e);
                    return Ok(());
                }
            },
            None => None,
        };

        let ctx = EvalContext {
            pair,
            sequence,
            relative_folder: &folder.relative,
            primary_media: &primary_media,
            secondary_media: secondary_media.as_ref(),
        };
        let record = build_record(&self.config.mappings, &ctx);

        match self.records.create_record(&record) {
            Ok(id) => {
                self.created.push(id);
                self.result.created_count += 1;
                self.progress.created_records += 1;
                self.advance(pair.file_count());
                Ok(())
            }
            Err(e) => {
                // No point trying the remaining files: the host will reject them too
                tracing::error!(
                    "Failed to create a record for {}: {}",
                    pair.primary.path.display(),
                    e
                );
                self.advance(pair.file_count());
                Err(Stop::Aborted(
                    AbortCause::RecordCreation,
                    format!(
                        "record creation failed for {}: {}",
                        pair.primary.file_name, e
                    ),
                ))
            }
        }
    }

    fn media_failed(&mut self, pair: &FilePair, error: &HostError) {
        tracing::warn!(
            "Skipping {}: could not store media: {}",
            pair.primary.path.display(),
            error
        );
        self.result.failed_files += pair.file_count();
        self.advance(pair.file_count());
    }

    fn advance(&mut self, files: usize) {
        self.progress.processed_files += files;
        self.result.files_visited += files;
        self.sink.report(&self.progress);
    }

    fn finish(mut self, stopped: std::result::Result<(), Stop>) -> ImportRunResult {
        self.result.outcome = match stopped {
            Ok(()) => RunOutcome::Completed,
            Err(Stop::Cancelled) => RunOutcome::Cancelled,
            Err(Stop::Aborted(cause, reason)) => {
                self.result.aborted = true;
                self.roll_back();
                RunOutcome::Aborted { reason, cause }
            }
        };

        self.sink.finish(&self.progress);
        self.result
    }

    fn roll_back(&mut self) {
        if self.config.partial_failure_policy != PartialFailurePolicy::RollBack
            || self.created.is_empty()
        {
            return;
        }

        match self.records.remove_records(&self.created) {
            Ok(()) => {
                tracing::info!("Rolled back {} records", self.created.len());
                self.result.rolled_back = self.created.len();
                self.result.created_count = 0;
                self.progress.created_records = 0;
                self.created.clear();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not roll back {} records: {}",
                    self.created.len(),
                    e
                );
            }
        }
    }
}
