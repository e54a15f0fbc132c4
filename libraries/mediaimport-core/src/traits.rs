/// Host collaborator traits
///
/// The import engine never touches the host's note database or media folder
/// directly. Every side effect goes through one of these traits.
use crate::error::{HostError, HostResult};
use crate::types::{ImportProgress, ImportRecord, MediaId, RecordId};
use std::path::Path;

/// Stores file bytes in the host's media collection
pub trait MediaStore {
    /// Store the file at `path` and return the name the host assigned to it
    ///
    /// The returned identifier is opaque to the engine; it is only embedded
    /// in `[sound:...]` / `<img src="...">` references.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or stored
    fn store(&mut self, path: &Path) -> HostResult<MediaId>;
}

/// Materializes import records in the host's database
pub trait RecordSink {
    /// Create one persisted record
    ///
    /// # Errors
    /// Returns an error if the host could not create the record. The engine
    /// treats this as fatal for the run.
    fn create_record(&mut self, record: &ImportRecord) -> HostResult<RecordId>;

    /// Remove records created earlier in the same run
    ///
    /// Only called when the run's partial failure policy asks for a roll back.
    fn remove_records(&mut self, ids: &[RecordId]) -> HostResult<()> {
        let _ = ids;
        Err(HostError::unsupported("record removal"))
    }
}

/// Receives progress updates during a run
pub trait ProgressSink {
    /// Called after every file attempt with the updated counters
    fn report(&mut self, progress: &ImportProgress);

    /// Called once when the run ends, successful or not
    fn finish(&mut self, progress: &ImportProgress) {
        let _ = progress;
    }
}

/// Progress sink that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _progress: &ImportProgress) {}
}

impl<T: MediaStore + ?Sized> MediaStore for &mut T {
    fn store(&mut self, path: &Path) -> HostResult<MediaId> {
        (**self).store(path)
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &mut T {
    fn create_record(&mut self, record: &ImportRecord) -> HostResult<RecordId> {
        (**self).create_record(record)
    }

    fn remove_records(&mut self, ids: &[RecordId]) -> HostResult<()> {
        (**self).remove_records(ids)
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn report(&mut self, progress: &ImportProgress) {
        (**self).report(progress);
    }

    fn finish(&mut self, progress: &ImportProgress) {
        (**self).finish(progress);
    }
}
