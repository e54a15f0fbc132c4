//! JSON-lines record sink

use mediaimport_core::{HostError, HostResult, ImportRecord, RecordId, RecordSink};
use serde::Serialize;
use std::io::Write;

/// Writes every created record as one JSON object per line
///
/// A record whose fields are all empty is rejected: a note without content
/// generates no cards, which is the failure a note database reports.
pub struct JsonLinesRecordSink<W: Write> {
    writer: W,
    next_id: u64,
}

#[derive(Serialize)]
struct RecordLine<'a> {
    id: u64,
    #[serde(flatten)]
    record: &'a ImportRecord,
}

impl<W: Write> JsonLinesRecordSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, next_id: 1 }
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.next_id - 1
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesRecordSink<W> {
    fn create_record(&mut self, record: &ImportRecord) -> HostResult<RecordId> {
        if record.has_no_content() {
            return Err(HostError::rejected(
                "record has no field content and would generate no cards",
            ));
        }

        let id = self.next_id;
        serde_json::to_writer(&mut self.writer, &RecordLine { id, record })?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.next_id += 1;

        Ok(RecordId::new(id.to_string()))
    }
}
