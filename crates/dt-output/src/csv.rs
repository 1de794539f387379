//! CSV output backend.
//!
//! Creates one file, `lifecycle.csv`, in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LifecycleRow, OutputResult};

/// Writes lifecycle markers to a single CSV file.
pub struct CsvWriter {
    events: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `lifecycle.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("lifecycle.csv"))?;
        events.write_record(["tick", "entity_id", "kind", "message"])?;

        Ok(Self {
            events,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &LifecycleRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.entity_id.to_string(),
            row.kind.as_str().to_string(),
            row.message.clone().unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}
