//! Parquet output backend (feature `parquet`).
//!
//! Creates one file, `lifecycle.parquet`, in the configured output
//! directory. Writer buffers rows and flushes a batch every
//! [`BATCH_SIZE`] events, plus a final partial batch in `finish()`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{LifecycleRow, OutputResult};

const BATCH_SIZE: usize = 1024;

fn lifecycle_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick", DataType::UInt64, false),
        Field::new("entity_id", DataType::UInt64, false),
        Field::new("kind", DataType::Utf8, false),
        Field::new("message", DataType::Utf8, true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes lifecycle markers to a single Parquet file.
///
/// `finish()` **must** be called to flush any buffered rows and write the
/// Parquet file footer; a file written without calling `finish()` cannot be
/// opened by Parquet readers.
pub struct ParquetWriter {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
    pending: Vec<LifecycleRow>,
}

impl ParquetWriter {
    /// Create `lifecycle.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = lifecycle_schema();
        let file = File::create(dir.join("lifecycle.parquet"))?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;

        Ok(Self {
            writer: Some(writer),
            schema,
            pending: Vec::with_capacity(BATCH_SIZE),
        })
    }

    fn flush_pending(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            self.pending.clear();
            return Ok(());
        };

        let mut ticks = UInt64Builder::new();
        let mut entity_ids = UInt64Builder::new();
        let mut kinds = StringBuilder::new();
        let mut messages = StringBuilder::new();

        for row in self.pending.drain(..) {
            ticks.append_value(row.tick);
            entity_ids.append_value(row.entity_id);
            kinds.append_value(row.kind.as_str());
            match row.message {
                Some(msg) => messages.append_value(msg),
                None => messages.append_null(),
            }
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(entity_ids.finish()),
                Arc::new(kinds.finish()),
                Arc::new(messages.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_event(&mut self, row: &LifecycleRow) -> OutputResult<()> {
        self.pending.push(row.clone());
        if self.pending.len() >= BATCH_SIZE {
            self.flush_pending()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_pending()?;
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
