//! Parquet snapshot files
//!
//! A snapshot is read and written as a unit. [`load`] decodes only the
//! columns named by the expected schema and conforms them to it; [`save`]
//! truncates and rewrites in place; [`save_atomic`] goes through a temp file.

use arrow::array::{ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, SchemaRef, TimeUnit, TimestampMicrosecondType};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::{ArrowWriter, ProjectionMask};
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use super::atomic::atomic_replace;
use super::schema::is_compatible;
use super::Table;
use crate::errors::{
    arrow_error, io_error, serialization_error, snapshot_corrupt, snapshot_not_found, Result,
};

/// Load the snapshot at `path` as a table with exactly `schema`
///
/// Extra columns in the file are not decoded. Columns stored with a
/// compatible narrower or differently-tagged type are cast. Timestamps are
/// truncated to whole microseconds.
///
/// # Errors
///
/// - `SnapshotNotFound`: no file at `path`
/// - `SnapshotCorrupt`: not a Parquet file, a column is missing or has an
///   incompatible type, a required column holds nulls, or a timestamp lies
///   outside the representable date range
/// - `Io`: the file exists but could not be opened
pub fn load(path: &Path, schema: &SchemaRef) -> Result<Table> {
    const OP: &str = "load_snapshot";

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => snapshot_not_found(OP, path),
        _ => io_error(OP, path, e),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| snapshot_corrupt(OP, path, e.to_string()))?;

    check_columns(builder.schema(), schema).map_err(|reason| snapshot_corrupt(OP, path, reason))?;

    let leaves: Vec<usize> = builder
        .parquet_schema()
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| {
            column.path().parts().len() == 1 && schema.field_with_name(column.name()).is_ok()
        })
        .map(|(index, _)| index)
        .collect();
    let mask = ProjectionMask::leaves(builder.parquet_schema(), leaves);

    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(|e| snapshot_corrupt(OP, path, e.to_string()))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| snapshot_corrupt(OP, path, e.to_string()))?;
        let batch = conform(&batch, schema).map_err(|reason| snapshot_corrupt(OP, path, reason))?;
        batches.push(batch);
    }

    let table = Table::from_batches(schema.clone(), &batches).map_err(|e| arrow_error(OP, e))?;

    tracing::debug!(
        path = %path.display(),
        rows = table.num_rows(),
        batches = batches.len(),
        "Loaded snapshot"
    );

    Ok(table)
}

/// Overwrite the snapshot at `path` in place
///
/// The file is truncated before the new content is written. A crash or
/// cancellation part way through leaves a truncated file that the next
/// [`load`] reports as `SnapshotCorrupt`.
///
/// # Errors
///
/// - `Io`: the file could not be created
/// - `Serialization`: the Parquet encoder failed
pub fn save(path: &Path, table: &Table) -> Result<()> {
    const OP: &str = "save_snapshot";

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(OP, parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| io_error(OP, path, e))?;
    write_table(file, table, path, OP)?;

    tracing::debug!(path = %path.display(), rows = table.num_rows(), "Saved snapshot");
    Ok(())
}

/// Replace the snapshot at `path` via a temp file and rename
///
/// Readers observe either the previous file or the complete new one.
///
/// # Errors
///
/// - `Io`: temp file creation, sync or rename failed
/// - `Serialization`: the Parquet encoder failed
pub fn save_atomic(path: &Path, table: &Table) -> Result<()> {
    const OP: &str = "save_snapshot_atomic";

    atomic_replace(path, |file| write_table(file, table, path, OP))?;

    tracing::debug!(path = %path.display(), rows = table.num_rows(), "Replaced snapshot");
    Ok(())
}

/// Delete the snapshot at `path`
///
/// Returns `false` when there was nothing to delete.
///
/// # Errors
///
/// `Io` for any failure other than the file being absent.
pub fn delete(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error("delete_snapshot", path, e)),
    }
}

fn write_table(file: File, table: &Table, path: &Path, op: &str) -> Result<File> {
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))
        .map_err(|e| serialization_error(op, path, e))?;
    writer
        .write(table.batch())
        .map_err(|e| serialization_error(op, path, e))?;
    writer
        .into_inner()
        .map_err(|e| serialization_error(op, path, e))
}

fn check_columns(found: &SchemaRef, expected: &SchemaRef) -> std::result::Result<(), String> {
    for field in expected.fields() {
        let stored = found
            .field_with_name(field.name())
            .map_err(|_| format!("missing column '{}'", field.name()))?;
        if !is_compatible(stored.data_type(), field.data_type()) {
            return Err(format!(
                "column '{}' has type {}, expected {}",
                field.name(),
                stored.data_type(),
                field.data_type()
            ));
        }
    }
    Ok(())
}

fn conform(batch: &RecordBatch, expected: &SchemaRef) -> std::result::Result<RecordBatch, String> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(expected.fields().len());
    for field in expected.fields() {
        let column = batch
            .column_by_name(field.name())
            .ok_or_else(|| format!("missing column '{}'", field.name()))?;

        let column = conform_column(column, field)
            .map_err(|e| format!("column '{}': {}", field.name(), e))?;

        if !field.is_nullable() && column.null_count() > 0 {
            return Err(format!(
                "column '{}' contains {} null values",
                field.name(),
                column.null_count()
            ));
        }
        check_timestamp_range(&column, field)?;
        columns.push(column);
    }
    RecordBatch::try_new(expected.clone(), columns).map_err(|e| e.to_string())
}

fn conform_column(column: &ArrayRef, field: &Field) -> std::result::Result<ArrayRef, String> {
    if column.data_type() == field.data_type() {
        return Ok(column.clone());
    }
    match field.data_type() {
        // Casting into a named zone needs chrono-tz; convert the unit on a
        // naive type and attach the zone afterwards. Stored instants are UTC.
        DataType::Timestamp(TimeUnit::Microsecond, Some(tz)) => {
            let naive = cast(column, &DataType::Timestamp(TimeUnit::Microsecond, None))
                .map_err(|e| e.to_string())?;
            let micros = naive
                .as_primitive::<TimestampMicrosecondType>()
                .clone()
                .with_timezone(tz.clone());
            Ok(Arc::new(micros))
        }
        target => cast(column, target).map_err(|e| e.to_string()),
    }
}

fn check_timestamp_range(column: &ArrayRef, field: &Field) -> std::result::Result<(), String> {
    let Some(timestamps) = column.as_primitive_opt::<TimestampMicrosecondType>() else {
        return Ok(());
    };
    let out_of_range = timestamps
        .iter()
        .flatten()
        .find(|&micros| DateTime::<Utc>::from_timestamp_micros(micros).is_none());
    match out_of_range {
        Some(micros) => Err(format!(
            "column '{}' holds timestamp {} outside the supported range",
            field.name(),
            micros
        )),
        None => Ok(()),
    }
}
