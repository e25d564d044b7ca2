//! Typed rows ⇄ columnar tables
//!
//! Each relation converts field by field between its row struct and the
//! canonical Arrow schema. Tables handed to `from_table` are expected to
//! already conform to that schema (as [`load`](super::load) guarantees); a
//! mismatch is reported as `Internal`.

use arrow::array::{
    Array, ArrayRef, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use panelstore_core::errors::{PsError, PsErrorKind};
use panelstore_core::{PanelInformation, PanelLocation, PanelRecord};
use std::sync::Arc;

use super::schema::{
    information_schema, location_schema, record_schema, COL_ID, COL_INSTALLED_AT, COL_LATITUDE,
    COL_LONGITUDE, COL_STATUS, COL_TEMPERATURE, COL_VOLTAGE, TIMESTAMP_TZ,
};
use super::Table;
use crate::errors::{arrow_error, Result};

/// A row type with a fixed columnar schema
pub trait Relation: Sized {
    /// Canonical schema of the relation
    fn schema() -> SchemaRef;

    /// Build a table from rows, preserving their order
    ///
    /// # Errors
    ///
    /// `Internal` if Arrow rejects the assembled columns.
    fn to_table(rows: &[Self]) -> Result<Table>;

    /// Read every row of a conforming table, in order
    ///
    /// # Errors
    ///
    /// `Internal` if a column is missing, mistyped or holds an unrepresentable value.
    fn from_table(table: &Table) -> Result<Vec<Self>>;
}

impl Relation for PanelInformation {
    fn schema() -> SchemaRef {
        information_schema()
    }

    fn to_table(rows: &[Self]) -> Result<Table> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.voltage))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.temperature),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.status.as_str()),
            )),
            Arc::new(timestamps(rows.iter().map(|r| r.installed_at))),
        ];
        assemble(Self::schema(), columns)
    }

    fn from_table(table: &Table) -> Result<Vec<Self>> {
        let id = column::<Int64Array>(table, COL_ID)?;
        let voltage = column::<Float64Array>(table, COL_VOLTAGE)?;
        let temperature = column::<Float64Array>(table, COL_TEMPERATURE)?;
        let status = column::<StringArray>(table, COL_STATUS)?;
        let installed_at = column::<TimestampMicrosecondArray>(table, COL_INSTALLED_AT)?;

        (0..table.num_rows())
            .map(|row| {
                Ok(PanelInformation {
                    id: id.value(row),
                    voltage: voltage.value(row),
                    temperature: temperature.value(row),
                    status: status.value(row).to_string(),
                    installed_at: timestamp_at(installed_at, row)?,
                })
            })
            .collect()
    }
}

impl Relation for PanelLocation {
    fn schema() -> SchemaRef {
        location_schema()
    }

    fn to_table(rows: &[Self]) -> Result<Table> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.longitude),
            )),
        ];
        assemble(Self::schema(), columns)
    }

    fn from_table(table: &Table) -> Result<Vec<Self>> {
        let id = column::<Int64Array>(table, COL_ID)?;
        let latitude = column::<Float64Array>(table, COL_LATITUDE)?;
        let longitude = column::<Float64Array>(table, COL_LONGITUDE)?;

        Ok((0..table.num_rows())
            .map(|row| PanelLocation {
                id: id.value(row),
                latitude: latitude.value(row),
                longitude: longitude.value(row),
            })
            .collect())
    }
}

impl Relation for PanelRecord {
    fn schema() -> SchemaRef {
        record_schema()
    }

    fn to_table(rows: &[Self]) -> Result<Table> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.voltage))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.temperature),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.status.as_str()),
            )),
            Arc::new(timestamps(rows.iter().map(|r| r.installed_at))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.longitude),
            )),
        ];
        assemble(Self::schema(), columns)
    }

    fn from_table(table: &Table) -> Result<Vec<Self>> {
        let id = column::<Int64Array>(table, COL_ID)?;
        let voltage = column::<Float64Array>(table, COL_VOLTAGE)?;
        let temperature = column::<Float64Array>(table, COL_TEMPERATURE)?;
        let status = column::<StringArray>(table, COL_STATUS)?;
        let installed_at = column::<TimestampMicrosecondArray>(table, COL_INSTALLED_AT)?;
        let latitude = column::<Float64Array>(table, COL_LATITUDE)?;
        let longitude = column::<Float64Array>(table, COL_LONGITUDE)?;

        (0..table.num_rows())
            .map(|row| {
                Ok(PanelRecord {
                    id: id.value(row),
                    voltage: voltage.value(row),
                    temperature: temperature.value(row),
                    status: status.value(row).to_string(),
                    installed_at: timestamp_at(installed_at, row)?,
                    latitude: latitude.value(row),
                    longitude: longitude.value(row),
                })
            })
            .collect()
    }
}

fn assemble(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Table> {
    RecordBatch::try_new(schema, columns)
        .map(Table::new)
        .map_err(|e| arrow_error("to_table", e))
}

fn timestamps(values: impl Iterator<Item = DateTime<Utc>>) -> TimestampMicrosecondArray {
    TimestampMicrosecondArray::from_iter_values(values.map(|ts| ts.timestamp_micros()))
        .with_timezone(TIMESTAMP_TZ)
}

fn timestamp_at(array: &TimestampMicrosecondArray, row: usize) -> Result<DateTime<Utc>> {
    let micros = array.value(row);
    DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
        PsError::new(PsErrorKind::Internal)
            .with_op("from_table")
            .with_message(format!("timestamp {} is out of range", micros))
    })
}

fn column<'a, T: Array + 'static>(table: &'a Table, name: &str) -> Result<&'a T> {
    table
        .column(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| {
            PsError::new(PsErrorKind::Internal)
                .with_op("from_table")
                .with_message(format!(
                    "column '{}' missing or not of type {}",
                    name,
                    std::any::type_name::<T>()
                ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64) -> PanelRecord {
        PanelRecord {
            id,
            voltage: 200.0 + id as f64,
            temperature: 25.0,
            status: "OK".to_string(),
            installed_at: Utc.with_ymd_and_hms(2019, 6, 1, 12, 30, 0).unwrap(),
            latitude: 45.0,
            longitude: -73.5,
        }
    }

    #[test]
    fn test_records_survive_table_conversion() {
        let rows = vec![record(2), record(1)];

        let table = PanelRecord::to_table(&rows).unwrap();
        assert_eq!(table.schema(), record_schema());

        assert_eq!(PanelRecord::from_table(&table).unwrap(), rows);
    }

    #[test]
    fn test_empty_rows_give_empty_table() {
        let table = PanelLocation::to_table(&[]).unwrap();
        assert!(table.is_empty());
        assert!(PanelLocation::from_table(&table).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_table_is_internal_error() {
        let table = PanelLocation::to_table(&[PanelLocation {
            id: 1,
            latitude: 0.0,
            longitude: 0.0,
        }])
        .unwrap();

        let err = PanelInformation::from_table(&table).unwrap_err();
        assert_eq!(err.kind(), PsErrorKind::Internal);
    }
}
