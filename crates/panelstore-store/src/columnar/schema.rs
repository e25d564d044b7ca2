//! Canonical Arrow schemas for the three relations
//!
//! Column order here is the column order written to disk.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use std::sync::Arc;

pub const COL_ID: &str = "id";
pub const COL_VOLTAGE: &str = "voltage";
pub const COL_TEMPERATURE: &str = "temperature";
pub const COL_STATUS: &str = "status";
pub const COL_INSTALLED_AT: &str = "installed_at";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";

/// Join key shared by the information and location relations
pub const JOIN_KEY: &str = COL_ID;

/// Timezone tag stored on `installed_at`
pub const TIMESTAMP_TZ: &str = "UTC";

pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some(TIMESTAMP_TZ.into()))
}

fn id_field() -> Field {
    Field::new(COL_ID, DataType::Int64, false)
}

fn information_fields() -> Vec<Field> {
    vec![
        id_field(),
        Field::new(COL_VOLTAGE, DataType::Float64, false),
        Field::new(COL_TEMPERATURE, DataType::Float64, false),
        Field::new(COL_STATUS, DataType::Utf8, false),
        Field::new(COL_INSTALLED_AT, timestamp_type(), false),
    ]
}

fn location_value_fields() -> Vec<Field> {
    vec![
        Field::new(COL_LATITUDE, DataType::Float64, false),
        Field::new(COL_LONGITUDE, DataType::Float64, false),
    ]
}

/// `{id, voltage, temperature, status, installed_at}`
pub fn information_schema() -> SchemaRef {
    Arc::new(Schema::new(information_fields()))
}

/// `{id, latitude, longitude}`
pub fn location_schema() -> SchemaRef {
    let mut fields = vec![id_field()];
    fields.extend(location_value_fields());
    Arc::new(Schema::new(fields))
}

/// Information columns followed by location columns minus the key
pub fn record_schema() -> SchemaRef {
    let mut fields = information_fields();
    fields.extend(location_value_fields());
    Arc::new(Schema::new(fields))
}

/// Whether a column stored as `found` can be read as `expected`
///
/// Covers what other Parquet writers commonly emit for these columns:
/// narrower integers, `float32`, large/view strings and timestamps in any
/// unit or zone. Numeric and string widenings keep every value; timestamps
/// finer than a microsecond are truncated to microsecond precision. A
/// timestamp without a zone is read as UTC.
pub fn is_compatible(found: &DataType, expected: &DataType) -> bool {
    if found == expected {
        return true;
    }
    match expected {
        DataType::Int64 => matches!(
            found,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
        ),
        DataType::Float64 => matches!(found, DataType::Float32),
        DataType::Utf8 => matches!(found, DataType::LargeUtf8 | DataType::Utf8View),
        DataType::Timestamp(_, _) => matches!(found, DataType::Timestamp(_, _)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_schema_is_union_of_sources() {
        let record = record_schema();
        let names: Vec<_> = record.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                COL_ID,
                COL_VOLTAGE,
                COL_TEMPERATURE,
                COL_STATUS,
                COL_INSTALLED_AT,
                COL_LATITUDE,
                COL_LONGITUDE
            ]
        );
        assert_eq!(location_schema().fields().len(), 3);
    }

    #[test]
    fn test_compatibility_rules() {
        assert!(is_compatible(&DataType::Int32, &DataType::Int64));
        assert!(is_compatible(
            &DataType::Timestamp(TimeUnit::Nanosecond, None),
            &timestamp_type()
        ));
        assert!(!is_compatible(&DataType::Float64, &DataType::Int64));
        assert!(!is_compatible(&DataType::Utf8, &DataType::Float64));
        assert!(!is_compatible(&DataType::UInt64, &DataType::Int64));
    }
}
