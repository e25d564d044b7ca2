//! Relational operations over in-memory tables
//!
//! All operations are pure: they take tables by reference and return new
//! tables. Row order is always preserved from the input (the left input for
//! joins).

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, UInt64Array};
use arrow::compute::kernels::cmp::{eq, neq};
use arrow::compute::{filter_record_batch, take};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::sync::Arc;

use super::Table;
use crate::errors::{arrow_error, invalid_argument, Result};

/// Row filter on an `i64` key column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Keep rows whose key equals the value
    KeyEquals { column: String, value: i64 },
    /// Keep rows whose key differs from the value
    KeyNotEquals { column: String, value: i64 },
}

impl Predicate {
    pub fn key_eq(column: impl Into<String>, value: i64) -> Self {
        Predicate::KeyEquals {
            column: column.into(),
            value,
        }
    }

    pub fn key_ne(column: impl Into<String>, value: i64) -> Self {
        Predicate::KeyNotEquals {
            column: column.into(),
            value,
        }
    }

    fn evaluate(&self, table: &Table) -> Result<BooleanArray> {
        const OP: &str = "scan";
        match self {
            Predicate::KeyEquals { column, value } => {
                let keys = key_column(table, column, OP)?;
                eq(keys, &Int64Array::new_scalar(*value)).map_err(|e| arrow_error(OP, e))
            }
            Predicate::KeyNotEquals { column, value } => {
                let keys = key_column(table, column, OP)?;
                neq(keys, &Int64Array::new_scalar(*value)).map_err(|e| arrow_error(OP, e))
            }
        }
    }
}

/// Rows of `table` matching `predicate`, in source order
///
/// With no predicate the whole table is returned.
///
/// # Errors
///
/// `InvalidArgument` if the predicate names a column that is absent or not `i64`.
pub fn scan(table: &Table, predicate: Option<&Predicate>) -> Result<Table> {
    let Some(predicate) = predicate else {
        return Ok(table.clone());
    };
    let mask = predicate.evaluate(table)?;
    let batch = filter_record_batch(table.batch(), &mask).map_err(|e| arrow_error("scan", e))?;
    Ok(Table::new(batch))
}

/// Inner equi-join of `left` and `right` on the `i64` column `on`
///
/// Output columns are all of `left` followed by `right` without its key.
/// Output rows follow `left` order; rows with a key absent from the other
/// side are dropped. Keys are expected to be unique in `right`. When they are
/// not, each left row is emitted once per matching right row, in right order;
/// duplicates are neither merged nor rejected.
///
/// # Errors
///
/// `InvalidArgument` if `on` is missing or not `i64` on either side, or if a
/// non-key column name appears on both sides.
pub fn join(left: &Table, right: &Table, on: &str) -> Result<Table> {
    const OP: &str = "join";

    let left_keys = key_column(left, on, OP)?;
    let right_keys = key_column(right, on, OP)?;

    let mut right_index: HashMap<i64, Vec<u64>> = HashMap::with_capacity(right_keys.len());
    for (row, key) in right_keys.iter().enumerate() {
        if let Some(key) = key {
            right_index.entry(key).or_default().push(row as u64);
        }
    }

    let mut left_rows = Vec::with_capacity(left_keys.len());
    let mut right_rows = Vec::with_capacity(left_keys.len());
    for (row, key) in left_keys.iter().enumerate() {
        let Some(matches) = key.and_then(|k| right_index.get(&k)) else {
            continue;
        };
        for &right_row in matches {
            left_rows.push(row as u64);
            right_rows.push(right_row);
        }
    }
    let left_take = UInt64Array::from(left_rows);
    let right_take = UInt64Array::from(right_rows);

    let left_schema = left.schema();
    let right_schema = right.schema();
    let mut fields: Vec<Field> = left_schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(fields.len() + right_schema.fields().len());

    for column in left.batch().columns() {
        columns.push(take(column.as_ref(), &left_take, None).map_err(|e| arrow_error(OP, e))?);
    }
    for (field, column) in right_schema.fields().iter().zip(right.batch().columns()) {
        if field.name() == on {
            continue;
        }
        if left_schema.field_with_name(field.name()).is_ok() {
            return Err(invalid_argument(
                OP,
                format!("column '{}' exists on both sides of the join", field.name()),
            ));
        }
        fields.push(field.as_ref().clone());
        columns.push(take(column.as_ref(), &right_take, None).map_err(|e| arrow_error(OP, e))?);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| arrow_error(OP, e))?;
    Ok(Table::new(batch))
}

/// The window `[offset, offset + limit)` of `table` and its total row count
///
/// An offset at or past the end yields an empty window.
pub fn paginate(table: &Table, limit: usize, offset: usize) -> (Table, usize) {
    let total = table.num_rows();
    let start = offset.min(total);
    let len = limit.min(total - start);
    (Table::new(table.batch().slice(start, len)), total)
}

/// Keep only the named columns, in the order given
///
/// # Errors
///
/// `InvalidArgument` for an unknown column name.
pub fn project(table: &Table, columns: &[&str]) -> Result<Table> {
    const OP: &str = "project";

    let schema = table.schema();
    let indices = columns
        .iter()
        .map(|name| {
            schema
                .index_of(name)
                .map_err(|_| invalid_argument(OP, format!("unknown column '{}'", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    let batch = table
        .batch()
        .project(&indices)
        .map_err(|e| arrow_error(OP, e))?;
    Ok(Table::new(batch))
}

fn key_column<'a>(table: &'a Table, name: &str, op: &str) -> Result<&'a Int64Array> {
    table
        .column(name)
        .ok_or_else(|| invalid_argument(op, format!("unknown key column '{}'", name)))?
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| invalid_argument(op, format!("key column '{}' is not int64", name)))
}
