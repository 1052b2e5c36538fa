//! Parquet reader built on the `parquet` crate's row API.

use super::cell::{
    date_from_epoch_days, datetime_from_epoch_micros, datetime_from_epoch_millis,
    datetime_from_epoch_nanos, Cell, CellRow,
};
use crate::error::{EdaError, EdaResult};
use parquet::basic::{LogicalType, TimeUnit};
use parquet::data_type::Decimal;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Field, Row};
use parquet::schema::types::Type;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub fn read_rows(path: &Path) -> EdaResult<Vec<CellRow>> {
    let file = File::open(path).map_err(|source| EdaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let reader = SerializedFileReader::new(file)?;
    let meta = reader.metadata().file_metadata();
    let expected = meta.num_rows();
    log::debug!("{}: {expected} rows in parquet footer", path.display());

    // The row API hands nanosecond timestamps back as plain longs.
    let nanos = nanosecond_timestamp_columns(meta.schema());
    if !nanos.is_empty() {
        log::debug!("{}: nanosecond timestamp columns {nanos:?}", path.display());
    }

    let mut rows = Vec::with_capacity(expected.max(0) as usize);
    for row in reader.get_row_iter(None)? {
        rows.push(row_to_cells(&row?, &nanos));
    }
    Ok(rows)
}

fn nanosecond_timestamp_columns(schema: &Type) -> HashSet<String> {
    schema
        .get_fields()
        .iter()
        .filter(|field| {
            matches!(
                field.get_basic_info().logical_type(),
                Some(LogicalType::Timestamp {
                    unit: TimeUnit::NANOS(_),
                    ..
                })
            )
        })
        .map(|field| field.name().to_string())
        .collect()
}

fn row_to_cells(row: &Row, nanos: &HashSet<String>) -> CellRow {
    row.get_column_iter()
        .map(|(name, field)| {
            let cell = match field {
                Field::Long(ns) if nanos.contains(name) => {
                    datetime_from_epoch_nanos(*ns).map_or(Cell::Null, Cell::DateTime)
                }
                _ => field_to_cell(field),
            };
            (name.clone(), cell)
        })
        .collect()
}

fn field_to_cell(field: &Field) -> Cell {
    match field {
        Field::Null => Cell::Null,
        Field::Bool(b) => Cell::Bool(*b),
        Field::Byte(v) => Cell::Int(i64::from(*v)),
        Field::Short(v) => Cell::Int(i64::from(*v)),
        Field::Int(v) => Cell::Int(i64::from(*v)),
        Field::Long(v) => Cell::Int(*v),
        Field::UByte(v) => Cell::Int(i64::from(*v)),
        Field::UShort(v) => Cell::Int(i64::from(*v)),
        Field::UInt(v) => Cell::Int(i64::from(*v)),
        Field::ULong(v) => Cell::Float(*v as f64),
        Field::Float16(v) => Cell::Float(f64::from(*v)),
        Field::Float(v) => Cell::Float(f64::from(*v)),
        Field::Double(v) => Cell::Float(*v),
        Field::Decimal(d) => decimal_to_f64(d).map_or(Cell::Null, Cell::Float),
        Field::Str(s) => Cell::Text(s.clone()),
        Field::Date(days) => date_from_epoch_days(*days).map_or(Cell::Null, Cell::Date),
        Field::TimestampMillis(ms) => {
            datetime_from_epoch_millis(*ms).map_or(Cell::Null, Cell::DateTime)
        }
        Field::TimestampMicros(us) => {
            datetime_from_epoch_micros(*us).map_or(Cell::Null, Cell::DateTime)
        }
        Field::Group(row) => Cell::Group(row_to_cells(row, &HashSet::new())),
        // Lists, maps and raw bytes carry nothing the reports read.
        _ => Cell::Null,
    }
}

/// Unscaled big-endian two's complement value divided by 10^scale.
fn decimal_to_f64(decimal: &Decimal) -> Option<f64> {
    let bytes = decimal.data();
    if bytes.is_empty() || bytes.len() > 16 {
        return None;
    }
    let mut unscaled: i128 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
    for b in bytes {
        unscaled = (unscaled << 8) | i128::from(*b);
    }
    Some(unscaled as f64 / 10f64.powi(decimal.scale()))
}
