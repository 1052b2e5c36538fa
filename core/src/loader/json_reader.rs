//! JSON reader: one object per line, or a single top-level array of objects.

use super::cell::{Cell, CellRow};
use crate::error::{EdaError, EdaResult};
use serde_json::{Map, Value};
use std::path::Path;

pub fn read_rows(path: &Path) -> EdaResult<Vec<CellRow>> {
    let content = std::fs::read_to_string(path).map_err(|source| EdaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(&content)
}

pub fn parse_rows(content: &str) -> EdaResult<Vec<CellRow>> {
    if content.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(content)?;
        return values
            .into_iter()
            .enumerate()
            .map(|(i, v)| object_to_cells(v, i))
            .collect();
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| object_to_cells(serde_json::from_str::<Value>(line)?, i))
        .collect()
}

fn object_to_cells(value: Value, row: usize) -> EdaResult<CellRow> {
    match value {
        Value::Object(map) => Ok(map_to_cells(map)),
        other => Err(EdaError::InvalidValue {
            column: "<row>".into(),
            row,
            detail: format!("expected a JSON object, found {other}"),
        }),
    }
}

fn map_to_cells(map: Map<String, Value>) -> CellRow {
    map.into_iter().map(|(k, v)| (k, value_to_cell(v))).collect()
}

fn value_to_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map_or(Cell::Null, Cell::Float),
        },
        Value::String(s) => Cell::Text(s),
        Value::Object(map) => Cell::Group(map_to_cells(map)),
        Value::Array(_) => Cell::Null,
    }
}
