//! Input loading.
//!
//! RULE: only the loader touches input files. Everything downstream
//! works on the in-memory `Dataset`.

pub mod cell;
mod json_reader;
mod parquet_reader;

use crate::{
    dataset::{ColumnProfile, RateTable, TransactionTable},
    error::{EdaError, EdaResult},
    record::{ExchangeRate, LastHourActivity, Transaction},
};
use cell::{lookup, Cell, CellRow};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::Path;

const TRANSACTIONS: &str = "transactions";
const RATES: &str = "exchange rates";
const REQUIRED_TRANSACTION_COLUMNS: [&str; 3] = ["timestamp", "amount", "is_fraud"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Parquet,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> EdaResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("parquet") | Some("pq") => Ok(Self::Parquet),
            Some("json") | Some("jsonl") | Some("ndjson") => Ok(Self::Json),
            _ => Err(EdaError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Read every row of a supported file into format-neutral cells.
pub fn read_rows(path: &Path) -> EdaResult<Vec<CellRow>> {
    let rows = match InputFormat::from_path(path)? {
        InputFormat::Parquet => parquet_reader::read_rows(path)?,
        InputFormat::Json => json_reader::read_rows(path)?,
    };
    log::debug!("{}: read {} rows", path.display(), rows.len());
    Ok(rows)
}

pub fn load_transactions(path: &Path) -> EdaResult<TransactionTable> {
    let table = transactions_from_rows(read_rows(path)?)?;
    log::info!(
        "Loaded transactions from {}: {} rows, {} columns",
        path.display(),
        table.len(),
        table.profile.width()
    );
    Ok(table)
}

pub fn load_rates(path: &Path) -> EdaResult<RateTable> {
    let table = rates_from_rows(read_rows(path)?)?;
    log::info!(
        "Loaded exchange rates from {}: {} rows, {} columns",
        path.display(),
        table.len(),
        table.profile.width()
    );
    Ok(table)
}

pub fn transactions_from_rows(rows: Vec<CellRow>) -> EdaResult<TransactionTable> {
    let profile = ColumnProfile::from_rows(&rows);
    if !rows.is_empty() {
        for column in REQUIRED_TRANSACTION_COLUMNS {
            if !profile.has_column(column) {
                return Err(EdaError::MissingColumn {
                    table: TRANSACTIONS,
                    column,
                });
            }
        }
    }

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| build_transaction(row, i))
        .collect::<EdaResult<Vec<_>>>()?;

    Ok(TransactionTable::new(records, profile))
}

pub fn rates_from_rows(rows: Vec<CellRow>) -> EdaResult<RateTable> {
    let profile = ColumnProfile::from_rows(&rows);
    if !rows.is_empty() && !profile.has_column("date") {
        return Err(EdaError::MissingColumn {
            table: RATES,
            column: "date",
        });
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match build_rate(row, i)? {
            Some(rate) => records.push(rate),
            None => log::warn!("exchange rate row {i} has no date; skipped"),
        }
    }

    Ok(RateTable::new(records, profile))
}

fn build_transaction(row: &CellRow, index: usize) -> EdaResult<Transaction> {
    let text = |column: &str| lookup(row, column).and_then(Cell::as_text).unwrap_or_default();
    let flag = |column: &str| lookup(row, column).and_then(Cell::as_bool).unwrap_or(false);

    let timestamp = match lookup(row, "timestamp") {
        None => NaiveDateTime::default(),
        Some(cell) if cell.is_null() => NaiveDateTime::default(),
        Some(cell) => cell
            .as_datetime()
            .ok_or_else(|| invalid("timestamp", index, cell))?,
    };

    let amount = match lookup(row, "amount") {
        None => 0.0,
        Some(cell) if cell.is_null() => 0.0,
        Some(cell) => cell.as_f64().ok_or_else(|| invalid("amount", index, cell))?,
    };

    let last_hour_activity = lookup(row, "last_hour_activity")
        .and_then(Cell::as_group)
        .map(activity_from_group);

    Ok(Transaction {
        transaction_id: text("transaction_id"),
        customer_id: text("customer_id"),
        timestamp,
        amount,
        currency: text("currency"),
        country: text("country"),
        city: text("city"),
        vendor_category: text("vendor_category"),
        vendor_type: text("vendor_type"),
        card_type: text("card_type"),
        channel: text("channel"),
        device: text("device"),
        device_fingerprint: text("device_fingerprint"),
        ip_address: text("ip_address"),
        is_card_present: flag("is_card_present"),
        is_outside_home_country: flag("is_outside_home_country"),
        is_high_risk_vendor: flag("is_high_risk_vendor"),
        is_weekend: flag("is_weekend"),
        last_hour_activity,
        is_fraud: flag("is_fraud"),
    })
}

/// Malformed or absent sub-fields read as zero.
fn activity_from_group(group: &CellRow) -> LastHourActivity {
    let num = |column: &str| lookup(group, column).and_then(Cell::as_f64).unwrap_or(0.0);
    LastHourActivity {
        num_transactions: num("num_transactions"),
        total_amount: num("total_amount"),
        unique_merchants: num("unique_merchants"),
        unique_countries: num("unique_countries"),
        max_single_amount: num("max_single_amount"),
    }
}

fn build_rate(row: &CellRow, index: usize) -> EdaResult<Option<ExchangeRate>> {
    let date = match lookup(row, "date") {
        None => return Ok(None),
        Some(cell) if cell.is_null() => return Ok(None),
        Some(cell) => cell.as_date().ok_or_else(|| invalid("date", index, cell))?,
    };

    let rates: BTreeMap<String, f64> = row
        .iter()
        .filter(|(name, _)| name != "date")
        .filter_map(|(name, cell)| cell.as_f64().map(|v| (name.clone(), v)))
        .collect();

    Ok(Some(ExchangeRate { date, rates }))
}

fn invalid(column: &str, row: usize, cell: &Cell) -> EdaError {
    EdaError::InvalidValue {
        column: column.to_string(),
        row,
        detail: format!("cannot interpret {cell:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn_row(amount: Cell, fraud: bool) -> CellRow {
        vec![
            ("timestamp".into(), Cell::Text("2024-01-05 10:00:00".into())),
            ("amount".into(), amount),
            ("is_fraud".into(), Cell::Bool(fraud)),
            ("vendor_category".into(), Cell::Text("Retail".into())),
        ]
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/b.PARQUET")).unwrap(),
            InputFormat::Parquet
        );
        assert_eq!(
            InputFormat::from_path(Path::new("rows.jsonl")).unwrap(),
            InputFormat::Json
        );
        assert!(InputFormat::from_path(Path::new("rows.csv")).is_err());
        assert!(InputFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn null_amount_is_zero_filled_and_counted() {
        let rows = vec![txn_row(Cell::Float(10.0), false), txn_row(Cell::Null, true)];
        let table = transactions_from_rows(rows).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].amount, 0.0);
        assert_eq!(table.profile.null_count("amount"), 1);
        assert_eq!(table.profile.null_count("vendor_category"), 0);
    }

    #[test]
    fn non_finite_amount_is_treated_as_null() {
        let rows = vec![
            txn_row(Cell::Float(f64::NAN), true),
            txn_row(Cell::Float(f64::INFINITY), false),
            txn_row(Cell::Float(12.5), false),
        ];
        let table = transactions_from_rows(rows).unwrap();

        let amounts: Vec<f64> = table.records.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, [0.0, 0.0, 12.5]);
        assert_eq!(table.profile.null_count("amount"), 2);
        assert!(table.records[0].is_fraud);
    }

    #[test]
    fn missing_required_column_fails() {
        let rows = vec![vec![
            ("timestamp".into(), Cell::Text("2024-01-05 10:00:00".into())),
            ("amount".into(), Cell::Float(1.0)),
        ]];
        let err = transactions_from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            EdaError::MissingColumn { column: "is_fraud", .. }
        ));
    }

    #[test]
    fn malformed_activity_defaults_to_zero() {
        let mut row = txn_row(Cell::Float(5.0), false);
        row.push((
            "last_hour_activity".into(),
            Cell::Group(vec![
                ("num_transactions".into(), Cell::Int(4)),
                ("total_amount".into(), Cell::Text("not a number".into())),
            ]),
        ));
        let table = transactions_from_rows(vec![row]).unwrap();
        let activity = table.records[0].activity();

        assert_eq!(activity.num_transactions, 4.0);
        assert_eq!(activity.total_amount, 0.0);
        assert_eq!(activity.unique_merchants, 0.0);
    }

    #[test]
    fn rate_rows_without_date_are_skipped() {
        let rows = vec![
            vec![
                ("date".into(), Cell::Text("2024-01-01".into())),
                ("USD".into(), Cell::Float(1.0)),
                ("EUR".into(), Cell::Float(0.91)),
            ],
            vec![("date".into(), Cell::Null), ("USD".into(), Cell::Float(1.0))],
        ];
        let table = rates_from_rows(rows).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].rate("EUR"), Some(0.91));
        assert_eq!(table.currencies(), vec!["EUR".to_string(), "USD".to_string()]);
    }
}
