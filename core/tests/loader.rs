//! File loading: JSON lines and Parquet fixtures written to a temp dir.

use fraud_eda_core::{dataset::Dataset, error::EdaError, loader};
use chrono::{NaiveDate, Timelike};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

const TRANSACTIONS_JSONL: &str = r#"
{"transaction_id": "T1", "customer_id": "C1", "timestamp": "2024-10-01 02:15:00", "amount": 120.5, "currency": "EUR", "country": "Germany", "vendor_category": "Travel", "card_type": "Gold Credit", "channel": "web", "device": "Chrome", "device_fingerprint": "fp1", "is_card_present": false, "is_outside_home_country": true, "is_high_risk_vendor": true, "is_weekend": false, "last_hour_activity": {"num_transactions": 5, "total_amount": 900.0, "unique_merchants": 4}, "is_fraud": true}
{"transaction_id": "T2", "customer_id": "C2", "timestamp": "2024-10-02 14:00:00", "amount": 30.0, "currency": "USD", "country": "USA", "vendor_category": "Grocery", "card_type": "Basic Debit", "channel": "pos", "device": "Chip Reader", "device_fingerprint": "fp2", "is_card_present": true, "is_outside_home_country": false, "is_high_risk_vendor": false, "is_weekend": false, "last_hour_activity": null, "is_fraud": false}
{"transaction_id": "T3", "customer_id": "C2", "timestamp": "2024-10-05T09:30:00Z", "amount": null, "currency": "USD", "country": null, "vendor_category": "Grocery", "card_type": "Basic Debit", "channel": "pos", "device": "Chip Reader", "device_fingerprint": "fp2", "is_card_present": true, "is_outside_home_country": false, "is_high_risk_vendor": false, "is_weekend": true, "last_hour_activity": {"num_transactions": "many"}, "is_fraud": false}
"#;

const RATES_JSONL: &str = r#"
{"date": "2024-09-30", "USD": 1.0, "EUR": 0.5, "GBP": 0.8}
{"date": "2024-10-03", "USD": 1.0, "EUR": 0.25, "GBP": 0.8}
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn load_fixture() -> (TempDir, Dataset) {
    let dir = TempDir::new().unwrap();
    let txns = write(&dir, "transactions.jsonl", TRANSACTIONS_JSONL);
    let rates = write(&dir, "rates.jsonl", RATES_JSONL);
    let ds = Dataset::load(&txns, &rates).unwrap();
    (dir, ds)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn loads_json_lines_tables() {
    let (_dir, ds) = load_fixture();

    assert_eq!(ds.transactions.len(), 3);
    assert_eq!(ds.rates.len(), 2);
    assert_eq!(ds.rates.currencies(), ["EUR", "GBP", "USD"]);

    let t1 = &ds.transactions.records[0];
    assert_eq!(t1.transaction_id, "T1");
    assert_eq!(t1.hour(), 2);
    assert!(t1.is_fraud && t1.is_high_risk_vendor && t1.is_outside_home_country);
    assert_eq!(t1.activity().num_transactions, 5.0);
    assert_eq!(t1.activity().unique_merchants, 4.0);

    let t3 = &ds.transactions.records[2];
    assert_eq!(t3.timestamp.hour(), 9);
    assert!(t3.is_weekend);
}

#[test]
fn nulls_are_counted_and_zero_filled() {
    let (_dir, ds) = load_fixture();
    let profile = &ds.transactions.profile;

    assert_eq!(profile.null_count("amount"), 1);
    assert_eq!(profile.null_count("country"), 1);
    assert_eq!(profile.null_count("last_hour_activity"), 1);
    assert_eq!(profile.null_count("transaction_id"), 0);

    let t2 = &ds.transactions.records[1];
    assert_eq!(t2.last_hour_activity, None);
    assert_eq!(t2.activity().num_transactions, 0.0);

    let t3 = &ds.transactions.records[2];
    assert_eq!(t3.amount, 0.0);
    assert_eq!(t3.country, "");
    // Present but malformed nested field reads as zero.
    assert_eq!(t3.activity().num_transactions, 0.0);
}

#[test]
fn period_and_rate_lookup_from_files() {
    let (_dir, ds) = load_fixture();

    let (from, to) = ds.transactions.period().unwrap();
    assert_eq!(from.date(), NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
    assert_eq!(to.date(), NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());

    let oct2 = NaiveDate::from_ymd_opt(2024, 10, 2).unwrap();
    let oct4 = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap();
    assert_eq!(ds.rates.to_usd(10.0, "EUR", oct2), Some(20.0));
    assert_eq!(ds.rates.to_usd(10.0, "EUR", oct4), Some(40.0));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let rates = write(&dir, "rates.jsonl", RATES_JSONL);
    let err = Dataset::load(&dir.path().join("absent.parquet"), &rates).unwrap_err();

    assert!(matches!(err, EdaError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "transactions.csv", "a,b\n1,2\n");
    let err = loader::load_transactions(&csv).unwrap_err();

    assert!(
        matches!(err, EdaError::UnsupportedFormat { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn malformed_json_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "transactions.jsonl", "{\"amount\": 1.0,\n");
    let err = loader::load_transactions(&bad).unwrap_err();

    assert!(matches!(err, EdaError::Json(_)), "unexpected error: {err}");
}

#[test]
fn unparseable_timestamp_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let bad = write(
        &dir,
        "transactions.jsonl",
        r#"{"timestamp": "last tuesday", "amount": 1.0, "is_fraud": false}"#,
    );
    let err = loader::load_transactions(&bad).unwrap_err();

    assert!(
        matches!(err, EdaError::InvalidValue { ref column, row: 0, .. } if column == "timestamp"),
        "unexpected error: {err}"
    );
}

#[test]
fn rates_without_date_column_fail() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "rates.json", r#"[{"USD": 1.0, "EUR": 0.9}]"#);
    let err = loader::load_rates(&bad).unwrap_err();

    assert!(
        matches!(err, EdaError::MissingColumn { column: "date", .. }),
        "unexpected error: {err}"
    );
}

// ── Parquet ──────────────────────────────────────────────────────────────────

fn write_parquet_transactions(path: &Path) {
    use parquet::data_type::{BoolType, ByteArray, ByteArrayType, DoubleType, Int64Type};
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;

    let schema = Arc::new(
        parse_message_type(
            "message transactions {
                REQUIRED INT64 timestamp (TIMESTAMP_MICROS);
                REQUIRED DOUBLE amount;
                REQUIRED BOOLEAN is_fraud;
                OPTIONAL BINARY vendor_category (UTF8);
            }",
        )
        .unwrap(),
    );
    let props = Arc::new(WriterProperties::builder().build());
    let file = fs::File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();

    // 2024-01-01 00:00:00, +1h, +2h
    let base_us = 1_704_067_200_000_000i64;
    let hour_us = 3_600_000_000i64;
    let timestamps = [base_us, base_us + hour_us, base_us + 2 * hour_us];
    let amounts = [10.0, 20.0, 30.0];
    let fraud = [false, true, false];
    let vendors = [ByteArray::from("Retail"), ByteArray::from("Travel")];

    let mut index = 0;
    while let Some(mut column) = row_group.next_column().unwrap() {
        match index {
            0 => {
                column.typed::<Int64Type>().write_batch(&timestamps, None, None).unwrap();
            }
            1 => {
                column.typed::<DoubleType>().write_batch(&amounts, None, None).unwrap();
            }
            2 => {
                column.typed::<BoolType>().write_batch(&fraud, None, None).unwrap();
            }
            _ => {
                column
                    .typed::<ByteArrayType>()
                    .write_batch(&vendors, Some(&[1, 0, 1]), None)
                    .unwrap();
            }
        }
        column.close().unwrap();
        index += 1;
    }
    row_group.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn loads_parquet_transactions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.parquet");
    write_parquet_transactions(&path);

    let table = loader::load_transactions(&path).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.profile.width(), 4);
    assert_eq!(table.profile.null_count("vendor_category"), 1);

    let hours: Vec<u32> = table.records.iter().map(|t| t.hour()).collect();
    assert_eq!(hours, [0, 1, 2]);
    assert_eq!(table.records[1].amount, 20.0);
    assert!(table.records[1].is_fraud);
    assert_eq!(table.records[1].vendor_category, "");
    assert_eq!(table.records[2].vendor_category, "Travel");
}

fn write_parquet_nanos_transactions(path: &Path) {
    use parquet::data_type::{BoolType, DoubleType, Int64Type};
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;

    let schema = Arc::new(
        parse_message_type(
            "message transactions {
                REQUIRED INT64 timestamp (TIMESTAMP(NANOS,false));
                REQUIRED DOUBLE amount;
                REQUIRED BOOLEAN is_fraud;
            }",
        )
        .unwrap(),
    );
    let props = Arc::new(WriterProperties::builder().build());
    let file = fs::File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();

    // 2024-01-01 00:00:00 and 2024-01-01 13:30:00.000000250
    let base_ns = 1_704_067_200_000_000_000i64;
    let timestamps = [base_ns, base_ns + 48_600_000_000_250];
    let amounts = [f64::NAN, 75.0];
    let fraud = [true, false];

    let mut index = 0;
    while let Some(mut column) = row_group.next_column().unwrap() {
        match index {
            0 => {
                column.typed::<Int64Type>().write_batch(&timestamps, None, None).unwrap();
            }
            1 => {
                column.typed::<DoubleType>().write_batch(&amounts, None, None).unwrap();
            }
            _ => {
                column.typed::<BoolType>().write_batch(&fraud, None, None).unwrap();
            }
        }
        column.close().unwrap();
        index += 1;
    }
    row_group.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn loads_nanosecond_timestamps_and_nan_amounts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.parquet");
    write_parquet_nanos_transactions(&path);

    let table = loader::load_transactions(&path).unwrap();

    assert_eq!(table.len(), 2);
    let first = &table.records[0];
    assert_eq!(first.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(first.hour(), 0);
    let second = &table.records[1];
    assert_eq!(second.hour(), 13);
    assert_eq!(second.timestamp.nanosecond(), 250);

    // NaN amount is zero-filled and counted as missing.
    assert_eq!(first.amount, 0.0);
    assert!(first.is_fraud);
    assert_eq!(second.amount, 75.0);
    assert_eq!(table.profile.null_count("amount"), 1);
    assert_eq!(table.profile.null_count("timestamp"), 0);
}
