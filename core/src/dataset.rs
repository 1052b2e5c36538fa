//! The two read-only tables every report works from.

use crate::{
    error::EdaResult,
    loader::{self, cell::CellRow},
    record::{ExchangeRate, Transaction},
};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Column names of a fully populated transaction table, in display order.
pub const TRANSACTION_COLUMNS: [&str; 20] = [
    "transaction_id",
    "customer_id",
    "timestamp",
    "vendor_category",
    "vendor_type",
    "amount",
    "currency",
    "country",
    "city",
    "card_type",
    "is_card_present",
    "device",
    "channel",
    "device_fingerprint",
    "ip_address",
    "is_outside_home_country",
    "is_high_risk_vendor",
    "is_weekend",
    "last_hour_activity",
    "is_fraud",
];

/// Column names and per-column non-null counts, as observed at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnProfile {
    columns: Vec<String>,
    non_null: BTreeMap<String, u64>,
    rows: u64,
}

impl ColumnProfile {
    pub fn from_rows(rows: &[CellRow]) -> Self {
        let mut profile = Self::default();
        for row in rows {
            profile.rows += 1;
            for (name, cell) in row {
                if !profile.columns.iter().any(|c| c == name) {
                    profile.columns.push(name.clone());
                }
                if !cell.is_null() {
                    *profile.non_null.entry(name.clone()).or_default() += 1;
                }
            }
        }
        profile
    }

    /// Profile of an in-memory table with no nulls.
    pub fn complete<S: AsRef<str>>(columns: &[S], rows: u64) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let non_null = columns.iter().map(|c| (c.clone(), rows)).collect();
        Self {
            columns,
            non_null,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Rows where the column is null or absent.
    pub fn null_count(&self, column: &str) -> u64 {
        self.rows - self.non_null.get(column).copied().unwrap_or(0)
    }

    /// Columns with at least one null, in column order.
    pub fn nulls(&self) -> Vec<(&str, u64)> {
        self.columns
            .iter()
            .map(|c| (c.as_str(), self.null_count(c)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionTable {
    pub records: Vec<Transaction>,
    pub profile: ColumnProfile,
}

impl TransactionTable {
    pub fn new(records: Vec<Transaction>, profile: ColumnProfile) -> Self {
        Self { records, profile }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.records.iter().map(|t| t.timestamp).min()?;
        let max = self.records.iter().map(|t| t.timestamp).max()?;
        Some((min, max))
    }
}

/// Exchange rates sorted by date ascending.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    pub records: Vec<ExchangeRate>,
    pub profile: ColumnProfile,
}

impl RateTable {
    pub fn new(mut records: Vec<ExchangeRate>, profile: ColumnProfile) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records, profile }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.records.first()?.date, self.records.last()?.date))
    }

    /// Every currency that has a rate on at least one date, sorted.
    pub fn currencies(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.rates.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rate for `currency` on `date`, or on the closest earlier date that has one.
    pub fn rate_on(&self, date: NaiveDate, currency: &str) -> Option<f64> {
        let end = self.records.partition_point(|r| r.date <= date);
        self.records[..end]
            .iter()
            .rev()
            .find_map(|r| r.rate(currency))
    }

    /// Convert an amount in `currency` to USD as of `date`.
    pub fn to_usd(&self, amount: f64, currency: &str, date: NaiveDate) -> Option<f64> {
        if currency == "USD" {
            return Some(amount);
        }
        self.rate_on(date, currency).map(|rate| amount / rate)
    }
}

/// Both tables, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub transactions: TransactionTable,
    pub rates: RateTable,
}

impl Dataset {
    pub fn load(transaction_path: &Path, currency_path: &Path) -> EdaResult<Self> {
        let transactions = loader::load_transactions(transaction_path)?;
        let rates = loader::load_rates(currency_path)?;
        Ok(Self {
            transactions,
            rates,
        })
    }

    /// Build a dataset from in-memory records with no nulls.
    pub fn from_records(transactions: Vec<Transaction>, rates: Vec<ExchangeRate>) -> Self {
        let txn_profile = ColumnProfile::complete(TRANSACTION_COLUMNS.as_slice(), transactions.len() as u64);

        let mut rate_columns = vec!["date".to_string()];
        rate_columns.extend(
            rates
                .iter()
                .flat_map(|r| r.rates.keys().cloned())
                .collect::<BTreeSet<_>>(),
        );
        let rate_profile = ColumnProfile::complete(rate_columns.as_slice(), rates.len() as u64);

        Self {
            transactions: TransactionTable::new(transactions, txn_profile),
            rates: RateTable::new(rates, rate_profile),
        }
    }
}
