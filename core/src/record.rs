//! Immutable records held by the dataset.
//!
//! RULE: records are built once by the loader (or the synthetic generator)
//! and never mutated afterwards.

use crate::types::{CurrencyCode, CustomerId, Hour};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::BTreeMap;

/// Account activity in the hour preceding a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastHourActivity {
    pub num_transactions: f64,
    pub total_amount: f64,
    pub unique_merchants: f64,
    pub unique_countries: f64,
    pub max_single_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: CustomerId,
    pub timestamp: NaiveDateTime,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub country: String,
    pub city: String,
    pub vendor_category: String,
    pub vendor_type: String,
    pub card_type: String,
    pub channel: String,
    pub device: String,
    pub device_fingerprint: String,
    pub ip_address: String,
    pub is_card_present: bool,
    pub is_outside_home_country: bool,
    pub is_high_risk_vendor: bool,
    pub is_weekend: bool,
    pub last_hour_activity: Option<LastHourActivity>,
    pub is_fraud: bool,
}

impl Transaction {
    pub fn hour(&self) -> Hour {
        self.timestamp.hour()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Last-hour activity with absent values read as zero.
    pub fn activity(&self) -> LastHourActivity {
        self.last_hour_activity.unwrap_or_default()
    }
}

/// One day of exchange rates, expressed as units of each currency per USD.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub date: NaiveDate,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRate {
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied().filter(|r| *r > 0.0)
    }
}
