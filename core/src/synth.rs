//! Deterministic synthetic dataset.
//!
//! Produces a transaction table and a matching exchange-rate table from a
//! single seed. Fraud likelihood rises with the same risk factors the reports
//! look at, so every section has structure to show.

use crate::{
    dataset::Dataset,
    record::{ExchangeRate, LastHourActivity, Transaction},
    rng::{RngBank, StreamRng, StreamSlot},
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::collections::BTreeMap;
use uuid::Uuid;

const PERIOD_DAYS: i64 = 30;
const CUSTOMERS_PER_TRANSACTION: f64 = 0.05;
const RING_FINGERPRINTS: usize = 3;

/// (country, currency, units per USD)
const COUNTRIES: [(&str, &str, f64); 10] = [
    ("USA", "USD", 1.0),
    ("UK", "GBP", 0.79),
    ("Germany", "EUR", 0.92),
    ("France", "EUR", 0.92),
    ("Japan", "JPY", 148.5),
    ("Canada", "CAD", 1.36),
    ("Australia", "AUD", 1.52),
    ("Brazil", "BRL", 4.95),
    ("Mexico", "MXN", 17.1),
    ("Nigeria", "NGN", 890.0),
];

/// (category, high risk)
const VENDOR_CATEGORIES: [(&str, bool); 8] = [
    ("Retail", false),
    ("Restaurant", false),
    ("Grocery", false),
    ("Gas", false),
    ("Healthcare", false),
    ("Education", false),
    ("Entertainment", true),
    ("Travel", true),
];

const CARD_TYPES: [&str; 5] = [
    "Basic Debit",
    "Premium Debit",
    "Basic Credit",
    "Gold Credit",
    "Platinum Credit",
];

const WEB_DEVICES: [&str; 4] = ["Chrome", "Safari", "Firefox", "Edge"];
const MOBILE_DEVICES: [&str; 2] = ["iOS App", "Android App"];
const POS_DEVICES: [&str; 3] = ["Chip Reader", "Magnetic Stripe", "NFC Payment"];

struct Customer {
    id: String,
    home: usize,
    card_type: &'static str,
    fingerprint: String,
}

/// Generate `rows` transactions and a rate table covering their period.
/// Identical `(rows, seed)` pairs always produce identical datasets.
pub fn generate(rows: usize, seed: u64) -> Dataset {
    let bank = RngBank::new(seed);
    let start = period_start();

    let customers = generate_customers(rows, &mut bank.for_stream(StreamSlot::Customers));
    let mut rng = bank.for_stream(StreamSlot::Transactions);
    let transactions = (0..rows)
        .map(|_| generate_transaction(&customers, start, &mut rng))
        .collect();
    let rates = generate_rates(start, &mut bank.for_stream(StreamSlot::Rates));

    log::debug!(
        "synthetic dataset: {rows} transactions, {} customers, seed {seed}",
        customers.len()
    );
    Dataset::from_records(transactions, rates)
}

fn period_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn generate_customers(rows: usize, rng: &mut StreamRng) -> Vec<Customer> {
    let count = ((rows as f64 * CUSTOMERS_PER_TRANSACTION).ceil() as usize).max(1);
    (0..count)
        .map(|i| Customer {
            id: format!("CUST_{i:05}"),
            home: rng.weighted_index(&[6.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.8, 0.8, 0.6]),
            card_type: *rng.pick(&CARD_TYPES),
            fingerprint: format!("{:016x}", rng.next_u128() as u64),
        })
        .collect()
}

fn generate_transaction(
    customers: &[Customer],
    start: NaiveDateTime,
    rng: &mut StreamRng,
) -> Transaction {
    let customer = rng.pick(customers);
    let timestamp = start + Duration::seconds(rng.next_u64_below(PERIOD_DAYS as u64 * 86_400) as i64);
    let hour = timestamp.hour();

    let is_outside_home_country = rng.chance(0.15);
    let country_idx = if is_outside_home_country {
        (customer.home + 1 + rng.next_u64_below(COUNTRIES.len() as u64 - 1) as usize) % COUNTRIES.len()
    } else {
        customer.home
    };
    let (country, currency, _) = COUNTRIES[country_idx];

    let (vendor_category, is_high_risk_vendor) = *rng.pick(&VENDOR_CATEGORIES);
    let channel_idx = rng.weighted_index(&[0.4, 0.3, 0.3]);
    let (channel, device) = match channel_idx {
        0 => ("web", *rng.pick(&WEB_DEVICES)),
        1 => ("mobile", *rng.pick(&MOBILE_DEVICES)),
        _ => ("pos", *rng.pick(&POS_DEVICES)),
    };
    let is_card_present = channel == "pos";

    let mut fraud_p = 0.02;
    if is_high_risk_vendor {
        fraud_p += 0.06;
    }
    if is_outside_home_country {
        fraud_p += 0.15;
    }
    if hour < 6 {
        fraud_p += 0.05;
    }
    if !is_card_present {
        fraud_p += 0.03;
    }
    let is_fraud = rng.chance(fraud_p);

    let fingerprint = if is_fraud && rng.chance(0.3) {
        format!("ring-{:02}", rng.next_u64_below(RING_FINGERPRINTS as u64))
    } else {
        customer.fingerprint.clone()
    };

    let base_amount = rng.pareto(12.0, 1.5).min(5_000.0);
    let amount = if is_fraud { base_amount * 2.5 } else { base_amount };
    let amount = (amount * 100.0).round() / 100.0;

    let burst = if is_fraud { 3.0 } else { 1.0 };
    let num_transactions = (rng.next_u64_below(4) as f64 * burst).round();
    let activity = LastHourActivity {
        num_transactions,
        total_amount: ((num_transactions * rng.pareto(20.0, 1.8)) * 100.0).round() / 100.0,
        unique_merchants: num_transactions.min(1.0 + rng.next_u64_below(3) as f64 * burst),
        unique_countries: if is_outside_home_country { 2.0 } else { 1.0 },
        max_single_amount: amount,
    };

    Transaction {
        transaction_id: format!("TX_{}", Uuid::from_u128(rng.next_u128()).simple()),
        customer_id: customer.id.clone(),
        timestamp,
        amount,
        currency: currency.to_string(),
        country: country.to_string(),
        city: format!("{country} City"),
        vendor_category: vendor_category.to_string(),
        vendor_type: if is_high_risk_vendor { "online" } else { "local" }.to_string(),
        card_type: customer.card_type.to_string(),
        channel: channel.to_string(),
        device: device.to_string(),
        device_fingerprint: fingerprint,
        ip_address: format!(
            "10.{}.{}.{}",
            rng.next_u64_below(256),
            rng.next_u64_below(256),
            rng.next_u64_below(256)
        ),
        is_card_present,
        is_outside_home_country,
        is_high_risk_vendor,
        is_weekend: matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun),
        last_hour_activity: Some(activity),
        is_fraud,
    }
}

fn generate_rates(start: NaiveDateTime, rng: &mut StreamRng) -> Vec<ExchangeRate> {
    let mut currencies: BTreeMap<&str, f64> = BTreeMap::new();
    for (_, currency, rate) in COUNTRIES {
        currencies.insert(currency, rate);
    }

    (0..=PERIOD_DAYS)
        .map(|day| {
            let rates = currencies
                .iter()
                .map(|(code, base)| {
                    let rate = if *code == "USD" {
                        1.0
                    } else {
                        base * (1.0 + (rng.next_f64() - 0.5) * 0.02)
                    };
                    (code.to_string(), rate)
                })
                .collect();
            ExchangeRate {
                date: start.date() + Duration::days(day),
                rates,
            }
        })
        .collect()
}
