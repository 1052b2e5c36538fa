//! Group-by aggregation over transactions.
//!
//! Every report section is built from the same four steps:
//! `group_by` -> `retain_min_count` (optional) -> `sort_by_fraud_rate_desc`
//! -> take the top N.

use crate::record::Transaction;
use std::collections::{BTreeMap, HashSet};

/// Counts and sums for one group of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats<K> {
    pub key: K,
    pub count: u64,
    pub fraud_count: u64,
    pub amount_sum: f64,
    pub fraud_amount_sum: f64,
    pub distinct_customers: u64,
}

impl<K> GroupStats<K> {
    fn empty(key: K) -> Self {
        Self {
            key,
            count: 0,
            fraud_count: 0,
            amount_sum: 0.0,
            fraud_amount_sum: 0.0,
            distinct_customers: 0,
        }
    }

    /// Fraction of the group flagged fraudulent, in [0, 1].
    pub fn fraud_rate(&self) -> f64 {
        ratio(self.fraud_count as f64, self.count as f64)
    }

    pub fn mean_amount(&self) -> f64 {
        ratio(self.amount_sum, self.count as f64)
    }

    pub fn legit_count(&self) -> u64 {
        self.count - self.fraud_count
    }

    pub fn mean_fraud_amount(&self) -> f64 {
        ratio(self.fraud_amount_sum, self.fraud_count as f64)
    }

    pub fn mean_legit_amount(&self) -> f64 {
        ratio(
            self.amount_sum - self.fraud_amount_sum,
            self.legit_count() as f64,
        )
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

struct Accumulator<'a, K> {
    stats: GroupStats<K>,
    customers: HashSet<&'a str>,
}

/// Group transactions by `key_fn`. Groups come back sorted by key and
/// their counts always sum to the number of input records.
pub fn group_by<'a, K, I, F>(records: I, key_fn: F) -> Vec<GroupStats<K>>
where
    I: IntoIterator<Item = &'a Transaction>,
    K: Ord + Clone,
    F: Fn(&'a Transaction) -> K,
{
    let mut groups: BTreeMap<K, Accumulator<'a, K>> = BTreeMap::new();

    for txn in records {
        let key = key_fn(txn);
        let acc = groups.entry(key.clone()).or_insert_with(|| Accumulator {
            stats: GroupStats::empty(key),
            customers: HashSet::new(),
        });
        acc.stats.count += 1;
        acc.stats.amount_sum += txn.amount;
        if txn.is_fraud {
            acc.stats.fraud_count += 1;
            acc.stats.fraud_amount_sum += txn.amount;
        }
        acc.customers.insert(txn.customer_id.as_str());
    }

    groups
        .into_values()
        .map(|mut acc| {
            acc.stats.distinct_customers = acc.customers.len() as u64;
            acc.stats
        })
        .collect()
}

/// Aggregate every record into a single group.
pub fn overall<'a, I>(records: I) -> GroupStats<()>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_by(records, |_| ())
        .pop()
        .unwrap_or_else(|| GroupStats::empty(()))
}

/// Keep only groups with at least `min_count` rows.
pub fn retain_min_count<K>(mut groups: Vec<GroupStats<K>>, min_count: u64) -> Vec<GroupStats<K>> {
    groups.retain(|g| g.count >= min_count);
    groups
}

/// Highest fraud rate first; equal rates keep key order.
pub fn sort_by_fraud_rate_desc<K: Ord>(groups: &mut [GroupStats<K>]) {
    groups.sort_by(|a, b| {
        b.fraud_rate()
            .total_cmp(&a.fraud_rate())
            .then_with(|| a.key.cmp(&b.key))
    });
}

/// Group, filter, rank and truncate in one call.
pub fn ranked<'a, K, I, F>(records: I, key_fn: F, min_count: u64, top_n: Option<usize>) -> Vec<GroupStats<K>>
where
    I: IntoIterator<Item = &'a Transaction>,
    K: Ord + Clone,
    F: Fn(&'a Transaction) -> K,
{
    let mut groups = retain_min_count(group_by(records, key_fn), min_count);
    sort_by_fraud_rate_desc(&mut groups);
    if let Some(n) = top_n {
        groups.truncate(n);
    }
    groups
}

/// Pearson correlation coefficient. `None` when the inputs differ in
/// length, have fewer than two points, or either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
