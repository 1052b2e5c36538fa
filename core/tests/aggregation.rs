//! Group-by invariants: counts add up, rates stay in range, filters only
//! shrink, ranking is non-increasing.

use fraud_eda_core::{
    aggregate::{group_by, overall, ranked, retain_min_count, sort_by_fraud_rate_desc, GroupStats},
    record::Transaction,
    synth,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const VENDORS: [&str; 4] = ["A", "B", "C", "D"];

/// 1000 rows, every 8th fraudulent. All fraud lands in vendor "A".
fn fixed_records() -> Vec<Transaction> {
    (0..1000usize)
        .map(|i| Transaction {
            customer_id: format!("c{}", i % 37),
            amount: (i % 10) as f64 + 1.0,
            vendor_category: VENDORS[i % 4].to_string(),
            country: format!("country-{}", i % 7),
            is_fraud: i % 8 == 0,
            ..Default::default()
        })
        .collect()
}

fn check_partition<K>(groups: &[GroupStats<K>], total: usize, label: &str) {
    let sum: u64 = groups.iter().map(|g| g.count).sum();
    assert_eq!(sum, total as u64, "{label}: group counts sum to {sum}, expected {total}");
    for g in groups {
        let rate = g.fraud_rate();
        assert!(
            (0.0..=1.0).contains(&rate),
            "{label}: fraud rate {rate} out of [0, 1]"
        );
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Overall fraud rate of the fixed dataset is exactly 125 / 1000.
#[test]
fn overall_fraud_rate_matches_precomputed_value() {
    let records = fixed_records();
    let all = overall(&records);

    assert_eq!(all.count, 1000);
    assert_eq!(all.fraud_count, 125);
    assert_eq!(all.fraud_rate(), 0.125);
    assert_eq!(all.distinct_customers, 37);
}

#[test]
fn vendor_rates_on_fixed_dataset() {
    let records = fixed_records();
    let groups = ranked(&records, |t| t.vendor_category.as_str(), 0, None);

    assert_eq!(groups[0].key, "A");
    assert_eq!(groups[0].count, 250);
    assert_eq!(groups[0].fraud_rate(), 0.5);
    for g in &groups[1..] {
        assert_eq!(g.fraud_count, 0, "vendor {} should have no fraud", g.key);
    }
    // Equal rates fall back to key order.
    let rest: Vec<&str> = groups[1..].iter().map(|g| g.key).collect();
    assert_eq!(rest, ["B", "C", "D"]);
}

/// Every dimension the reports group by partitions the full table.
#[test]
fn group_counts_sum_to_row_count_on_every_dimension() {
    let ds = synth::generate(3_000, 42);
    let records = &ds.transactions.records;
    let total = records.len();

    check_partition(&group_by(records, |t| t.vendor_category.as_str()), total, "vendor");
    check_partition(&group_by(records, |t| t.card_type.as_str()), total, "card");
    check_partition(&group_by(records, |t| t.channel.as_str()), total, "channel");
    check_partition(&group_by(records, |t| t.country.as_str()), total, "country");
    check_partition(&group_by(records, |t| t.currency.as_str()), total, "currency");
    check_partition(&group_by(records, |t| t.device.as_str()), total, "device");
    check_partition(&group_by(records, |t| t.device_fingerprint.as_str()), total, "fingerprint");
    check_partition(&group_by(records, |t| t.hour()), total, "hour");
    check_partition(&group_by(records, |t| t.is_weekend), total, "weekend");
    check_partition(&group_by(records, |t| t.is_high_risk_vendor), total, "high_risk");
}

#[test]
fn min_count_filter_never_grows_the_group_set() {
    let ds = synth::generate(2_000, 7);
    let groups = group_by(&ds.transactions.records, |t| t.device_fingerprint.as_str());

    let mut previous = groups.len();
    for min in [0u64, 1, 2, 5, 20, 50, 100, 10_000] {
        let kept = retain_min_count(groups.clone(), min);
        assert!(kept.len() <= previous, "min={min}: {} > {previous}", kept.len());
        assert!(kept.iter().all(|g| g.count >= min));
        for g in &kept {
            assert!(groups.contains(g), "filter invented group {}", g.key);
        }
        previous = kept.len();
    }
    assert_eq!(retain_min_count(groups.clone(), 0).len(), groups.len());
}

#[test]
fn ranking_is_non_increasing() {
    let ds = synth::generate(2_500, 1337);
    let mut groups = group_by(&ds.transactions.records, |t| t.country.as_str());
    sort_by_fraud_rate_desc(&mut groups);

    for pair in groups.windows(2) {
        assert!(
            pair[0].fraud_rate() >= pair[1].fraud_rate(),
            "{} ({}) ranked above {} ({})",
            pair[0].key,
            pair[0].fraud_rate(),
            pair[1].key,
            pair[1].fraud_rate()
        );
    }
}

#[test]
fn ranked_truncates_after_filtering() {
    let records = fixed_records();
    let top = ranked(&records, |t| t.country.as_str(), 143, Some(3));

    // 1000 rows over 7 countries: six with 143 rows, one with 142.
    assert_eq!(top.len(), 3);
    assert!(top.iter().all(|g| g.count >= 143));
}

#[test]
fn empty_input_yields_no_groups() {
    let records: Vec<Transaction> = Vec::new();
    assert!(group_by(&records, |t| t.is_fraud).is_empty());

    let all = overall(&records);
    assert_eq!(all.count, 0);
    assert_eq!(all.fraud_rate(), 0.0);
}
