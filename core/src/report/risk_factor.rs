//! Boolean risk factors and last-hour activity correlation.

use crate::{
    aggregate::{group_by, pearson, GroupStats},
    error::EdaResult,
    record::Transaction,
    section::{ReportContext, ReportSection},
    table::{TextTable, RATE_COLUMNS},
};
use std::cmp::Ordering;
use std::io::Write;

type FactorFn = fn(&Transaction) -> bool;

const RISK_FACTORS: [(&str, FactorFn); 3] = [
    ("is_high_risk_vendor", |t| t.is_high_risk_vendor),
    ("is_outside_home_country", |t| t.is_outside_home_country),
    ("is_card_present", |t| t.is_card_present),
];

type ActivityFn = fn(&Transaction) -> f64;

const ACTIVITY_FEATURES: [(&str, ActivityFn); 4] = [
    ("is_fraud", |t| if t.is_fraud { 1.0 } else { 0.0 }),
    ("last_hour_num_trans", |t| t.activity().num_transactions),
    ("last_hour_total_amount", |t| t.activity().total_amount),
    ("last_hour_unique_merchants", |t| t.activity().unique_merchants),
];

#[derive(Debug, Clone)]
pub struct RiskFactorBreakdown {
    pub factors: Vec<(&'static str, Vec<GroupStats<bool>>)>,
    /// Correlation of each feature with `is_fraud`, highest first.
    /// `None` (undefined, e.g. constant column) sorts last.
    pub activity_correlation: Vec<(&'static str, Option<f64>)>,
}

pub struct RiskFactorReport;

impl RiskFactorReport {
    pub fn compute(ctx: &ReportContext<'_>) -> RiskFactorBreakdown {
        let records = &ctx.dataset.transactions.records;

        let factors = RISK_FACTORS
            .iter()
            .map(|(name, factor)| (*name, group_by(records, |t| factor(t))))
            .collect();

        let fraud: Vec<f64> = records.iter().map(ACTIVITY_FEATURES[0].1).collect();
        let mut activity_correlation: Vec<(&'static str, Option<f64>)> = ACTIVITY_FEATURES
            .iter()
            .map(|(name, feature)| {
                let values: Vec<f64> = records.iter().map(|t| feature(t)).collect();
                (*name, pearson(&fraud, &values))
            })
            .collect();
        activity_correlation.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        RiskFactorBreakdown {
            factors,
            activity_correlation,
        }
    }
}

impl ReportSection for RiskFactorReport {
    fn name(&self) -> &'static str {
        "risk_factors"
    }

    fn title(&self) -> &'static str {
        "RISK FACTOR ANALYSIS"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let r = Self::compute(ctx);

        for (name, groups) in &r.factors {
            writeln!(out, "\nFactor: {name}")?;
            TextTable::from_groups(name, groups, &RATE_COLUMNS).render(out)?;
        }

        writeln!(out, "\nLast-hour activity:")?;
        writeln!(out, "Correlation with is_fraud:")?;
        let mut table = TextTable::new(["feature", "correlation"]);
        for (name, corr) in &r.activity_correlation {
            let value = corr.map_or_else(|| "NaN".to_string(), |c| format!("{c:.6}"));
            table.push_row(vec![name.to_string(), value]);
        }
        table.render(out)?;
        Ok(())
    }
}
