//! Fraud by transaction currency, with USD-normalized amounts.

use crate::{
    aggregate::{group_by, sort_by_fraud_rate_desc, GroupStats},
    dataset::RateTable,
    error::EdaResult,
    record::Transaction,
    section::{ReportContext, ReportSection},
    table::{Column, TextTable},
};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsdTotals {
    pub total_usd: f64,
    pub fraud_usd: f64,
    /// Transactions with no rate on or before their date.
    pub unconverted: u64,
}

#[derive(Debug, Clone)]
pub struct CurrencyRow<'a> {
    pub stats: GroupStats<&'a str>,
    pub usd: UsdTotals,
}

pub struct CurrencyReport;

impl CurrencyReport {
    /// One row per currency, highest fraud rate first.
    pub fn compute<'a>(ctx: &ReportContext<'a>) -> Vec<CurrencyRow<'a>> {
        let records = &ctx.dataset.transactions.records;
        let usd = usd_totals(records, &ctx.dataset.rates);

        let mut groups = group_by(records, |t| t.currency.as_str());
        sort_by_fraud_rate_desc(&mut groups);

        groups
            .into_iter()
            .map(|stats| CurrencyRow {
                usd: usd.get(stats.key).cloned().unwrap_or_default(),
                stats,
            })
            .collect()
    }
}

fn usd_totals<'a>(records: &'a [Transaction], rates: &RateTable) -> BTreeMap<&'a str, UsdTotals> {
    let mut totals: BTreeMap<&str, UsdTotals> = BTreeMap::new();
    for txn in records {
        let entry = totals.entry(txn.currency.as_str()).or_default();
        match rates.to_usd(txn.amount, &txn.currency, txn.date()) {
            Some(amount) => {
                entry.total_usd += amount;
                if txn.is_fraud {
                    entry.fraud_usd += amount;
                }
            }
            None => entry.unconverted += 1,
        }
    }
    totals
}

impl ReportSection for CurrencyReport {
    fn name(&self) -> &'static str {
        "currency"
    }

    fn title(&self) -> &'static str {
        "CURRENCY ANALYSIS"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let rows = Self::compute(ctx);
        let columns = [
            Column::TotalTrans,
            Column::FraudTrans,
            Column::FraudRate,
            Column::TotalAmount,
            Column::AvgAmount,
            Column::FraudRatePct,
        ];

        writeln!(out, "Fraud by currency:")?;
        let stats: Vec<_> = rows.iter().map(|r| r.stats.clone()).collect();
        TextTable::from_groups("currency", &stats, &columns).render(out)?;

        writeln!(out, "\nUSD-normalized amounts:")?;
        let mut table = TextTable::new(["currency", "total_usd", "fraud_usd", "unconverted"]);
        for row in &rows {
            table.push_row(vec![
                row.stats.key.to_string(),
                format!("{:.2}", row.usd.total_usd),
                format!("{:.2}", row.usd.fraud_usd),
                row.usd.unconverted.to_string(),
            ]);
        }
        table.render(out)?;
        Ok(())
    }
}
