//! Basic information about both tables: shape, period, nulls, fraud split.

use crate::{
    aggregate::{group_by, GroupStats},
    error::EdaResult,
    section::{ReportContext, ReportSection},
    table::{Column, TextTable},
};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct NullSummary {
    pub column: String,
    pub nulls: u64,
    pub pct: f64,
}

#[derive(Debug, Clone)]
pub struct BasicInfo {
    pub transaction_rows: usize,
    pub transaction_columns: usize,
    pub period: Option<(NaiveDateTime, NaiveDateTime)>,
    pub nulls: Vec<NullSummary>,
    pub fraud_split: Vec<GroupStats<bool>>,
    pub rate_rows: usize,
    pub rate_columns: usize,
    pub rate_period: Option<(NaiveDate, NaiveDate)>,
    pub currencies: Vec<String>,
}

pub struct BasicInfoReport;

impl BasicInfoReport {
    pub fn compute(ctx: &ReportContext<'_>) -> BasicInfo {
        let txns = &ctx.dataset.transactions;
        let rates = &ctx.dataset.rates;
        let rows = txns.len();

        let nulls = txns
            .profile
            .nulls()
            .into_iter()
            .map(|(column, nulls)| NullSummary {
                column: column.to_string(),
                nulls,
                pct: if rows > 0 {
                    nulls as f64 / rows as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        BasicInfo {
            transaction_rows: rows,
            transaction_columns: txns.profile.width(),
            period: txns.period(),
            nulls,
            fraud_split: group_by(&txns.records, |t| t.is_fraud),
            rate_rows: rates.len(),
            rate_columns: rates.profile.width(),
            rate_period: rates.period(),
            currencies: rates.currencies(),
        }
    }
}

impl ReportSection for BasicInfoReport {
    fn name(&self) -> &'static str {
        "basic_info"
    }

    fn title(&self) -> &'static str {
        "BASIC DATASET INFORMATION"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let info = Self::compute(ctx);

        writeln!(out, "\nTRANSACTIONS:")?;
        writeln!(
            out,
            "Shape: ({}, {})",
            info.transaction_rows, info.transaction_columns
        )?;
        match info.period {
            Some((from, to)) => writeln!(out, "Period: {from} - {to}")?,
            None => writeln!(out, "Period: (empty)")?,
        }

        writeln!(out, "\nMissing values:")?;
        if info.nulls.is_empty() {
            writeln!(out, "  none")?;
        }
        for n in &info.nulls {
            writeln!(out, "  {}: {} ({:.2}%)", n.column, n.nulls, n.pct)?;
        }

        writeln!(out, "\nFraud distribution:")?;
        TextTable::from_groups(
            "is_fraud",
            &info.fraud_split,
            &[Column::TotalTrans, Column::AvgAmount, Column::TotalAmount],
        )
        .render(out)?;

        writeln!(out, "\nEXCHANGE RATES:")?;
        writeln!(out, "Shape: ({}, {})", info.rate_rows, info.rate_columns)?;
        match info.rate_period {
            Some((from, to)) => writeln!(out, "Period: {from} - {to}")?,
            None => writeln!(out, "Period: (empty)")?,
        }
        writeln!(out, "Currencies: {}", info.currencies.join(", "))?;
        Ok(())
    }
}
