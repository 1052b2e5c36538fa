//! Fraud by vendor category, card type, channel and country.

use crate::{
    aggregate::{ranked, GroupStats},
    error::EdaResult,
    section::{ReportContext, ReportSection},
    table::{Column, TextTable, RATE_COLUMNS},
};
use std::io::Write;

#[derive(Debug, Clone)]
pub struct DimensionBreakdown<'a> {
    pub vendor_categories: Vec<GroupStats<&'a str>>,
    pub card_types: Vec<GroupStats<&'a str>>,
    pub channels: Vec<GroupStats<&'a str>>,
    /// Countries above the minimum volume, highest rate first, truncated.
    pub top_countries: Vec<GroupStats<&'a str>>,
}

pub struct DimensionReport;

impl DimensionReport {
    pub fn compute<'a>(ctx: &ReportContext<'a>) -> DimensionBreakdown<'a> {
        let records = &ctx.dataset.transactions.records;
        let country = &ctx.config.country;

        DimensionBreakdown {
            vendor_categories: ranked(records, |t| t.vendor_category.as_str(), 0, None),
            card_types: ranked(records, |t| t.card_type.as_str(), 0, None),
            channels: ranked(records, |t| t.channel.as_str(), 0, None),
            top_countries: ranked(
                records,
                |t| t.country.as_str(),
                country.min_transactions,
                Some(country.top_n),
            ),
        }
    }
}

impl ReportSection for DimensionReport {
    fn name(&self) -> &'static str {
        "dimensions"
    }

    fn title(&self) -> &'static str {
        "FRAUD BY DIMENSION"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let d = Self::compute(ctx);
        let with_amounts = [
            Column::TotalTrans,
            Column::FraudTrans,
            Column::FraudRate,
            Column::TotalAmount,
            Column::AvgAmount,
            Column::FraudRatePct,
        ];
        let with_avg = [
            Column::TotalTrans,
            Column::FraudTrans,
            Column::FraudRate,
            Column::AvgAmount,
            Column::FraudRatePct,
        ];

        writeln!(out, "\nBy vendor category:")?;
        TextTable::from_groups("vendor_category", &d.vendor_categories, &with_amounts).render(out)?;

        writeln!(out, "\nBy card type:")?;
        TextTable::from_groups("card_type", &d.card_types, &with_avg).render(out)?;

        writeln!(out, "\nBy channel:")?;
        TextTable::from_groups("channel", &d.channels, &with_avg).render(out)?;

        writeln!(
            out,
            "\nTop {} countries by fraud rate (at least {} transactions):",
            ctx.config.country.top_n, ctx.config.country.min_transactions
        )?;
        TextTable::from_groups("country", &d.top_countries, &RATE_COLUMNS).render(out)?;
        Ok(())
    }
}
