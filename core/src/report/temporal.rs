//! Fraud by hour of day and weekday vs weekend.

use crate::{
    aggregate::{group_by, ranked, GroupStats},
    error::EdaResult,
    section::{ReportContext, ReportSection},
    table::{TextTable, RATE_COLUMNS},
    types::Hour,
};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekday => f.write_str("Weekday"),
            Self::Weekend => f.write_str("Weekend"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemporalBreakdown {
    /// Hours with the highest fraud rate, truncated to the configured count.
    pub dangerous_hours: Vec<GroupStats<Hour>>,
    /// Weekday first, then weekend.
    pub day_kinds: Vec<GroupStats<DayKind>>,
}

pub struct TemporalReport;

impl TemporalReport {
    pub fn compute(ctx: &ReportContext<'_>) -> TemporalBreakdown {
        let records = &ctx.dataset.transactions.records;
        TemporalBreakdown {
            dangerous_hours: ranked(
                records,
                |t| t.hour(),
                0,
                Some(ctx.config.temporal.top_hours),
            ),
            day_kinds: group_by(records, |t| {
                if t.is_weekend {
                    DayKind::Weekend
                } else {
                    DayKind::Weekday
                }
            }),
        }
    }
}

impl ReportSection for TemporalReport {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn title(&self) -> &'static str {
        "TEMPORAL ANALYSIS"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let t = Self::compute(ctx);

        writeln!(out, "\nBy hour of day:")?;
        writeln!(
            out,
            "Top {} most dangerous hours:",
            ctx.config.temporal.top_hours
        )?;
        TextTable::from_groups("hour", &t.dangerous_hours, &RATE_COLUMNS).render(out)?;

        writeln!(out, "\nWeekday vs weekend:")?;
        TextTable::from_groups("day", &t.day_kinds, &RATE_COLUMNS).render(out)?;
        Ok(())
    }
}
