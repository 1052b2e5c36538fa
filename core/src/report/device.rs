//! Device and device-fingerprint risk.

use crate::{
    aggregate::{group_by, ranked, sort_by_fraud_rate_desc, GroupStats},
    config::FingerprintReportConfig,
    error::EdaResult,
    section::{ReportContext, ReportSection},
    table::{Column, TextTable, RATE_COLUMNS},
};
use std::io::Write;

#[derive(Debug, Clone)]
pub struct DeviceBreakdown<'a> {
    /// Devices above the minimum volume, highest rate first, truncated.
    pub top_devices: Vec<GroupStats<&'a str>>,
    /// Every suspicious fingerprint, highest rate first.
    pub suspicious_fingerprints: Vec<GroupStats<&'a str>>,
}

impl DeviceBreakdown<'_> {
    pub fn suspicious_count(&self) -> usize {
        self.suspicious_fingerprints.len()
    }
}

/// Mostly fraudulent, or shared by unusually many customers.
pub fn is_suspicious<K>(group: &GroupStats<K>, config: &FingerprintReportConfig) -> bool {
    group.fraud_rate() > config.fraud_rate_threshold
        || group.distinct_customers > config.max_customers
}

pub struct DeviceReport;

impl DeviceReport {
    pub fn compute<'a>(ctx: &ReportContext<'a>) -> DeviceBreakdown<'a> {
        let records = &ctx.dataset.transactions.records;
        let device = &ctx.config.device;
        let fingerprint = &ctx.config.fingerprint;

        let mut suspicious: Vec<_> = group_by(records, |t| t.device_fingerprint.as_str())
            .into_iter()
            .filter(|g| is_suspicious(g, fingerprint))
            .collect();
        sort_by_fraud_rate_desc(&mut suspicious);

        DeviceBreakdown {
            top_devices: ranked(
                records,
                |t| t.device.as_str(),
                device.min_transactions,
                Some(device.top_n),
            ),
            suspicious_fingerprints: suspicious,
        }
    }
}

impl ReportSection for DeviceReport {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn title(&self) -> &'static str {
        "DEVICE ANALYSIS"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let d = Self::compute(ctx);
        let cfg = ctx.config;

        writeln!(
            out,
            "Top {} riskiest devices (at least {} transactions):",
            cfg.device.top_n, cfg.device.min_transactions
        )?;
        TextTable::from_groups("device", &d.top_devices, &RATE_COLUMNS).render(out)?;

        writeln!(
            out,
            "\nSuspicious device fingerprints: {}",
            d.suspicious_count()
        )?;
        if !d.suspicious_fingerprints.is_empty() {
            let top: Vec<_> = d
                .suspicious_fingerprints
                .iter()
                .take(cfg.fingerprint.top_n)
                .cloned()
                .collect();
            writeln!(out, "Top {} most suspicious:", top.len())?;
            TextTable::from_groups(
                "device_fingerprint",
                &top,
                &[
                    Column::TotalTrans,
                    Column::FraudTrans,
                    Column::FraudRate,
                    Column::UniqueCustomers,
                ],
            )
            .render(out)?;
        }
        Ok(())
    }
}
