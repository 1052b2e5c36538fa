//! Headline fraud figures: rate, losses, and average ticket size.

use crate::{
    aggregate::overall,
    error::EdaResult,
    section::{ReportContext, ReportSection},
    table::thousands,
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct FraudOverview {
    pub total_transactions: u64,
    pub fraud_transactions: u64,
    /// Percent of transactions flagged fraudulent.
    pub fraud_rate_pct: f64,
    pub total_amount: f64,
    pub fraud_amount: f64,
    /// Percent of turnover lost to fraud.
    pub loss_share_pct: f64,
    pub avg_legit_amount: f64,
    pub avg_fraud_amount: f64,
    /// Relative difference of the fraudulent mean over the legitimate mean,
    /// in percent. `None` when there are no legitimate amounts to compare to.
    pub avg_difference_pct: Option<f64>,
}

pub struct FraudOverviewReport;

impl FraudOverviewReport {
    pub fn compute(ctx: &ReportContext<'_>) -> FraudOverview {
        let all = overall(&ctx.dataset.transactions.records);
        let avg_legit = all.mean_legit_amount();
        let avg_fraud = all.mean_fraud_amount();

        FraudOverview {
            total_transactions: all.count,
            fraud_transactions: all.fraud_count,
            fraud_rate_pct: all.fraud_rate() * 100.0,
            total_amount: all.amount_sum,
            fraud_amount: all.fraud_amount_sum,
            loss_share_pct: if all.amount_sum != 0.0 {
                all.fraud_amount_sum / all.amount_sum * 100.0
            } else {
                0.0
            },
            avg_legit_amount: avg_legit,
            avg_fraud_amount: avg_fraud,
            avg_difference_pct: (avg_legit != 0.0).then(|| (avg_fraud / avg_legit - 1.0) * 100.0),
        }
    }
}

impl ReportSection for FraudOverviewReport {
    fn name(&self) -> &'static str {
        "fraud_overview"
    }

    fn title(&self) -> &'static str {
        "FRAUD OVERVIEW"
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let o = Self::compute(ctx);

        writeln!(out, "\nOverall:")?;
        writeln!(out, "  Total transactions:      {}", thousands(o.total_transactions as f64, 0))?;
        writeln!(out, "  Fraudulent transactions: {}", thousands(o.fraud_transactions as f64, 0))?;
        writeln!(out, "  Fraud rate:              {:.2}%", o.fraud_rate_pct)?;

        writeln!(out, "\nFinancial losses:")?;
        writeln!(out, "  Total turnover:          ${}", thousands(o.total_amount, 2))?;
        writeln!(out, "  Lost to fraud:           ${}", thousands(o.fraud_amount, 2))?;
        writeln!(out, "  Loss share:              {:.2}%", o.loss_share_pct)?;

        writeln!(out, "\nAverage transaction amount:")?;
        writeln!(out, "  Legitimate:              ${}", thousands(o.avg_legit_amount, 2))?;
        writeln!(out, "  Fraudulent:              ${}", thousands(o.avg_fraud_amount, 2))?;
        match o.avg_difference_pct {
            Some(diff) => writeln!(out, "  Difference:              {diff:+.1}%")?,
            None => writeln!(out, "  Difference:              n/a")?,
        }
        Ok(())
    }
}
