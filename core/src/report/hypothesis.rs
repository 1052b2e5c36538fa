//! Product and technical hypotheses, sized by the current fraud losses.

use crate::{
    aggregate::overall,
    error::EdaResult,
    section::{ReportContext, ReportSection},
};
use std::io::Write;

pub struct HypothesisReport;

impl HypothesisReport {
    /// Total fraudulent amount, in billions.
    pub fn fraud_amount_billions(ctx: &ReportContext<'_>) -> f64 {
        overall(&ctx.dataset.transactions.records).fraud_amount_sum / 1e9
    }
}

impl ReportSection for HypothesisReport {
    fn name(&self) -> &'static str {
        "hypotheses"
    }

    fn title(&self) -> &'static str {
        "PRODUCT AND TECHNICAL HYPOTHESES"
    }

    fn rule_width(&self) -> usize {
        80
    }

    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()> {
        let losses = Self::fraud_amount_billions(ctx);
        write!(
            out,
            "
PRODUCT HYPOTHESES:

1. DYNAMIC PRICING OF FRAUD INSURANCE
   - Charge an insurance fee that depends on the transaction's risk profile
   - High-risk categories (travel, entertainment) carry a higher fee
   - Potential revenue: 0.1-0.5% of high-risk turnover

2. TIME-BASED RESTRICTIONS
   - Limit night-time transactions for new cards and devices
   - Require step-up authentication during peak fraud hours
   - Expected fraud reduction: 15-25%

3. PREMIUM SECURITY TIERS
   - Offer extended protection for a monthly fee
   - Instant alerts, biometrics, refund insurance
   - Potential margin: $5-15/month per premium customer

4. GEOLOCATION PRODUCTS
   - Automatic card blocking on suspicious locations
   - A \"Travel Mode\" for customers to announce trips
   - False positives down 20-30%

TECHNICAL HYPOTHESES:

1. REAL-TIME ENSEMBLE MODEL
   - Gradient boosting + neural network + rules
   - Features: device fingerprinting, behavioral patterns, network analysis
   - Target: 95%+ precision at under 2% false positive rate

2. DEVICE SCORING
   - Assign a trust score to every device fingerprint
   - Learn from each device's history
   - Block new devices with suspicious patterns

3. NETWORK GRAPH ANALYSIS
   - Link graph: IP -> Device -> Customer -> Merchant
   - Surface fraud clusters and organized fraud
   - Community detection to find fraud rings

4. REAL-TIME FEATURE ENGINEERING
   - Velocity checks, amount patterns, location jumps
   - Streaming feature pipeline
   - Decision latency under 100ms

5. ANOMALY DETECTION FOR NEW FRAUD TYPES
   - Unsupervised learning to catch new patterns
   - Rules updated automatically from detected anomalies
   - Alerting for fraud analysts

POTENTIAL BUSINESS VALUE:

1. LOWER LOSSES: current losses ~${losses:.1}B/year -> target reduction 40-60%
2. MORE REVENUE: new security products -> +5-10% revenue
3. MORE TRUST: fewer false positives -> better UX
4. OPERATIONAL EFFICIENCY: automation -> 70% less manual review
5. COMPLIANCE: better risk management -> lower regulatory costs
"
        )?;
        Ok(())
    }
}
