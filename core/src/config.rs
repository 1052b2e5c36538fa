use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and list sizes used by the report sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub country: CountryReportConfig,
    pub temporal: TemporalReportConfig,
    pub device: DeviceReportConfig,
    pub fingerprint: FingerprintReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryReportConfig {
    pub min_transactions: u64,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalReportConfig {
    pub top_hours: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceReportConfig {
    pub min_transactions: u64,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintReportConfig {
    /// Fingerprints with a fraud rate strictly above this are suspicious.
    pub fraud_rate_threshold: f64,
    /// Fingerprints shared by strictly more customers than this are suspicious.
    pub max_customers: u64,
    pub top_n: usize,
}

impl Default for CountryReportConfig {
    fn default() -> Self {
        Self {
            min_transactions: 100,
            top_n: 10,
        }
    }
}

impl Default for TemporalReportConfig {
    fn default() -> Self {
        Self { top_hours: 5 }
    }
}

impl Default for DeviceReportConfig {
    fn default() -> Self {
        Self {
            min_transactions: 50,
            top_n: 10,
        }
    }
}

impl Default for FingerprintReportConfig {
    fn default() -> Self {
        Self {
            fraud_rate_threshold: 0.5,
            max_customers: 10,
            top_n: 5,
        }
    }
}

impl ReportConfig {
    /// Load overrides from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read report config {}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse report config {}", path.display()))?;
        Ok(config)
    }
}
