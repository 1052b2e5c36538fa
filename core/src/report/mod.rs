//! Report sections, one module per section.

pub mod basic_info;
pub mod currency;
pub mod device;
pub mod dimension;
pub mod fraud_overview;
pub mod hypothesis;
pub mod risk_factor;
pub mod temporal;

pub use basic_info::BasicInfoReport;
pub use currency::CurrencyReport;
pub use device::DeviceReport;
pub use dimension::DimensionReport;
pub use fraud_overview::FraudOverviewReport;
pub use hypothesis::HypothesisReport;
pub use risk_factor::RiskFactorReport;
pub use temporal::TemporalReport;
