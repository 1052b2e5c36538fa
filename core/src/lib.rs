//! Exploratory fraud analysis over a transaction table and an
//! exchange-rate table.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod loader;
pub mod record;
pub mod report;
pub mod rng;
pub mod section;
pub mod synth;
pub mod table;
pub mod types;
