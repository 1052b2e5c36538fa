//! The report engine: owns the dataset and runs every section.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Basic info
//!   2. Fraud overview
//!   3. Dimensions (vendor, card, channel, country)
//!   4. Temporal
//!   5. Risk factors
//!   6. Currency
//!   7. Devices
//!   8. Hypotheses
//!
//! RULES:
//!   - Sections run in registration order.
//!   - Sections only read the dataset and config.
//!   - Nothing is written anywhere but the output sink.

use crate::{
    config::ReportConfig,
    dataset::Dataset,
    error::EdaResult,
    report::{
        BasicInfoReport, CurrencyReport, DeviceReport, DimensionReport, FraudOverviewReport,
        HypothesisReport, RiskFactorReport, TemporalReport,
    },
    section::{write_banner, ReportContext, ReportSection},
};
use std::io::Write;
use std::path::Path;

pub struct ReportEngine {
    pub dataset: Dataset,
    pub config: ReportConfig,
    sections: Vec<Box<dyn ReportSection>>,
}

impl ReportEngine {
    pub fn new(dataset: Dataset, config: ReportConfig) -> Self {
        Self {
            dataset,
            config,
            sections: Vec::new(),
        }
    }

    /// Build a fully wired engine with every section registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(dataset: Dataset, config: ReportConfig) -> Self {
        let mut engine = ReportEngine::new(dataset, config);

        // EXECUTION ORDER: fixed, documented, never reordered.
        engine.register(Box::new(BasicInfoReport));
        engine.register(Box::new(FraudOverviewReport));
        engine.register(Box::new(DimensionReport));
        engine.register(Box::new(TemporalReport));
        engine.register(Box::new(RiskFactorReport));
        engine.register(Box::new(CurrencyReport));
        engine.register(Box::new(DeviceReport));
        engine.register(Box::new(HypothesisReport));
        engine
    }

    /// Load both input files and build the engine.
    pub fn load(
        transaction_path: &Path,
        currency_path: &Path,
        config: ReportConfig,
    ) -> EdaResult<Self> {
        let dataset = Dataset::load(transaction_path, currency_path)?;
        Ok(Self::build(dataset, config))
    }

    /// Build over a deterministic synthetic dataset.
    pub fn synthetic(rows: usize, seed: u64, config: ReportConfig) -> Self {
        Self::build(crate::synth::generate(rows, seed), config)
    }

    /// Register a section. Call in the documented execution order.
    pub fn register(&mut self, section: Box<dyn ReportSection>) {
        self.sections.push(section);
    }

    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.name()).collect()
    }

    pub fn context(&self) -> ReportContext<'_> {
        ReportContext {
            dataset: &self.dataset,
            config: &self.config,
        }
    }

    /// Run a single registered section by name. Returns false if unknown.
    pub fn run_section(&self, name: &str, out: &mut dyn Write) -> EdaResult<bool> {
        match self.sections.iter().find(|s| s.name() == name) {
            Some(section) => {
                self.render_section(section.as_ref(), out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run every section in order, framed by a banner and a footer.
    pub fn run(&self, out: &mut dyn Write) -> EdaResult<()> {
        writeln!(out, "FULL EXPLORATORY DATA ANALYSIS")?;
        writeln!(out, "{}", "=".repeat(80))?;

        for section in &self.sections {
            self.render_section(section.as_ref(), out)?;
        }

        writeln!(out, "\nANALYSIS COMPLETE")?;
        writeln!(out, "Recommendations are listed as hypotheses above")?;
        out.flush()?;
        log::info!("Report finished: {} sections", self.sections.len());
        Ok(())
    }

    fn render_section(&self, section: &dyn ReportSection, out: &mut dyn Write) -> EdaResult<()> {
        log::debug!("Rendering section {}", section.name());
        write_banner(out, section.title(), section.rule_width())?;
        section.render(&self.context(), out)
    }
}
