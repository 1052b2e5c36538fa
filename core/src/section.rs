//! Report section trait.
//!
//! RULE: every section implements ReportSection.
//! Sections read the dataset and config only; they never depend on
//! another section's output, so running order never changes results.
//! Execution order is fixed and documented in engine.rs.

use crate::{config::ReportConfig, dataset::Dataset, error::EdaResult};
use std::io::Write;

/// Width of the `=` rule above and below section titles.
pub const RULE_WIDTH: usize = 60;

/// Everything a section may read.
#[derive(Clone, Copy)]
pub struct ReportContext<'a> {
    pub dataset: &'a Dataset,
    pub config: &'a ReportConfig,
}

/// The contract every report section must fulfill.
pub trait ReportSection {
    /// Unique stable name for this section.
    fn name(&self) -> &'static str;

    /// Title printed in the section banner.
    fn title(&self) -> &'static str;

    /// Width of the banner rule. Most sections use the default.
    fn rule_width(&self) -> usize {
        RULE_WIDTH
    }

    /// Compute the section and write it below its banner.
    fn render(&self, ctx: &ReportContext<'_>, out: &mut dyn Write) -> EdaResult<()>;
}

pub fn write_banner(out: &mut dyn Write, title: &str, width: usize) -> std::io::Result<()> {
    let rule = "=".repeat(width);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}
