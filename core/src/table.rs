//! Plain-text table rendering for report output.

use crate::aggregate::GroupStats;
use std::fmt::Display;
use std::io::{self, Write};

/// A column of a group-by table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TotalTrans,
    FraudTrans,
    FraudRate,
    TotalAmount,
    AvgAmount,
    UniqueCustomers,
    FraudRatePct,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Self::TotalTrans => "total_trans",
            Self::FraudTrans => "fraud_trans",
            Self::FraudRate => "fraud_rate",
            Self::TotalAmount => "total_amount",
            Self::AvgAmount => "avg_amount",
            Self::UniqueCustomers => "unique_customers",
            Self::FraudRatePct => "fraud_rate_pct",
        }
    }

    fn cell<K>(&self, group: &GroupStats<K>) -> String {
        match self {
            Self::TotalTrans => group.count.to_string(),
            Self::FraudTrans => group.fraud_count.to_string(),
            Self::FraudRate => format!("{:.4}", group.fraud_rate()),
            Self::TotalAmount => format!("{:.2}", group.amount_sum),
            Self::AvgAmount => format!("{:.2}", group.mean_amount()),
            Self::UniqueCustomers => group.distinct_customers.to_string(),
            Self::FraudRatePct => format!("{:.2}", group.fraud_rate() * 100.0),
        }
    }
}

/// Count/rate columns shared by most sections.
pub const RATE_COLUMNS: [Column; 4] = [
    Column::TotalTrans,
    Column::FraudTrans,
    Column::FraudRate,
    Column::FraudRatePct,
];

#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Table with one row per group, keyed by `key_header`.
    pub fn from_groups<K: Display>(
        key_header: &str,
        groups: &[GroupStats<K>],
        columns: &[Column],
    ) -> Self {
        let mut table = Self::new(
            std::iter::once(key_header.to_string())
                .chain(columns.iter().map(|c| c.header().to_string())),
        );
        for group in groups {
            let mut row = vec![group.key.to_string()];
            row.extend(columns.iter().map(|c| c.cell(group)));
            table.push_row(row);
        }
        table
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// First column left-aligned, the rest right-aligned.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|i| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .chain(std::iter::once(&self.headers[i]))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_line(out, &self.headers, &widths)?;
        for row in &self.rows {
            write_line(out, row, &widths)?;
        }
        if self.rows.is_empty() {
            writeln!(out, "(no rows)")?;
        }
        Ok(())
    }
}

fn write_line(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        if i == 0 {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        } else {
            line.push_str("  ");
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// Format with `,` thousands separators, e.g. `1234567.891` -> `1,234,567.89`.
pub fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
