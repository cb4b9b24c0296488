//! Rendering projection results for the terminal

use std::fmt::{self, Write};

use networth_core::model::{ProjectionResult, YearRecord};

/// How the report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table with a summary
    #[default]
    Table,
    /// Pretty-printed JSON of the full result
    Json,
}

pub fn render(result: &ProjectionResult, format: OutputFormat) -> color_eyre::Result<String> {
    let rendered = match format {
        OutputFormat::Table => render_table(result)?,
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    };
    Ok(rendered)
}

const MIN_COLUMN_WIDTH: usize = 14;

fn column_width(header: &str) -> usize {
    header.len().max(MIN_COLUMN_WIDTH)
}

fn headers(first: &YearRecord) -> Vec<String> {
    let mut headers = vec!["Start".to_string()];
    headers.extend(first.values.iter().map(|v| v.name.clone()));
    headers.push("Total".to_string());
    headers
}

fn row(record: &YearRecord) -> Vec<f64> {
    let mut row = vec![record.starting_value];
    row.extend(record.values.iter().map(|v| v.value));
    row.push(record.total_value);
    row
}

/// One row per year, one column per account
pub fn render_table(result: &ProjectionResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_table(&mut out, result)?;
    Ok(out)
}

/// Write the table to any `fmt::Write` sink
pub fn write_table(out: &mut impl Write, result: &ProjectionResult) -> fmt::Result {
    if let Some(first) = result.year_records.first() {
        let headers = headers(first);
        let widths: Vec<usize> = headers.iter().map(|h| column_width(h)).collect();

        write!(out, "{:>4}", "Year")?;
        for (header, width) in headers.iter().zip(&widths) {
            write!(out, "  {header:>width$}")?;
        }
        writeln!(out)?;

        for record in &result.year_records {
            write!(out, "{:>4}", record.year)?;
            for (value, width) in row(record).iter().zip(&widths) {
                write!(out, "  {value:>width$.2}")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Final value:        {:.2}", result.final_value)?;
    writeln!(out, "Total contributed:  {:.2}", result.total_contributed)?;
    writeln!(out, "Total growth:       {:.2}", result.total_growth)?;

    if !result.diagnostics.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for diagnostic in &result.diagnostics {
            writeln!(out, "  - {diagnostic}")?;
        }
    }

    Ok(())
}
