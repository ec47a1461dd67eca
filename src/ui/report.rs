use std::io::Write;

use anyhow::{Context, Result};

use crate::data::filter::RegionRegistry;
use crate::data::metrics::Metrics;
use crate::data::model::{Number, Row};

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

pub fn menu(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "Options:\n\
         1. Open CSV file\n\
         2. Select region\n\
         3. Show region data\n\
         4. Calculate metrics\n\
         5. Exit\n"
    )
    .context("writing menu")
}

/// `1. east; 2. west` on a single line.
pub fn region_list(out: &mut impl Write, regions: &RegionRegistry) -> Result<()> {
    let line = regions
        .iter()
        .map(|(id, value)| format!("{id}. {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    writeln!(out, "{line}\n").context("writing region list")
}

/// `1. id; 2. region; ...` column picker.
pub fn column_list(out: &mut impl Write, headers: &[String]) -> Result<()> {
    let line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}. {h}", i + 1))
        .collect::<Vec<_>>()
        .join("; ");
    writeln!(out, "{line}").context("writing column list")
}

// ---------------------------------------------------------------------------
// Region data
// ---------------------------------------------------------------------------

/// Headers followed by every row, left-aligned into columns.
pub fn rows(out: &mut impl Write, headers: &[String], rows: &[&Row]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    writeln!(out).context("writing region data")?;
    write_aligned(out, headers, &widths)?;
    for row in &cells {
        write_aligned(out, row, &widths)?;
    }
    writeln!(out, "\n{} rows\n", cells.len()).context("writing region data")
}

fn write_aligned(out: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end()).context("writing region data")
}

// ---------------------------------------------------------------------------
// Metrics report
// ---------------------------------------------------------------------------

pub fn metrics(out: &mut impl Write, m: &Metrics) -> Result<()> {
    let percentiles =
        serde_json::to_string(&m.percentiles).context("serializing percentile table")?;
    writeln!(
        out,
        "\n{} metrics for {}\n---\n\
         Max: {}\n\
         Min: {}\n\
         Mean: {}\n\
         Median: {}\n\
         Standard deviation: {}\n\
         Percentiles: {percentiles}\n",
        m.column,
        m.region,
        m.max,
        m.min,
        Number::Float(m.mean),
        m.median,
        Number::Float(m.standard_deviation)
    )
    .context("writing metrics report")
}
