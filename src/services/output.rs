use crate::domain::report::{Cell, Report};
use crate::error::TaggerError;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const GUTTER: &str = "  ";

fn cell_text(cell: &Cell) -> &str {
    cell.as_deref().unwrap_or("")
}

fn column_widths(report: &Report) -> Vec<usize> {
    let mut widths: Vec<usize> = report.header().iter().map(|h| h.chars().count()).collect();
    for row in &report.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell_text(cell).chars().count());
        }
    }
    widths
}

fn write_line<'a>(
    out: &mut impl Write,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(text, width)| format!("{:<width$}", text, width = width))
        .collect::<Vec<_>>()
        .join(GUTTER);
    writeln!(out, "{}", line.trim_end())
}

/// Aligned plain-text table: header, dashed rule, one line per row.
pub fn render_table(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let widths = column_widths(report);
    write_line(out, report.header().into_iter(), &widths)?;
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join(GUTTER);
    writeln!(out, "{}", rule)?;
    for row in &report.rows {
        write_line(out, row.iter().map(cell_text), &widths)?;
    }
    Ok(())
}

pub fn write_csv_to<W: Write>(report: &Report, sink: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(sink);
    writer.write_record(report.header())?;
    for row in &report.rows {
        writer.write_record(row.iter().map(cell_text))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(report: &Report, path: &Path) -> Result<(), TaggerError> {
    let wrap = |source| TaggerError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| wrap(e.into()))?;
    write_csv_to(report, file).map_err(wrap)
}

/// CSV to `path` when given, otherwise the table on stdout.
pub fn emit(report: &Report, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            write_csv(report, path)?;
            tracing::info!(path = %path.display(), rows = report.rows.len(), "wrote report");
        }
        None => render_table(report, &mut io::stdout().lock())?,
    }
    Ok(())
}
