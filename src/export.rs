use std::fmt::Write as _;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::{color_for, to_hex, year_class};
use crate::data::aggregate::{CategoryCounts, YearCategoryMatrix};
use crate::data::model::{Record, CATEGORY_COLUMN, TASK_COLUMN, YEAR_COLUMN};

pub const PRINT_TITLE: &str = "Piano di Lavoro Dottorato";

// ---------------------------------------------------------------------------
// Print view (HTML)
// ---------------------------------------------------------------------------

const PRINT_CSS: &str = r#"
    @page { size: A4; margin: 1.5cm; }
    body {
        font-family: "Helvetica Neue", Arial, sans-serif;
        line-height: 1.5;
        color: #000;
        font-size: 12pt;
        margin: 0;
        padding: 0;
    }
    table { width: 100%; border-collapse: collapse; margin-top: 20pt; }
    th, td { padding: 10pt; border: 1pt solid #ddd; }
    th {
        background: #2c3e50 !important;
        color: white !important;
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
    }
    .first-year, .second-year, .third-year {
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
    }
    .first-year { background-color: #e8f4fc !important; }
    .second-year { background-color: #e8f8f5 !important; }
    .third-year { background-color: #f9f2e8 !important; }
    h1 { text-align: center; font-size: 18pt; margin-bottom: 20pt; padding-top: 20pt; }
"#;

/// Render the records as a standalone, print-ready HTML page.
pub fn print_html(records: &[Record]) -> String {
    let mut rows = String::new();
    for r in records {
        let class = year_class(&r.year)
            .map(|c| format!(" class=\"{c}\""))
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(
            rows,
            "      <tr{class}><td class=\"year-cell\">{}</td><td>{}</td><td><span style=\"color: {}\">●</span> {}</td></tr>",
            escape_html(&r.year),
            escape_html(&r.task),
            to_hex(color_for(&r.category)),
            escape_html(&r.category),
        );
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>{PRINT_TITLE}</title>\n  <style>{PRINT_CSS}  </style>\n</head>\n<body>\n  <h1>{PRINT_TITLE}</h1>\n  <table class=\"printable-table\">\n    <thead><tr><th>{YEAR_COLUMN}</th><th>{TASK_COLUMN}</th><th>{CATEGORY_COLUMN}</th></tr></thead>\n    <tbody>\n{rows}    </tbody>\n  </table>\n  <script>window.onload = function () {{ window.print(); }};</script>\n</body>\n</html>\n"
    )
}

pub fn write_print_view(path: &Path, records: &[Record]) -> Result<()> {
    std::fs::write(path, print_html(records))
        .with_context(|| format!("writing print view to {}", path.display()))?;
    log::info!("Wrote print view ({} rows) to {}", records.len(), path.display());
    Ok(())
}

/// `file://` URL for a saved print view, percent-encoded.
pub fn file_url(path: &Path) -> Result<String> {
    url::Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| anyhow::anyhow!("{} is not an absolute path", path.display()))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write records as CSV. Unlike the input parser, fields are quoted when
/// needed, so commas in task text survive.
pub fn write_csv<W: io::Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([YEAR_COLUMN, TASK_COLUMN, CATEGORY_COLUMN])
        .context("writing CSV header")?;
    for (row_no, r) in records.iter().enumerate() {
        wtr.write_record([&r.year, &r.task, &r.category])
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_csv(path: &Path, records: &[Record]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, records)?;
    log::info!("Exported {} rows to {}", records.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Chart series (JSON)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SeriesExport<'a> {
    by_category: &'a CategoryCounts,
    by_year_and_category: &'a YearCategoryMatrix,
}

pub fn series_json(counts: &CategoryCounts, matrix: &YearCategoryMatrix) -> Result<String> {
    serde_json::to_string_pretty(&SeriesExport {
        by_category: counts,
        by_year_and_category: matrix,
    })
    .context("serializing chart series")
}

pub fn export_series(path: &Path, counts: &CategoryCounts, matrix: &YearCategoryMatrix) -> Result<()> {
    let json = series_json(counts, matrix)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported chart series to {}", path.display());
    Ok(())
}
