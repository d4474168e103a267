//! Writing extraction records to the output table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use certx_core::ExtractionRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One row per document, header from the field set columns
    Csv,
    /// Array of column-to-value objects
    Json,
}

/// Write all records to `path`, replacing any existing file.
///
/// Every record of a run comes from the same field set, so the first
/// record's columns are the header.
pub fn write_records(path: &Path, records: &[ExtractionRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(path, records),
        OutputFormat::Json => write_json(path, records),
    }
}

fn write_csv(path: &Path, records: &[ExtractionRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    if let Some(first) = records.first() {
        wtr.write_record(first.headers())?;
    }
    for record in records {
        wtr.write_record(record.row())?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json(path: &Path, records: &[ExtractionRecord]) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Human-readable dump of one record, one `column: value` line per field.
pub fn format_record_text(record: &ExtractionRecord) -> String {
    let width = record
        .fields()
        .iter()
        .map(|f| f.column.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", record.source_file()));
    for field in record.fields() {
        out.push_str(&format!("{:width$}  {}\n", field.column, field.value, width = width));
    }
    out
}
