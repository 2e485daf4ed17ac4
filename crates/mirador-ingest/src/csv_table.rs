//! Positional row reading for the clinical source tables.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use mirador_model::SourceRow;

use crate::error::{IngestError, Result};

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// A source row together with its 1-based line in the file.
#[derive(Debug, Clone)]
pub struct NumberedRow {
    pub line: u64,
    pub row: SourceRow,
}

/// Reads every non-blank row of a delimited file.
///
/// Rows keep their own width; shorter rows read as empty past their end.
pub fn read_rows(path: &Path, delimiter: u8, skip_header: bool) -> Result<Vec<NumberedRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|err| IngestError::csv(path, err))?;
    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut first = true;
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|err| IngestError::csv(path, err))?;
        if !more {
            break;
        }
        if std::mem::take(&mut first) && skip_header {
            continue;
        }
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(NumberedRow {
            line,
            row: SourceRow::new(cells),
        });
    }
    Ok(rows)
}

/// Reads a comma-separated table whose first line is a header.
pub fn read_table(path: &Path) -> Result<Vec<NumberedRow>> {
    read_rows(path, b',', true)
}
