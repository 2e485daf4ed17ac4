//! Metabolic panel reference table.
//!
//! Columns (after a header row): `0` analyte name, `1` display name,
//! `3` `"<range> <unit>"`, `5` value column in the panel table.

use std::path::Path;

use mirador_model::{AnalyteInfo, PanelReference, SourceRow, parse_sex_ranges};
use tracing::info;

use crate::csv_table::read_table;
use crate::error::{IngestError, Result};

pub fn load_panel_reference(path: &Path) -> Result<PanelReference> {
    let mut analytes = Vec::new();
    for numbered in read_table(path)? {
        let analyte = parse_analyte(&numbered.row)
            .map_err(|message| IngestError::reference(path, numbered.line, message))?;
        analytes.push(analyte);
    }
    info!(path = %path.display(), analytes = analytes.len(), "loaded panel reference");
    Ok(PanelReference::new(analytes))
}

fn parse_analyte(row: &SourceRow) -> std::result::Result<AnalyteInfo, String> {
    let name = row.cell(0);
    if name.is_empty() {
        return Err("missing analyte name".to_string());
    }
    let Some((ranges, unit)) = row.cell(3).split_once(' ') else {
        return Err(format!("expected \"<range> <unit>\", found {:?}", row.cell(3)));
    };
    let (female_range, male_range) = parse_sex_ranges(ranges).map_err(|err| err.to_string())?;
    let column = row
        .cell(5)
        .parse::<usize>()
        .map_err(|_| format!("value column {:?} is not an integer", row.cell(5)))?;
    Ok(AnalyteInfo {
        name: name.to_string(),
        title: format!("{} [{}]", row.cell(1), unit.trim()),
        female_range,
        male_range,
        column,
    })
}
