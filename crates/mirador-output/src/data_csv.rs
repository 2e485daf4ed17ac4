//! Wide data file: one header row of variable names, one row per patient.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use mirador_transform::MiradorFrame;

use crate::common::ensure_parent_dir;

/// Writes the frame, substituting `missing` for every empty cell.
pub fn write_data_csv(path: &Path, frame: &MiradorFrame, missing: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer =
        Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(frame.column_names())
        .with_context(|| format!("write header: {}", path.display()))?;
    for row_idx in 0..frame.record_count() {
        let row: Vec<String> = frame
            .row_values(row_idx)
            .into_iter()
            .map(|value| {
                if value.is_empty() {
                    missing.to_string()
                } else {
                    value
                }
            })
            .collect();
        writer
            .write_record(&row)
            .with_context(|| format!("write row {}: {}", row_idx + 1, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
