//! Loaders for the clinical tables.
//!
//! The master table creates patient records; every other loader only attaches
//! data to records that already exist and silently skips unknown identifiers.

use std::path::Path;

use mirador_model::{
    DiseaseGroup, Outcome, PanelReading, PanelReference, PatientStore, QpcrReading,
};
use tracing::{debug, info, warn};

use crate::csv_table::read_table;
use crate::error::Result;
use crate::ignore::IgnoreList;

/// Column positions of the master table.
pub mod master_columns {
    pub const ID: usize = 1;
    pub const SAMPLE_INDEX: usize = 3;
    pub const DATE: usize = 5;
    pub const VIRAL_LOAD: usize = 8;
    pub const GROUP: usize = 10;
}

/// Column positions of the demographics table.
pub mod demographics_columns {
    pub const ID: usize = 1;
    pub const SEX: usize = 3;
    pub const OUTCOME: usize = 7;
}

pub const CASE_ID_COLUMN: usize = 0;

/// Column positions of the metabolic panel table.
pub mod panel_columns {
    pub const ID: usize = 3;
    pub const DATE: usize = 6;
}

/// Row counts reported by a loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read (header and blank rows excluded).
    pub rows: usize,
    /// Rows that created or updated a patient record.
    pub attached: usize,
    /// Rows skipped because of the ignore list, an unknown id or missing keys.
    pub skipped: usize,
}

impl LoadStats {
    fn attach(&mut self) {
        self.rows += 1;
        self.attached += 1;
    }

    fn skip(&mut self) {
        self.rows += 1;
        self.skipped += 1;
    }
}

/// Reads the master table. Each row is one qPCR reading.
///
/// Rows with an ignored identifier or an empty disease group are dropped.
pub fn load_master(path: &Path, ignore: &IgnoreList, store: &mut PatientStore) -> Result<LoadStats> {
    use master_columns as col;

    let mut stats = LoadStats::default();
    for numbered in read_table(path)? {
        let row = &numbered.row;
        let id = row.cell(col::ID);
        if id.is_empty() {
            warn!(line = numbered.line, "master row without patient ID");
            stats.skip();
            continue;
        }
        if ignore.contains(id) {
            debug!(patient_id = %id, "patient ignored");
            stats.skip();
            continue;
        }
        let Some(group) = DiseaseGroup::from_master_cell(row.cell(col::GROUP)) else {
            stats.skip();
            continue;
        };
        let record = store.get_or_insert(id, group);
        record.qpcr.push(QpcrReading {
            sample_index: row.cell(col::SAMPLE_INDEX).to_string(),
            date: row.cell(col::DATE).to_string(),
            value: row.cell(col::VIRAL_LOAD).to_string(),
        });
        stats.attach();
    }
    info!(
        path = %path.display(),
        rows = stats.rows,
        patients = store.len(),
        "loaded master table"
    );
    Ok(stats)
}

/// Attaches demographics rows. The first row per patient wins.
pub fn load_demographics(path: &Path, store: &mut PatientStore) -> Result<LoadStats> {
    use demographics_columns as col;

    let mut stats = LoadStats::default();
    for numbered in read_table(path)? {
        let row = numbered.row;
        let id = row.cell(col::ID).to_string();
        let Some(record) = store.get_mut(&id) else {
            stats.skip();
            continue;
        };
        if record.demographics.is_some() {
            warn!(patient_id = %id, line = numbered.line, "duplicate demographics row ignored");
            stats.skip();
            continue;
        }
        let sex = row.cell(col::SEX);
        record.sex = (!sex.is_empty()).then(|| sex.to_string());
        record.outcome = Outcome::from_cell(row.cell(col::OUTCOME));
        record.demographics = Some(row);
        stats.attach();
    }
    info!(path = %path.display(), rows = stats.rows, attached = stats.attached, "loaded demographics");
    Ok(stats)
}

/// Attaches case notification rows. The first row per patient wins.
pub fn load_case_notifications(path: &Path, store: &mut PatientStore) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for numbered in read_table(path)? {
        let row = numbered.row;
        let id = row.cell(CASE_ID_COLUMN).to_string();
        let Some(record) = store.get_mut(&id) else {
            stats.skip();
            continue;
        };
        if record.case_notification.is_some() {
            warn!(patient_id = %id, line = numbered.line, "duplicate case notification ignored");
            stats.skip();
            continue;
        }
        record.case_notification = Some(row);
        stats.attach();
    }
    info!(path = %path.display(), rows = stats.rows, attached = stats.attached, "loaded case notifications");
    Ok(stats)
}

/// Appends one panel per row, keeping only the analyte columns of `reference`.
pub fn load_metabolic_panels(
    path: &Path,
    reference: &PanelReference,
    store: &mut PatientStore,
) -> Result<LoadStats> {
    use panel_columns as col;

    let mut stats = LoadStats::default();
    for numbered in read_table(path)? {
        let row = &numbered.row;
        let Some(record) = store.get_mut(row.cell(col::ID)) else {
            stats.skip();
            continue;
        };
        record.panels.push(PanelReading {
            date: row.cell(col::DATE).to_string(),
            values: reference
                .analytes
                .iter()
                .map(|analyte| row.cell(analyte.column).to_string())
                .collect(),
        });
        stats.attach();
    }
    info!(path = %path.display(), rows = stats.rows, attached = stats.attached, "loaded metabolic panels");
    Ok(stats)
}
