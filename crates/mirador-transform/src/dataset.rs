//! The aggregated wide table and its variable metadata.

use mirador_model::{AggregatedVariable, GroupHierarchy, VariableCatalog};

use crate::error::Result;
use crate::frame::MiradorFrame;

/// One output row. `cells` align with the catalog; empty means missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// Result of an aggregation run: variables plus one row per patient in store order.
#[derive(Debug, Clone)]
pub struct MiradorDataset {
    catalog: VariableCatalog,
    rows: Vec<PatientRow>,
}

impl MiradorDataset {
    pub fn new(catalog: VariableCatalog, rows: Vec<PatientRow>) -> Self {
        Self { catalog, rows }
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    pub fn variables(&self) -> &[AggregatedVariable] {
        self.catalog.variables()
    }

    pub fn hierarchy(&self) -> &GroupHierarchy {
        self.catalog.hierarchy()
    }

    pub fn rows(&self) -> &[PatientRow] {
        &self.rows
    }

    pub fn row(&self, patient_id: &str) -> Option<&PatientRow> {
        self.rows.iter().find(|row| row.id == patient_id)
    }

    /// Cell of `variable` for `patient_id`.
    pub fn value(&self, patient_id: &str, variable: &str) -> Option<&str> {
        let column = self.catalog.position(variable)?;
        self.row(patient_id)
            .and_then(|row| row.cells.get(column))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds the columnar frame handed to the exporters.
    pub fn to_frame(&self) -> Result<MiradorFrame> {
        MiradorFrame::from_dataset(self)
    }
}
