//! Patient records and the in-memory store every loader writes into.
//!
//! The master table is authoritative: records are created only by the master
//! loader, and every other source can only attach data to an existing record.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Disease status recorded in the master table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseGroup {
    Positive,
    Negative,
}

impl DiseaseGroup {
    /// Master-table group value marking a confirmed case.
    pub const POSITIVE_LABEL: &'static str = "Epos";

    /// Classifies a master-table group cell. Empty cells yield `None`.
    pub fn from_master_cell(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.eq_ignore_ascii_case(Self::POSITIVE_LABEL) {
            Some(Self::Positive)
        } else {
            Some(Self::Negative)
        }
    }

    /// Code emitted in the `DIAG` column.
    pub fn diag_code(self) -> &'static str {
        match self {
            Self::Positive => "1",
            Self::Negative => "0",
        }
    }
}

/// Clinical outcome recorded in the demographics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Died,
    Discharged,
    Unknown,
}

impl Outcome {
    pub fn from_cell(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed {
            "Died" => Self::Died,
            "Discharged" => Self::Discharged,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Died => "Died",
            Self::Discharged => "Discharged",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A raw source row whose cells are addressed by dictionary positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow(Vec<String>);

impl SourceRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Cell at `position`, or empty when the row is shorter.
    pub fn cell(&self, position: usize) -> &str {
        self.0.get(position).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One viral load (qPCR) measurement, in master-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QpcrReading {
    pub sample_index: String,
    pub date: String,
    /// Raw viral load cell; empty when the sample was not quantified.
    pub value: String,
}

impl QpcrReading {
    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// One metabolic panel, with analyte values aligned to the panel reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelReading {
    pub date: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub group: DiseaseGroup,
    pub outcome: Option<Outcome>,
    pub sex: Option<String>,
    pub demographics: Option<SourceRow>,
    pub case_notification: Option<SourceRow>,
    pub qpcr: Vec<QpcrReading>,
    pub panels: Vec<PanelReading>,
}

impl PatientRecord {
    pub fn new(id: impl Into<String>, group: DiseaseGroup) -> Self {
        Self {
            id: id.into(),
            group,
            outcome: None,
            sex: None,
            demographics: None,
            case_notification: None,
            qpcr: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// True when at least one qPCR reading carries a value.
    pub fn has_viral_load(&self) -> bool {
        self.qpcr.iter().any(QpcrReading::has_value)
    }
}

/// Patient records keyed by identifier, iterated in master-table order.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    records: Vec<PatientRecord>,
    index: HashMap<String, usize>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `id`, creating it with `group` on first sight.
    ///
    /// The group of an existing record is never changed.
    pub fn get_or_insert(&mut self, id: &str, group: DiseaseGroup) -> &mut PatientRecord {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.records.len();
                self.records.push(PatientRecord::new(id, group));
                self.index.insert(id.to_string(), idx);
                idx
            }
        };
        &mut self.records[idx]
    }

    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PatientRecord> {
        self.index.get(id).map(|&idx| &mut self.records[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter()
    }

    /// Longest qPCR series across the cohort.
    pub fn max_qpcr_len(&self) -> usize {
        self.records.iter().map(|r| r.qpcr.len()).max().unwrap_or(0)
    }

    /// Longest metabolic panel series across the cohort.
    pub fn max_panel_len(&self) -> usize {
        self.records.iter().map(|r| r.panels.len()).max().unwrap_or(0)
    }
}
