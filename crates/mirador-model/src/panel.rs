//! Metabolic panel reference: analytes, units and sex-specific normal ranges.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub low: f64,
    pub high: f64,
}

impl FromStr for NormalRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ModelError::MalformedRange(s.to_string());
        let (low, high) = s.trim().split_once('-').ok_or_else(malformed)?;
        let low = low.trim().parse::<f64>().map_err(|_| malformed())?;
        let high = high.trim().parse::<f64>().map_err(|_| malformed())?;
        Ok(Self { low, high })
    }
}

/// Parses `low-high` (shared) or `female:male` range specs.
///
/// Returns `(female, male)`.
pub fn parse_sex_ranges(spec: &str) -> Result<(NormalRange, NormalRange)> {
    match spec.split_once(':') {
        Some((female, male)) => Ok((female.parse()?, male.parse()?)),
        None => {
            let range: NormalRange = spec.parse()?;
            Ok((range, range))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyteInfo {
    /// Short name used as the variable stem (e.g. `ALB`).
    pub name: String,
    /// Display title including the unit, e.g. `Albumin [g/dL]`.
    pub title: String,
    pub female_range: NormalRange,
    pub male_range: NormalRange,
    /// Column of the analyte in the metabolic panel table.
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelReference {
    pub analytes: Vec<AnalyteInfo>,
}

impl PanelReference {
    pub fn new(analytes: Vec<AnalyteInfo>) -> Self {
        Self { analytes }
    }

    pub fn len(&self) -> usize {
        self.analytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analytes.is_empty()
    }
}
