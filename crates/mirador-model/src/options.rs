//! Configuration options for a single aggregation run.

use serde::{Deserialize, Serialize};

/// Marker written for empty cells unless overridden.
pub const DEFAULT_MISSING_TOKEN: &str = "\\N";

/// Genomic positions whose allele frequencies are exported by default.
pub const DEFAULT_ALLELE_POSITIONS: &[u64] = &[10218];

/// How viral load readings enter the derived statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViralLoadScale {
    /// Raw copies/mL.
    #[default]
    Linear,
    /// `log10(1 + copies/mL)`, applied to each reading before aggregation.
    Log10,
}

/// Options controlling the aggregation and export of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// Merge SNP, allele frequency and cluster data into the dataset.
    pub include_sequencing: bool,
    pub viral_load_scale: ViralLoadScale,
    /// Token substituted for empty cells in the data file.
    pub missing_token: String,
    /// Allele-frequency sites to keep; empty keeps every site.
    pub allele_positions: Vec<u64>,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            include_sequencing: false,
            viral_load_scale: ViralLoadScale::Linear,
            missing_token: DEFAULT_MISSING_TOKEN.to_string(),
            allele_positions: DEFAULT_ALLELE_POSITIONS.to_vec(),
        }
    }
}

impl AggregationOptions {
    #[must_use]
    pub fn with_sequencing(mut self, enable: bool) -> Self {
        self.include_sequencing = enable;
        self
    }

    #[must_use]
    pub fn with_log_viral_load(mut self, enable: bool) -> Self {
        self.viral_load_scale = if enable {
            ViralLoadScale::Log10
        } else {
            ViralLoadScale::Linear
        };
        self
    }

    #[must_use]
    pub fn with_missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = token.into();
        self
    }

    #[must_use]
    pub fn with_allele_positions(mut self, positions: Vec<u64>) -> Self {
        self.allele_positions = positions;
        self
    }

    pub fn log_viral_load(&self) -> bool {
        self.viral_load_scale == ViralLoadScale::Log10
    }
}
