//! Where each source lives inside the input directory.
//!
//! An optional `mirador.toml` in the input directory overrides any subset of
//! the default paths and the allele-frequency allow-list:
//!
//! ```toml
//! allele_positions = [10218, 10219]
//!
//! [sources]
//! master = "tables/master.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

pub const LAYOUT_FILENAME: &str = "mirador.toml";

/// Relative paths of the source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceLayout {
    pub ignore: PathBuf,
    pub master: PathBuf,
    pub demographics: PathBuf,
    pub demographics_dictionary: PathBuf,
    pub case_notification: PathBuf,
    pub case_dictionary: PathBuf,
    pub metabolic_panel: PathBuf,
    pub panel_reference: PathBuf,
    pub snp_calls: PathBuf,
    pub allele_frequencies: PathBuf,
    pub clusters: PathBuf,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            ignore: "idignore".into(),
            master: "sources/csv/MasterDataListandEBOVResults.csv".into(),
            demographics: "sources/csv/DemographicsFromSim_schieffelin.csv".into(),
            demographics_dictionary: "demo-dict.csv".into(),
            case_notification: "sources/csv/CaseNotification_schieffelin.csv".into(),
            case_dictionary: "case-dict.csv".into(),
            metabolic_panel: "sources/csv/FinalPiccoloData_schieffelin-FinalSummary1.csv".into(),
            panel_reference: "piccolo-expected.csv".into(),
            snp_calls: "sources/vcf/SNP-2014.vcf".into(),
            allele_frequencies: "sources/vcf/iSNV-all.vcf".into(),
            clusters: "sources/vcf/clusters.tsv".into(),
        }
    }
}

impl SourceLayout {
    /// Returns a copy with every relative path joined onto `base`.
    #[must_use]
    pub fn resolved(&self, base: &Path) -> Self {
        let join = |path: &PathBuf| base.join(path);
        Self {
            ignore: join(&self.ignore),
            master: join(&self.master),
            demographics: join(&self.demographics),
            demographics_dictionary: join(&self.demographics_dictionary),
            case_notification: join(&self.case_notification),
            case_dictionary: join(&self.case_dictionary),
            metabolic_panel: join(&self.metabolic_panel),
            panel_reference: join(&self.panel_reference),
            snp_calls: join(&self.snp_calls),
            allele_frequencies: join(&self.allele_frequencies),
            clusters: join(&self.clusters),
        }
    }
}

/// Contents of `mirador.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    pub sources: SourceLayout,
    pub allele_positions: Option<Vec<u64>>,
}

impl IngestConfig {
    /// Loads the layout for `input_dir`.
    ///
    /// An explicit `config` path must exist. Without one, `mirador.toml` in the
    /// input directory is used when present, otherwise the defaults.
    pub fn load(input_dir: &Path, config: Option<&Path>) -> Result<Self> {
        let path = match config {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = input_dir.join(LAYOUT_FILENAME);
                if !candidate.is_file() {
                    debug!(input_dir = %input_dir.display(), "no layout file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let contents = std::fs::read_to_string(&path).map_err(|e| IngestError::io(&path, e))?;
        let parsed: Self = toml::from_str(&contents).map_err(|e| IngestError::Layout {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "loaded source layout");
        Ok(parsed)
    }
}
