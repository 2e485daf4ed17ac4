//! Viral sequencing sources: SNP calls, allele frequencies and clusters.
//!
//! VCF files are read with noodles. Sample names come from the header and look
//! like `prefix_year_G3686[.suffix]`; a `.` sample value counts as absent.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use mirador_model::{ClusterAssignment, SiteValues, normalize_patient_id};
use noodles_vcf::{
    self as vcf,
    variant::record::samples::{Series as _, series::Value},
};
use tracing::{info, warn};

use crate::csv_table::read_rows;
use crate::error::{IngestError, Result};

const CLUSTER_ID_COLUMN: usize = 0;
const CLUSTER_CODE_COLUMN: usize = 2;

/// One VCF record reduced to its position and a single FORMAT field.
#[derive(Debug, Clone)]
struct SampleColumn {
    position: u64,
    values: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default)]
struct VcfColumns {
    samples: Vec<String>,
    records: Vec<SampleColumn>,
}

/// Reads every record of `path`, keeping the `key` FORMAT field per sample.
fn read_format_field(path: &Path, key: &str) -> Result<VcfColumns> {
    let mut reader = vcf::io::reader::Builder::default()
        .build_from_path(path)
        .map_err(|err| IngestError::io(path, err))?;
    let header = reader
        .read_header()
        .map_err(|err| IngestError::vcf_header(path, err))?;
    let samples: Vec<String> = header.sample_names().iter().cloned().collect();

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record_no = idx as u64 + 1;
        let record = result.map_err(|err| IngestError::vcf_record(path, record_no, err))?;
        let position = match record.variant_start() {
            Some(Ok(position)) => usize::from(position) as u64,
            Some(Err(err)) => return Err(IngestError::vcf_record(path, record_no, err)),
            None => return Err(IngestError::vcf_record(path, record_no, "missing POS")),
        };

        let record_samples = record.samples();
        let series = record_samples.select(key);
        let mut values = Vec::with_capacity(samples.len());
        for sample in 0..samples.len() {
            let value = match series.as_ref().and_then(|series| series.get(&header, sample)) {
                Some(Some(value)) => {
                    let value =
                        value.map_err(|err| IngestError::vcf_record(path, record_no, err))?;
                    render_value(value)
                        .map_err(|err| IngestError::vcf_record(path, record_no, err))?
                }
                _ => None,
            };
            values.push(value);
        }
        records.push(SampleColumn { position, values });
    }
    Ok(VcfColumns { samples, records })
}

/// Renders a sample value as text. Genotypes render as `/`-joined allele
/// indices; array values are not used by any source and read as absent.
fn render_value(value: Value<'_>) -> io::Result<Option<String>> {
    let text = match value {
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Character(c) => c.to_string(),
        Value::String(s) => s.to_string(),
        Value::Genotype(genotype) => {
            let alleles = genotype
                .iter()
                .map(|allele| allele.map(|(position, _)| position))
                .collect::<io::Result<Vec<Option<usize>>>>()?;
            if alleles.iter().all(Option::is_none) {
                return Ok(None);
            }
            alleles
                .iter()
                .map(|allele| allele.map_or_else(|| ".".to_string(), |idx| idx.to_string()))
                .collect::<Vec<_>>()
                .join("/")
        }
        Value::Array(_) => return Ok(None),
    };
    Ok(Some(text).filter(|text| text != "."))
}

/// Extracts and normalizes the patient identifier embedded in a sample name.
///
/// The identifier is the third `_`-separated token; with `strip_suffix` any
/// `.suffix` is dropped first.
pub fn sample_patient_id(sample: &str, strip_suffix: bool) -> String {
    let token = match sample.split('_').nth(2) {
        Some(token) => token,
        None => {
            warn!(sample = %sample, "sample name has no patient ID token");
            sample
        }
    };
    let token = if strip_suffix {
        token.split('.').next().unwrap_or(token)
    } else {
        token
    };
    normalize_patient_id(token)
}

/// Reads per-site SNP presence. Genotype `1` marks presence.
pub fn load_snp_calls(path: &Path) -> Result<Vec<SiteValues>> {
    let vcf = read_format_field(path, "GT")?;
    let sites: Vec<SiteValues> = vcf
        .records
        .iter()
        .map(|record| {
            let mut site = SiteValues::snp(record.position);
            for (sample, call) in vcf.samples.iter().zip(&record.values) {
                let call = if call.as_deref() == Some("1") { "1" } else { "0" };
                site.values
                    .insert(sample_patient_id(sample, false), call.to_string());
            }
            site
        })
        .collect();
    info!(path = %path.display(), sites = sites.len(), samples = vcf.samples.len(), "loaded SNP calls");
    Ok(sites)
}

/// Reads allele frequencies, keeping only `positions` (all sites when empty).
pub fn load_allele_frequencies(path: &Path, positions: &[u64]) -> Result<Vec<SiteValues>> {
    let vcf = read_format_field(path, "AF")?;
    let sites: Vec<SiteValues> = vcf
        .records
        .iter()
        .filter(|record| positions.is_empty() || positions.contains(&record.position))
        .map(|record| {
            let mut site = SiteValues::allele_frequency(record.position);
            for (sample, value) in vcf.samples.iter().zip(&record.values) {
                site.values.insert(
                    sample_patient_id(sample, true),
                    value.clone().unwrap_or_default(),
                );
            }
            site
        })
        .collect();
    info!(path = %path.display(), sites = sites.len(), "loaded allele frequencies");
    Ok(sites)
}

/// Reads the tab-separated cluster table (header skipped).
pub fn load_clusters(path: &Path) -> Result<HashMap<String, ClusterAssignment>> {
    let mut clusters = HashMap::new();
    for numbered in read_rows(path, b'\t', true)? {
        let row = &numbered.row;
        let code = row.cell(CLUSTER_CODE_COLUMN);
        if code.is_empty() {
            warn!(line = numbered.line, "cluster row without compound code");
            continue;
        }
        let id = normalize_patient_id(row.cell(CLUSTER_ID_COLUMN));
        clusters.insert(id, ClusterAssignment::parse(code));
    }
    info!(path = %path.display(), patients = clusters.len(), "loaded cluster assignments");
    Ok(clusters)
}
