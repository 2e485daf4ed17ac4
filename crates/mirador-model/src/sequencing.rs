//! Viral genome data: per-site calls, allele frequencies and cluster assignments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Values of one genomic site, keyed by normalized patient identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteValues {
    pub position: u64,
    pub name: String,
    pub title: String,
    pub values: HashMap<String, String>,
}

impl SiteValues {
    pub fn snp(position: u64) -> Self {
        Self {
            position,
            name: format!("SNP{position}"),
            title: format!("SNP @{position}"),
            values: HashMap::new(),
        }
    }

    pub fn allele_frequency(position: u64) -> Self {
        Self {
            position,
            name: format!("AF{position}"),
            title: format!("Allele Frequency @{position}"),
            values: HashMap::new(),
        }
    }

    pub fn value_for(&self, patient_id: &str) -> &str {
        self.values.get(patient_id).map(String::as_str).unwrap_or("")
    }
}

/// Cluster membership decoded from a compound code such as `2.13`.
///
/// The part before the dot is the cluster; the characters after it are the
/// mutation count from the cluster, the sub-cluster and the mutation count
/// from the sub-cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub cluster: String,
    pub cluster_mutations: String,
    pub sub_cluster: String,
    pub sub_cluster_mutations: String,
}

impl ClusterAssignment {
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let (cluster, extra) = code.split_once('.').unwrap_or((code, ""));
        let mut chars = extra.chars();
        let cluster_mutations = chars.next().map(String::from).unwrap_or_default();
        let (sub_cluster, sub_cluster_mutations) = match chars.next() {
            Some(sub) => (
                sub.to_string(),
                chars.next().map_or_else(|| "0".to_string(), String::from),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            cluster: cluster.to_string(),
            cluster_mutations,
            sub_cluster,
            sub_cluster_mutations,
        }
    }
}

/// Everything loaded from the sequencing sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequencingData {
    pub snps: Vec<SiteValues>,
    pub allele_frequencies: Vec<SiteValues>,
    pub clusters: HashMap<String, ClusterAssignment>,
}

impl SequencingData {
    /// Number of patients with at least one sequencing value.
    pub fn sequenced_patients(&self) -> usize {
        let mut ids: Vec<&str> = self
            .snps
            .iter()
            .chain(self.allele_frequencies.iter())
            .flat_map(|site| site.values.keys().map(String::as_str))
            .chain(self.clusters.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
