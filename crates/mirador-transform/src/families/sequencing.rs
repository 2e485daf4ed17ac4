use mirador_model::{
    AggregatedVariable, ClusterAssignment, PatientRecord, VariableCatalog, VariableType,
};

use super::VariableFamily;
use crate::context::AggregationContext;

const GROUP: &str = "Sequencing";

/// SNP calls, allele frequencies and cluster membership.
///
/// Patients without sequencing data keep their row with empty cells.
pub struct SequencingFamily;

impl VariableFamily for SequencingFamily {
    fn name(&self) -> &'static str {
        "sequencing"
    }

    fn declare(&self, ctx: &AggregationContext, catalog: &mut VariableCatalog) {
        let Some(sequencing) = ctx.active_sequencing() else {
            return;
        };
        for site in &sequencing.snps {
            catalog.declare(
                AggregatedVariable::new(
                    site.name.as_str(),
                    site.title.as_str(),
                    VariableType::Category,
                    GROUP,
                    "Viral SNPs",
                )
                .with_range("1:Yes;0:No"),
            );
        }
        for site in &sequencing.allele_frequencies {
            catalog.declare(AggregatedVariable::new(
                site.name.as_str(),
                site.title.as_str(),
                VariableType::Float,
                GROUP,
                "Allele Frequencies",
            ));
        }
        catalog.declare(
            AggregatedVariable::new("CLUST", "Cluster", VariableType::Category, GROUP, "Clustering")
                .with_range("1:Cluster 1;2:Cluster 2;3:Cluster 3"),
        );
        catalog.declare(AggregatedVariable::new(
            "MCLUST",
            "# mutations from cluster",
            VariableType::Int,
            GROUP,
            "Clustering",
        ));
        catalog.declare(
            AggregatedVariable::new(
                "SCLUST",
                "Sub-cluster",
                VariableType::Category,
                GROUP,
                "Clustering",
            )
            .with_range("1:Sub-cluster a;2:Sub-cluster b;3:Sub-cluster c"),
        );
        catalog.declare(AggregatedVariable::new(
            "MSCLUST",
            "# mutations from sub-cluster",
            VariableType::Int,
            GROUP,
            "Clustering",
        ));
    }

    fn fill(&self, ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>) {
        let Some(sequencing) = ctx.active_sequencing() else {
            return;
        };
        let id = record.id.as_str();
        for site in sequencing.snps.iter().chain(&sequencing.allele_frequencies) {
            row.push(site.value_for(id).to_string());
        }
        let empty = ClusterAssignment::default();
        let cluster = sequencing.clusters.get(id).unwrap_or(&empty);
        row.extend([
            cluster.cluster.clone(),
            cluster.cluster_mutations.clone(),
            cluster.sub_cluster.clone(),
            cluster.sub_cluster_mutations.clone(),
        ]);
    }
}
