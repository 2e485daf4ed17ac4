use mirador_model::{AggregatedVariable, PatientRecord, VariableCatalog, VariableType};

use super::{VariableFamily, declare_dictionary_entry, fill_dictionary_entries};
use crate::context::AggregationContext;

const GROUP: &str = "Demographics";
const TABLE: &str = "Basic Information";

/// `GID` and `DIAG` followed by the demographics dictionary.
pub struct DemographicsFamily;

impl VariableFamily for DemographicsFamily {
    fn name(&self) -> &'static str {
        "demographics"
    }

    fn declare(&self, ctx: &AggregationContext, catalog: &mut VariableCatalog) {
        catalog.declare(
            AggregatedVariable::new("GID", "Patient ID", VariableType::String, GROUP, TABLE)
                .with_type_label("String")
                .with_range("label"),
        );
        catalog.declare(
            AggregatedVariable::new("DIAG", "Diagnosis", VariableType::Category, GROUP, TABLE)
                .with_range("1:Positive;0:Negative"),
        );
        for entry in ctx.demographics.entries() {
            declare_dictionary_entry(entry, catalog);
        }
    }

    fn fill(&self, ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>) {
        row.push(record.id.clone());
        row.push(record.group.diag_code().to_string());
        fill_dictionary_entries(
            ctx.demographics.entries().iter(),
            record.demographics.as_ref(),
            row,
        );
    }
}
