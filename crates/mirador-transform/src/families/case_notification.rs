use mirador_model::{PatientRecord, VariableCatalog};

use super::{VariableFamily, declare_dictionary_entry, fill_dictionary_entries};
use crate::context::AggregationContext;

pub struct CaseNotificationFamily;

impl VariableFamily for CaseNotificationFamily {
    fn name(&self) -> &'static str {
        "case notification"
    }

    fn declare(&self, ctx: &AggregationContext, catalog: &mut VariableCatalog) {
        for entry in ctx.case_notification.entries() {
            declare_dictionary_entry(entry, catalog);
        }
    }

    fn fill(&self, ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>) {
        fill_dictionary_entries(
            ctx.case_notification.entries().iter(),
            record.case_notification.as_ref(),
            row,
        );
    }
}
