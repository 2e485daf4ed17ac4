//! Variable families of the wide table.
//!
//! Each family declares its columns once (schema phase) and then writes exactly
//! that many cells for every patient (row phase). Empty cells mark missing
//! values; exporters substitute the missing token.

mod case_notification;
mod demographics;
mod panel;
mod qpcr;
mod sequencing;

pub use case_notification::CaseNotificationFamily;
pub use demographics::DemographicsFamily;
pub use panel::MetabolicPanelFamily;
pub use qpcr::ViralLoadFamily;
pub use sequencing::SequencingFamily;

use mirador_model::{
    AggregatedVariable, DictionaryEntry, PatientRecord, SourceRow, VariableCatalog,
};

use crate::context::AggregationContext;

pub trait VariableFamily {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Declares the family's columns in output order.
    fn declare(&self, ctx: &AggregationContext, catalog: &mut VariableCatalog);

    /// Appends one cell per declared column for `record`.
    fn fill(&self, ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>);
}

/// Families in column order. Sequencing is included only when enabled and loaded.
pub fn families_for(ctx: &AggregationContext) -> Vec<Box<dyn VariableFamily>> {
    let mut families: Vec<Box<dyn VariableFamily>> = vec![
        Box::new(DemographicsFamily),
        Box::new(CaseNotificationFamily),
        Box::new(MetabolicPanelFamily::new(ctx)),
        Box::new(ViralLoadFamily::new(ctx)),
    ];
    if ctx.active_sequencing().is_some() {
        families.push(Box::new(SequencingFamily));
    }
    families
}

pub(crate) fn declare_dictionary_entry(entry: &DictionaryEntry, catalog: &mut VariableCatalog) {
    let mut variable = AggregatedVariable::new(
        entry.name.as_str(),
        entry.alias.as_str(),
        entry.var_type,
        entry.group.as_str(),
        entry.table.as_str(),
    );
    if let Some(spec) = &entry.range_spec {
        variable = variable.with_range(spec.as_str());
    }
    catalog.declare(variable);
}

/// Resolves every dictionary entry against an optional source row.
pub(crate) fn fill_dictionary_entries<'a>(
    entries: impl Iterator<Item = &'a DictionaryEntry>,
    source: Option<&SourceRow>,
    row: &mut Vec<String>,
) {
    for entry in entries {
        let raw = source.map_or("", |source| source.cell(entry.position));
        row.push(entry.resolve(raw).to_string());
    }
}
