use mirador_model::{AggregatedVariable, PatientRecord, VariableCatalog, VariableType};

use super::VariableFamily;
use crate::context::AggregationContext;

const GROUP: &str = "Laboratory";

/// One date column plus one column per analyte for each panel slot.
pub struct MetabolicPanelFamily {
    slots: usize,
}

impl MetabolicPanelFamily {
    pub fn new(ctx: &AggregationContext) -> Self {
        Self {
            slots: ctx.store.max_panel_len(),
        }
    }
}

impl VariableFamily for MetabolicPanelFamily {
    fn name(&self) -> &'static str {
        "metabolic panel"
    }

    fn declare(&self, ctx: &AggregationContext, catalog: &mut VariableCatalog) {
        for slot in 1..=self.slots {
            let table = format!("Metabolic Panel Day {slot}");
            catalog.declare(AggregatedVariable::new(
                format!("DOPANEL_{slot}"),
                format!("Date of metabolic panel {slot}"),
                VariableType::Date,
                GROUP,
                table.as_str(),
            ));
            for analyte in &ctx.panel_reference.analytes {
                catalog.declare(AggregatedVariable::new(
                    format!("{}_{slot}", analyte.name),
                    format!("{} day {slot}", analyte.title),
                    VariableType::Float,
                    GROUP,
                    table.as_str(),
                ));
            }
        }
    }

    fn fill(&self, ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>) {
        let analytes = ctx.panel_reference.len();
        for panel in record.panels.iter().take(self.slots) {
            row.push(panel.date.clone());
            row.extend(
                (0..analytes).map(|idx| panel.values.get(idx).cloned().unwrap_or_default()),
            );
        }
        let missing = self.slots.saturating_sub(record.panels.len());
        row.extend(std::iter::repeat_n(String::new(), missing * (1 + analytes)));
    }
}
