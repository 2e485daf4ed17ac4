use mirador_model::{
    AggregatedVariable, PatientRecord, VariableCatalog, VariableType, ViralLoadScale,
};
use tracing::warn;

use super::VariableFamily;
use crate::context::AggregationContext;
use crate::numeric::{ViralLoadStats, format_numeric, parse_numeric, scale_viral_load};

const GROUP: &str = "Laboratory";
const SUMMARY_TABLE: &str = "Viral Load (qPCR) summary";
const LOG_SUFFIX: &str = " (log units)";

/// Viral load summary statistics followed by one date/value pair per reading slot.
///
/// Readings are scaled before they are aggregated, so in log mode the minimum
/// is `min(log10(1 + v))`.
pub struct ViralLoadFamily {
    slots: usize,
    scale: ViralLoadScale,
}

impl ViralLoadFamily {
    pub fn new(ctx: &AggregationContext) -> Self {
        Self {
            slots: ctx.store.max_qpcr_len(),
            scale: ctx.options.viral_load_scale,
        }
    }

    fn suffix(&self) -> &'static str {
        match self.scale {
            ViralLoadScale::Linear => "",
            ViralLoadScale::Log10 => LOG_SUFFIX,
        }
    }

    /// Scaled value per reading, `None` where the reading is empty or unreadable.
    fn scaled_values(&self, record: &PatientRecord) -> Vec<Option<f64>> {
        record
            .qpcr
            .iter()
            .map(|reading| {
                if !reading.has_value() {
                    return None;
                }
                let parsed = parse_numeric(&reading.value);
                if parsed.is_none() {
                    warn!(
                        patient_id = %record.id,
                        value = %reading.value,
                        "viral load is not numeric, treated as missing"
                    );
                }
                parsed.map(|value| scale_viral_load(value, self.scale))
            })
            .collect()
    }
}

impl VariableFamily for ViralLoadFamily {
    fn name(&self) -> &'static str {
        "viral load"
    }

    fn declare(&self, _ctx: &AggregationContext, catalog: &mut VariableCatalog) {
        let suffix = self.suffix();
        for (name, title) in [
            ("PCR", "First measured viral load"),
            ("PCR_MAX", "Maximum measured viral load"),
            ("PCR_MIN", "Minimum measured viral load"),
            ("PCR_AVE", "Averaged viral load"),
        ] {
            catalog.declare(AggregatedVariable::new(
                name,
                format!("{title}{suffix}"),
                VariableType::Float,
                GROUP,
                SUMMARY_TABLE,
            ));
        }
        for slot in 1..=self.slots {
            let table = format!("Viral Load (qPCR) day {slot}");
            catalog.declare(AggregatedVariable::new(
                format!("DOPCR_{slot}"),
                format!("Date of qPCR {slot}"),
                VariableType::Date,
                GROUP,
                table.as_str(),
            ));
            catalog.declare(AggregatedVariable::new(
                format!("PCR_{slot}"),
                format!("EBOV copies/mL plasma{suffix} day {slot}"),
                VariableType::Float,
                GROUP,
                table.as_str(),
            ));
        }
    }

    fn fill(&self, _ctx: &AggregationContext, record: &PatientRecord, row: &mut Vec<String>) {
        let scaled = self.scaled_values(record);
        let present: Vec<f64> = scaled.iter().flatten().copied().collect();
        match ViralLoadStats::from_values(&present) {
            Some(stats) => row.extend(
                [stats.first, stats.max, stats.min, stats.mean].map(format_numeric),
            ),
            None => row.extend(std::iter::repeat_n(String::new(), 4)),
        }
        for (reading, value) in record.qpcr.iter().zip(&scaled).take(self.slots) {
            row.push(reading.date.clone());
            row.push(value.map(format_numeric).unwrap_or_default());
        }
        let missing = self.slots.saturating_sub(record.qpcr.len());
        row.extend(std::iter::repeat_n(String::new(), missing * 2));
    }
}
