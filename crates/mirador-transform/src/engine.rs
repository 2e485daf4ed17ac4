//! Two-phase aggregation: declare every family's columns, then fill one row per patient.

use std::collections::HashSet;
use std::time::Instant;

use mirador_model::VariableCatalog;
use tracing::{debug, info, info_span};

use crate::context::AggregationContext;
use crate::dataset::{MiradorDataset, PatientRow};
use crate::error::{AggregateError, Result};
use crate::families::families_for;

pub fn aggregate(ctx: &AggregationContext) -> Result<MiradorDataset> {
    let span = info_span!("aggregate", patients = ctx.store.len());
    let _guard = span.enter();
    let start = Instant::now();

    let families = families_for(ctx);
    let mut catalog = VariableCatalog::new();
    let mut widths = Vec::with_capacity(families.len());
    for family in &families {
        let before = catalog.len();
        family.declare(ctx, &mut catalog);
        let width = catalog.len() - before;
        debug!(family = family.name(), variables = width, "declared family");
        widths.push(width);
    }
    ensure_unique_names(&catalog)?;

    let mut rows = Vec::with_capacity(ctx.store.len());
    for record in ctx.store.iter() {
        let mut cells = Vec::with_capacity(catalog.len());
        for (family, &expected) in families.iter().zip(&widths) {
            let before = cells.len();
            family.fill(ctx, record, &mut cells);
            let found = cells.len() - before;
            if found != expected {
                return Err(AggregateError::RowWidth {
                    family: family.name(),
                    patient: record.id.clone(),
                    expected,
                    found,
                });
            }
        }
        rows.push(PatientRow {
            id: record.id.clone(),
            cells,
        });
    }

    info!(
        variables = catalog.len(),
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    Ok(MiradorDataset::new(catalog, rows))
}

fn ensure_unique_names(catalog: &VariableCatalog) -> Result<()> {
    let mut seen = HashSet::new();
    for name in catalog.names() {
        if !seen.insert(name) {
            return Err(AggregateError::DuplicateVariable {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
