//! Dataset build pipeline with explicit stages.
//!
//! 1. **Layout**: resolve every source path inside the input directory
//! 2. **Load**: read the ignore list, then the master table (which creates the
//!    patient records), then every source that attaches data to them
//! 3. **Aggregate**: declare the variable catalog and fill one row per patient
//! 4. **Export**: write the dataset directory
//!
//! Loaders run strictly in this order because later sources only attach to
//! records created by the master table.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use mirador_ingest::{
    IngestConfig, LoadStats, SourceLayout, load_allele_frequencies, load_case_notifications,
    load_clusters, load_demographics, load_ignore_list, load_master, load_metabolic_panels,
    load_panel_reference, load_snp_calls, load_variable_dictionary,
};
use mirador_model::{AggregationOptions, PatientStore, SequencingData};
use mirador_output::{DatasetPaths, write_mirador_dataset};
use mirador_transform::{AggregationContext, CohortSummary, aggregate};

// ============================================================================
// Stage 1: Layout
// ============================================================================

/// Settings of one `aggregate` run.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit layout file; `None` falls back to `<input_dir>/mirador.toml`.
    pub config: Option<PathBuf>,
    pub options: AggregationOptions,
}

/// Loads the layout and applies its allele-position override to `options`.
pub fn resolve_layout(
    input_dir: &Path,
    config: Option<&Path>,
    options: AggregationOptions,
) -> Result<(SourceLayout, AggregationOptions)> {
    let ingest_config = IngestConfig::load(input_dir, config).context("load source layout")?;
    let options = match ingest_config.allele_positions {
        Some(positions) => options.with_allele_positions(positions),
        None => options,
    };
    Ok((ingest_config.sources.resolved(input_dir), options))
}

// ============================================================================
// Stage 2: Load
// ============================================================================

/// Row counts of one source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoad {
    pub source: &'static str,
    pub path: PathBuf,
    pub stats: LoadStats,
}

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadResult {
    pub context: AggregationContext,
    pub sources: Vec<SourceLoad>,
    /// Identifiers listed in the ignore file.
    pub ignored: usize,
}

pub fn load_sources(layout: &SourceLayout, options: AggregationOptions) -> Result<LoadResult> {
    let ignore = load_ignore_list(&layout.ignore).context("load ignore list")?;
    let mut store = PatientStore::new();
    let mut sources = Vec::new();

    let master = load_master(&layout.master, &ignore, &mut store).context("load master table")?;
    sources.push(source_load("master", &layout.master, master));

    let demographics =
        load_demographics(&layout.demographics, &mut store).context("load demographics")?;
    sources.push(source_load("demographics", &layout.demographics, demographics));

    let cases = load_case_notifications(&layout.case_notification, &mut store)
        .context("load case notifications")?;
    sources.push(source_load("case notification", &layout.case_notification, cases));

    let panel_reference =
        load_panel_reference(&layout.panel_reference).context("load panel reference")?;
    let panels = load_metabolic_panels(&layout.metabolic_panel, &panel_reference, &mut store)
        .context("load metabolic panels")?;
    sources.push(source_load("metabolic panel", &layout.metabolic_panel, panels));

    let demographics_dictionary = load_variable_dictionary(&layout.demographics_dictionary)
        .context("load demographics dictionary")?;
    let case_dictionary =
        load_variable_dictionary(&layout.case_dictionary).context("load case dictionary")?;

    let sequencing = if options.include_sequencing {
        Some(load_sequencing(layout, &options.allele_positions)?)
    } else {
        debug!("sequencing disabled");
        None
    };

    let mut context = AggregationContext::new(store, options)
        .with_demographics(demographics_dictionary)
        .with_case_notification(case_dictionary)
        .with_panel_reference(panel_reference);
    if let Some(sequencing) = sequencing {
        context = context.with_sequencing(sequencing);
    }
    Ok(LoadResult {
        context,
        sources,
        ignored: ignore.len(),
    })
}

/// Reads SNP calls, allele frequencies at `positions` and cluster assignments.
pub fn load_sequencing(layout: &SourceLayout, positions: &[u64]) -> Result<SequencingData> {
    let snps = load_snp_calls(&layout.snp_calls).context("load SNP calls")?;
    let allele_frequencies = load_allele_frequencies(&layout.allele_frequencies, positions)
        .context("load allele frequencies")?;
    let clusters = load_clusters(&layout.clusters).context("load clusters")?;
    let data = SequencingData {
        snps,
        allele_frequencies,
        clusters,
    };
    info!(
        snp_sites = data.snps.len(),
        allele_sites = data.allele_frequencies.len(),
        clusters = data.clusters.len(),
        patients = data.sequenced_patients(),
        "sequencing loaded"
    );
    Ok(data)
}

fn source_load(source: &'static str, path: &Path, stats: LoadStats) -> SourceLoad {
    SourceLoad {
        source,
        path: path.to_path_buf(),
        stats,
    }
}

// ============================================================================
// Stages 3-4: Aggregate and export
// ============================================================================

/// Everything reported after a successful `aggregate` run.
#[derive(Debug)]
pub struct AggregateOutcome {
    pub paths: DatasetPaths,
    pub sources: Vec<SourceLoad>,
    pub ignored: usize,
    pub summary: CohortSummary,
    pub variables: usize,
    pub rows: usize,
    /// Patients with sequencing data, when sequencing was merged.
    pub sequenced: Option<usize>,
}

pub fn run_aggregate(request: &AggregateRequest) -> Result<AggregateOutcome> {
    let run_span = info_span!("aggregate_run", input_dir = %request.input_dir.display());
    let _run_guard = run_span.enter();

    let (layout, options) = resolve_layout(
        &request.input_dir,
        request.config.as_deref(),
        request.options.clone(),
    )?;
    let missing = options.missing_token.clone();

    let load_span = info_span!("load", input_dir = %request.input_dir.display());
    let load_start = Instant::now();
    let LoadResult {
        context,
        sources,
        ignored,
    } = load_span.in_scope(|| load_sources(&layout, options))?;
    info!(
        patients = context.store.len(),
        ignored,
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );
    let summary = CohortSummary::from_store(&context.store);

    let dataset = aggregate(&context).context("aggregate dataset")?;
    let paths = write_mirador_dataset(&request.output_dir, &dataset, &missing)
        .with_context(|| format!("write dataset to {}", request.output_dir.display()))?;

    Ok(AggregateOutcome {
        paths,
        sources,
        ignored,
        summary,
        variables: dataset.variables().len(),
        rows: dataset.len(),
        sequenced: context
            .active_sequencing()
            .map(SequencingData::sequenced_patients),
    })
}
