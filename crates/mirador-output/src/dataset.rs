//! Writing a complete Mirador dataset directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use mirador_transform::MiradorDataset;
use tracing::{debug, info, info_span};

use crate::common::{
    DATA_CACHE_FILENAME, DATA_FILENAME, DICTIONARY_FILENAME, GROUPS_FILENAME, PROJECT_FILENAME,
};
use crate::data_csv::write_data_csv;
use crate::dictionary_csv::write_dictionary_csv;
use crate::groups_xml::write_groups_xml;
use crate::project::ProjectDescriptor;

/// Files making up a dataset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub dir: PathBuf,
    pub data: PathBuf,
    pub dictionary: PathBuf,
    pub groups: PathBuf,
    pub project: PathBuf,
}

impl DatasetPaths {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            data: dir.join(DATA_FILENAME),
            dictionary: dir.join(DICTIONARY_FILENAME),
            groups: dir.join(GROUPS_FILENAME),
            project: dir.join(PROJECT_FILENAME),
        }
    }
}

/// Creates the dataset directory and removes a stale viewer cache.
pub fn init_dataset_dir(dir: &Path) -> Result<DatasetPaths> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let cache = dir.join(DATA_CACHE_FILENAME);
    if cache.is_file() {
        fs::remove_file(&cache).with_context(|| format!("remove {}", cache.display()))?;
        debug!(path = %cache.display(), "removed stale data cache");
    }
    Ok(DatasetPaths::new(dir))
}

/// Writes data, dictionary, groups and project descriptor into `dir`.
pub fn write_mirador_dataset(
    dir: &Path,
    dataset: &MiradorDataset,
    missing: &str,
) -> Result<DatasetPaths> {
    let span = info_span!("export", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let paths = init_dataset_dir(dir)?;
    let frame = dataset.to_frame().context("build dataset frame")?;
    write_data_csv(&paths.data, &frame, missing)?;
    write_dictionary_csv(&paths.dictionary, dataset.variables())?;
    write_groups_xml(&paths.groups, dataset.hierarchy())?;
    ProjectDescriptor::default()
        .with_missing(missing)
        .write(&paths.project)?;

    info!(
        variables = dataset.variables().len(),
        rows = dataset.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset written"
    );
    Ok(paths)
}
