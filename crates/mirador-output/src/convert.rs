//! Conversions of a dataset directory into flat files for other tools.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::common::{PROJECT_FILENAME, ensure_parent_dir, sibling_path};
use crate::dictionary_csv::{DatasetVariable, read_dictionary_csv};
use crate::project::ProjectDescriptor;

/// A dataset directory read back from disk.
#[derive(Debug, Clone)]
pub struct StoredDataset {
    pub descriptor: ProjectDescriptor,
    pub data_path: PathBuf,
    /// Variable names from the data header.
    pub names: Vec<String>,
    pub variables: Vec<DatasetVariable>,
    pub rows: Vec<StringRecord>,
}

impl StoredDataset {
    pub fn read(dir: &Path) -> Result<Self> {
        let descriptor = ProjectDescriptor::read(&dir.join(PROJECT_FILENAME))?;
        let data_path = dir.join(&descriptor.data_source);
        let variables = read_dictionary_csv(&dir.join(&descriptor.dictionary))?;

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&data_path)
            .with_context(|| format!("read csv: {}", data_path.display()))?;
        let names: Vec<String> = reader
            .headers()
            .with_context(|| format!("read header: {}", data_path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        if names.len() != variables.len() {
            bail!(
                "{} has {} columns but the dictionary lists {} variables",
                data_path.display(),
                names.len(),
                variables.len()
            );
        }
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("read record: {}", data_path.display()))?;
        Ok(Self {
            descriptor,
            data_path,
            names,
            variables,
            rows,
        })
    }
}

/// Files produced by [`convert_to_csv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConversion {
    pub data: PathBuf,
    pub dictionary: PathBuf,
    pub rows: usize,
}

/// Writes a self-describing CSV: titles as header, categorical codes replaced
/// by labels, and the dataset's missing token replaced by `missing`.
pub fn convert_to_csv(dataset_dir: &Path, output: &Path, missing: &str) -> Result<CsvConversion> {
    let dataset = StoredDataset::read(dataset_dir)?;
    let source_missing = dataset.descriptor.missing.as_str();

    ensure_parent_dir(output)?;
    let mut writer =
        csv::Writer::from_path(output).with_context(|| format!("create {}", output.display()))?;
    writer
        .write_record(dataset.variables.iter().map(|v| v.title.as_str()))
        .with_context(|| format!("write header: {}", output.display()))?;
    for record in &dataset.rows {
        let row: Vec<&str> = record
            .iter()
            .zip(&dataset.variables)
            .map(|(value, variable)| {
                let value = variable
                    .codes
                    .as_ref()
                    .and_then(|codes| codes.label_for(value))
                    .unwrap_or(value);
                if value == source_missing { missing } else { value }
            })
            .collect();
        writer
            .write_record(&row)
            .with_context(|| format!("write record: {}", output.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", output.display()))?;

    let dictionary = sibling_path(output, "-dictionary.csv");
    write_side_dictionary(&dictionary, &dataset)?;
    info!(
        output = %output.display(),
        rows = dataset.rows.len(),
        variables = dataset.names.len(),
        "csv conversion complete"
    );
    Ok(CsvConversion {
        data: output.to_path_buf(),
        dictionary,
        rows: dataset.rows.len(),
    })
}

fn write_side_dictionary(path: &Path, dataset: &StoredDataset) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(["name", "title", "type", "codes"])
        .with_context(|| format!("write header: {}", path.display()))?;
    for (name, variable) in dataset.names.iter().zip(&dataset.variables) {
        writer
            .write_record([
                name.as_str(),
                variable.title.as_str(),
                variable.var_type.as_str(),
                variable.range_spec.as_str(),
            ])
            .with_context(|| format!("write {name}: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}

/// Copies the data file for statistics packages.
pub(crate) fn copy_data(dataset: &StoredDataset, output: &Path) -> Result<()> {
    ensure_parent_dir(output)?;
    fs::copy(&dataset.data_path, output).with_context(|| {
        format!(
            "copy {} to {}",
            dataset.data_path.display(),
            output.display()
        )
    })?;
    Ok(())
}
