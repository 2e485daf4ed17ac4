//! Dataset dictionary: one `title,type[,codes]` row per variable, no header.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use mirador_model::{AggregatedVariable, CodeMap, VariableType};

use crate::common::ensure_parent_dir;

pub fn write_dictionary_csv(path: &Path, variables: &[AggregatedVariable]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    for variable in variables {
        let var_type = variable.type_label();
        let result = if variable.range_spec.is_empty() {
            writer.write_record([variable.title.as_str(), var_type])
        } else {
            writer.write_record([
                variable.title.as_str(),
                var_type,
                variable.range_spec.as_str(),
            ])
        };
        result.with_context(|| format!("write {}: {}", variable.name, path.display()))?;
    }
    flush(writer, path)
}

fn flush(mut writer: Writer<std::fs::File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}

/// One variable as read back from a dataset dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetVariable {
    pub title: String,
    pub var_type: VariableType,
    /// Raw third column, empty when absent.
    pub range_spec: String,
    /// Code map of categorical variables with a code spec.
    pub codes: Option<CodeMap>,
}

pub fn read_dictionary_csv(path: &Path) -> Result<Vec<DatasetVariable>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut variables = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let line = idx + 1;
        let title = record.get(0).unwrap_or_default().to_string();
        let var_type: VariableType = record
            .get(1)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("{} line {line}", path.display()))?;
        let range_spec = record.get(2).unwrap_or_default().to_string();
        let codes = if var_type.is_category() && !range_spec.is_empty() {
            Some(
                CodeMap::parse(&range_spec)
                    .with_context(|| format!("{} line {line}", path.display()))?,
            )
        } else {
            None
        };
        variables.push(DatasetVariable {
            title,
            var_type,
            range_spec,
            codes,
        });
    }
    Ok(variables)
}
