//! Variable dictionary loader.
//!
//! Dictionary files have no header. Each row reads
//! `position,name,alias,group,table,type[,codes]`. Entries keep file order,
//! which is the order their columns are emitted in. Any malformed row aborts
//! the load: a broken dictionary would silently corrupt every column it feeds.

use std::collections::HashSet;
use std::path::Path;

use mirador_model::{CodeMap, DictionaryEntry, SourceRow, VariableDictionary, VariableType};
use tracing::info;

use crate::csv_table::read_rows;
use crate::error::{IngestError, Result};

const REQUIRED_FIELDS: usize = 6;
const MAX_FIELDS: usize = 7;

pub fn load_variable_dictionary(path: &Path) -> Result<VariableDictionary> {
    let mut entries = Vec::new();
    let mut positions = HashSet::new();
    for numbered in read_rows(path, b',', false)? {
        let entry = parse_entry(&numbered.row)
            .map_err(|message| IngestError::dictionary(path, numbered.line, message))?;
        if !positions.insert(entry.position) {
            return Err(IngestError::dictionary(
                path,
                numbered.line,
                format!("duplicate column position {}", entry.position),
            ));
        }
        entries.push(entry);
    }
    info!(path = %path.display(), variables = entries.len(), "loaded variable dictionary");
    Ok(VariableDictionary::new(entries))
}

fn parse_entry(row: &SourceRow) -> std::result::Result<DictionaryEntry, String> {
    let mut width = row.len();
    while width > 0 && row.cell(width - 1).is_empty() {
        width -= 1;
    }
    if !(REQUIRED_FIELDS..=MAX_FIELDS).contains(&width) {
        return Err(format!(
            "expected {REQUIRED_FIELDS} or {MAX_FIELDS} fields, found {width}"
        ));
    }
    let position = row
        .cell(0)
        .parse::<usize>()
        .map_err(|_| format!("column position {:?} is not an integer", row.cell(0)))?;
    let var_type: VariableType = row.cell(5).parse().map_err(|err| format!("{err}"))?;
    let range_spec = Some(row.cell(6))
        .filter(|spec| !spec.is_empty())
        .map(str::to_string);
    let codes = match (&range_spec, var_type) {
        (Some(spec), VariableType::Category) => {
            Some(CodeMap::parse(spec).map_err(|err| err.to_string())?)
        }
        _ => None,
    };
    Ok(DictionaryEntry {
        position,
        name: row.cell(1).to_string(),
        alias: row.cell(2).to_string(),
        group: row.cell(3).to_string(),
        table: row.cell(4).to_string(),
        var_type,
        range_spec,
        codes,
    })
}
