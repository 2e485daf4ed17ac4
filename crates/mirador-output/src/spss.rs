//! SPSS export: a copy of the data file plus a syntax card describing it.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mirador_model::VariableType;
use tracing::info;

use crate::common::{ensure_parent_dir, sibling_path};
use crate::convert::{StoredDataset, copy_data};
use crate::dictionary_csv::DatasetVariable;

/// SPSS format letter for a variable type.
pub fn spss_type(var_type: VariableType) -> &'static str {
    match var_type {
        VariableType::Int => "F",
        VariableType::Float => "f",
        VariableType::Date => "DATE",
        VariableType::Category | VariableType::String => "A",
    }
}

/// Renders the DATA LIST / VARIABLE LABELS / VALUE labels / MISSING VALUES card.
pub fn render_spss_card(names: &[String], variables: &[DatasetVariable], missing: &str) -> String {
    let mut card = String::new();
    let columns = || names.iter().zip(variables);

    let _ = writeln!(card, "DATA LIST LIST(',') /");
    for (name, variable) in columns() {
        let _ = writeln!(card, "  {name} ({})", spss_type(variable.var_type));
    }
    let _ = writeln!(card, "  .");

    let _ = writeln!(card, "VARIABLE LABELS");
    for (name, variable) in columns() {
        let _ = writeln!(card, "  {name} \"{}\"", variable.title);
    }
    let _ = writeln!(card, "  .");

    let _ = writeln!(card, "VALUE labels");
    for (name, variable) in columns() {
        let Some(codes) = variable.codes.as_ref().filter(|codes| !codes.is_empty()) else {
            continue;
        };
        let _ = write!(card, "  {name} ");
        for (code, label) in codes.entries() {
            let _ = writeln!(card, "  {code} \"{label}\"");
        }
        let _ = writeln!(card, "  /");
    }
    let _ = writeln!(card, "  .");

    let _ = writeln!(card, "MISSING VALUES");
    for name in names {
        let _ = writeln!(card, "  {name}({missing})");
    }
    let _ = writeln!(card, "  .");
    card
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpssConversion {
    pub data: PathBuf,
    pub card: PathBuf,
}

/// Copies the data to `output` and writes `<stem>.spss` beside it.
pub fn convert_to_spss(dataset_dir: &Path, output: &Path) -> Result<SpssConversion> {
    let dataset = StoredDataset::read(dataset_dir)?;
    copy_data(&dataset, output)?;

    let card_path = sibling_path(output, ".spss");
    let card = render_spss_card(
        &dataset.names,
        &dataset.variables,
        &dataset.descriptor.missing,
    );
    ensure_parent_dir(&card_path)?;
    fs::write(&card_path, card).with_context(|| format!("write {}", card_path.display()))?;
    info!(
        output = %output.display(),
        card = %card_path.display(),
        variables = dataset.names.len(),
        "spss conversion complete"
    );
    Ok(SpssConversion {
        data: output.to_path_buf(),
        card: card_path,
    })
}
