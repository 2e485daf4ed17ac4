//! Variable dictionaries and categorical code maps.
//!
//! A dictionary maps a column position in a clinical table to the variable it
//! feeds. Categorical variables carry a code spec such as
//! `1:Male;0:Female`: the dataset stores the code, the dictionary keeps the
//! label, and the source tables hold the label text.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Value type of a dataset variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Int,
    Float,
    Date,
    Category,
    String,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Int => "int",
            VariableType::Float => "float",
            VariableType::Date => "date",
            VariableType::Category => "category",
            VariableType::String => "string",
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, VariableType::Category)
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(VariableType::Int),
            "float" => Ok(VariableType::Float),
            "date" => Ok(VariableType::Date),
            "category" => Ok(VariableType::Category),
            "string" => Ok(VariableType::String),
            _ => Err(ModelError::UnknownVariableType(s.to_string())),
        }
    }
}

/// Closed vocabulary for a categorical variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMap {
    /// Unparsed spec, kept verbatim for re-export.
    spec: String,
    /// `(code, label)` pairs in spec order.
    entries: Vec<(String, String)>,
    /// label -> code
    by_label: HashMap<String, String>,
}

impl CodeMap {
    /// Parses a `code:label;code:label` spec. Empty pieces are skipped.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut by_label = HashMap::new();
        for piece in spec.split(';') {
            if piece.trim().is_empty() {
                continue;
            }
            let Some((code, label)) = piece.split_once(':') else {
                return Err(malformed(spec, piece));
            };
            if label.contains(':') {
                return Err(malformed(spec, piece));
            }
            let code = code.trim().to_string();
            let label = label.trim().to_string();
            by_label.insert(label.clone(), code.clone());
            entries.push((code, label));
        }
        Ok(Self {
            spec: spec.to_string(),
            entries,
            by_label,
        })
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Translates a source value into its code.
    ///
    /// Empty input always translates to empty; any other value outside the
    /// vocabulary yields `None`.
    pub fn code_for(&self, value: &str) -> Option<&str> {
        if value.is_empty() {
            return Some("");
        }
        self.by_label.get(value).map(String::as_str)
    }

    /// Label for a dataset code.
    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == code)
            .map(|(_, label)| label.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, label)| (code.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn malformed(spec: &str, piece: &str) -> ModelError {
    ModelError::MalformedCodeSpec {
        spec: spec.to_string(),
        piece: piece.to_string(),
    }
}

/// One dictionary row: the variable fed by a source column.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    /// Column position in the source table.
    pub position: usize,
    pub name: String,
    pub alias: String,
    pub group: String,
    pub table: String,
    pub var_type: VariableType,
    /// Raw range/code spec as written in the dictionary.
    pub range_spec: Option<String>,
    /// Present only for categorical entries with a range spec.
    pub codes: Option<CodeMap>,
}

impl DictionaryEntry {
    /// Resolves the dataset value for a source cell.
    ///
    /// Categorical entries translate through their code map; unmapped values
    /// become empty.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        match &self.codes {
            Some(codes) => codes.code_for(raw).unwrap_or(""),
            None => raw,
        }
    }
}

/// Dictionary entries in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDictionary {
    entries: Vec<DictionaryEntry>,
}

impl VariableDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&DictionaryEntry> {
        self.entries.iter().find(|entry| entry.position == position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_spec_in_order() {
        let codes = CodeMap::parse("1:Male;0:Female").expect("parse");
        let entries: Vec<_> = codes.entries().collect();
        assert_eq!(entries, vec![("1", "Male"), ("0", "Female")]);
        assert_eq!(codes.code_for("Male"), Some("1"));
        assert_eq!(codes.label_for("0"), Some("Female"));
        assert_eq!(codes.spec(), "1:Male;0:Female");
    }

    #[test]
    fn empty_value_maps_to_empty() {
        let codes = CodeMap::parse("1:Yes;0:No").expect("parse");
        assert_eq!(codes.code_for(""), Some(""));
        assert_eq!(codes.code_for("Maybe"), None);
    }

    #[test]
    fn skips_trailing_separator() {
        let codes = CodeMap::parse("1:Yes;0:No;").expect("parse");
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn rejects_pair_without_colon() {
        let err = CodeMap::parse("1:Yes;No").unwrap_err();
        assert!(matches!(err, ModelError::MalformedCodeSpec { .. }));
    }

    #[test]
    fn rejects_pair_with_two_colons() {
        assert!(CodeMap::parse("1:Yes:really").is_err());
    }

    #[test]
    fn variable_type_is_case_insensitive() {
        assert_eq!("String".parse::<VariableType>(), Ok(VariableType::String));
        assert_eq!(
            "CATEGORY".parse::<VariableType>(),
            Ok(VariableType::Category)
        );
        assert!("decimal".parse::<VariableType>().is_err());
    }

    #[test]
    fn unmapped_category_resolves_to_empty() {
        let entry = DictionaryEntry {
            position: 3,
            name: "SEX".to_string(),
            alias: "Sex".to_string(),
            group: "Demographics".to_string(),
            table: "Basic Information".to_string(),
            var_type: VariableType::Category,
            range_spec: Some("1:Male;0:Female".to_string()),
            codes: Some(CodeMap::parse("1:Male;0:Female").expect("parse")),
        };
        assert_eq!(entry.resolve("Female"), "0");
        assert_eq!(entry.resolve("F"), "");
    }
}
