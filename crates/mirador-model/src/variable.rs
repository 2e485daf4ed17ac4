//! Output variables and the group/table hierarchy shown by the viewer.

use serde::{Deserialize, Serialize};

use crate::dictionary::VariableType;

/// A column of the aggregated dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedVariable {
    pub name: String,
    pub title: String,
    pub var_type: VariableType,
    /// Raw range/code spec, empty when the variable has none.
    pub range_spec: String,
    pub group: String,
    pub table: String,
    /// Type spelling written to the dataset dictionary when it differs from
    /// the canonical one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
}

impl AggregatedVariable {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        var_type: VariableType,
        group: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            var_type,
            range_spec: String::new(),
            group: group.into(),
            table: table.into(),
            type_label: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range_spec: impl Into<String>) -> Self {
        self.range_spec = range_spec.into();
        self
    }

    #[must_use]
    pub fn with_type_label(mut self, label: impl Into<String>) -> Self {
        self.type_label = Some(label.into());
        self
    }

    pub fn type_label(&self) -> &str {
        self.type_label
            .as_deref()
            .unwrap_or_else(|| self.var_type.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTable {
    pub name: String,
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableGroup {
    pub name: String,
    pub tables: Vec<VariableTable>,
}

/// Ordered group -> table -> variable hierarchy. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHierarchy {
    groups: Vec<VariableGroup>,
}

impl GroupHierarchy {
    pub fn insert(&mut self, group: &str, table: &str, variable: &str) {
        let group_idx = match self.groups.iter().position(|g| g.name == group) {
            Some(idx) => idx,
            None => {
                self.groups.push(VariableGroup {
                    name: group.to_string(),
                    tables: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        let tables = &mut self.groups[group_idx].tables;
        let table_idx = match tables.iter().position(|t| t.name == table) {
            Some(idx) => idx,
            None => {
                tables.push(VariableTable {
                    name: table.to_string(),
                    variables: Vec::new(),
                });
                tables.len() - 1
            }
        };
        tables[table_idx].variables.push(variable.to_string());
    }

    pub fn groups(&self) -> &[VariableGroup] {
        &self.groups
    }
}

/// Append-only list of declared variables plus their hierarchy.
///
/// Declaration order is the column order of the dataset.
#[derive(Debug, Clone, Default)]
pub struct VariableCatalog {
    variables: Vec<AggregatedVariable>,
    hierarchy: GroupHierarchy,
}

impl VariableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable and returns its column index.
    pub fn declare(&mut self, variable: AggregatedVariable) -> usize {
        self.hierarchy
            .insert(&variable.group, &variable.table, &variable.name);
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn variables(&self) -> &[AggregatedVariable] {
        &self.variables
    }

    pub fn hierarchy(&self) -> &GroupHierarchy {
        &self.hierarchy
    }

    pub fn get(&self, name: &str) -> Option<&AggregatedVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
