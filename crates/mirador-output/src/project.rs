//! The `config.mira` project descriptor.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use mirador_model::DEFAULT_MISSING_TOKEN;

use crate::common::{DATA_FILENAME, DICTIONARY_FILENAME, GROUPS_FILENAME, ensure_parent_dir};

/// `key=value` descriptor naming the dataset files and the missing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub data_source: String,
    pub dictionary: String,
    pub groups: String,
    pub missing: String,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            data_source: DATA_FILENAME.to_string(),
            dictionary: DICTIONARY_FILENAME.to_string(),
            groups: GROUPS_FILENAME.to_string(),
            missing: DEFAULT_MISSING_TOKEN.to_string(),
        }
    }
}

impl ProjectDescriptor {
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "data.source={}", self.data_source);
        let _ = writeln!(out, "data.dictionary={}", self.dictionary);
        let _ = writeln!(out, "data.groups={}", self.groups);
        let _ = writeln!(out, "missing.string={}", self.missing);
        out
    }

    /// Parses descriptor text. Unknown keys are ignored; absent keys keep their defaults.
    pub fn parse(text: &str) -> Result<Self> {
        let mut descriptor = Self::default();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                bail!("line {}: expected key=value, found {line:?}", idx + 1);
            };
            let value = value.trim().to_string();
            match key.trim() {
                "data.source" => descriptor.data_source = value,
                "data.dictionary" => descriptor.dictionary = value,
                "data.groups" => descriptor.groups = value,
                "missing.string" => descriptor.missing = value,
                _ => {}
            }
        }
        Ok(descriptor)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        fs::write(path, self.render()).with_context(|| format!("write {}", path.display()))
    }
}
