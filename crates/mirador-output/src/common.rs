use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DATA_FILENAME: &str = "data.csv";
pub const DICTIONARY_FILENAME: &str = "dictionary.csv";
pub const GROUPS_FILENAME: &str = "groups.xml";
pub const PROJECT_FILENAME: &str = "config.mira";
/// Binary cache the viewer rebuilds from `data.csv`.
pub const DATA_CACHE_FILENAME: &str = "data.bin";

/// Ensure the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Path of a file written next to `path`, named `<stem><suffix>`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}"))
}
