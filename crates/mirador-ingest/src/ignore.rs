//! Identifiers excluded from the aggregation.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Identifiers to drop while reading the master table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    ids: HashSet<String>,
}

impl IgnoreList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Loads a newline-delimited identifier list. A missing file yields an empty list.
pub fn load_ignore_list(path: &Path) -> Result<IgnoreList> {
    if !path.exists() {
        warn!(path = %path.display(), "ignore list not found, no identifiers excluded");
        return Ok(IgnoreList::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
    let list = IgnoreList::new(
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    );
    debug!(path = %path.display(), count = list.len(), "loaded ignore list");
    Ok(list)
}
