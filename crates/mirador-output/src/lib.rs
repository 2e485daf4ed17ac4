//! Exporters for the aggregated Mirador dataset.
//!
//! - **Dataset directory**: `data.csv`, `dictionary.csv`, `groups.xml`, `config.mira`
//! - **Flat CSV**: titles as header, categorical labels, configurable missing token
//! - **SPSS**: data copy plus a syntax card

mod common;
mod convert;
mod data_csv;
mod dataset;
mod dictionary_csv;
mod groups_xml;
mod project;
pub mod spss;

pub use common::{
    DATA_CACHE_FILENAME, DATA_FILENAME, DICTIONARY_FILENAME, GROUPS_FILENAME, PROJECT_FILENAME,
    ensure_parent_dir, sibling_path,
};
pub use convert::{CsvConversion, StoredDataset, convert_to_csv};
pub use data_csv::write_data_csv;
pub use dataset::{DatasetPaths, init_dataset_dir, write_mirador_dataset};
pub use dictionary_csv::{DatasetVariable, read_dictionary_csv, write_dictionary_csv};
pub use groups_xml::{SUPPRESSED_GROUPS, render_groups_xml, validate_groups_xml, write_groups_xml};
pub use project::ProjectDescriptor;
pub use spss::{SpssConversion, convert_to_spss, render_spss_card, spss_type};
