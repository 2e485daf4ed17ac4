//! Source loaders for the Mirador cohort aggregation.

pub mod csv_table;
pub mod dictionary;
pub mod error;
pub mod ignore;
pub mod layout;
pub mod reference;
pub mod sequencing;
pub mod sources;

pub use csv_table::{NumberedRow, read_rows, read_table};
pub use dictionary::load_variable_dictionary;
pub use error::{IngestError, Result};
pub use ignore::{IgnoreList, load_ignore_list};
pub use layout::{IngestConfig, LAYOUT_FILENAME, SourceLayout};
pub use reference::load_panel_reference;
pub use sequencing::{
    load_allele_frequencies, load_clusters, load_snp_calls, sample_patient_id,
};
pub use sources::{
    LoadStats, load_case_notifications, load_demographics, load_master, load_metabolic_panels,
};
