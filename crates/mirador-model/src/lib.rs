//! Data model for aggregating clinical cohort tables into a Mirador dataset.

pub mod dictionary;
pub mod error;
pub mod ids;
pub mod options;
pub mod panel;
pub mod patient;
pub mod sequencing;
pub mod variable;

pub use dictionary::{CodeMap, DictionaryEntry, VariableDictionary, VariableType};
pub use error::{ModelError, Result};
pub use ids::{ID_SEPARATOR, normalize_patient_id};
pub use options::{
    AggregationOptions, DEFAULT_ALLELE_POSITIONS, DEFAULT_MISSING_TOKEN, ViralLoadScale,
};
pub use panel::{AnalyteInfo, NormalRange, PanelReference, parse_sex_ranges};
pub use patient::{
    DiseaseGroup, Outcome, PanelReading, PatientRecord, PatientStore, QpcrReading, SourceRow,
};
pub use sequencing::{ClusterAssignment, SequencingData, SiteValues};
pub use variable::{
    AggregatedVariable, GroupHierarchy, VariableCatalog, VariableGroup, VariableTable,
};
