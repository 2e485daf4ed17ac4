//! Aggregation engine for the Mirador cohort dataset.
//!
//! Loaders fill a [`PatientStore`](mirador_model::PatientStore); [`aggregate`]
//! turns it into a [`MiradorDataset`]: a stable, ordered variable catalog and
//! one fixed-width row per patient.

pub mod context;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod families;
pub mod frame;
pub mod numeric;
pub mod summary;

pub use context::AggregationContext;
pub use dataset::{MiradorDataset, PatientRow};
pub use engine::aggregate;
pub use error::{AggregateError, Result};
pub use families::{VariableFamily, families_for};
pub use frame::{MiradorFrame, any_to_string};
pub use numeric::{ViralLoadStats, format_numeric, parse_numeric, scale_viral_load};
pub use summary::{CohortSummary, SexBreakdown};
