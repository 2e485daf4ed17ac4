use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("variable {name} is declared more than once")]
    DuplicateVariable { name: String },

    #[error("{family} wrote {found} cells for patient {patient}, expected {expected}")]
    RowWidth {
        family: &'static str,
        patient: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to build dataset frame: {0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, AggregateError>;
