use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("malformed code spec {spec:?}: expected code:label pairs, found {piece:?}")]
    MalformedCodeSpec { spec: String, piece: String },
    #[error("unknown variable type {0:?} (expected int, float, date, category or string)")]
    UnknownVariableType(String),
    #[error("malformed normal range {0:?}: expected low-high")]
    MalformedRange(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
