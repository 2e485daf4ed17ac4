use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed dictionary row in {path} at line {line}: {message}")]
    MalformedDictionaryRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("malformed panel reference row in {path} at line {line}: {message}")]
    MalformedReferenceRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("failed to read VCF header of {path}: {source}")]
    VcfHeader {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed VCF record {record} in {path}: {message}")]
    MalformedVcf {
        path: PathBuf,
        record: u64,
        message: String,
    },

    #[error("failed to parse source layout {path}: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn dictionary(path: impl Into<PathBuf>, line: u64, err: impl ToString) -> Self {
        Self::MalformedDictionaryRow {
            path: path.into(),
            line,
            message: err.to_string(),
        }
    }

    pub(crate) fn vcf_header(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::VcfHeader {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn vcf_record(path: impl Into<PathBuf>, record: u64, err: impl ToString) -> Self {
        Self::MalformedVcf {
            path: path.into(),
            record,
            message: err.to_string(),
        }
    }

    pub(crate) fn reference(path: impl Into<PathBuf>, line: u64, err: impl ToString) -> Self {
        Self::MalformedReferenceRow {
            path: path.into(),
            line,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
