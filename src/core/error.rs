use thiserror::Error;
use crate::core::types::{DocId, ValueKind};
use crate::schema::schema::FieldType;

/// Flat classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    TypeMismatch,
    DuplicateId,
    InvalidConfig,
    InvalidDocument,
    Tokenize,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("type mismatch on field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: ValueKind,
    },

    #[error("document id '{0}' already exists")]
    DuplicateId(DocId),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("failed to tokenize field '{field}': {reason}")]
    Tokenize { field: String, reason: String },

    /// A document inside a batch failed. Documents before `position` stay committed.
    #[error("batch insertion failed at document {position}: {source}")]
    Batch {
        position: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Schema(_) => ErrorKind::Schema,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::DuplicateId(_) => ErrorKind::DuplicateId,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::InvalidDocument(_) => ErrorKind::InvalidDocument,
            Error::Tokenize { .. } => ErrorKind::Tokenize,
            Error::Batch { source, .. } => source.kind(),
        }
    }

    /// Position of the failing document when this error came out of a batch.
    pub fn batch_position(&self) -> Option<usize> {
        match self {
            Error::Batch { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn in_batch(self, position: usize) -> Self {
        Error::Batch {
            position,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
