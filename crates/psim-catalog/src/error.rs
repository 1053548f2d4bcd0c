use psim_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("activity catalog is empty")]
    EmptyCatalog,

    #[error("context table has no rows")]
    EmptyContext,

    #[error("duplicate activity id {0:?}")]
    DuplicateId(String),

    #[error("too many activities ({0}); at most 65535 are supported")]
    TooManyActivities(usize),

    #[error("activity {id:?}: {what}")]
    InvalidActivity { id: String, what: String },

    #[error("invalid context row: {0}")]
    InvalidContext(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Vocabulary(#[from] CoreError),

    #[error("catalog parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
