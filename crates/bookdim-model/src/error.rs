use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("search query must not be empty")]
    EmptyQuery,
    #[error("max results must be at least 1")]
    ZeroMaxResults,
}

pub type Result<T> = std::result::Result<T, ModelError>;
