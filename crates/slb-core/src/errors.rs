use thiserror::Error;

/// Core domain errors - no I/O dependencies
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid object mask: {0}")]
    InvalidMask(String),

    #[error("Invalid object filter: {0}")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
