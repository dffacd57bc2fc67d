use std::sync::PoisonError;
use thiserror::Error;

/// Error type for record store operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Request never got a usable answer (connect, timeout, TLS, body read)
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Store rejected the request with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Store answered with a body that does not match the row model
    #[error("Could not decode store response: {0}")]
    Decode(String),

    /// Insert succeeded but no row came back to read the sequence number from
    #[error("Store returned no row for the inserted {0} record")]
    EmptyInsert(&'static str),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

impl RepositoryError {
    /// Whether the store itself could not be reached
    pub fn is_unreachable(&self) -> bool {
        match self {
            RepositoryError::Transport(e) => e.is_connect() || e.is_timeout(),
            RepositoryError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
