//! Error type for `dt-buffer`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("MutexStrategy::Locked is not implemented; only Buffered cells are supported")]
    UnsupportedMutexStrategy,
}

pub type BufferResult<T> = Result<T, BufferError>;
