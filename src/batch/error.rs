use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BatchError<E = Infallible> {
    #[error("Invalid batch size: {batch_size} (must be at least 1)")]
    InvalidBatchSize { batch_size: usize },

    #[error(transparent)]
    Callback(E),
}

impl<E> BatchError<E> {
    /// Recover the callback's own failure, if that is what stopped the run
    pub fn into_callback(self) -> Option<E> {
        match self {
            BatchError::Callback(err) => Some(err),
            BatchError::InvalidBatchSize { .. } => None,
        }
    }
}

impl BatchError {
    /// Widen a validation error so it can sit beside callback failures
    pub fn widen<E>(self) -> BatchError<E> {
        match self {
            BatchError::InvalidBatchSize { batch_size } => {
                BatchError::InvalidBatchSize { batch_size }
            }
            BatchError::Callback(never) => match never {},
        }
    }
}
