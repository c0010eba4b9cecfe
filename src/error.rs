use std::io;

use thiserror::Error;

use crate::buffer::FileError;

/// Errors that end a window's control loop.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("could not read command: {0}")]
    Input(#[source] io::Error),

    #[error("could not write to console: {0}")]
    Output(#[source] io::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
