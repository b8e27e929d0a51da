use std::io;

use bit_prims::BitError;
use thiserror::Error;

use crate::MAX_BUFFER_LEN;

/// Cursor errors
#[derive(Debug, Error)]
pub enum CursorError {
    /// A field did not fit the width or the storage.
    #[error(transparent)]
    Bits(#[from] BitError),

    /// The underlying stream failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The stream lacks the capability the operation needs.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("buffer of {len} bytes is at or above the {limit}-byte limit", limit = MAX_BUFFER_LEN)]
    BufferTooLarge { len: usize },

    #[error("null buffer pointer")]
    NullBuffer,

    #[error("position {0} is negative")]
    NegativePosition(i64),
}

impl CursorError {
    /// Whether the error came from running out of stream data.
    pub fn is_eof(&self) -> bool {
        matches!(self, CursorError::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof)
    }
}
