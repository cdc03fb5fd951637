use std::io;
use thiserror::Error;

use crate::stage::Stage;

/// Errors from FASTQ parsing.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Input ended inside record {record} while expecting the {stage} line")]
    TruncatedRecord { stage: Stage, record: u64 },
}
