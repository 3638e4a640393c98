use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid FASTQ format at line {line}: {msg}")]
    InvalidFormat { line: usize, msg: String },

    #[error("Sequence and quality lengths don't match at line {line} (seq: {seq_len}, qual: {qual_len})")]
    LengthMismatch {
        line: usize,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("Invalid header: expected '@' at line {line}")]
    InvalidHeader { line: usize },

    #[error("Invalid separator: expected '+' at line {line}")]
    InvalidSeparator { line: usize },

    #[error("Unexpected end of file at line {line}")]
    UnexpectedEof { line: usize },

    #[error("Invalid quality character {qual:?} at line {line}")]
    InvalidQuality { line: usize, qual: char },

    #[error("argument --minGC should be smaller than --maxGC (got {min} > {max})")]
    InvalidGcRange { min: f64, max: f64 },

    #[error("{value} not in range [0.0, 1.0]")]
    GcOutOfBounds { value: f64 },

    #[error("summary file has no '{column}' column")]
    MissingColumn { column: String },

    #[error("invalid summary line {line}: {msg}")]
    InvalidSummaryLine { line: usize, msg: String },

    #[error("mismatch between sequencing_summary and fastq file: {id} was not found in the summary file")]
    MissingSummaryEntry { id: String },
}

impl FilterError {
    /// True when the downstream consumer closed its end of the output pipe.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, FilterError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
