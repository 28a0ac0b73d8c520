//! CSV applicant exports turned into in-memory [`Candidate`] pools.

mod normalizer;
mod parser;

pub use parser::parse_timestamp;

use crate::ranking::Candidate;
use std::io::Read;
use std::path::Path;

/// Error raised while reading an applicant export.
#[derive(Debug, thiserror::Error)]
pub enum CandidateImportError {
    #[error("failed to read applicant export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: 'Applied At' value '{value}' is not RFC 3339 or YYYY-MM-DD")]
    InvalidTimestamp { row: usize, value: String },
}

/// Reads applicants from a CSV export with `ID`, `Name`, `Skills`, `Experience`,
/// `Education`, `Availability` and `Applied At` columns.
pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, CandidateImportError> {
        parser::parse_candidates(reader)
    }
}
