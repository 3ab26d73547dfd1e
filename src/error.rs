//! Error handling for the resume extractor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeExtractorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// The single failure kind the extraction pipeline reports.
    /// Missing fields are never errors.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeExtractorError>;

/// Pattern compilation faults surface as extraction failures
impl From<regex::Error> for ResumeExtractorError {
    fn from(err: regex::Error) -> Self {
        ResumeExtractorError::Extraction(err.to_string())
    }
}

/// Convert anyhow errors (context-wrapped output writes) to our custom error type
impl From<anyhow::Error> for ResumeExtractorError {
    fn from(err: anyhow::Error) -> Self {
        ResumeExtractorError::OutputFormatting(format!("{:#}", err))
    }
}

impl From<aho_corasick::BuildError> for ResumeExtractorError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ResumeExtractorError::Extraction(err.to_string())
    }
}
