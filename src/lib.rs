//! Resume extractor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ResumeExtractorError};
pub use config::Config;
pub use processing::{ParsedResume, ResumeParser};
