//! Résumé extraction and scoring

pub mod record;
pub mod document;
pub mod dates;
pub mod contact;
pub mod skills;
pub mod sections;
pub mod scoring;
pub mod recommendations;
pub mod parser;

pub use parser::ResumeParser;
pub use record::ParsedResume;
