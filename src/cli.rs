//! CLI interface for the resume extractor

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Résumé file extensions the input layer can read
pub const RESUME_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "pdf"];

#[derive(Parser)]
#[command(name = "resume-extractor")]
#[command(about = "Extract, rate and review resumes from plain text, Markdown or PDF")]
#[command(long_about = "Parse a resume into structured contact, experience, education, skills, projects and certifications, \
rate it on a 0-10 scale and suggest improvements and skills to learn")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and rate a resume
    Parse {
        /// Path to resume file (TXT, MD, PDF)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file, or into a directory under a name derived from the resume
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the rating breakdown and full entry details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_arguments() {
        let cli = Cli::try_parse_from([
            "resume-extractor",
            "parse",
            "--resume",
            "cv.pdf",
            "--output",
            "json",
            "--detailed",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { resume, output, save, detailed } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(save.is_none());
                assert!(detailed);
            }
            Commands::Config { .. } => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_resume_extensions() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.markdown"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), RESUME_EXTENSIONS).is_err());
    }
}
