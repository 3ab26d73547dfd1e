//! Resume extractor: rule-based resume parsing, rating and feedback

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_extractor::cli::{self, Cli, Commands, ConfigAction, RESUME_EXTENSIONS};
use resume_extractor::config::Config;
use resume_extractor::input::InputManager;
use resume_extractor::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_extractor::output::ResumeReport;
use resume_extractor::{ResumeExtractorError, ResumeParser, Result};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        if matches!(e, ResumeExtractorError::Extraction(_)) {
            eprintln!("Could not parse the resume. Please try again or check the file contents.");
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse { resume, output, save, detailed } => {
            parse_resume(resume, output, save, detailed, config).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", Config::config_path().display());
                println!("\nInput:");
                println!("  Caching: {}", config.input.enable_caching);
                match config.input_limit() {
                    Some(limit) => println!("  Max Input: {} characters", limit),
                    None => println!("  Max Input: unlimited"),
                }
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
                println!("  Pretty JSON: {}", config.output.pretty_json);
                println!("  Metadata: {}", config.output.include_metadata);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::reset()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

async fn parse_resume(
    resume: PathBuf,
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
    config: Config,
) -> Result<()> {
    info!("Starting resume parsing");

    cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
        .map_err(|e| ResumeExtractorError::InvalidInput(format!("Resume file: {}", e)))?;

    let output_format = match output {
        Some(format) => cli::parse_output_format(&format).map_err(ResumeExtractorError::InvalidInput)?,
        None => config.output.format,
    };

    let mut input_manager = InputManager::from_config(&config.input);
    let text = input_manager.extract_text(&resume).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Parsing {}", resume.display()));

    let start_time = Instant::now();
    let parsed = ResumeParser::new().and_then(|parser| parser.parse(&text));
    spinner.finish_and_clear();
    let parsed = parsed?;

    let report = ResumeReport::new(parsed, &resume.to_string_lossy(), start_time.elapsed());

    // No ANSI escapes in saved files
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        detailed || config.output.detailed,
        config.output.pretty_json,
        config.output.include_metadata,
    );
    let rendered = generator.generate_report(&report, output_format)?;

    match save {
        Some(path) => {
            let path = resolve_save_path(&path, output_format, &resume.to_string_lossy());
            save_report_to_file(&rendered, &path)?;
            println!("✅ Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    info!("Finished parsing {}", resume.display());
    Ok(())
}
