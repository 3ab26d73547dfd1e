//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ResumeReport;
use crate::processing::record::DateRange;
use anyhow::Context;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for rendering a résumé report
pub trait OutputFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rating badge
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter; emits the parsed record itself
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that picks the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// "2016 - 2018", "2020-01 -" when the end is missing, or empty when no
/// start date was found.
///
/// A missing end is left open: it may be "Present" or a date that did not parse.
pub fn format_date_range(dates: &DateRange) -> String {
    match (&dates.start, &dates.end) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(start), None) => format!("{} -", start),
        (None, Some(end)) => end.clone(),
        (None, None) => String::new(),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_rating_badge(&self, rating: u8) -> String {
        let (badge, color) = match rating {
            9..=10 => ("EXCELLENT", Color::Green),
            8 => ("VERY GOOD", Color::BrightGreen),
            7 => ("GOOD", Color::Yellow),
            5..=6 => ("FAIR", Color::BrightYellow),
            3..=4 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn push_field(&self, output: &mut String, label: &str, value: Option<&str>) {
        let value = match value {
            Some(value) => value.to_string(),
            None => self.colorize("not found", Color::BrightBlack),
        };
        output.push_str(&format!("{:<10} {}\n", format!("{}:", label), value));
    }

    fn push_list(&self, output: &mut String, items: &[String], empty: &str) {
        if items.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize(empty, Color::BrightBlack)));
        }
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Rating", 2));
        output.push_str(&format!(
            "Resume Rating: {}/10 {}\n",
            resume.resume_rating,
            self.format_rating_badge(resume.resume_rating)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        if self.detailed {
            let b = &report.breakdown;
            output.push_str(&self.format_header("Rating Breakdown", 3));
            for (label, points) in [
                ("Contact", b.contact),
                ("Summary", b.summary),
                ("Experience", b.experience),
                ("Education", b.education),
                ("Skills", b.skills),
                ("Projects", b.projects),
                ("Certifications", b.certifications),
                ("Achievements", b.achievements),
            ] {
                output.push_str(&format!("  {:<15} {:.1}\n", label, points));
            }
            output.push_str(&format!("  {:<15} {:.1}\n", "Total", b.total()));
        }

        output.push_str(&self.format_header("Contact", 2));
        let contact = &resume.contact;
        self.push_field(&mut output, "Name", contact.name.as_deref());
        self.push_field(&mut output, "Email", contact.email.as_deref());
        self.push_field(&mut output, "Phone", contact.phone.as_deref());
        self.push_field(&mut output, "Location", contact.location.as_deref());
        self.push_field(&mut output, "LinkedIn", contact.linkedin.as_deref());

        if let Some(summary) = &resume.summary {
            output.push_str(&self.format_header("Summary", 2));
            output.push_str(&format!("{}\n", summary));
        }

        output.push_str(&self.format_header(&format!("Experience ({})", resume.experience.len()), 2));
        for job in &resume.experience {
            output.push_str(&format!(
                "{} at {} {}\n",
                self.colorize(&job.title, Color::White),
                job.company,
                self.colorize(&format_date_range(&job.dates), Color::BrightBlack)
            ));
            if self.detailed {
                if let Some(description) = &job.description {
                    output.push_str(&format!("  {}\n", description));
                }
                for achievement in &job.achievements {
                    output.push_str(&format!("  - {}\n", achievement));
                }
            }
        }

        output.push_str(&self.format_header(&format!("Education ({})", resume.education.len()), 2));
        for entry in &resume.education {
            output.push_str(&format!(
                "{}, {} {}\n",
                entry.degree,
                entry.institution,
                self.colorize(&format_date_range(&entry.dates), Color::BrightBlack)
            ));
        }

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!("Core: {}\n", resume.core_skills.join(", ")));
        output.push_str(&format!("Soft: {}\n", resume.soft_skills.join(", ")));

        if !resume.projects.is_empty() {
            output.push_str(&self.format_header(&format!("Projects ({})", resume.projects.len()), 2));
            for project in &resume.projects {
                output.push_str(&format!("{}: {}\n", self.colorize(&project.name, Color::White), project.description));
                if self.detailed && !project.tech_stack.is_empty() {
                    output.push_str(&format!("  Stack: {}\n", project.tech_stack.join(", ")));
                }
                if let Some(link) = &project.link {
                    output.push_str(&format!("  {}\n", link));
                }
            }
        }

        if !resume.certifications.is_empty() {
            output.push_str(&self.format_header("Certifications", 2));
            for cert in &resume.certifications {
                let issuer = [cert.authority.as_deref(), cert.year.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!("  • {} ({})\n", cert.name, issuer));
            }
        }

        output.push_str(&self.format_header("Achievements", 2));
        self.push_list(&mut output, &resume.achievements, "none found");

        if self.detailed {
            let missing = report.missing_sections();
            if !missing.is_empty() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    self.colorize("Missing sections:", Color::Red),
                    missing.join(", ")
                ));
            }
        }

        output.push_str(&self.format_header("⚠️  Improvement Areas", 2));
        self.push_list(&mut output, &resume.improvement_areas, "nothing to improve");

        output.push_str(&self.format_header("💡 Upskill Suggestions", 2));
        self.push_list(&mut output, &resume.upskill_suggestions, "no suggestions");

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.resume)?)
        } else {
            Ok(serde_json::to_string(&report.resume)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_rating_badge(rating: u8) -> &'static str {
        match rating {
            9..=10 => "🟢 Excellent",
            8 => "🟡 Very Good",
            7 => "🟠 Good",
            5..=6 => "🔴 Fair",
            3..=4 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn push_bullets(output: &mut String, items: &[String]) {
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        let title = resume.contact.name.as_deref().unwrap_or("Resume");
        output.push_str(&format!("# 📄 {}: Resume Analysis\n\n", title));

        if self.include_metadata {
            let file_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Version:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.extractor_version
            ));
            output.push_str(&format!("**Resume:** `{}`\n\n", file_name));
        }

        output.push_str("## Rating\n\n");
        output.push_str(&format!(
            "**Resume Rating:** {}/10 {}\n\n",
            resume.resume_rating,
            Self::markdown_rating_badge(resume.resume_rating)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("## Contact\n\n| Field | Value |\n|---|---|\n");
        let contact = &resume.contact;
        for (label, value) in [
            ("Name", &contact.name),
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("Location", &contact.location),
            ("LinkedIn", &contact.linkedin),
        ] {
            output.push_str(&format!("| {} | {} |\n", label, value.as_deref().unwrap_or("-")));
        }
        output.push('\n');

        if let Some(summary) = &resume.summary {
            output.push_str(&format!("## Summary\n\n{}\n\n", summary));
        }

        if !resume.experience.is_empty() {
            output.push_str("## Experience\n\n");
            for job in &resume.experience {
                output.push_str(&format!(
                    "### {} | {}\n\n*{}*\n\n",
                    job.title,
                    job.company,
                    format_date_range(&job.dates)
                ));
                if let Some(description) = &job.description {
                    output.push_str(&format!("{}\n\n", description));
                }
                if !job.achievements.is_empty() {
                    Self::push_bullets(&mut output, &job.achievements);
                }
            }
        }

        if !resume.education.is_empty() {
            output.push_str("## Education\n\n");
            for entry in &resume.education {
                output.push_str(&format!(
                    "- **{}**, {} {}\n",
                    entry.degree,
                    entry.institution,
                    format_date_range(&entry.dates)
                ));
            }
            output.push('\n');
        }

        if !resume.core_skills.is_empty() || !resume.soft_skills.is_empty() {
            output.push_str("## Skills\n\n");
            output.push_str(&format!("**Core:** `{}`\n\n", resume.core_skills.join("`, `")));
            output.push_str(&format!("**Soft:** {}\n\n", resume.soft_skills.join(", ")));
        }

        if !resume.projects.is_empty() {
            output.push_str("## Projects\n\n");
            for project in &resume.projects {
                output.push_str(&format!("### {}\n\n{}\n\n", project.name, project.description));
                if !project.tech_stack.is_empty() {
                    output.push_str(&format!("**Stack:** {}\n\n", project.tech_stack.join(", ")));
                }
                if let Some(link) = &project.link {
                    output.push_str(&format!("<{}>\n\n", link));
                }
            }
        }

        if !resume.certifications.is_empty() {
            output.push_str("## Certifications\n\n");
            for cert in &resume.certifications {
                output.push_str(&format!(
                    "- {} ({}, {})\n",
                    cert.name,
                    cert.authority.as_deref().unwrap_or("-"),
                    cert.year.as_deref().unwrap_or("-")
                ));
            }
            output.push('\n');
        }

        if !resume.achievements.is_empty() {
            output.push_str("## Achievements\n\n");
            Self::push_bullets(&mut output, &resume.achievements);
        }

        output.push_str("## Improvement Areas\n\n");
        Self::push_bullets(&mut output, &resume.improvement_areas);

        output.push_str("## Upskill Suggestions\n\n");
        Self::push_bullets(&mut output, &resume.upskill_suggestions);

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ResumeReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    fs::write(file_path, content).with_context(|| format!("Failed to write report to {}", file_path.display()))?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_parsed{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_parsed{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_parsed{}.md", base_name, timestamp_suffix),
    }
}

/// Where `--save` writes: a directory gets a file named after the résumé,
/// anything else is used as given.
pub fn resolve_save_path(save: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, resume_name, false))
    } else {
        save.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dates::DateNormalizer;
    use crate::processing::record::{ExperienceEntry, ParsedResume};
    use std::time::Duration;

    fn sample_report() -> ResumeReport {
        let mut resume = ParsedResume::default();
        resume.contact.name = Some("Jane Doe".into());
        resume.experience = vec![ExperienceEntry::new(
            "Lead Engineer".into(),
            "Acme Corp".into(),
            DateRange {
                start: Some("2020-01".into()),
                end: None,
            },
        )];
        resume.core_skills = vec!["Rust".into(), "Go".into()];
        resume.resume_rating = 4;
        resume.improvement_areas = vec!["Add a phone number for direct contact".into()];
        ResumeReport::new(resume, "resumes/jane.txt", Duration::from_millis(3))
    }

    #[test]
    fn test_date_range_rendering() {
        let open = DateRange { start: Some("2020-01".into()), end: None };
        let closed = DateRange { start: Some("2016".into()), end: Some("2018".into()) };

        assert_eq!(format_date_range(&open), "2020-01 -");
        assert_eq!(format_date_range(&closed), "2016 - 2018");
        assert_eq!(format_date_range(&DateRange::default()), "");

        let unreadable_end = DateNormalizer::new()
            .unwrap()
            .extract_range("Consultant | Self | Jan 2019 - Foo 2020");
        assert_eq!(format_date_range(&unreadable_end), "2019-01 -");
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("Resume Rating: 4/10 [BELOW AVG]"));
        assert!(output.contains("Lead Engineer at Acme Corp 2020-01 -"));
        assert!(!output.contains("Present"));
        assert!(output.contains("Core: Rust, Go"));
        assert!(output.contains("Rating Breakdown"));
        assert!(output.contains("  • Add a phone number for direct contact"));
    }

    #[test]
    fn test_json_is_the_parsed_record() {
        let report = sample_report();
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["resume_rating"], 4);
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_markdown_metadata_toggle() {
        let report = sample_report();

        let with = MarkdownFormatter::new(true).format_report(&report).unwrap();
        assert!(with.starts_with("# 📄 Jane Doe: Resume Analysis"));
        assert!(with.contains("**Resume:** `jane.txt`"));
        assert!(with.contains("### Lead Engineer | Acme Corp"));

        let without = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(!without.contains("**Generated:**"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, true);
        let report = sample_report();

        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(json.contains("\n  \"name\": \"Jane Doe\""));
        assert_eq!(generator.markdown_formatter.supports_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_resolve_save_path() {
        let dir = tempfile::TempDir::new().unwrap();

        let into_dir = resolve_save_path(dir.path(), OutputFormat::Markdown, "cv/jane.pdf");
        assert_eq!(into_dir, dir.path().join("jane_parsed.md"));

        let explicit = dir.path().join("out.json");
        assert_eq!(resolve_save_path(&explicit, OutputFormat::Json, "jane.pdf"), explicit);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "cv/jane.pdf", false), "jane_parsed.json");
        assert!(suggest_filename(OutputFormat::Markdown, "jane.md", true).starts_with("jane_parsed_"));
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.md");

        save_report_to_file("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi");
    }
}
