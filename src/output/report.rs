//! Report structure handed to the formatters

use crate::processing::record::ParsedResume;
use crate::processing::scoring::RatingBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A parsed résumé plus what the CLI knows about how it was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    pub resume: ParsedResume,

    /// Per-category points behind `resume.resume_rating`
    pub breakdown: RatingBreakdown,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub extractor_version: String,
    pub resume_file: String,
    pub processing_time_ms: u64,
}

impl ResumeReport {
    pub fn new(resume: ParsedResume, resume_file: &str, processing_time: Duration) -> Self {
        let breakdown = RatingBreakdown::for_resume(&resume);
        Self {
            resume,
            breakdown,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                extractor_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                processing_time_ms: processing_time.as_millis() as u64,
            },
        }
    }

    /// One-line verdict for the rating
    pub fn verdict(&self) -> &'static str {
        match self.resume.resume_rating {
            9..=10 => "Outstanding resume, ready to send",
            7..=8 => "Strong resume with a few gaps to close",
            5..=6 => "Solid foundation that needs more detail",
            3..=4 => "Several key sections are missing or thin",
            _ => "Resume needs substantial work",
        }
    }

    /// Sections that parsed to nothing
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let resume = &self.resume;
        [
            ("Summary", resume.summary.is_none()),
            ("Experience", resume.experience.is_empty()),
            ("Education", resume.education.is_empty()),
            ("Skills", resume.core_skills.is_empty()),
            ("Projects", resume.projects.is_empty()),
            ("Certifications", resume.certifications.is_empty()),
            ("Achievements", resume.achievements.is_empty()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| name)
        .collect()
    }
}
