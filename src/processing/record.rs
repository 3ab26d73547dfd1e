//! Structured records produced by the extraction pipeline

use serde::{Deserialize, Serialize};

/// Contact fields pulled from the top of the document. Each one is found
/// independently of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
}

/// Start/end pair of canonical `YYYY` or `YYYY-MM` tokens.
///
/// A `None` end covers both "Present" and an end date that could not be
/// read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(flatten)]
    pub dates: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(flatten)]
    pub dates: DateRange,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    pub fn new(title: String, company: String, dates: DateRange) -> Self {
        Self {
            title,
            company,
            dates,
            description: None,
            achievements: Vec::new(),
        }
    }

    /// Appends a prose line to the description
    pub fn push_description(&mut self, line: &str) {
        match self.description.as_mut() {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(line);
            }
            None => self.description = Some(line.to_string()),
        }
    }

    /// True when any bullet carries a percentage or a number
    pub fn has_quantified_achievement(&self) -> bool {
        self.achievements
            .iter()
            .any(|a| a.contains('%') || a.chars().any(|c| c.is_ascii_digit()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub authority: Option<String>,
    pub year: Option<String>,
}

/// The single artifact returned by a parse call.
///
/// Every list defaults to empty and every optional scalar to `null` so
/// consumers can tell "not found" from "found but empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub summary: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub core_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub achievements: Vec<String>,
    pub resume_rating: u8,
    pub improvement_areas: Vec<String>,
    pub upskill_suggestions: Vec<String>,
}
