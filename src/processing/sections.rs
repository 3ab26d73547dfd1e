//! Section parsers for summary, education, experience, projects,
//! certifications and achievements

use crate::error::Result;
use crate::processing::dates::DateNormalizer;
use crate::processing::document::{
    is_new_section, starts_with_bullet, strip_bullet, Document, ScanLine, SectionFold, SectionKind,
};
use crate::processing::record::{CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry};
use regex::Regex;

pub const MAX_ACHIEVEMENTS: usize = 10;

/// Lines following a project header that may describe it
const PROJECT_LOOKAHEAD: usize = 4;

/// Prose shorter than this is not added to an experience description
const DESCRIPTION_MIN_LEN: usize = 20;

const ACHIEVEMENT_TRIGGERS: [&str; 5] = ["award", "winner", "improved", "increased", "reduced"];

/// One entry of the education priority list. Group 1 is the degree and
/// group 2 the institution.
///
/// The keyword pattern only applies when the line opens with the degree;
/// rows that name it in a later field are left to the pipe patterns.
#[derive(Debug, Clone)]
pub struct DegreePattern {
    pub label: &'static str,
    pub regex: Regex,
}

pub struct SectionParser {
    dates: DateNormalizer,
    degree_patterns: Vec<DegreePattern>,
    job_regex: Regex,
    project_regex: Regex,
    certification_regex: Regex,
    technologies_regex: Regex,
}

impl SectionParser {
    pub fn new(dates: DateNormalizer) -> Result<Self> {
        let degree_patterns = vec![
            DegreePattern {
                label: "degree-keyword",
                regex: Regex::new(
                    r"(?i)^((?:Bachelor|Master|PhD|B\.?S\.?|M\.?S\.?|B\.?A\.?|M\.?A\.?|MBA|MS|BS|BA|MA|Ph\.?D\.?)\s+[^|]*?)(?:\s+\|\s+|\s+at\s+|\s+-\s+)([^|]+)",
                )?,
            },
            DegreePattern {
                label: "strict-pipe",
                regex: Regex::new(r"([^|]+?)\s*\|\s*([^|]+)\s*\|\s*(\d{4}(?:-\d{4})?|\d{4}-\w+)")?,
            },
            DegreePattern {
                label: "generic-pipe",
                regex: Regex::new(r"(.+?)\s*\|\s*(.+?)\s*\|\s*(.+)")?,
            },
        ];

        Ok(Self {
            dates,
            degree_patterns,
            job_regex: Regex::new(r"(.+?)\s*\|\s*(.+?)\s*\|\s*(.+)")?,
            project_regex: Regex::new(r"(.+?)\s*\|\s*(.+)")?,
            certification_regex: Regex::new(r"(.+?)\s*\|\s*(.+?)\s*\|\s*(\d{4})")?,
            technologies_regex: Regex::new(r"(?i)technologies:")?,
        })
    }

    pub fn degree_patterns(&self) -> &[DegreePattern] {
        &self.degree_patterns
    }

    /// Text under the first summary-like heading, joined into one line
    pub fn extract_summary(&self, document: &Document) -> Option<String> {
        let index = document
            .lines()
            .iter()
            .position(|line| SectionKind::Summary.is_heading(line))?;

        let summary = document.block_after(index).join(" ");
        let summary = summary.trim();
        (!summary.is_empty()).then(|| summary.to_string())
    }

    pub fn extract_education(&self, document: &Document) -> Vec<EducationEntry> {
        document.fold_section(&EducationFold { parser: self })
    }

    pub fn extract_experience(&self, document: &Document) -> Vec<ExperienceEntry> {
        document.fold_section(&ExperienceFold { parser: self })
    }

    pub fn extract_projects(&self, document: &Document) -> Vec<ProjectEntry> {
        document.fold_section(&ProjectFold { parser: self })
    }

    pub fn extract_certifications(&self, document: &Document) -> Vec<CertificationEntry> {
        document.fold_section(&CertificationFold { parser: self })
    }

    /// Bullets from the achievements section merged, in document order, with
    /// impact-bearing lines from anywhere in the document.
    ///
    /// A bullet that is both is counted twice.
    pub fn extract_achievements(&self, document: &Document) -> Vec<String> {
        let section = document.fold_section(&AchievementFold);

        let triggered = document
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| !SectionKind::Achievements.is_heading(line) && is_impact_line(line))
            .map(|(index, line)| (index, line.clone()));

        let mut merged: Vec<(usize, String)> = section.into_iter().chain(triggered).collect();
        // Stable, so a section bullet stays ahead of its own trigger copy
        merged.sort_by_key(|(index, _)| *index);

        merged
            .into_iter()
            .map(|(_, achievement)| achievement)
            .take(MAX_ACHIEVEMENTS)
            .collect()
    }

    fn parse_degree_line(&self, line: &str) -> Option<EducationEntry> {
        let caps = self
            .degree_patterns
            .iter()
            .find_map(|pattern| pattern.regex.captures(line))?;

        Some(EducationEntry {
            degree: caps.get(1)?.as_str().trim().to_string(),
            institution: caps.get(2)?.as_str().trim().to_string(),
            dates: self.dates.extract_range(line),
        })
    }

    fn parse_job_line(&self, line: &str) -> Option<ExperienceEntry> {
        let caps = self.job_regex.captures(line)?;
        Some(ExperienceEntry::new(
            caps[1].trim().to_string(),
            caps[2].trim().to_string(),
            self.dates.extract_range(line),
        ))
    }

    fn parse_project(&self, line: ScanLine<'_>) -> Option<ProjectEntry> {
        let caps = self.project_regex.captures(line.text)?;
        let tagline = caps[2].trim();

        let mut description = Vec::new();
        let mut tech_stack = Vec::new();
        let mut link = None;

        for detail in line.following.iter().take(PROJECT_LOOKAHEAD) {
            if is_new_section(detail) || detail.contains('|') {
                break;
            }
            if starts_with_bullet(detail) {
                description.push(strip_bullet(detail));
            } else if self.technologies_regex.is_match(detail) {
                tech_stack = self
                    .technologies_regex
                    .replace(detail, "")
                    .split(',')
                    .map(|tech| tech.trim().to_string())
                    .collect();
            } else if detail.contains("github.com") || detail.contains("http") {
                link = Some(detail.clone());
            }
        }

        let description = description.join(" ");
        Some(ProjectEntry {
            name: caps[1].trim().to_string(),
            description: if description.is_empty() { tagline.to_string() } else { description },
            tech_stack,
            link,
        })
    }

    fn parse_certification_line(&self, line: &str) -> Option<CertificationEntry> {
        let caps = self.certification_regex.captures(line)?;
        Some(CertificationEntry {
            name: caps[1].trim().to_string(),
            authority: caps.get(2).map(|m| m.as_str().trim().to_string()).filter(|s| !s.is_empty()),
            year: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }
}

/// A line that reads like a measurable result
pub fn is_impact_line(line: &str) -> bool {
    line.contains('%') || ACHIEVEMENT_TRIGGERS.iter().any(|word| line.contains(word))
}

struct EducationFold<'a> {
    parser: &'a SectionParser,
}

impl SectionFold for EducationFold<'_> {
    type Entry = EducationEntry;

    fn is_heading(&self, line: &str) -> bool {
        SectionKind::Education.is_heading(line)
    }

    fn step(&self, line: ScanLine<'_>, _open: &mut Option<EducationEntry>, closed: &mut Vec<EducationEntry>) {
        closed.extend(self.parser.parse_degree_line(line.text));
    }
}

struct ExperienceFold<'a> {
    parser: &'a SectionParser,
}

impl SectionFold for ExperienceFold<'_> {
    type Entry = ExperienceEntry;

    fn is_heading(&self, line: &str) -> bool {
        SectionKind::Experience.is_heading(line)
    }

    // "Work Experience (continued)" and friends stay inside the section
    fn is_boundary(&self, line: &str) -> bool {
        is_new_section(line) && !line.to_lowercase().contains("experience")
    }

    fn step(&self, line: ScanLine<'_>, open: &mut Option<ExperienceEntry>, closed: &mut Vec<ExperienceEntry>) {
        if let Some(job) = self.parser.parse_job_line(line.text) {
            closed.extend(open.replace(job));
            return;
        }
        let Some(job) = open.as_mut() else {
            return;
        };
        if starts_with_bullet(line.text) {
            job.achievements.push(strip_bullet(line.text).to_string());
        } else if !line.text.contains('|') && line.text.chars().count() > DESCRIPTION_MIN_LEN {
            job.push_description(line.text);
        }
    }
}

struct ProjectFold<'a> {
    parser: &'a SectionParser,
}

impl SectionFold for ProjectFold<'_> {
    type Entry = ProjectEntry;

    fn is_heading(&self, line: &str) -> bool {
        SectionKind::Projects.is_heading(line)
    }

    fn step(&self, line: ScanLine<'_>, _open: &mut Option<ProjectEntry>, closed: &mut Vec<ProjectEntry>) {
        closed.extend(self.parser.parse_project(line));
    }
}

struct CertificationFold<'a> {
    parser: &'a SectionParser,
}

impl SectionFold for CertificationFold<'_> {
    type Entry = CertificationEntry;

    fn is_heading(&self, line: &str) -> bool {
        SectionKind::Certifications.is_heading(line)
    }

    fn step(&self, line: ScanLine<'_>, _open: &mut Option<CertificationEntry>, closed: &mut Vec<CertificationEntry>) {
        closed.extend(self.parser.parse_certification_line(line.text));
    }
}

/// Collects section bullets tagged with their line index
struct AchievementFold;

impl SectionFold for AchievementFold {
    type Entry = (usize, String);

    fn is_heading(&self, line: &str) -> bool {
        SectionKind::Achievements.is_heading(line)
    }

    fn step(&self, line: ScanLine<'_>, _open: &mut Option<(usize, String)>, closed: &mut Vec<(usize, String)>) {
        if starts_with_bullet(line.text) {
            closed.push((line.index, strip_bullet(line.text).to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SectionParser {
        SectionParser::new(DateNormalizer::new().unwrap()).unwrap()
    }

    #[test]
    fn test_summary_joins_lines_until_boundary() {
        let doc = Document::new(
            "Jane Doe\nProfessional Summary\nBackend engineer who likes queues.\nShips reliable services.\nExperience\nEngineer | Acme | 2020-2022",
        );
        assert_eq!(
            parser().extract_summary(&doc).as_deref(),
            Some("Backend engineer who likes queues. Ships reliable services.")
        );
    }

    #[test]
    fn test_summary_heading_without_content() {
        let doc = Document::new("Summary\nEducation\nBS | MIT | 2020");
        assert_eq!(parser().extract_summary(&doc), None);
    }

    #[test]
    fn test_summary_ignores_experience_headings() {
        let doc = Document::new("Summary of Experience\nEngineer | Acme | 2020-2022");
        assert_eq!(parser().extract_summary(&doc), None);
    }

    #[test]
    fn test_education_patterns() {
        let doc = Document::new(
            "Education\nB.S. Computer Science | Stanford University | 2014-2018\nMaster of Science at MIT\nBootcamp | Hack Reactor | Spring 2019\nSelf taught",
        );
        let education = parser().extract_education(&doc);

        assert_eq!(education.len(), 3);
        assert_eq!(education[0].degree, "B.S. Computer Science");
        assert_eq!(education[0].institution, "Stanford University");
        assert_eq!(education[0].dates.start.as_deref(), Some("2014"));
        assert_eq!(education[0].dates.end.as_deref(), Some("2018"));

        assert_eq!(education[1].degree, "Master of Science");
        assert_eq!(education[1].institution, "MIT");
        assert_eq!(education[1].dates.start, None);

        assert_eq!(education[2].degree, "Bootcamp");
        assert_eq!(education[2].institution, "Hack Reactor");
    }

    #[test]
    fn test_degree_keyword_after_first_field() {
        let doc = Document::new(
            "Education\nComputer Science, BS | MIT | 2016-2020\nUniversity of Texas | MS Statistics | 2021",
        );
        let education = parser().extract_education(&doc);

        assert_eq!(education.len(), 2);
        assert_eq!(education[0].degree, "Computer Science, BS");
        assert_eq!(education[0].institution, "MIT");
        assert_eq!(education[0].dates.start.as_deref(), Some("2016"));
        assert_eq!(education[1].degree, "University of Texas");
        assert_eq!(education[1].institution, "MS Statistics");
    }

    #[test]
    fn test_degree_pattern_order() {
        let labels: Vec<_> = parser().degree_patterns().iter().map(|p| p.label).collect();
        assert_eq!(labels, ["degree-keyword", "strict-pipe", "generic-pipe"]);
    }

    #[test]
    fn test_experience_heading_followed_by_education() {
        let doc = Document::new("Experience\nEducation\nBS Physics | Caltech | 2010-2014");
        let p = parser();

        assert!(p.extract_experience(&doc).is_empty());
        let education = p.extract_education(&doc);
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].institution, "Caltech");
    }

    #[test]
    fn test_experience_entries_and_bullets() {
        let doc = Document::new(
            "Experience\n\
             Lead Engineer | Acme Corp | Jan 2020 - Present\n\
             • Led a team of five\n\
             - Shipped the billing rewrite\n\
             Owned the payments platform end to end.\n\
             Engineer | Initech | 2016-2019\n\
             short line\n\
             Skills\n\
             Rust",
        );
        let jobs = parser().extract_experience(&doc);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Lead Engineer");
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(jobs[0].dates.start.as_deref(), Some("2020-01"));
        assert_eq!(jobs[0].dates.end, None);
        assert_eq!(jobs[0].achievements, vec!["Led a team of five", "Shipped the billing rewrite"]);
        assert_eq!(jobs[0].description.as_deref(), Some("Owned the payments platform end to end."));

        assert_eq!(jobs[1].company, "Initech");
        assert_eq!(jobs[1].dates.start.as_deref(), Some("2016"));
        assert!(jobs[1].achievements.is_empty());
        assert_eq!(jobs[1].description, None);
    }

    #[test]
    fn test_experience_prose_mentioning_experience_stays_inside() {
        let doc = Document::new(
            "Experience\n\
             Analyst | First Bank | 2015-2019\n\
             Prior experience in retail banking ops\n\
             - Automated reconciliation\n\
             Education\n\
             BA Economics | UCLA | 2011-2015",
        );
        let jobs = parser().extract_experience(&doc);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].description.as_deref(), Some("Prior experience in retail banking ops"));
        assert_eq!(jobs[0].achievements, vec!["Automated reconciliation"]);
    }

    #[test]
    fn test_experience_flushed_at_end_of_input() {
        let doc = Document::new("Work Experience\nDev | Startup | 2021-2023\n- Built things");
        let jobs = parser().extract_experience(&doc);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].achievements, vec!["Built things"]);
    }

    #[test]
    fn test_bullets_before_first_job_are_ignored() {
        let doc = Document::new("Experience\n- orphan bullet\nDev | Startup | 2021-2023");
        let jobs = parser().extract_experience(&doc);

        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].achievements.is_empty());
    }

    #[test]
    fn test_projects() {
        let doc = Document::new(
            "Projects\n\
             Tracker | Habit tracking app\n\
             • Offline-first sync\n\
             Technologies: React Native, SQLite\n\
             github.com/jane/tracker\n\
             Blog | Static site\n\
             Certifications",
        );
        let projects = parser().extract_projects(&doc);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Tracker");
        assert_eq!(projects[0].description, "Offline-first sync");
        assert_eq!(projects[0].tech_stack, vec!["React Native", "SQLite"]);
        assert_eq!(projects[0].link.as_deref(), Some("github.com/jane/tracker"));

        assert_eq!(projects[1].name, "Blog");
        assert_eq!(projects[1].description, "Static site");
        assert!(projects[1].tech_stack.is_empty());
        assert_eq!(projects[1].link, None);
    }

    #[test]
    fn test_certifications_require_strict_format() {
        let doc = Document::new(
            "Certifications\n\
             AWS Solutions Architect | Amazon | 2022\n\
             CKA | CNCF\n\
             Scrum Master, 2019\n\
             Security+ | CompTIA | 2020",
        );
        let certs = parser().extract_certifications(&doc);

        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].name, "AWS Solutions Architect");
        assert_eq!(certs[0].authority.as_deref(), Some("Amazon"));
        assert_eq!(certs[0].year.as_deref(), Some("2022"));
        assert_eq!(certs[1].name, "Security+");
    }

    #[test]
    fn test_achievements_merge_in_document_order() {
        let doc = Document::new(
            "Experience\n\
             Dev | Startup | 2021-2023\n\
             - Cut latency by 40%\n\
             Achievements\n\
             - Hackathon winner 2022\n\
             - Speaker at RustConf\n\
             Education",
        );
        let achievements = parser().extract_achievements(&doc);

        assert_eq!(
            achievements,
            vec![
                "- Cut latency by 40%",
                "Hackathon winner 2022",
                "- Hackathon winner 2022",
                "Speaker at RustConf",
            ]
        );
    }

    #[test]
    fn test_achievements_capped() {
        let text: String = (0..15).map(|i| format!("Grew revenue {}%\n", i)).collect();
        assert_eq!(parser().extract_achievements(&Document::new(&text)).len(), MAX_ACHIEVEMENTS);
    }
}
