//! Extraction and scoring pipeline tying the individual extractors together

use crate::error::Result;
use crate::processing::contact::ContactExtractor;
use crate::processing::dates::DateNormalizer;
use crate::processing::document::Document;
use crate::processing::record::ParsedResume;
use crate::processing::recommendations::{improvement_areas, upskill_suggestions};
use crate::processing::scoring::RatingBreakdown;
use crate::processing::sections::SectionParser;
use crate::processing::skills::SkillExtractor;
use log::{debug, info};
use std::time::Instant;

/// Compiled résumé parser.
///
/// All patterns are built once in [`ResumeParser::new`]; `parse` only reads
/// them, so one instance can be shared between threads.
pub struct ResumeParser {
    contact: ContactExtractor,
    skills: SkillExtractor,
    sections: SectionParser,
}

impl ResumeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            contact: ContactExtractor::new()?,
            skills: SkillExtractor::new()?,
            sections: SectionParser::new(DateNormalizer::new()?)?,
        })
    }

    /// Extract every field from raw résumé text, then rate it and derive
    /// recommendations. Missing fields come back as `None` or empty lists.
    pub fn parse(&self, text: &str) -> Result<ParsedResume> {
        let start_time = Instant::now();
        let document = Document::new(text);
        debug!("Parsing resume: {} chars, {} non-blank lines", text.len(), document.len());

        let mut resume = ParsedResume {
            contact: self.contact.extract(text, &document),
            summary: self.sections.extract_summary(&document),
            education: self.sections.extract_education(&document),
            experience: self.sections.extract_experience(&document),
            core_skills: self.skills.extract_core_skills(&document),
            soft_skills: self.skills.extract_soft_skills(text),
            projects: self.sections.extract_projects(&document),
            certifications: self.sections.extract_certifications(&document),
            achievements: self.sections.extract_achievements(&document),
            ..ParsedResume::default()
        };

        debug!(
            "Extracted {} education, {} experience, {} projects, {} certifications, {} achievements",
            resume.education.len(),
            resume.experience.len(),
            resume.projects.len(),
            resume.certifications.len(),
            resume.achievements.len()
        );
        debug!(
            "Extracted {} core skills and {} soft skills",
            resume.core_skills.len(),
            resume.soft_skills.len()
        );

        let breakdown = RatingBreakdown::for_resume(&resume);
        debug!("Rating breakdown: {:?}", breakdown);

        resume.resume_rating = breakdown.rating();
        resume.improvement_areas = improvement_areas(&resume);
        resume.upskill_suggestions = upskill_suggestions(&resume.core_skills, &resume.experience);

        info!(
            "Resume rated {}/10 in {}ms",
            resume.resume_rating,
            start_time.elapsed().as_millis()
        );

        Ok(resume)
    }
}
