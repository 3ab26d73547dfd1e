//! Additive 0-10 résumé rating

use crate::processing::record::ParsedResume;
use serde::{Deserialize, Serialize};

pub const MAX_RATING: u8 = 10;

/// Points credited per rubric category. Only the highest qualifying tier of
/// each category counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingBreakdown {
    pub contact: f64,
    pub summary: f64,
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
    pub projects: f64,
    pub certifications: f64,
    pub achievements: f64,
}

impl RatingBreakdown {
    pub fn for_resume(resume: &ParsedResume) -> Self {
        let contact = &resume.contact;
        let contact_points = [&contact.name, &contact.email, &contact.phone, &contact.location]
            .iter()
            .filter(|field| field.is_some())
            .count() as f64
            * 0.5;

        let summary = match resume.summary.as_deref().map(|s| s.chars().count()) {
            Some(len) if len >= 100 => 2.0,
            Some(len) if len >= 50 => 1.5,
            Some(_) => 1.0,
            None => 0.0,
        };

        let experience = match resume.experience.len() {
            0 => 0.0,
            1 => 1.0,
            2 => 2.0,
            _ => 3.0,
        };

        let education = if resume.education.is_empty() { 0.0 } else { 1.0 };

        let skills = match resume.core_skills.len() {
            0 => 0.0,
            1..=4 => 0.5,
            5..=9 => 1.0,
            _ => 1.5,
        };

        Self {
            contact: contact_points,
            summary,
            experience,
            education,
            skills,
            projects: two_tier(resume.projects.len()),
            certifications: two_tier(resume.certifications.len()),
            achievements: match resume.achievements.len() {
                0 => 0.0,
                1 | 2 => 0.5,
                _ => 1.0,
            },
        }
    }

    pub fn total(&self) -> f64 {
        self.contact
            + self.summary
            + self.experience
            + self.education
            + self.skills
            + self.projects
            + self.certifications
            + self.achievements
    }

    /// Total rounded half-up and capped at [`MAX_RATING`]
    pub fn rating(&self) -> u8 {
        (self.total().round() as u8).min(MAX_RATING)
    }
}

/// 1 point for two or more, half a point for one
fn two_tier(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 0.5,
        _ => 1.0,
    }
}

pub fn rate_resume(resume: &ParsedResume) -> u8 {
    RatingBreakdown::for_resume(resume).rating()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::record::{CertificationEntry, DateRange, EducationEntry, ExperienceEntry, ProjectEntry};

    fn job() -> ExperienceEntry {
        ExperienceEntry::new("Engineer".into(), "Acme".into(), DateRange::default())
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        assert_eq!(rate_resume(&ParsedResume::default()), 0);
    }

    #[test]
    fn test_contact_only_rounds_half_up() {
        let mut resume = ParsedResume::default();
        resume.contact.name = Some("Jane Doe".into());
        resume.contact.email = Some("jane@x.com".into());
        resume.contact.phone = Some("(555) 111-2222".into());

        let breakdown = RatingBreakdown::for_resume(&resume);
        assert_eq!(breakdown.contact, 1.5);
        assert_eq!(breakdown.rating(), 2);
    }

    #[test]
    fn test_summary_tiers() {
        let mut resume = ParsedResume::default();

        resume.summary = Some("x".repeat(49));
        assert_eq!(RatingBreakdown::for_resume(&resume).summary, 1.0);
        resume.summary = Some("x".repeat(50));
        assert_eq!(RatingBreakdown::for_resume(&resume).summary, 1.5);
        resume.summary = Some("x".repeat(100));
        assert_eq!(RatingBreakdown::for_resume(&resume).summary, 2.0);
    }

    #[test]
    fn test_full_resume_is_capped() {
        let resume = ParsedResume {
            contact: crate::processing::record::ContactInfo {
                name: Some("Jane Doe".into()),
                email: Some("jane@x.com".into()),
                phone: Some("555-111-2222".into()),
                location: Some("Austin".into()),
                linkedin: None,
            },
            summary: Some("x".repeat(120)),
            education: vec![EducationEntry {
                degree: "BS".into(),
                institution: "MIT".into(),
                dates: DateRange::default(),
            }],
            experience: vec![job(), job(), job()],
            core_skills: (0..12).map(|i| format!("skill{}", i)).collect(),
            projects: vec![
                ProjectEntry { name: "a".into(), description: String::new(), tech_stack: vec![], link: None };
                2
            ],
            certifications: vec![
                CertificationEntry { name: "c".into(), authority: None, year: None };
                2
            ],
            achievements: vec!["a".into(), "b".into(), "c".into()],
            ..ParsedResume::default()
        };

        let breakdown = RatingBreakdown::for_resume(&resume);
        assert_eq!(breakdown.total(), 12.5);
        assert_eq!(breakdown.rating(), MAX_RATING);
    }

    #[test]
    fn test_tiers_for_lists() {
        let mut resume = ParsedResume::default();
        resume.experience = vec![job(), job()];
        resume.core_skills = (0..5).map(|i| i.to_string()).collect();
        resume.achievements = vec!["x".into()];

        let breakdown = RatingBreakdown::for_resume(&resume);
        assert_eq!(breakdown.experience, 2.0);
        assert_eq!(breakdown.skills, 1.0);
        assert_eq!(breakdown.achievements, 0.5);
        assert_eq!(breakdown.rating(), 4);
    }
}
