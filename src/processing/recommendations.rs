//! Improvement areas and upskilling suggestions derived from a parsed résumé

use crate::processing::record::{ExperienceEntry, ParsedResume};
use serde::{Deserialize, Serialize};

pub const MAX_IMPROVEMENT_AREAS: usize = 8;
pub const MAX_UPSKILL_SUGGESTIONS: usize = 8;

const WEB_DEV_KEYWORDS: &[&str] = &["javascript", "react", "html", "css", "vue", "angular"];
const BACKEND_KEYWORDS: &[&str] = &["node", "python", "java", "api", "django", "flask", "spring"];
const CLOUD_KEYWORDS: &[&str] = &["aws", "azure", "cloud", "docker", "kubernetes"];
const DATA_KEYWORDS: &[&str] = &["sql", "python", "analytics", "data", "machine learning", "tensorflow"];
const MOBILE_KEYWORDS: &[&str] = &["react native", "flutter", "ios", "android"];
const SENIOR_TITLES: &[&str] = &["senior", "lead", "principal"];

/// Capability flags inferred from the core skill list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    pub web_dev: bool,
    pub backend: bool,
    pub cloud: bool,
    pub data: bool,
    pub mobile: bool,
}

/// Lower-cased view of the skill list for substring checks
struct SkillSet(Vec<String>);

impl SkillSet {
    fn new(skills: &[String]) -> Self {
        Self(skills.iter().map(|s| s.to_lowercase()).collect())
    }

    fn mentions(&self, keyword: &str) -> bool {
        self.0.iter().any(|skill| skill.contains(keyword))
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.mentions(keyword))
    }
}

impl CapabilityFlags {
    pub fn from_skills(skills: &[String]) -> Self {
        let skills = SkillSet::new(skills);
        Self {
            web_dev: skills.mentions_any(WEB_DEV_KEYWORDS),
            backend: skills.mentions_any(BACKEND_KEYWORDS),
            cloud: skills.mentions_any(CLOUD_KEYWORDS),
            data: skills.mentions_any(DATA_KEYWORDS),
            mobile: skills.mentions_any(MOBILE_KEYWORDS),
        }
    }
}

/// True when any job title reads senior, lead or principal
pub fn is_senior(experience: &[ExperienceEntry]) -> bool {
    experience.iter().any(|job| {
        let title = job.title.to_lowercase();
        SENIOR_TITLES.iter().any(|level| title.contains(level))
    })
}

/// Checklist of gaps, most fundamental first. Order decides which messages
/// survive the cap.
pub fn improvement_areas(resume: &ParsedResume) -> Vec<String> {
    let contact = &resume.contact;
    let summary_len = resume.summary.as_deref().map_or(0, |s| s.chars().count());
    let has_quantified = resume.experience.iter().any(ExperienceEntry::has_quantified_achievement);

    let checks: [(bool, &str); 12] = [
        (contact.name.is_none(), "Add a clear, professional name at the top of your resume"),
        (contact.email.is_none(), "Include a professional email address for contact"),
        (contact.phone.is_none(), "Add a phone number for direct contact"),
        (contact.location.is_none(), "Include your location (city, state) for geographic context"),
        (
            summary_len < 100,
            "Add a compelling professional summary (100+ words) highlighting your key strengths, experience, and career objectives",
        ),
        (
            resume.experience.is_empty(),
            "Include detailed work experience with specific achievements and quantifiable results",
        ),
        (
            resume.experience.len() == 1,
            "Add more work experience entries to demonstrate career progression and growth",
        ),
        (
            resume.core_skills.len() < 10,
            "Expand your technical skills section with relevant technologies, programming languages, and tools (aim for 10+ skills)",
        ),
        (
            resume.education.is_empty(),
            "Include your educational background with degree, institution, and graduation dates",
        ),
        (
            resume.projects.len() < 2,
            "Add 2-3 relevant projects to demonstrate practical application of your skills and technologies",
        ),
        (
            resume.certifications.is_empty(),
            "Consider adding professional certifications to strengthen your credentials and show continuous learning",
        ),
        (
            resume.achievements.len() < 3,
            "Include more specific achievements with quantifiable metrics (e.g., 'Increased performance by 40%', 'Led team of 8 developers')",
        ),
    ];

    let mut areas: Vec<String> = checks
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, message)| message.to_string())
        .collect();

    if !has_quantified {
        areas.push("Add more quantified achievements with specific metrics and numbers to demonstrate impact".to_string());
    }

    areas.truncate(MAX_IMPROVEMENT_AREAS);
    areas
}

/// Learning suggestions chosen from the capability flags and seniority
pub fn upskill_suggestions(skills: &[String], experience: &[ExperienceEntry]) -> Vec<String> {
    let flags = CapabilityFlags::from_skills(skills);
    let known = SkillSet::new(skills);
    let mut suggestions: Vec<&str> = Vec::new();

    if flags.web_dev {
        if !known.mentions("typescript") {
            suggestions.push("Master TypeScript for type-safe JavaScript development and better code maintainability");
        }
        if !known.mentions("next") {
            suggestions.push("Learn Next.js for server-side rendering, static site generation, and full-stack React applications");
        }
        if !known.mentions("tailwind") {
            suggestions.push("Adopt Tailwind CSS for utility-first styling and rapid UI development");
        }
    }

    if flags.backend {
        if !known.mentions("microservices") {
            suggestions.push("Study microservices architecture patterns and containerization with Docker and Kubernetes");
        }
        if !known.mentions("graphql") {
            suggestions.push("Learn GraphQL for efficient API design, data fetching, and better client-server communication");
        }
        if !known.mentions("redis") {
            suggestions.push("Master Redis for caching, session management, and real-time applications");
        }
    }

    if !flags.cloud {
        suggestions.push("Obtain AWS Solutions Architect or Azure Fundamentals certification for cloud infrastructure expertise");
        suggestions.push("Learn Docker and Kubernetes for containerization and orchestration of modern applications");
    } else if !known.mentions("terraform") {
        suggestions.push("Learn Terraform for Infrastructure as Code (IaC) and automated cloud resource management");
    }

    if flags.data {
        suggestions.push("Advance your machine learning skills with PyTorch or TensorFlow for deep learning applications");
        suggestions.push("Learn Apache Spark for big data processing and distributed computing");
        if !known.mentions_any(&["tableau", "power bi"]) {
            suggestions.push("Master data visualization tools like Tableau, Power BI, or D3.js for business intelligence");
        }
    } else {
        suggestions.push("Explore Python for data science with pandas, NumPy, and scikit-learn for analytics and machine learning");
    }

    if flags.web_dev && !flags.mobile {
        suggestions.push("Expand to mobile development with React Native or Flutter for cross-platform applications");
    }

    if !known.mentions_any(&["ai", "machine learning"]) {
        suggestions.push("Learn AI/ML fundamentals and prompt engineering for ChatGPT, Claude, and other LLMs");
    }

    if !known.mentions("security") {
        suggestions.push("Study cybersecurity fundamentals and secure coding practices for application security");
    }

    if is_senior(experience) {
        suggestions.push("Develop system design and architecture skills for scalable, high-performance applications");
        suggestions.push("Enhance technical leadership skills through courses on engineering management and team building");
    } else {
        suggestions.push("Build leadership experience through mentoring junior developers and leading small projects");
    }

    suggestions
        .into_iter()
        .take(MAX_UPSKILL_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::record::DateRange;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn job(title: &str) -> ExperienceEntry {
        ExperienceEntry::new(title.to_string(), "Acme".to_string(), DateRange::default())
    }

    #[test]
    fn test_capability_flags() {
        let flags = CapabilityFlags::from_skills(&skills(&["React", "PostgreSQL", "AWS Lambda"]));

        assert!(flags.web_dev);
        assert!(!flags.backend);
        assert!(flags.cloud);
        assert!(flags.data);
        assert!(!flags.mobile);
        assert_eq!(CapabilityFlags::from_skills(&[]), CapabilityFlags::default());
    }

    #[test]
    fn test_empty_resume_hits_the_cap() {
        let areas = improvement_areas(&ParsedResume::default());

        assert_eq!(areas.len(), MAX_IMPROVEMENT_AREAS);
        assert!(areas[0].contains("name"));
        assert!(areas[4].contains("summary"));
        assert!(areas[5].contains("work experience"));
        assert!(areas[7].contains("educational background"));
    }

    #[test]
    fn test_single_job_asks_for_more_entries() {
        let mut resume = ParsedResume::default();
        resume.experience = vec![job("Engineer")];

        let areas = improvement_areas(&resume);
        assert!(areas.iter().any(|a| a.contains("more work experience entries")));
        assert!(!areas.iter().any(|a| a.contains("Include detailed work experience")));
    }

    #[test]
    fn test_quantified_check_only_fires_without_numbers() {
        let mut resume = ParsedResume::default();
        resume.contact.name = Some("Jane Doe".into());
        resume.contact.email = Some("jane@x.com".into());
        resume.contact.phone = Some("555-111-2222".into());
        resume.contact.location = Some("Austin".into());
        resume.summary = Some("x".repeat(120));
        resume.core_skills = (0..10).map(|i| i.to_string()).collect();
        resume.experience = vec![job("Engineer"), job("Engineer")];

        let areas = improvement_areas(&resume);
        assert!(areas.last().unwrap().contains("quantified achievements"));

        resume.experience[0].achievements.push("Cut costs by 30%".into());
        let areas = improvement_areas(&resume);
        assert!(!areas.iter().any(|a| a.contains("quantified achievements with specific metrics and numbers")));
    }

    #[test]
    fn test_web_developer_suggestions() {
        let suggestions = upskill_suggestions(&skills(&["JavaScript", "TypeScript", "CSS"]), &[job("Engineer")]);

        assert!(!suggestions.iter().any(|s| s.contains("Master TypeScript")));
        assert!(suggestions[0].starts_with("Learn Next.js"));
        assert!(suggestions.iter().any(|s| s.contains("Tailwind")));
        assert!(suggestions.iter().any(|s| s.contains("AWS Solutions Architect")));
        assert!(suggestions.len() <= MAX_UPSKILL_SUGGESTIONS);
    }

    #[test]
    fn test_seniority_selects_leadership_track() {
        let senior = upskill_suggestions(&[], &[job("Principal Engineer")]);
        assert!(senior.iter().any(|s| s.contains("system design")));

        let junior = upskill_suggestions(&[], &[job("Engineer")]);
        assert!(junior.iter().any(|s| s.contains("mentoring junior developers")));
    }

    #[test]
    fn test_cloud_skills_suggest_terraform() {
        let suggestions = upskill_suggestions(&skills(&["Kubernetes"]), &[]);

        assert_eq!(
            suggestions[0],
            "Learn Terraform for Infrastructure as Code (IaC) and automated cloud resource management"
        );
        assert!(suggestions.iter().any(|s| s.contains("pandas")));
    }

    #[test]
    fn test_suggestions_capped() {
        let list = skills(&["React", "Python", "SQL"]);
        assert_eq!(upskill_suggestions(&list, &[job("Senior Engineer")]).len(), MAX_UPSKILL_SUGGESTIONS);
    }
}
