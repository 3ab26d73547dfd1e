//! Contact field extraction: name, email, phone, location and LinkedIn handle

use crate::error::Result;
use crate::processing::document::Document;
use crate::processing::record::ContactInfo;
use regex::Regex;

/// Only this many leading lines are considered for the name
const NAME_SCAN_LINES: usize = 5;

/// One entry of the location priority list
#[derive(Debug, Clone)]
pub struct LocationPattern {
    pub label: &'static str,
    pub regex: Regex,
}

pub struct ContactExtractor {
    name_regex: Regex,
    email_regex: Regex,
    phone_patterns: Vec<Regex>,
    location_patterns: Vec<LocationPattern>,
    linkedin_regex: Regex,
}

impl ContactExtractor {
    pub fn new() -> Result<Self> {
        let name_regex = Regex::new(r"^[A-Za-z\s.]{2,50}$")?;

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")?;

        // Bare US format first, then with country code, then international
        let phone_patterns = vec![
            Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")?,
            Regex::new(r"\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")?,
            Regex::new(r"\+\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4}")?,
        ];

        // Character classes use [ \t] so a match never runs across lines
        let location_patterns = vec![
            LocationPattern {
                label: "city-state-zip",
                regex: Regex::new(r"([A-Za-z \t]+),[ \t]*([A-Z]{2})[ \t]*\d{5}")?,
            },
            LocationPattern {
                label: "city-state",
                regex: Regex::new(r"([A-Za-z \t]+),[ \t]*([A-Z]{2})")?,
            },
            LocationPattern {
                label: "location-label",
                regex: Regex::new(r"(?i)Location:[ \t]*([A-Za-z \t,]+)")?,
            },
            LocationPattern {
                label: "address-label",
                regex: Regex::new(r"(?i)Address:[ \t]*([A-Za-z \t,]+)")?,
            },
        ];

        let linkedin_regex = Regex::new(
            r"(?i)(?:linkedin\.com/in/|linkedin\.com/profile/view\?id=)([A-Za-z0-9-]+)",
        )?;

        Ok(Self {
            name_regex,
            email_regex,
            phone_patterns,
            location_patterns,
            linkedin_regex,
        })
    }

    /// Run every contact extractor over the document
    pub fn extract(&self, text: &str, document: &Document) -> ContactInfo {
        ContactInfo {
            name: self.extract_name(document),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            location: self.extract_location(text),
            linkedin: self.extract_linkedin(text),
        }
    }

    /// First of the leading lines that reads like a 2-4 word personal name
    pub fn extract_name(&self, document: &Document) -> Option<String> {
        document
            .lines()
            .iter()
            .take(NAME_SCAN_LINES)
            .find(|line| self.looks_like_name(line))
            .cloned()
    }

    fn looks_like_name(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        if lower.contains("resume") || lower.contains("cv") {
            return false;
        }
        if line.contains('@')
            || line.contains("linkedin")
            || line.contains("github")
            || line.contains('(')
            || line.contains('+')
            || lower.contains("phone")
        {
            return false;
        }

        let words = line.split_whitespace().count();
        self.name_regex.is_match(line) && (2..=4).contains(&words)
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_location(&self, text: &str) -> Option<String> {
        self.location_patterns.iter().find_map(|pattern| {
            let caps = pattern.regex.captures(text)?;
            let value = caps.get(1).or_else(|| caps.get(0))?;
            Some(value.as_str().trim().to_string())
        })
    }

    /// Normalizes any recognised profile URL to `linkedin.com/in/<handle>`
    pub fn extract_linkedin(&self, text: &str) -> Option<String> {
        self.linkedin_regex
            .captures(text)
            .map(|caps| format!("linkedin.com/in/{}", &caps[1]))
    }

    pub fn location_patterns(&self) -> &[LocationPattern] {
        &self.location_patterns
    }
}
