//! Core (technical) and soft skill extraction

use crate::error::Result;
use crate::processing::document::{Document, SectionKind};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

pub const MAX_CORE_SKILLS: usize = 25;

const SKILL_SEPARATORS: &[char] = &[',', ';', '|', '•', '-'];
const SKILL_MARKERS: &[char] = &[':', '•', '-'];

const SOFT_SKILLS: [&str; 14] = [
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical",
    "creative",
    "adaptable",
    "organized",
    "detail-oriented",
    "collaborative",
    "mentoring",
    "project management",
    "agile",
    "scrum",
];

pub struct SkillExtractor {
    experience_count: Regex,
    soft_matcher: AhoCorasick,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        let soft_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(SOFT_SKILLS)?;

        Ok(Self {
            // "5+", "10-" and similar years-of-experience fragments
            experience_count: Regex::new(r"^\d+[+\-]")?,
            soft_matcher,
        })
    }

    /// Technical skills listed under any skills-like heading.
    ///
    /// Every heading starts its own scan, so nested headings such as
    /// "Frontend:" under "Technical Skills" contribute twice before
    /// deduplication.
    pub fn extract_core_skills(&self, document: &Document) -> Vec<String> {
        let mut candidates = Vec::new();

        for (index, line) in document.lines().iter().enumerate() {
            if let Some(term) = SectionKind::Skills.heading_term(line) {
                debug!("Skills heading '{}' matched on line {}", term, index);
                for skill_line in document.block_after(index) {
                    candidates.extend(self.split_skill_line(skill_line));
                }
            }
        }

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .map(|skill| skill.replace(SKILL_MARKERS, "").trim().to_string())
            .filter(|skill| skill.chars().count() > 1)
            .filter(|skill| seen.insert(skill.clone()))
            .take(MAX_CORE_SKILLS)
            .collect()
    }

    fn split_skill_line<'a>(&'a self, line: &'a str) -> impl Iterator<Item = String> + 'a {
        line.split(SKILL_SEPARATORS)
            .map(str::trim)
            .filter(|skill| (2..30).contains(&skill.chars().count()))
            .filter(|skill| !self.experience_count.is_match(skill))
            .map(str::to_string)
    }

    /// Soft skills mentioned anywhere, in vocabulary order.
    /// Each hit is reported with its first letter capitalized.
    pub fn extract_soft_skills(&self, text: &str) -> Vec<String> {
        let mut found = [false; SOFT_SKILLS.len()];
        for mat in self.soft_matcher.find_overlapping_iter(text) {
            found[mat.pattern().as_usize()] = true;
        }

        SOFT_SKILLS
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| capitalize(skill))
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
