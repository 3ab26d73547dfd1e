//! Line normalization and section scanning

use serde::{Deserialize, Serialize};

/// Boundary lines must be shorter than this
const BOUNDARY_MAX_LEN: usize = 50;

const BULLET_MARKERS: &[char] = &['•', '-'];

/// A résumé as an ordered sequence of trimmed, non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    lines: Vec<String>,
}

/// The section types the scanner knows how to find.
///
/// Heading detection and boundary detection both read their vocabulary from
/// here, so the two cannot disagree about what a section keyword is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Achievements,
}

/// One line as seen by a section fold, along with the lines after it.
#[derive(Debug, Clone, Copy)]
pub struct ScanLine<'a> {
    pub index: usize,
    pub text: &'a str,
    pub following: &'a [String],
}

/// Scan state of a section fold.
#[derive(Debug)]
pub enum SectionState<E> {
    /// No heading seen yet
    Outside,
    /// Inside the section, possibly with an entry still being built
    Inside(Option<E>),
    /// A boundary closed the section; nothing else is read
    Done,
}

/// A parser that consumes the lines of one section.
///
/// Implementors decide what a heading looks like and what to do with each
/// content line; [`Document::fold_section`] drives the state machine.
pub trait SectionFold {
    type Entry;

    fn is_heading(&self, line: &str) -> bool;

    fn is_boundary(&self, line: &str) -> bool {
        is_new_section(line)
    }

    /// Handle a content line. Finished entries go to `closed`; an entry that
    /// may still grow stays in `open`.
    fn step(&self, line: ScanLine<'_>, open: &mut Option<Self::Entry>, closed: &mut Vec<Self::Entry>);
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Achievements,
    ];

    /// Terms that make a short line a heading for this section
    pub fn heading_terms(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &["summary", "profile", "objective", "about", "professional summary"],
            SectionKind::Education => &["education"],
            SectionKind::Experience => &["experience", "employment"],
            SectionKind::Skills => &[
                "skills",
                "technical skills",
                "technologies",
                "programming languages",
                "frontend",
                "backend",
                "tools",
            ],
            SectionKind::Projects => &["project"],
            SectionKind::Certifications => &["certification", "certificate"],
            SectionKind::Achievements => &["achievement"],
        }
    }

    /// Terms that end whatever section is open
    pub fn boundary_terms(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &["summary", "objective"],
            SectionKind::Education => &["education"],
            SectionKind::Experience => &["experience", "employment", "work history"],
            SectionKind::Skills => &["skills", "technical skills", "programming languages"],
            SectionKind::Projects => &["projects"],
            SectionKind::Certifications => &["certifications"],
            SectionKind::Achievements => &["achievements"],
        }
    }

    /// Headings must be strictly shorter than this many characters
    pub fn heading_max_len(self) -> usize {
        match self {
            SectionKind::Education | SectionKind::Projects => 20,
            SectionKind::Experience | SectionKind::Certifications | SectionKind::Achievements => 30,
            SectionKind::Summary | SectionKind::Skills => 50,
        }
    }

    /// The heading term found on `line`, if it is short enough to be a heading
    pub fn heading_term(self, line: &str) -> Option<&'static str> {
        if line.chars().count() >= self.heading_max_len() {
            return None;
        }
        let lower = line.to_lowercase();
        let term = self.heading_terms().iter().copied().find(|term| lower.contains(term))?;

        // "Professional Experience" mentions a summary-ish word but is not a summary
        if self == SectionKind::Summary && (lower.contains("experience") || lower.contains("education")) {
            return None;
        }
        Some(term)
    }

    pub fn is_heading(self, line: &str) -> bool {
        self.heading_term(line).is_some()
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Summary => write!(f, "Summary"),
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Projects => write!(f, "Projects"),
            SectionKind::Certifications => write!(f, "Certifications"),
            SectionKind::Achievements => write!(f, "Achievements"),
        }
    }
}

/// True when `line` looks like the heading of any section.
///
/// Pipe-delimited rows and bullets are content, never boundaries.
pub fn is_new_section(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    if lower.chars().count() >= BOUNDARY_MAX_LEN || lower.contains('|') || starts_with_bullet(&lower) {
        return false;
    }
    SectionKind::ALL
        .iter()
        .flat_map(|kind| kind.boundary_terms())
        .any(|term| lower.contains(term))
}

pub fn starts_with_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

/// Strips a leading bullet marker and the whitespace after it
pub fn strip_bullet(line: &str) -> &str {
    line.strip_prefix(BULLET_MARKERS).unwrap_or(line).trim()
}

impl Document {
    /// Split raw text into trimmed lines, dropping the blank ones
    pub fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines after `index` up to, not including, the next boundary line
    pub fn block_after(&self, index: usize) -> &[String] {
        let rest = self.lines.get(index + 1..).unwrap_or(&[]);
        let end = rest
            .iter()
            .position(|line| is_new_section(line))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    /// Run a section parser over the document.
    ///
    /// Heading lines are checked first and only (re)open the section. Once
    /// inside, the first boundary line flushes the open entry and ends the
    /// scan; end of input flushes it too.
    pub fn fold_section<F: SectionFold>(&self, fold: &F) -> Vec<F::Entry> {
        let mut closed = Vec::new();
        let mut state = SectionState::Outside;

        for (index, text) in self.lines.iter().enumerate() {
            if matches!(state, SectionState::Done) {
                break;
            }
            state = match state {
                SectionState::Done => SectionState::Done,
                SectionState::Inside(open) if fold.is_heading(text) => SectionState::Inside(open),
                _ if fold.is_heading(text) => SectionState::Inside(None),
                SectionState::Outside => SectionState::Outside,
                SectionState::Inside(open) if fold.is_boundary(text) => {
                    closed.extend(open);
                    SectionState::Done
                }
                SectionState::Inside(mut open) => {
                    let line = ScanLine {
                        index,
                        text,
                        following: &self.lines[index + 1..],
                    };
                    fold.step(line, &mut open, &mut closed);
                    SectionState::Inside(open)
                }
            };
        }

        if let SectionState::Inside(open) = state {
            closed.extend(open);
        }
        closed
    }
}
