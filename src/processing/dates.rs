//! Date normalization into canonical `YYYY` / `YYYY-MM` tokens

use crate::error::Result;
use crate::processing::record::DateRange;
use regex::Regex;

const MONTHS: [(&str, &str); 23] = [
    ("jan", "01"), ("feb", "02"), ("mar", "03"), ("apr", "04"),
    ("may", "05"), ("jun", "06"), ("jul", "07"), ("aug", "08"),
    ("sep", "09"), ("oct", "10"), ("nov", "11"), ("dec", "12"),
    ("january", "01"), ("february", "02"), ("march", "03"), ("april", "04"),
    ("june", "06"), ("july", "07"), ("august", "08"), ("september", "09"),
    ("october", "10"), ("november", "11"), ("december", "12"),
];

/// One entry of the date-pair priority list
#[derive(Debug, Clone)]
pub struct DatePattern {
    pub label: &'static str,
    pub regex: Regex,
}

/// Finds date ranges in a line and formats single date tokens.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    pairs: Vec<DatePattern>,
    year_only: Regex,
    numeric_month: Regex,
    named_month: Regex,
}

impl DateNormalizer {
    pub fn new() -> Result<Self> {
        let pairs = [
            ("year-year", r"(\d{4})-(\d{4})"),
            ("month-month", r"(\w+ \d{4}) - (\w+ \d{4})"),
            ("numeric-numeric", r"(\d{1,2}/\d{4}) - (\d{1,2}/\d{4})"),
            ("month-present", r"(?i)(\w+ \d{4}) - Present"),
        ]
        .into_iter()
        .map(|(label, pattern)| -> Result<DatePattern> {
            Ok(DatePattern { label, regex: Regex::new(pattern)? })
        })
        .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pairs,
            year_only: Regex::new(r"^\d{4}$")?,
            numeric_month: Regex::new(r"(\d{1,2})/(\d{4})")?,
            named_month: Regex::new(r"(\w+)\s+(\d{4})")?,
        })
    }

    /// The ordered date-pair patterns, highest priority first
    pub fn patterns(&self) -> &[DatePattern] {
        &self.pairs
    }

    /// Pull a start/end pair out of `line`.
    ///
    /// The first pattern that matches anywhere in the line wins. A missing or
    /// "present" end yields `None`.
    pub fn extract_range(&self, line: &str) -> DateRange {
        self.pairs
            .iter()
            .find_map(|pattern| pattern.regex.captures(line))
            .map(|caps| DateRange {
                start: caps.get(1).and_then(|m| self.format_date(m.as_str())),
                end: caps
                    .get(2)
                    .filter(|m| !m.as_str().eq_ignore_ascii_case("present"))
                    .and_then(|m| self.format_date(m.as_str())),
            })
            .unwrap_or_default()
    }

    /// Normalize one date token, or `None` if its shape is not recognized
    pub fn format_date(&self, token: &str) -> Option<String> {
        if token.is_empty() {
            return None;
        }
        if self.year_only.is_match(token) {
            return Some(token.to_string());
        }
        if let Some(caps) = self.numeric_month.captures(token) {
            return Some(format!("{}-{:0>2}", &caps[2], &caps[1]));
        }
        let caps = self.named_month.captures(token)?;
        let month = caps[1].to_lowercase();
        MONTHS
            .iter()
            .find(|(name, _)| *name == month)
            .map(|(_, number)| format!("{}-{}", &caps[2], number))
    }
}
