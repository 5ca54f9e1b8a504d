//! Candidate name detection.

use tracing::debug;

use super::patterns::{LABELED_NAME, NAME_TOKEN};
use super::sections::is_heading;
use super::{ExtractionMatch, FieldExtractor};

/// Words that mark a line as a job title or document title rather than a name.
const NON_NAME_WORDS: &[&str] = &[
    "resume", "résumé", "curriculum", "vitae", "cv", "engineer", "developer", "manager",
    "analyst", "consultant", "designer", "architect", "scientist", "intern", "director",
    "lead", "senior", "junior", "principal", "staff", "specialist", "administrator",
    "officer", "software", "data", "student", "professional", "technician",
];

/// Something that can find the candidate's name in resume text.
///
/// The rule-based recognizer is the default; a statistical tagger can be
/// plugged into the parser through this trait.
pub trait NameRecognizer: Send + Sync {
    /// Find the candidate name.
    fn recognize(&self, text: &str) -> Option<ExtractionMatch<String>>;
}

/// Heuristic name recognizer over the first lines of a resume.
pub struct RuleNameRecognizer {
    scan_lines: usize,
}

impl RuleNameRecognizer {
    pub fn new() -> Self {
        Self { scan_lines: 5 }
    }

    /// Set how many leading lines are searched.
    pub fn with_scan_lines(mut self, scan_lines: usize) -> Self {
        self.scan_lines = scan_lines;
        self
    }

    /// Leading lines with their byte offsets in `text`.
    fn leading_lines<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        let mut offset = 0;
        text.split('\n')
            .take(self.scan_lines)
            .map(|line| {
                let start = offset;
                offset += line.len() + 1;
                (start, line)
            })
            .collect()
    }
}

impl Default for RuleNameRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a line reads like a person's name: two to four capitalised words.
pub fn looks_like_name(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if is_heading(line) {
        return false;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&tokens.len()) {
        return false;
    }

    let all_initials = tokens.iter().all(|t| t.trim_end_matches('.').chars().count() == 1);
    !all_initials
        && tokens.iter().all(|t| NAME_TOKEN.is_match(t))
        && !tokens
            .iter()
            .any(|t| NON_NAME_WORDS.contains(&t.to_lowercase().trim_end_matches(',')))
}

impl FieldExtractor for RuleNameRecognizer {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Candidates in priority order: labelled, name-like, then any short line.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines = self.leading_lines(text);
        let mut results = Vec::new();

        for &(offset, line) in &lines {
            if let Some(m) = LABELED_NAME.captures(line).and_then(|caps| caps.get(1)) {
                let value = m.as_str().trim();
                if value.is_empty() {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(value.to_string(), 0.95, line.trim())
                        .with_position(offset + m.start(), offset + m.end()),
                );
            }
        }

        for &(offset, line) in &lines {
            if looks_like_name(line) {
                let value = line.trim();
                let start = offset + (line.len() - line.trim_start().len());
                results.push(
                    ExtractionMatch::new(value.to_string(), 0.85, value)
                        .with_position(start, start + value.len()),
                );
            }
        }

        for &(offset, line) in &lines {
            let value = line.trim();
            if !value.is_empty()
                && value.split_whitespace().count() <= 4
                && !value.chars().any(|c| c.is_ascii_digit())
            {
                let start = offset + (line.len() - line.trim_start().len());
                results.push(
                    ExtractionMatch::new(value.to_string(), 0.5, value)
                        .with_position(start, start + value.len()),
                );
            }
        }

        results
    }
}

impl NameRecognizer for RuleNameRecognizer {
    fn recognize(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let found = self.extract(text);
        if let Some(m) = &found {
            debug!("Name candidate {:?} (confidence {:.2})", m.value, m.confidence);
        }
        found
    }
}
