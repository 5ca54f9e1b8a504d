//! Education entries and highest education level.

use tracing::debug;

use super::patterns::{DATE_RANGE, YEAR};
use super::sections::{section_body, split_sections, Section, SectionKind};
use super::terms::{contains_any_term, strip_bullet};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::resume::{EducationEntry, EducationLevel};

/// Keywords that mark a line as naming a degree.
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "bachelors", "bachelor's", "master", "masters", "master's", "phd", "ph.d",
    "doctorate", "b.tech", "m.tech", "b.sc", "m.sc", "b.e", "m.e", "mba", "degree", "diploma",
    "certification",
];

const PHD_TERMS: &[&str] = &["phd", "ph.d", "doctorate"];
const MASTERS_TERMS: &[&str] = &["master", "masters", "m.tech", "m.sc", "mba"];
const BACHELORS_TERMS: &[&str] = &["bachelor", "bachelors", "b.tech", "b.sc", "b.e"];
const DIPLOMA_TERMS: &[&str] = &["diploma"];

fn is_degree_line(line: &str) -> bool {
    contains_any_term(&line.to_lowercase(), DEGREE_KEYWORDS)
}

/// Last year mentioned on a line (the graduation year of a range).
fn last_year(line: &str) -> Option<&str> {
    YEAR.find_iter(line).last().map(|m| m.as_str())
}

/// Institution name from a line: dates removed, first `|`/`,` segment kept.
fn clean_institution(line: &str) -> String {
    let without_ranges = DATE_RANGE.replace_all(line, "");
    let without_years = YEAR.replace_all(&without_ranges, "");

    without_years
        .split(['|', ','])
        .map(|segment| segment.trim().trim_matches(['-', '–', '—', '(', ')']).trim())
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Extractor for entries in the Education section.
pub struct EducationExtractor;

impl EducationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Entries from already-split sections.
    pub fn extract_from_sections(&self, sections: &[Section]) -> Vec<ExtractionMatch<EducationEntry>> {
        let Some(body) = section_body(sections, SectionKind::Education) else {
            debug!("No education section found");
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut current: Option<(EducationEntry, Vec<String>)> = None;

        for raw in body.lines() {
            let line = strip_bullet(raw);
            if line.is_empty() {
                continue;
            }

            if is_degree_line(line) {
                if let Some((entry, source)) = current.take() {
                    results.push(finish(entry, source));
                }

                // "Degree | Institution | Years" on a single line
                let mut parts = line.splitn(2, '|');
                let degree = parts.next().unwrap_or_default().trim().to_string();
                let institution = parts.next().map(clean_institution).unwrap_or_default();

                let entry = EducationEntry {
                    degree,
                    institution,
                    year: last_year(line).unwrap_or_default().to_string(),
                };
                current = Some((entry, vec![line.to_string()]));
                continue;
            }

            // Lines before the first degree are ignored
            let Some((entry, source)) = current.as_mut() else {
                continue;
            };

            if let Some(year) = last_year(line) {
                entry.year = year.to_string();
            }
            if entry.institution.is_empty() {
                entry.institution = clean_institution(line);
            }
            source.push(line.to_string());
        }

        if let Some((entry, source)) = current {
            results.push(finish(entry, source));
        }

        debug!("Extracted {} education entries", results.len());
        results
    }
}

fn finish(entry: EducationEntry, source: Vec<String>) -> ExtractionMatch<EducationEntry> {
    let confidence = match (entry.institution.is_empty(), entry.year.is_empty()) {
        (false, false) => 0.9,
        (false, true) | (true, false) => 0.7,
        (true, true) => 0.5,
    };
    ExtractionMatch::new(entry, confidence, source.join("\n"))
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EducationExtractor {
    type Output = ExtractionMatch<EducationEntry>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract_from_sections(&split_sections(text))
    }
}

/// Highest education level mentioned in a piece of text.
pub fn detect_education_level(text: &str) -> EducationLevel {
    let lower = text.to_lowercase();

    if contains_any_term(&lower, PHD_TERMS) {
        EducationLevel::Phd
    } else if contains_any_term(&lower, MASTERS_TERMS) {
        EducationLevel::Masters
    } else if contains_any_term(&lower, BACHELORS_TERMS) {
        EducationLevel::Bachelors
    } else if contains_any_term(&lower, DIPLOMA_TERMS) {
        EducationLevel::Diploma
    } else {
        EducationLevel::NotSpecified
    }
}

/// Highest education level, searching the Education section when there is one.
pub fn highest_education(text: &str, sections: &[Section]) -> EducationLevel {
    match section_body(sections, SectionKind::Education) {
        Some(body) => detect_education_level(&body),
        None => detect_education_level(text),
    }
}
