//! Work experience entries and total years of experience.

use tracing::{debug, trace};

use super::patterns::{DATE_RANGE, TITLE_SEPARATOR, YEAR};
use super::sections::{section_body, split_sections, Section, SectionKind};
use super::terms::strip_bullet;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::resume::ExperienceEntry;

const SEGMENT_TRIM: &[char] = &[',', ';', ':', '-', '–', '—', '(', ')', ' '];

/// Split a section body into job blocks.
///
/// Blank lines separate jobs. Without blank lines, a line carrying a date
/// range starts a new job once the current one already has its dates.
fn split_blocks(body: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    let has_blank = lines.iter().any(|l| l.is_empty());

    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_dated = false;

    for line in lines {
        let dated = DATE_RANGE.is_match(line);
        let starts_block = if has_blank {
            line.is_empty()
        } else {
            dated && current_dated
        };

        if starts_block && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
            current_dated = false;
        }
        if !line.is_empty() {
            current.push(line);
            current_dated |= dated;
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Split a title line into (title, company) once dates are removed.
fn split_title_line(line: &str) -> (String, String) {
    let without_ranges = DATE_RANGE.replace_all(line, "");
    let without_dates = YEAR.replace_all(&without_ranges, "");

    let mut parts = TITLE_SEPARATOR
        .split(&without_dates)
        .map(|p| p.trim_matches(SEGMENT_TRIM))
        .filter(|p| !p.is_empty());

    let title = parts.next().unwrap_or_default().to_string();
    let company = parts.next().unwrap_or_default().to_string();
    (title, company)
}

/// Extractor for entries in the Experience section.
pub struct ExperienceExtractor;

impl ExperienceExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_block(&self, block: &[&str]) -> Option<ExtractionMatch<ExperienceEntry>> {
        let (first, rest) = block.split_first()?;
        let title_line = strip_bullet(first);
        let (title, company) = split_title_line(title_line);

        let joined = block.join("\n");
        let duration = DATE_RANGE
            .find(&joined)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let description = rest
            .iter()
            .map(|line| strip_bullet(line))
            .filter(|line| !DATE_RANGE.replace_all(line, "").trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let confidence = match (company.is_empty(), duration.is_empty()) {
            (false, false) => 0.9,
            (false, true) | (true, false) => 0.7,
            (true, true) => 0.5,
        };

        trace!("Experience block {:?} -> {:?} at {:?}", first, title, company);

        Some(ExtractionMatch::new(
            ExperienceEntry {
                title,
                company,
                duration,
                description,
            },
            confidence,
            joined,
        ))
    }

    /// Entries from already-split sections.
    pub fn extract_from_sections(&self, sections: &[Section]) -> Vec<ExtractionMatch<ExperienceEntry>> {
        let Some(body) = section_body(sections, SectionKind::Experience) else {
            debug!("No experience section found");
            return Vec::new();
        };

        let results: Vec<_> = split_blocks(&body)
            .iter()
            .filter_map(|block| self.parse_block(block))
            .collect();

        debug!("Extracted {} experience entries", results.len());
        results
    }
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ExperienceExtractor {
    type Output = ExtractionMatch<ExperienceEntry>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract_from_sections(&split_sections(text))
    }
}

/// Sum of `end - start` over every date range in the text.
///
/// "Present", "current" and "now" resolve to `reference_year`. Ranges that
/// end before they start are skipped. `None` when no range counts.
pub fn total_experience_years(text: &str, reference_year: i32) -> Option<u32> {
    let mut total: u32 = 0;
    let mut counted = 0;

    for caps in DATE_RANGE.captures_iter(text) {
        let Ok(start) = caps[1].parse::<i32>() else {
            continue;
        };
        let end = match caps[2].parse::<i32>() {
            Ok(year) => year,
            Err(_) => reference_year,
        };

        if end < start {
            trace!("Ignoring inverted range {:?}", &caps[0]);
            continue;
        }

        total += (end - start) as u32;
        counted += 1;
    }

    debug!("Total experience: {} years over {} ranges", total, counted);
    (counted > 0).then_some(total)
}

/// Text to measure experience over: the Experience section, else everything.
pub fn experience_scope(text: &str, sections: &[Section]) -> String {
    section_body(sections, SectionKind::Experience).unwrap_or_else(|| text.to_string())
}
