//! Email, phone and web link extraction.

use tracing::trace;

use super::patterns::{EMAIL, LINK, PHONE};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::resume::Link;

const LINK_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"'];

/// Project names that are spelled like a domain but name a library or tool.
const TOOL_DOMAINS: &[&str] = &["socket.io", "draw.io", "pixi.io", "pusher.io", "ionic.io"];

/// Email address extractor.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), 0.95, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Phone number extractor.
///
/// The pattern is deliberately loose, so candidates are kept only when they
/// carry enough digits to be a phone number rather than a year or a date.
pub struct PhoneExtractor {
    min_digits: usize,
}

impl PhoneExtractor {
    pub fn new() -> Self {
        Self { min_digits: 10 }
    }

    /// Set the minimum number of digits a candidate needs.
    pub fn with_min_digits(mut self, min_digits: usize) -> Self {
        self.min_digits = min_digits;
        self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PHONE
            .find_iter(text)
            .filter_map(|m| {
                let candidate = m.as_str().trim();
                let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
                if digits < self.min_digits {
                    trace!("Skipping phone candidate {:?} ({} digits)", candidate, digits);
                    return None;
                }

                let confidence = if candidate.starts_with('+') { 0.9 } else { 0.8 };
                Some(
                    ExtractionMatch::new(candidate.to_string(), confidence, m.as_str())
                        .with_position(m.start(), m.end()),
                )
            })
            .collect()
    }
}

/// Web link extractor (LinkedIn, GitHub, portfolio sites).
pub struct LinkExtractor;

impl LinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LinkExtractor {
    type Output = ExtractionMatch<Link>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        // Blank out emails so their domains don't show up as links.
        // Replacing byte-for-byte keeps match positions valid for `text`.
        let masked = EMAIL.replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()));

        let mut results: Vec<Self::Output> = Vec::new();
        for m in LINK.find_iter(&masked) {
            let url = m.as_str().trim_end_matches(LINK_TRAILING_PUNCTUATION);
            if url.is_empty() {
                continue;
            }

            if !is_link_like(url) {
                continue;
            }

            let key = url.to_lowercase();
            if results.iter().any(|r| r.value.url.to_lowercase() == key) {
                continue;
            }

            let confidence = if key.starts_with("http") || key.starts_with("www.") {
                0.95
            } else {
                0.8
            };
            results.push(
                ExtractionMatch::new(Link::new(url), confidence, m.as_str())
                    .with_position(m.start(), m.start() + url.len()),
            );
        }

        results
    }
}

/// A bare domain with no scheme, `www.` or path reads as a link only when it
/// is written in lowercase and is not a tool name. `Socket.io` in a skills
/// list stays a skill.
fn is_link_like(url: &str) -> bool {
    let lower = url.to_lowercase();
    if lower.starts_with("http") || lower.starts_with("www.") || url.contains('/') {
        return true;
    }
    url == lower && !TOOL_DOMAINS.contains(&lower.as_str())
}

/// Extract the first email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    EmailExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the first phone number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

/// Extract all distinct links from text, in order of appearance.
pub fn extract_links(text: &str) -> Vec<Link> {
    LinkExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::LinkKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_email() {
        let text = "Contact me at jane.doe+jobs@mail.example.co.uk or jane@work.io";
        assert_eq!(extract_email(text), Some("jane.doe+jobs@mail.example.co.uk".to_string()));
        assert_eq!(EmailExtractor::new().extract_all(text).len(), 2);
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_extract_phone() {
        assert_eq!(
            extract_phone("Phone: +1-555-123-4567"),
            Some("+1-555-123-4567".to_string())
        );
        assert_eq!(
            extract_phone("Call (555) 123-4567 today"),
            Some("(555) 123-4567".to_string())
        );
    }

    #[test]
    fn test_phone_ignores_years_and_dates() {
        assert_eq!(extract_phone("Tech Corp | 2019 - 2021"), None);
        assert_eq!(extract_phone("Graduated 05.06.2017"), None);
    }

    #[test]
    fn test_phone_min_digits() {
        let extractor = PhoneExtractor::new().with_min_digits(7);
        let found = extractor.extract("Office 555-1234");
        assert_eq!(found.map(|m| m.value), Some("555-1234".to_string()));
    }

    #[test]
    fn test_extract_links() {
        let text = "Email: john.doe@email.com\n\
                    LinkedIn: linkedin.com/in/johndoe\n\
                    GitHub: https://github.com/johndoe.\n\
                    Portfolio: www.johndoe.dev, and Node.js";

        let links = extract_links(text);
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["linkedin.com/in/johndoe", "https://github.com/johndoe", "www.johndoe.dev"]
        );
        assert_eq!(links[0].kind, LinkKind::LinkedIn);
        assert_eq!(links[1].kind, LinkKind::GitHub);
        assert_eq!(links[2].kind, LinkKind::Website);
    }

    #[test]
    fn test_links_are_deduplicated() {
        let links = extract_links("github.com/jane and GitHub.com/jane again");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_link_positions_point_into_source() {
        let text = "see jane@x.com and example.org";
        let found = LinkExtractor::new().extract(text).unwrap();
        let (start, end) = found.position.unwrap();
        assert_eq!(&text[start..end], "example.org");
    }

    #[test]
    fn test_tool_names_are_not_links() {
        let links = extract_links("Skills: Node.js, Socket.io, Express, socket.io, Draw.io");
        assert_eq!(links, Vec::<Link>::new());

        let urls: Vec<String> = extract_links("Socket.io fan, see github.com/jane and janedoe.dev")
            .into_iter()
            .map(|l| l.url)
            .collect();
        assert_eq!(urls, vec!["github.com/jane".to_string(), "janedoe.dev".to_string()]);
    }
}
