//! Resume section detection.
//!
//! A section starts at a heading line ("Experience", "Work History:",
//! "## Skills") and runs until the next heading. A heading may carry inline
//! content after a colon ("Skills: Rust, Go"), which becomes the first line
//! of the section body.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::BULLET;

/// Kind of resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Contact,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Languages,
    Awards,
    Interests,
    Publications,
    References,
}

const HEADINGS: &[(&str, SectionKind)] = &[
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("career summary", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("contact", SectionKind::Contact),
    ("contact information", SectionKind::Contact),
    ("contact info", SectionKind::Contact),
    ("contact details", SectionKind::Contact),
    ("personal information", SectionKind::Contact),
    ("personal details", SectionKind::Contact),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("core skills", SectionKind::Skills),
    ("skills & tools", SectionKind::Skills),
    ("skills and tools", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("tech stack", SectionKind::Skills),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("relevant experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("academic qualifications", SectionKind::Education),
    ("qualifications", SectionKind::Education),
    ("education & training", SectionKind::Education),
    ("education and training", SectionKind::Education),
    ("certifications", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
    ("licenses & certifications", SectionKind::Certifications),
    ("licenses and certifications", SectionKind::Certifications),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("key projects", SectionKind::Projects),
    ("languages", SectionKind::Languages),
    ("awards", SectionKind::Awards),
    ("honors", SectionKind::Awards),
    ("honours", SectionKind::Awards),
    ("achievements", SectionKind::Awards),
    ("awards & honors", SectionKind::Awards),
    ("interests", SectionKind::Interests),
    ("hobbies", SectionKind::Interests),
    ("publications", SectionKind::Publications),
    ("references", SectionKind::References),
];

/// A run of lines under one heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// What the section holds.
    pub kind: SectionKind,
    /// Heading as written, without decoration or trailing colon.
    pub heading: String,
    /// Section content, lines joined with `\n`.
    pub body: String,
    /// Zero-based line number of the heading.
    pub start_line: usize,
}

/// A heading found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub kind: SectionKind,
    pub text: String,
    /// Content following `Heading:` on the same line.
    pub inline: Option<String>,
}

fn lookup(phrase: &str) -> Option<SectionKind> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    HEADINGS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, kind)| *kind)
}

/// Markdown emphasis such as `**Education**` starts with `*` but is not a bullet.
fn is_bullet_line(line: &str) -> bool {
    match line.strip_prefix('*') {
        Some(rest) => rest.starts_with(char::is_whitespace),
        None => BULLET.is_match(line),
    }
}

/// Recognise a heading line.
///
/// Bulleted lines are never headings, so "- Programming: Python" stays in
/// the section it belongs to.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 80 || is_bullet_line(trimmed) {
        return None;
    }

    let undecorated = trimmed.trim_start_matches('#').trim().trim_matches('*').trim();

    if let Some((head, rest)) = undecorated.split_once(':') {
        let kind = lookup(head)?;
        let rest = rest.trim().trim_matches('*').trim();
        return Some(Heading {
            kind,
            text: head.trim().to_string(),
            inline: (!rest.is_empty()).then(|| rest.to_string()),
        });
    }

    lookup(undecorated).map(|kind| Heading {
        kind,
        text: undecorated.to_string(),
        inline: None,
    })
}

/// Whether a line is a section heading.
pub fn is_heading(line: &str) -> bool {
    parse_heading(line).is_some()
}

/// Split resume text into its sections, in document order.
///
/// Text before the first heading belongs to no section.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut body: Vec<String> = Vec::new();

    let flush = |sections: &mut Vec<Section>, body: &mut Vec<String>| {
        if let Some(last) = sections.last_mut() {
            last.body = body.join("\n").trim_matches('\n').to_string();
        }
        body.clear();
    };

    for (index, line) in text.lines().enumerate() {
        match parse_heading(line) {
            Some(heading) => {
                flush(&mut sections, &mut body);
                body.extend(heading.inline);
                sections.push(Section {
                    kind: heading.kind,
                    heading: heading.text,
                    body: String::new(),
                    start_line: index,
                });
            }
            None if !sections.is_empty() => body.push(line.trim_end().to_string()),
            None => {}
        }
    }
    flush(&mut sections, &mut body);

    debug!(
        "Found {} sections: {:?}",
        sections.len(),
        sections.iter().map(|s| s.kind).collect::<Vec<_>>()
    );

    sections
}

/// Body of every section of `kind`, joined by blank lines.
pub fn section_body(sections: &[Section], kind: SectionKind) -> Option<String> {
    let bodies: Vec<&str> = sections
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.body.as_str())
        .collect();

    (!bodies.is_empty()).then(|| bodies.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading("Experience:").map(|h| h.kind), Some(SectionKind::Experience));
        assert_eq!(parse_heading("  WORK   HISTORY ").map(|h| h.kind), Some(SectionKind::Experience));
        assert_eq!(parse_heading("## Technical Skills").map(|h| h.kind), Some(SectionKind::Skills));
        assert_eq!(parse_heading("**Education**").map(|h| h.kind), Some(SectionKind::Education));
        assert_eq!(parse_heading("Email: jane@example.com"), None);
        assert_eq!(parse_heading("Experienced software engineer with 5+ years"), None);
        assert_eq!(parse_heading("- Skills: Python"), None);
    }

    #[test]
    fn test_emphasis_is_not_a_bullet() {
        assert_eq!(parse_heading("*Projects*").map(|h| h.kind), Some(SectionKind::Projects));
        assert_eq!(parse_heading("**Skills:** Rust").and_then(|h| h.inline), Some("Rust".to_string()));
        assert_eq!(parse_heading("* Education"), None);
        assert_eq!(parse_heading("*   Skills:"), None);
    }

    #[test]
    fn test_inline_heading_content() {
        let heading = parse_heading("Skills: Rust, Go").unwrap();
        assert_eq!(heading.kind, SectionKind::Skills);
        assert_eq!(heading.text, "Skills");
        assert_eq!(heading.inline.as_deref(), Some("Rust, Go"));
    }

    #[test]
    fn test_split_sections() {
        let text = "Jane Doe\n\
                    Skills: Rust, Go\n\
                    - Tools: Git\n\
                    \n\
                    Experience\n\
                    Engineer | Acme | 2020 - Present\n\
                    - Built things\n\
                    \n\
                    Education:\n\
                    B.Sc. Physics";

        let sections = split_sections(text);
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Skills, SectionKind::Experience, SectionKind::Education]
        );

        assert_eq!(sections[0].body, "Rust, Go\n- Tools: Git");
        assert_eq!(sections[0].start_line, 1);
        assert_eq!(sections[1].heading, "Experience");
        assert_eq!(sections[1].body, "Engineer | Acme | 2020 - Present\n- Built things");
        assert_eq!(sections[2].body, "B.Sc. Physics");
    }

    #[test]
    fn test_section_body_joins_repeated_sections() {
        let text = "Skills\nRust\nProjects\nrex\nTechnical Skills\nGo";
        let sections = split_sections(text);
        assert_eq!(section_body(&sections, SectionKind::Skills).as_deref(), Some("Rust\n\nGo"));
        assert_eq!(section_body(&sections, SectionKind::Education), None);
    }
}
