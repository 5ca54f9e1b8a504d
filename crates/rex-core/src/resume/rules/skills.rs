//! Technical skill extraction.

use tracing::debug;

use super::patterns::{LABEL_PREFIX, SKILL_SEPARATOR};
use super::sections::{section_body, split_sections, Section, SectionKind};
use super::terms::{find_term, strip_bullet, title_case};
use super::{ExtractionMatch, FieldExtractor};

/// Built-in skill vocabulary, in display form.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python", "Java", "JavaScript", "C++", "C#", "Ruby", "PHP", "Swift", "Kotlin",
    "React", "Angular", "Vue", "Node.js", "Django", "Flask", "Spring", "Express",
    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "Oracle", "NoSQL",
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Jenkins",
    "Git", "Agile", "Scrum", "Jira", "CI/CD", "DevOps", "Microservices",
    "Machine Learning", "Deep Learning", "AI", "NLP", "Computer Vision",
    "Pandas", "NumPy", "TensorFlow", "PyTorch", "scikit-learn",
    "HTML", "CSS", "TypeScript", "REST API", "GraphQL", "Kafka", "Spark",
];

/// Skill extractor combining vocabulary matching with the Skills section.
pub struct SkillExtractor {
    /// (ASCII-lowercased key, display form)
    vocabulary: Vec<(String, String)>,
    min_len: usize,
    max_len: usize,
}

impl SkillExtractor {
    /// Create an extractor with the built-in vocabulary.
    pub fn new() -> Self {
        Self {
            vocabulary: SKILL_VOCABULARY
                .iter()
                .map(|s| (s.to_ascii_lowercase(), s.to_string()))
                .collect(),
            min_len: 2,
            max_len: 30,
        }
    }

    /// Add skills to the vocabulary. Entries already known are ignored.
    pub fn with_extra_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for skill in skills {
            let display = skill.as_ref().trim();
            if display.is_empty() {
                continue;
            }
            let key = display.to_ascii_lowercase();
            if !self.vocabulary.iter().any(|(k, _)| *k == key) {
                self.vocabulary.push((key, display.to_string()));
            }
        }
        self
    }

    /// Section items are kept when `min < len < max` (in characters).
    pub fn with_length_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    fn canonical(&self, item: &str) -> Option<&str> {
        let key = item.to_ascii_lowercase();
        self.vocabulary
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, display)| display.as_str())
    }

    /// Vocabulary terms found anywhere in the text.
    fn match_vocabulary(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        // ASCII lowercasing keeps byte offsets aligned with `text`. Keys are
        // folded the same way, so non-ASCII letters must match case exactly.
        let lower = text.to_ascii_lowercase();

        let mut found: Vec<ExtractionMatch<String>> = self
            .vocabulary
            .iter()
            .filter_map(|(key, display)| {
                let start = find_term(&lower, key)?;
                let end = start + key.len();
                Some(
                    ExtractionMatch::new(display.clone(), 0.9, &text[start..end])
                        .with_position(start, end),
                )
            })
            .collect();

        found.sort_by_key(|m| m.position);
        found
    }

    /// Items listed in the Skills section.
    fn section_items(&self, body: &str) -> Vec<ExtractionMatch<String>> {
        let mut items = Vec::new();

        for line in body.lines() {
            let line = strip_bullet(line);
            let line = match LABEL_PREFIX.find(line) {
                Some(m) => &line[m.end()..],
                None => line,
            };

            for raw in SKILL_SEPARATOR.split(line) {
                let item = raw.trim().trim_end_matches('.').trim();
                let len = item.chars().count();
                if len <= self.min_len || len >= self.max_len {
                    continue;
                }
                if item.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
                    continue;
                }

                let value = match self.canonical(item) {
                    Some(display) => display.to_string(),
                    None => title_case(item),
                };
                items.push(ExtractionMatch::new(value, 0.75, raw.trim()));
            }
        }

        items
    }

    /// Extract skills from already-split sections plus the full text.
    pub fn extract_from_sections(&self, text: &str, sections: &[Section]) -> Vec<ExtractionMatch<String>> {
        let mut matches = self.match_vocabulary(text);
        let vocabulary_hits = matches.len();

        if let Some(body) = section_body(sections, SectionKind::Skills) {
            matches.extend(self.section_items(&body));
        }

        debug!(
            "Skills: {} vocabulary hits, {} section items",
            vocabulary_hits,
            matches.len() - vocabulary_hits
        );

        dedup_sorted(matches)
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first match per skill (case-insensitive), sorted case-insensitively.
fn dedup_sorted(matches: Vec<ExtractionMatch<String>>) -> Vec<ExtractionMatch<String>> {
    let mut unique: Vec<ExtractionMatch<String>> = Vec::with_capacity(matches.len());
    for m in matches {
        let key = m.value.to_lowercase();
        if !unique.iter().any(|u| u.value.to_lowercase() == key) {
            unique.push(m);
        }
    }

    unique.sort_by(|a, b| {
        a.value
            .to_lowercase()
            .cmp(&b.value.to_lowercase())
            .then_with(|| a.value.cmp(&b.value))
    });
    unique
}

impl FieldExtractor for SkillExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let sections = split_sections(text);
        self.extract_from_sections(text, &sections)
    }
}

/// Extract skills from text with the built-in vocabulary.
pub fn extract_skills(text: &str) -> Vec<String> {
    SkillExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vocabulary_uses_display_form() {
        let skills = extract_skills("Built services in node.js and postgresql on aws with ci/cd");
        assert_eq!(skills, vec!["AWS", "CI/CD", "Node.js", "PostgreSQL"]);
    }

    #[test]
    fn test_vocabulary_respects_word_boundaries() {
        let skills = extract_skills("Wrote JavaScript for RESTful services, mastered Gitlab");
        assert_eq!(skills, vec!["JavaScript"]);
    }

    #[test]
    fn test_section_items() {
        let text = "Skills:\n- Languages: rust, Go; python\n- Tools: git | Terraform • Ansible\n\nExperience\nNothing";
        let skills = extract_skills(text);
        assert_eq!(
            skills,
            vec!["Ansible", "Git", "Python", "Rust", "Terraform"]
        );
    }

    #[test]
    fn test_section_item_length_bounds() {
        let text = "Skills\nGo, R, an extraordinarily long description of a skill";
        assert!(extract_skills(text).is_empty());

        let loose = SkillExtractor::new()
            .with_length_bounds(0, 60)
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect::<Vec<_>>();
        assert!(loose.contains(&"Go".to_string()));
        assert!(loose.contains(&"R".to_string()));
    }

    #[test]
    fn test_deduplicates_case_insensitively() {
        let text = "Python developer\nSkills: PYTHON, python, Python";
        assert_eq!(extract_skills(text), vec!["Python"]);
    }

    #[test]
    fn test_extra_skills() {
        let extractor = SkillExtractor::new().with_extra_skills(["Rust", "Tokio", "python"]);
        let skills: Vec<String> = extractor
            .extract_all("Async Rust with tokio and Python")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(skills, vec!["Python", "Rust", "Tokio"]);
    }

    #[test]
    fn test_non_ascii_extra_skill() {
        let extractor = SkillExtractor::new().with_extra_skills(["Ökonometrie", "Análise de Dados"]);
        let skills: Vec<String> = extractor
            .extract_all("Methods: Ökonometrie and ANÁLISE de dados, Análise de Dados")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(skills, vec!["Análise de Dados", "Ökonometrie"]);
    }
}
