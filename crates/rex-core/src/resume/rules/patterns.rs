//! Common regex patterns for resume extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Month names as they appear in date ranges ("Jan 2020", "September 2018").
const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// Numeric month as written in `MM/YYYY`.
const MONTH_NUMBER: &str = r"(?:0?[1-9]|1[0-2])";

/// Top-level domains accepted for links written without a scheme.
const WEB_TLDS: &str = r"com|org|net|io|dev|edu|gov|co|me|ai|app|info|tech|xyz|uk|us|ca|de|in";

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}"
    ).unwrap();

    // Links: explicit scheme or www, otherwise a bare domain with a lowercase web TLD
    pub static ref LINK: Regex = Regex::new(&format!(
        r#"(?i:\bhttps?://|\bwww\.)[^\s<>"']+|\b(?i:[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*)\.(?:{})\b(?:/[^\s<>"']*)?"#,
        WEB_TLDS
    )).unwrap();

    // Explicit name label
    pub static ref LABELED_NAME: Regex = Regex::new(
        r"(?i)^\s*(?:full\s+|candidate\s+)?name\s*[:\-]\s*(\S.*?)\s*$"
    ).unwrap();

    // One token of a person name: capitalised word or an initial
    pub static ref NAME_TOKEN: Regex = Regex::new(
        r"^(?:\p{Lu}[\p{L}'’\-]*\.?|\p{Lu}\.)$"
    ).unwrap();

    // Dates
    pub static ref YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref DATE_RANGE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{m}\s+|{n}/)?((?:19|20)\d{{2}})\s*(?:[-–—]|\bto\b)\s*(?:{m}\s+|{n}/)?((?:19|20)\d{{2}}|present|current|now)\b",
        m = MONTH,
        n = MONTH_NUMBER
    )).unwrap();

    // List structure
    pub static ref BULLET: Regex = Regex::new(
        r"^\s*(?:[-*•·▪◦‣●○■□➢➤►]\s*|\d{1,2}[.)]\s+)"
    ).unwrap();

    pub static ref LABEL_PREFIX: Regex = Regex::new(
        r"^[A-Za-z][A-Za-z &/+#.\-]{0,30}:\s*"
    ).unwrap();

    pub static ref SKILL_SEPARATOR: Regex = Regex::new(
        r"[,;|•]"
    ).unwrap();

    // Separators between job title and company on an experience line
    pub static ref TITLE_SEPARATOR: Regex = Regex::new(
        r"(?i)\s*\|\s*|\s*@\s*|\s+at\s+|\s+[-–—]\s+"
    ).unwrap();
}
