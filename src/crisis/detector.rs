// Crisis keyword detector

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use super::keywords::builtin_keywords;
use super::resources::{builtin_resources, MEDIUM_RESOURCE_COUNT};
use super::types::{CrisisAssessment, CrisisKeyword, CrisisResource, Severity};
use crate::errors::KeywordError;

/// Keyword table entry with its precomputed lowercase needle
#[derive(Debug, Clone)]
struct KeywordEntry {
    keyword: CrisisKeyword,
    needle: String,
}

impl KeywordEntry {
    fn new(keyword: CrisisKeyword) -> Self {
        let needle = keyword.keyword.to_lowercase();
        Self { keyword, needle }
    }
}

/// Keyword registry and severity resolver
///
/// Construct once at startup and share by reference. Evaluation only reads
/// the table; `add_keyword` appends and must not race with readers, so
/// callers that share a detector across tasks put it behind a lock.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    entries: Vec<KeywordEntry>,
    resources: Vec<CrisisResource>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisDetector {
    /// Detector with the built-in keyword table and resource list
    pub fn new() -> Self {
        Self {
            entries: builtin_keywords().into_iter().map(KeywordEntry::new).collect(),
            resources: builtin_resources(),
        }
    }

    /// Detector with a caller-supplied table (built-in resources)
    pub fn with_keywords(keywords: Vec<CrisisKeyword>) -> Result<Self, KeywordError> {
        let mut detector = Self {
            entries: Vec::with_capacity(keywords.len()),
            resources: builtin_resources(),
        };
        for keyword in keywords {
            detector.add_keyword(keyword)?;
        }
        Ok(detector)
    }

    /// Load the built-in table plus the custom keywords in a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut detector = Self::new();
        detector.extend_from_file(path)?;
        Ok(detector)
    }

    /// Append keywords from a JSON array file, returning how many were added
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis keywords file: {}", path.display()))?;

        let keywords: Vec<CrisisKeyword> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse crisis keywords file: {}", path.display()))?;

        // Nothing is appended unless every entry is valid
        if let Some(index) = keywords.iter().position(|k| k.keyword.trim().is_empty()) {
            return Err(KeywordError::EmptyKeyword)
                .with_context(|| format!("Invalid entry {} in {}", index, path.display()));
        }

        let count = keywords.len();
        self.entries.extend(keywords.into_iter().map(KeywordEntry::new));

        tracing::info!(count, path = %path.display(), "Loaded custom crisis keywords");
        Ok(count)
    }

    /// Assess text, stamping the result with the current time
    pub fn detect_crisis(&self, text: &str) -> CrisisAssessment {
        self.detect_crisis_at(text, Utc::now())
    }

    /// Assess text with an explicit timestamp
    pub fn detect_crisis_at(&self, text: &str, assessed_at: DateTime<Utc>) -> CrisisAssessment {
        if text.trim().is_empty() {
            return CrisisAssessment::none(assessed_at);
        }

        let normalized = normalize_text(text);
        let matched_keywords: Vec<CrisisKeyword> = self.matches(&normalized).cloned().collect();

        let Some(strongest) = strongest_match(&matched_keywords) else {
            return CrisisAssessment::none(assessed_at);
        };

        let severity = strongest.severity;
        let response_message = strongest.message.clone();

        if severity.shows_resources() {
            tracing::warn!(
                severity = %severity,
                matches = matched_keywords.len(),
                categories = ?matched_keywords.iter().map(|k| k.category.as_str()).collect::<Vec<_>>(),
                "Crisis language detected"
            );
        } else {
            tracing::debug!(
                severity = %severity,
                matches = matched_keywords.len(),
                "Concerning language detected"
            );
        }

        CrisisAssessment {
            severity,
            matched_keywords,
            response_message,
            show_resources: severity.shows_resources(),
            assessed_at,
        }
    }

    /// True if any keyword occurs in the text
    pub fn contains_crisis_keywords(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let normalized = normalize_text(text);
        let found = self.matches(&normalized).next().is_some();
        found
    }

    /// Overall severity of the text
    pub fn highest_severity(&self, text: &str) -> Severity {
        self.detect_crisis(text).severity
    }

    /// Resources to disclose for an assessment
    ///
    /// Medium severity gets a fixed prefix of the list regardless of which
    /// categories matched.
    pub fn relevant_resources(&self, assessment: &CrisisAssessment) -> Vec<CrisisResource> {
        match assessment.severity {
            Severity::None | Severity::Low => Vec::new(),
            Severity::Medium => self
                .resources
                .iter()
                .take(MEDIUM_RESOURCE_COUNT)
                .cloned()
                .collect(),
            Severity::High | Severity::Critical => self.resources.clone(),
        }
    }

    /// Copy of the keyword table, in table order
    pub fn keywords(&self) -> Vec<CrisisKeyword> {
        self.entries.iter().map(|e| e.keyword.clone()).collect()
    }

    /// Append a keyword for the lifetime of this detector
    pub fn add_keyword(&mut self, keyword: CrisisKeyword) -> Result<(), KeywordError> {
        if keyword.keyword.trim().is_empty() {
            return Err(KeywordError::EmptyKeyword);
        }
        tracing::debug!(
            keyword = %keyword.keyword,
            severity = %keyword.severity,
            category = %keyword.category,
            "Added crisis keyword"
        );
        self.entries.push(KeywordEntry::new(keyword));
        Ok(())
    }

    /// Copy of the resource list, in display order
    pub fn all_resources(&self) -> Vec<CrisisResource> {
        self.resources.clone()
    }

    pub fn keyword_count(&self) -> usize {
        self.entries.len()
    }

    fn matches<'a>(&'a self, normalized: &'a str) -> impl Iterator<Item = &'a CrisisKeyword> + 'a {
        self.entries
            .iter()
            .filter(move |entry| normalized.contains(entry.needle.as_str()))
            .map(|entry| &entry.keyword)
    }
}

/// Lowercase, trim, and collapse whitespace runs to single spaces
///
/// U+FEFF counts as whitespace alongside Unicode `White_Space`.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// First entry carrying the highest severity (ties keep table order)
fn strongest_match(matches: &[CrisisKeyword]) -> Option<&CrisisKeyword> {
    let mut iter = matches.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, current| {
        if current.severity > best.severity {
            current
        } else {
            best
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crisis::Category;

    fn create_test_detector() -> CrisisDetector {
        CrisisDetector::with_keywords(vec![
            CrisisKeyword::new("suicide", Severity::Critical, "critical msg", Category::Suicide),
            CrisisKeyword::new("kill myself", Severity::Critical, "second critical", Category::Suicide),
            CrisisKeyword::new("kill someone", Severity::High, "violence msg", Category::Violence),
            CrisisKeyword::new("being abused", Severity::High, "abuse msg", Category::Abuse),
            CrisisKeyword::new("tired", Severity::Low, "low msg", Category::SevereDistress),
        ])
        .unwrap()
    }

    #[test]
    fn test_crisis_detection() {
        let detector = create_test_detector();

        assert!(detector.contains_crisis_keywords("I'm thinking about suicide"));
        assert!(detector.contains_crisis_keywords("I want to kill myself"));
        assert!(!detector.contains_crisis_keywords("What is the meaning of life?"));
    }

    #[test]
    fn test_case_insensitive() {
        let detector = create_test_detector();

        assert!(detector.contains_crisis_keywords("SUICIDE"));
        assert!(detector.contains_crisis_keywords("SuIcIdE"));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let detector = create_test_detector();

        let assessment = detector.detect_crisis("I want to\n\n  kill \t myself");
        assert_eq!(assessment.severity, Severity::Critical);
        assert_eq!(assessment.matched_keywords[0].keyword, "kill myself");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello   WORLD \n"), "hello world");
        assert_eq!(normalize_text("can't,  stop!"), "can't, stop!");
    }

    #[test]
    fn test_tie_breaks_to_table_order() {
        let detector = create_test_detector();

        let assessment = detector.detect_crisis("kill myself, suicide");
        assert_eq!(assessment.matched_keywords.len(), 2);
        assert_eq!(assessment.response_message, "critical msg");
    }

    #[test]
    fn test_low_does_not_show_resources() {
        let detector = create_test_detector();

        let assessment = detector.detect_crisis("so tired today");
        assert_eq!(assessment.severity, Severity::Low);
        assert!(!assessment.show_resources);
        assert_eq!(assessment.response_message, "low msg");
        assert!(detector.relevant_resources(&assessment).is_empty());
    }

    #[test]
    fn test_uppercase_custom_keyword_matches() {
        let mut detector = create_test_detector();
        detector
            .add_keyword(CrisisKeyword::new("Hopeless", Severity::Medium, "m", Category::SevereDistress))
            .unwrap();

        assert_eq!(detector.highest_severity("feeling HOPELESS"), Severity::Medium);
        assert_eq!(detector.keywords().last().unwrap().keyword, "Hopeless");
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let mut detector = create_test_detector();
        let before = detector.keyword_count();

        let result = detector.add_keyword(CrisisKeyword::new("  ", Severity::Low, "m", Category::Abuse));
        assert!(matches!(result, Err(KeywordError::EmptyKeyword)));
        assert_eq!(detector.keyword_count(), before);
    }

    #[test]
    fn test_extend_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.json");
        std::fs::write(
            &path,
            r#"[{"keyword":"xyzzy","severity":"medium","message":"custom","category":"severe-distress"}]"#,
        )
        .unwrap();

        let detector = CrisisDetector::load_from_file(&path).unwrap();
        let assessment = detector.detect_crisis("XYZZY");
        assert_eq!(assessment.severity, Severity::Medium);
        assert_eq!(assessment.response_message, "custom");
    }

    #[test]
    fn test_extend_from_bad_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(CrisisDetector::load_from_file(&path).is_err());
        assert!(CrisisDetector::load_from_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_extend_from_file_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.json");
        std::fs::write(
            &path,
            r#"[
                {"keyword":"xyzzy","severity":"critical","message":"m","category":"suicide"},
                {"keyword":"  ","severity":"low","message":"m","category":"abuse"}
            ]"#,
        )
        .unwrap();

        let mut detector = CrisisDetector::new();
        let before = detector.keyword_count();

        let err = detector.extend_from_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KeywordError>(),
            Some(KeywordError::EmptyKeyword)
        ));
        assert_eq!(detector.keyword_count(), before);
        assert_eq!(detector.highest_severity("xyzzy"), Severity::None);
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert_eq!(normalize_text("\u{FEFF}kill\u{FEFF}myself\u{FEFF}"), "kill myself");

        let detector = create_test_detector();
        assert_eq!(detector.highest_severity("kill\u{FEFF}myself"), Severity::Critical);
        assert!(detector.contains_crisis_keywords("kill\u{FEFF}\u{FEFF}myself"));
        assert!(!detector.contains_crisis_keywords("\u{FEFF}"));
    }
}
