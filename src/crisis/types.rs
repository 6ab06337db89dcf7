// Crisis detection data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered crisis-concern level
///
/// Variant order is the severity order, so `Ord` gives `None < Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All levels, lowest first
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric level (none=0 .. critical=4)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Generic response used when no keyword supplies a specific message
    pub fn generic_response(self) -> &'static str {
        match self {
            Severity::None => "",
            Severity::Low => "Thanks for sharing. It sounds like things are a bit challenging right now. Remember, it's okay to take things one step at a time.",
            Severity::Medium => "I can hear that you're going through something difficult. Your feelings are valid, and it's brave of you to express them. Consider talking to someone you trust.",
            Severity::High => "It sounds like you're dealing with something really heavy right now. You don't have to carry this alone - reaching out to a counselor, trusted friend, or crisis line could help.",
            Severity::Critical => "I'm really concerned about you. What you're experiencing sounds incredibly painful, but please know that help is available and these feelings can change. Please reach out to a crisis line or emergency services right now.",
        }
    }

    /// Whether crisis resources should be shown up front
    pub fn shows_resources(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical classification of a crisis keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SelfHarm,
    Suicide,
    Violence,
    Abuse,
    SevereDistress,
    Substance,
    EatingDisorder,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::SelfHarm => "self-harm",
            Category::Suicide => "suicide",
            Category::Violence => "violence",
            Category::Abuse => "abuse",
            Category::SevereDistress => "severe-distress",
            Category::Substance => "substance",
            Category::EatingDisorder => "eating-disorder",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "self-harm" => Ok(Category::SelfHarm),
            "suicide" => Ok(Category::Suicide),
            "violence" => Ok(Category::Violence),
            "abuse" => Ok(Category::Abuse),
            "severe-distress" => Ok(Category::SevereDistress),
            "substance" => Ok(Category::Substance),
            "eating-disorder" => Ok(Category::EatingDisorder),
            other => Err(format!("unknown crisis category: {}", other)),
        }
    }
}

/// One entry of the keyword table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisKeyword {
    /// Phrase matched as a case-insensitive substring
    pub keyword: String,
    pub severity: Severity,
    /// Response shown when this keyword is the strongest match
    pub message: String,
    pub category: Category,
}

impl CrisisKeyword {
    pub fn new(
        keyword: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            severity,
            message: message.into(),
            category,
        }
    }
}

/// Result of scanning one piece of text once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAssessment {
    pub severity: Severity,
    /// Matches in table order
    pub matched_keywords: Vec<CrisisKeyword>,
    pub response_message: String,
    pub show_resources: bool,
    pub assessed_at: DateTime<Utc>,
}

impl CrisisAssessment {
    /// Zero result for empty input or no matches
    pub fn none(assessed_at: DateTime<Utc>) -> Self {
        Self {
            severity: Severity::None,
            matched_keywords: Vec::new(),
            response_message: String::new(),
            show_resources: false,
            assessed_at,
        }
    }

    /// Distinct categories among the matches, in first-seen order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for keyword in &self.matched_keywords {
            if !seen.contains(&keyword.category) {
                seen.push(keyword.category);
            }
        }
        seen
    }
}

/// Static crisis-support contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResource {
    pub name: String,
    pub contact: String,
    pub description: String,
    #[serde(rename = "available24x7")]
    pub available_24x7: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
