// Submission data types and validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::SubmissionLimits;
use crate::crisis::CrisisAssessment;
use crate::errors::SubmissionError;

/// Self-reported mood, 1 (very stressed) to 5 (doing well)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mood(u8);

impl Mood {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, SubmissionError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SubmissionError::InvalidMood(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Mood {
    type Error = SubmissionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> Self {
        mood.0
    }
}

/// Predefined submission tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionTag {
    Exams,
    Deadlines,
    Grades,
    Social,
    Family,
    Future,
    Burnout,
    Isolation,
    Sleep,
    Other,
}

impl SubmissionTag {
    /// All tags in display order
    pub const ALL: [SubmissionTag; 10] = [
        SubmissionTag::Exams,
        SubmissionTag::Deadlines,
        SubmissionTag::Grades,
        SubmissionTag::Social,
        SubmissionTag::Family,
        SubmissionTag::Future,
        SubmissionTag::Burnout,
        SubmissionTag::Isolation,
        SubmissionTag::Sleep,
        SubmissionTag::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionTag::Exams => "exams",
            SubmissionTag::Deadlines => "deadlines",
            SubmissionTag::Grades => "grades",
            SubmissionTag::Social => "social",
            SubmissionTag::Family => "family",
            SubmissionTag::Future => "future",
            SubmissionTag::Burnout => "burnout",
            SubmissionTag::Isolation => "isolation",
            SubmissionTag::Sleep => "sleep",
            SubmissionTag::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionTag::Exams => "Exams & Tests",
            SubmissionTag::Deadlines => "Deadlines",
            SubmissionTag::Grades => "Grades & Performance",
            SubmissionTag::Social => "Social Pressure",
            SubmissionTag::Family => "Family Expectations",
            SubmissionTag::Future => "Future & Career",
            SubmissionTag::Burnout => "Burnout",
            SubmissionTag::Isolation => "Isolation",
            SubmissionTag::Sleep => "Sleep Issues",
            SubmissionTag::Other => "Other",
        }
    }

    /// Position in display order
    pub fn rank(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for SubmissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionTag {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| SubmissionError::UnknownTag(s.to_string()))
    }
}

/// Stored anonymous stress report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub content: String,
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<SubmissionTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_assessment: Option<CrisisAssessment>,
}

/// Submission before the store assigns an id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub tags: Vec<SubmissionTag>,
    #[serde(default)]
    pub crisis_assessment: Option<CrisisAssessment>,
}

impl NewSubmission {
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
            tags: Vec::new(),
            crisis_assessment: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<SubmissionTag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_assessment(mut self, assessment: CrisisAssessment) -> Self {
        self.crisis_assessment = Some(assessment);
        self
    }

    /// Trim the content, check its length, and drop duplicate tags
    pub fn validate(mut self, limits: SubmissionLimits) -> Result<Self, SubmissionError> {
        let trimmed = self.content.trim();
        let length = trimmed.chars().count();

        if length < limits.min_length {
            return Err(SubmissionError::TooShort {
                min: limits.min_length,
                actual: length,
            });
        }
        if length > limits.max_length {
            return Err(SubmissionError::TooLong {
                max: limits.max_length,
                actual: length,
            });
        }

        self.content = trimmed.to_string();

        let mut tags = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;

        Ok(self)
    }
}
