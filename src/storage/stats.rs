// Aggregate statistics over stored submissions

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::submission::{Submission, SubmissionTag};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagCount {
    pub tag: SubmissionTag,
    pub count: usize,
}

/// Submissions in one ISO week
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekTrend {
    /// ISO week label, e.g. "2026-W07"
    pub week: String,
    pub count: usize,
    pub average_mood: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StressStats {
    pub total_submissions: usize,
    /// 0.0 when there are no submissions
    pub average_mood: f64,
    /// Most used first; ties in tag display order
    pub common_tags: Vec<TagCount>,
    /// Oldest week first; weeks without submissions are omitted
    pub weekly_trend: Vec<WeekTrend>,
    /// Submissions whose assessment called for crisis resources
    pub crisis_flagged: usize,
}

impl StressStats {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let total_submissions = submissions.len();

        let average_mood = if total_submissions == 0 {
            0.0
        } else {
            let sum: u32 = submissions.iter().map(|s| u32::from(s.mood.value())).sum();
            f64::from(sum) / total_submissions as f64
        };

        let mut counts: HashMap<SubmissionTag, usize> = HashMap::new();
        for tag in submissions.iter().flat_map(|s| s.tags.iter()) {
            *counts.entry(*tag).or_insert(0) += 1;
        }
        let mut common_tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        common_tags.sort_by(|a, b| b.count.cmp(&a.count).then(a.tag.rank().cmp(&b.tag.rank())));

        let mut weeks: BTreeMap<(i32, u32), (usize, u32)> = BTreeMap::new();
        for submission in submissions {
            let iso = submission.timestamp.iso_week();
            let (count, mood_sum) = weeks.entry((iso.year(), iso.week())).or_insert((0, 0));
            *count += 1;
            *mood_sum += u32::from(submission.mood.value());
        }
        let weekly_trend = weeks
            .into_iter()
            .map(|((year, week), (count, mood_sum))| WeekTrend {
                week: format!("{}-W{:02}", year, week),
                count,
                average_mood: f64::from(mood_sum) / count as f64,
            })
            .collect();

        let crisis_flagged = submissions
            .iter()
            .filter(|s| {
                s.crisis_assessment
                    .as_ref()
                    .is_some_and(|a| a.show_resources)
            })
            .count();

        Self {
            total_submissions,
            average_mood,
            common_tags,
            weekly_trend,
            crisis_flagged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Mood;
    use chrono::{DateTime, TimeZone, Utc};

    fn submission(mood: u8, tags: Vec<SubmissionTag>) -> Submission {
        submission_at(mood, tags, Utc::now())
    }

    fn submission_at(mood: u8, tags: Vec<SubmissionTag>, timestamp: DateTime<Utc>) -> Submission {
        Submission {
            id: uuid::Uuid::new_v4().to_string(),
            content: "placeholder content".to_string(),
            mood: Mood::new(mood).unwrap(),
            timestamp,
            tags,
            crisis_assessment: None,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = StressStats::from_submissions(&[]);
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.average_mood, 0.0);
        assert!(stats.common_tags.is_empty());
        assert!(stats.weekly_trend.is_empty());
    }

    #[test]
    fn test_weekly_trend() {
        // 2026-01-01 is a Thursday in ISO week 2026-W01; 2025-12-28 is a Sunday in 2025-W52
        let jan_1 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let jan_2 = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        let dec_28 = Utc.with_ymd_and_hms(2025, 12, 28, 20, 0, 0).unwrap();

        let stats = StressStats::from_submissions(&[
            submission_at(4, vec![], jan_2),
            submission_at(1, vec![], dec_28),
            submission_at(2, vec![], jan_1),
        ]);

        assert_eq!(
            stats.weekly_trend,
            vec![
                WeekTrend { week: "2025-W52".to_string(), count: 1, average_mood: 1.0 },
                WeekTrend { week: "2026-W01".to_string(), count: 2, average_mood: 3.0 },
            ]
        );
    }

    #[test]
    fn test_tag_ordering_and_average() {
        let stats = StressStats::from_submissions(&[
            submission(1, vec![SubmissionTag::Sleep, SubmissionTag::Exams]),
            submission(2, vec![SubmissionTag::Sleep]),
            submission(3, vec![SubmissionTag::Grades]),
        ]);

        assert_eq!(stats.total_submissions, 3);
        assert!((stats.average_mood - 2.0).abs() < f64::EPSILON);
        let tags: Vec<SubmissionTag> = stats.common_tags.iter().map(|t| t.tag).collect();
        assert_eq!(
            tags,
            vec![SubmissionTag::Sleep, SubmissionTag::Exams, SubmissionTag::Grades]
        );
        assert_eq!(stats.common_tags[0].count, 2);
    }
}
