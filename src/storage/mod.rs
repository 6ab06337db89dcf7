// Storage module
// Expiring on-disk log of anonymous submissions

mod stats;
mod store;
mod submission;

pub use stats::{StressStats, TagCount, WeekTrend};
pub use store::{fingerprint, is_expired, SubmissionStore};
pub use submission::{Mood, NewSubmission, Submission, SubmissionTag};
