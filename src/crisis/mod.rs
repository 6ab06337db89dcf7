// Crisis module
// Keyword-based crisis detection, severity resolution, and resource disclosure

mod detector;
mod keywords;
mod resources;
mod types;

pub use detector::{normalize_text, CrisisDetector};
pub use keywords::builtin_keywords;
pub use resources::{builtin_resources, MEDIUM_RESOURCE_COUNT};
pub use types::{Category, CrisisAssessment, CrisisKeyword, CrisisResource, Severity};
