// Metrics module
// Prometheus counters for the HTTP daemon

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::crisis::Severity;

/// Counters exposed on /metrics
///
/// Each server owns its own registry, so tests can build several servers
/// in one process.
#[derive(Clone)]
pub struct ServiceMetrics {
    registry: Registry,
    assessments: IntCounterVec,
    submissions: IntCounter,
    keywords_added: IntCounter,
}

impl ServiceMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let assessments = IntCounterVec::new(
            Opts::new(
                "secret_stress_assessments_total",
                "Crisis assessments performed, by resulting severity",
            ),
            &["severity"],
        )
        .context("Failed to create assessments counter")?;

        let submissions = IntCounter::new(
            "secret_stress_submissions_total",
            "Submissions accepted by the store",
        )
        .context("Failed to create submissions counter")?;

        let keywords_added = IntCounter::new(
            "secret_stress_keywords_added_total",
            "Crisis keywords appended at runtime",
        )
        .context("Failed to create keywords counter")?;

        registry.register(Box::new(assessments.clone()))?;
        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(keywords_added.clone()))?;

        // Pre-create every severity series so scrapes see zeros
        for severity in Severity::ALL {
            assessments.with_label_values(&[severity.as_str()]);
        }

        Ok(Self {
            registry,
            assessments,
            submissions,
            keywords_added,
        })
    }

    pub fn record_assessment(&self, severity: Severity) {
        self.assessments.with_label_values(&[severity.as_str()]).inc();
    }

    pub fn record_submission(&self) {
        self.submissions.inc();
    }

    pub fn record_keyword_added(&self) {
        self.keywords_added.inc();
    }

    pub fn assessment_count(&self, severity: Severity) -> u64 {
        self.assessments.with_label_values(&[severity.as_str()]).get()
    }

    /// Prometheus text exposition of all counters
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}
