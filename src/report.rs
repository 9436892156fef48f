//! Gossip reports—the immutable input unit.
//!
//! A report is an unverified claim captured from one or more sources.
//! Reports are created by the caller, read-only inside the core, and
//! carry the raw counters the evaluation engine scores against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::SourceId;

/// Identifier for a gossip report, chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Wraps a raw report identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ReportId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An informal, unverified report.
///
/// Numeric fields are nominal ranges only: the engine clamps every
/// derived score, so out-of-range counters or intensities degrade
/// gracefully instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipReport {
    /// Unique report identifier.
    pub id: ReportId,

    /// Free text of the claim.
    pub text: String,

    /// Topic label, matched against source expertise.
    pub topic: String,

    /// Sources that originated the report. May reference ids that are
    /// not in the registry; those contribute no quality data.
    pub source_ids: Vec<SourceId>,

    /// Number of corroborating pieces of evidence.
    pub evidence_count: u32,

    /// Number of known contradicting accounts.
    pub contradiction_count: u32,

    /// Emotional charge of the claim, nominally [0.0, 1.0].
    pub emotional_intensity: f32,
}

impl GossipReport {
    /// Starts building a report.
    #[must_use]
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }
}

/// Builder for [`GossipReport`].
///
/// # Example
/// ```rust
/// use rumorwatch::GossipReport;
///
/// let report = GossipReport::builder()
///     .id("CH-001")
///     .text("Word of a mass departure over a leadership conflict.")
///     .topic("rrhh")
///     .source("ana")
///     .evidence_count(2)
///     .contradiction_count(1)
///     .emotional_intensity(0.76)
///     .build()
///     .unwrap();
/// assert_eq!(report.topic, "rrhh");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    id: Option<ReportId>,
    text: Option<String>,
    topic: Option<String>,
    source_ids: Vec<SourceId>,
    evidence_count: u32,
    contradiction_count: u32,
    emotional_intensity: f32,
}

impl ReportBuilder {
    /// Creates a new builder with default counters (0 evidence,
    /// 0 contradictions, 0.5 emotional intensity).
    #[must_use]
    pub fn new() -> Self {
        Self {
            emotional_intensity: 0.5,
            ..Self::default()
        }
    }

    /// Set the report identifier (required).
    #[must_use]
    pub fn id(mut self, id: impl Into<ReportId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the claim text (optional; defaults to empty).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the topic label (required).
    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Add one originating source.
    #[must_use]
    pub fn source(mut self, id: impl Into<SourceId>) -> Self {
        self.source_ids.push(id.into());
        self
    }

    /// Replace the full source list.
    #[must_use]
    pub fn sources(mut self, ids: impl IntoIterator<Item = impl Into<SourceId>>) -> Self {
        self.source_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the corroborating-evidence count.
    #[must_use]
    pub fn evidence_count(mut self, count: u32) -> Self {
        self.evidence_count = count;
        self
    }

    /// Set the contradicting-account count.
    #[must_use]
    pub fn contradiction_count(mut self, count: u32) -> Self {
        self.contradiction_count = count;
        self
    }

    /// Set the emotional intensity. Values outside [0.0, 1.0] are
    /// accepted; downstream scores clamp.
    #[must_use]
    pub fn emotional_intensity(mut self, intensity: f32) -> Self {
        self.emotional_intensity = intensity;
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if `id` or `topic` was
    /// never set. Numeric fields are never validated.
    pub fn build(self) -> Result<GossipReport, ValidationError> {
        let id = self.id.ok_or_else(|| ValidationError::MissingField {
            field: "id".to_string(),
        })?;
        let topic = self.topic.ok_or_else(|| ValidationError::MissingField {
            field: "topic".to_string(),
        })?;

        Ok(GossipReport {
            id,
            text: self.text.unwrap_or_default(),
            topic,
            source_ids: self.source_ids,
            evidence_count: self.evidence_count,
            contradiction_count: self.contradiction_count,
            emotional_intensity: self.emotional_intensity,
        })
    }
}
