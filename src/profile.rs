//! Source-reliability profiles.
//!
//! Every report names the sources that originated it. A profile is the
//! per-reporter trust record: a running reliability estimate, a bias
//! index, and the topics the source has first-hand knowledge of.
//! Reliability is adjusted over time by case feedback; it is never
//! re-derived from historical evaluations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Bonus applied to quality when the source has expertise in the topic.
const EXPERTISE_BONUS: f32 = 0.15;

/// Fraction of the bias index subtracted from quality.
const BIAS_WEIGHT: f32 = 0.2;

/// Identifier for a reporting source.
///
/// Source ids are external handles chosen by the caller, so this is a
/// string newtype rather than a generated id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Wraps a raw source identifier.
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

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-reporter trust record.
///
/// `reliability` and `bias_index` are nominally in [0.0, 1.0] but the
/// range is not enforced; every derived quantity is clamped instead.
///
/// # Examples
///
/// ```
/// use rumorwatch::SourceProfile;
///
/// let profile = SourceProfile::new("ana", 0.78, 0.10).with_expertise("rrhh");
/// assert!(profile.adjusted_quality("rrhh") > profile.adjusted_quality("legal"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Unique key in the source registry.
    pub id: SourceId,

    /// Running reliability estimate, feedback-adjusted.
    pub reliability: f32,

    /// How slanted past reporting has been (0.0 neutral, 1.0 heavily biased).
    pub bias_index: f32,

    /// Topic labels this source has first-hand knowledge of.
    pub domain_expertise: BTreeSet<String>,
}

impl SourceProfile {
    /// Creates a profile with no domain expertise.
    #[must_use]
    pub fn new(id: impl Into<SourceId>, reliability: f32, bias_index: f32) -> Self {
        Self {
            id: id.into(),
            reliability,
            bias_index,
            domain_expertise: BTreeSet::new(),
        }
    }

    /// Adds a topic to the source's expertise set.
    #[must_use]
    pub fn with_expertise(mut self, topic: impl Into<String>) -> Self {
        self.domain_expertise.insert(topic.into());
        self
    }

    /// Returns true if the source has first-hand knowledge of the topic.
    #[must_use]
    pub fn has_expertise(&self, topic: &str) -> bool {
        self.domain_expertise.contains(topic)
    }

    /// Effective quality of this source for a given topic.
    ///
    /// Reliability, raised by an expertise bonus when the topic is known
    /// and lowered proportionally to the bias index, clamped into
    /// [0.0, 1.0] regardless of input magnitudes.
    #[must_use]
    pub fn adjusted_quality(&self, topic: &str) -> f32 {
        let expertise_bonus = if self.has_expertise(topic) {
            EXPERTISE_BONUS
        } else {
            0.0
        };
        (self.reliability + expertise_bonus - self.bias_index * BIAS_WEIGHT).clamp(0.0, 1.0)
    }
}
