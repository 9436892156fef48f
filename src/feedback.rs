//! Human feedback records.
//!
//! Feedback is the system's only learning mechanism: a post-hoc human
//! verdict on whether a case turned out to be true, with a confidence
//! weight. Applying feedback shifts the reliability of every registered
//! source behind the case's report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::case::CaseId;

/// Reliability shift applied per unit of feedback confidence.
pub(crate) const FEEDBACK_STEP: f32 = 0.08;

/// Identifier for a feedback record, generated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(uuid::Uuid);

impl FeedbackId {
    /// Creates a new random feedback ID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for FeedbackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A human verdict on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Audit handle for this record.
    pub id: FeedbackId,

    /// The case being judged. Must reference an existing case.
    pub case_id: CaseId,

    /// Whether the report turned out to be true.
    pub confirmed_true: bool,

    /// Confidence in the verdict, nominally [0.0, 1.0]; clamped at use.
    pub confidence: f32,

    /// Free-text notes from the reviewer.
    pub notes: String,
}

impl FeedbackRecord {
    /// Creates a feedback record with a fresh id.
    #[must_use]
    pub fn new(
        case_id: CaseId,
        confirmed_true: bool,
        confidence: f32,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            case_id,
            confirmed_true,
            confidence,
            notes: notes.into(),
        }
    }

    /// The signed reliability delta this feedback applies to each
    /// contributing source: `±0.08 × clamp(confidence, 0, 1)`.
    #[must_use]
    pub fn reliability_delta(&self) -> f32 {
        let magnitude = FEEDBACK_STEP * self.confidence.clamp(0.0, 1.0);
        if self.confirmed_true {
            magnitude
        } else {
            -magnitude
        }
    }
}
