//! Case records—the workflow entity.
//!
//! A case wraps a report together with its evaluation and tracks the
//! human side of the process: workflow status, queue priority, and an
//! append-only timeline of events. Cases are owned and indexed by the
//! orchestrator's case registry and are never deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::{GossipReport, ReportId};
use crate::verdict::EvaluationResult;

/// Prefix prepended to report ids to form case ids.
const CASE_ID_PREFIX: &str = "CASE-";

/// Identifier for a case, derived deterministically from the report id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Wraps a raw case identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the case id for a report: `CASE-<report_id>`.
    #[must_use]
    pub fn for_report(report_id: &ReportId) -> Self {
        Self(format!("{CASE_ID_PREFIX}{report_id}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of a case.
///
/// All transitions between statuses are permitted, including
/// self-transitions, and `Closed` is not terminal: closed cases may be
/// reopened. Stricter governance belongs in a legality table layered on
/// top, not in the stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Awaiting first human look.
    Triage,

    /// Actively being investigated.
    UnderReview,

    /// Escalated for immediate attention.
    Escalated,

    /// Investigation finished; may still be reopened.
    Closed,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triage => write!(f, "TRIAGE"),
            Self::UnderReview => write!(f, "UNDER_REVIEW"),
            Self::Escalated => write!(f, "ESCALATED"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// One entry in a case's audit timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// When the event was recorded.
    pub at: DateTime<Utc>,

    /// Human-readable description of the event.
    pub message: String,
}

impl TimelineEntry {
    /// Records an event at the current instant.
    #[must_use]
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at.to_rfc3339(), self.message)
    }
}

/// A report routed through the case-management workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipCase {
    /// Unique case identifier (`CASE-<report_id>`).
    pub id: CaseId,

    /// The originating report.
    pub report: GossipReport,

    /// The verdict the case was opened with.
    pub evaluation: EvaluationResult,

    /// Current workflow status.
    pub status: CaseStatus,

    /// Queue ordering metric in [0.0, 1.0], combining risk and inverse
    /// credibility.
    pub priority: f32,

    /// Append-only event log. Non-empty from intake onward.
    pub timeline: Vec<TimelineEntry>,
}

impl GossipCase {
    /// Creates a case with an empty timeline. The orchestrator records
    /// the opening event immediately after construction.
    #[must_use]
    pub fn new(
        id: CaseId,
        report: GossipReport,
        evaluation: EvaluationResult,
        status: CaseStatus,
        priority: f32,
    ) -> Self {
        Self {
            id,
            report,
            evaluation,
            status,
            priority,
            timeline: Vec::new(),
        }
    }

    /// Appends a timeline entry stamped with the current instant.
    pub fn record_event(&mut self, message: impl Into<String>) {
        self.timeline.push(TimelineEntry::now(message));
    }

    /// The most recent timeline entry, if any.
    #[must_use]
    pub fn latest_event(&self) -> Option<&TimelineEntry> {
        self.timeline.last()
    }
}
