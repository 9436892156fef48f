//! Evaluation verdicts.
//!
//! The engine condenses a report into a single immutable result:
//! credibility, risk, a discrete severity tier, a recommended course of
//! action, and a human-readable rationale for audit trails.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::ReportId;

/// Discrete risk tier derived from the risk score via policy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Below every risk threshold.
    Low,

    /// At or above the medium risk threshold.
    Medium,

    /// At or above the high risk threshold.
    High,

    /// At or above the critical risk threshold.
    Critical,
}

impl Severity {
    /// Returns true for the tiers that force immediate escalation.
    #[must_use]
    pub const fn is_escalating(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Output of a single evaluation call.
///
/// One result per call; re-evaluating the same report produces a fresh
/// result, never a cached one. Scores are always clamped into [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The evaluated report.
    pub report_id: ReportId,

    /// Estimated trustworthiness of the report in [0.0, 1.0].
    pub credibility_score: f32,

    /// Estimated potential harm/spread of the report in [0.0, 1.0].
    pub risk_score: f32,

    /// Discrete risk tier.
    pub severity: Severity,

    /// Recommended course of action.
    pub recommendation: String,

    /// Human-readable summary for audit trails; not parsed programmatically.
    pub rationale: String,

    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
}
