//! Evaluation engine.
//!
//! A deterministic, side-effect-free scoring pass: a report plus the
//! source registry and a policy produce a credibility score, a risk
//! score, a severity tier, a recommendation, and an audit rationale.
//! Unknown source ids are not an error; they simply contribute no data,
//! and a report with no registered sources falls back to a fixed
//! low-trust default.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, trace};

use crate::error::RumorResult;
use crate::policy::PolicyConfig;
use crate::report::GossipReport;
use crate::storage::SourceStore;
use crate::verdict::{EvaluationResult, Severity};

/// Source quality assumed for anonymous/unknown sourcing.
pub const DEFAULT_SOURCE_QUALITY: f32 = 0.30;

/// Credibility bonus per piece of evidence.
const EVIDENCE_STEP: f32 = 0.08;
/// Cap on the total evidence bonus.
const EVIDENCE_CAP: f32 = 0.30;
/// Credibility penalty per contradicting account.
const CONTRADICTION_STEP: f32 = 0.12;
/// Cap on the total contradiction penalty.
const CONTRADICTION_CAP: f32 = 0.36;
/// Intensity above this level starts to penalize credibility.
const EMOTIONAL_PIVOT: f32 = 0.7;
/// Weight of the above-pivot emotional penalty.
const EMOTIONAL_PENALTY_WEIGHT: f32 = 0.25;

/// Risk contribution per independent reporter.
const PROPAGATION_STEP: f32 = 0.12;
/// Cap on the propagation contribution.
const PROPAGATION_CAP: f32 = 0.36;
/// Baseline harm assumed for any report.
const HARM_BASELINE: f32 = 0.25;
/// Emotional amplification of harm.
const HARM_EMOTIONAL_WEIGHT: f32 = 0.35;
/// Weight of low credibility as a risk amplifier.
const UNCERTAINTY_WEIGHT: f32 = 0.35;

/// Deterministic report-scoring engine.
///
/// The engine holds a read handle on the source registry and an owned
/// policy. Thresholds are read from the policy on every call, so a
/// policy swap via [`RumorEngine::set_policy`] affects subsequent
/// evaluations immediately.
#[derive(Clone)]
pub struct RumorEngine {
    sources: Arc<dyn SourceStore>,
    policy: PolicyConfig,
}

impl RumorEngine {
    /// Create an engine over the given source registry with the default
    /// policy.
    #[must_use]
    pub fn new(sources: Arc<dyn SourceStore>) -> Self {
        Self::with_policy(sources, PolicyConfig::default())
    }

    /// Create an engine with an explicit policy.
    #[must_use]
    pub fn with_policy(sources: Arc<dyn SourceStore>, policy: PolicyConfig) -> Self {
        Self { sources, policy }
    }

    /// The active classification policy.
    #[must_use]
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Replace the classification policy.
    pub fn set_policy(&mut self, policy: PolicyConfig) {
        self.policy = policy;
    }

    /// Read handle on the source registry.
    #[must_use]
    pub fn sources(&self) -> &Arc<dyn SourceStore> {
        &self.sources
    }

    /// Score a report.
    ///
    /// Deterministic and side-effect free. The only failure path is a
    /// storage backend error; domain lookups never fail.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the source registry backend fails.
    pub fn evaluate(&self, report: &GossipReport) -> RumorResult<EvaluationResult> {
        let source_quality = self.source_quality(report)?;
        let credibility = Self::credibility_score(report, source_quality);
        let risk = Self::risk_score(report, credibility);
        let severity = self.policy.severity_for(risk);
        let recommendation = self.recommendation(severity, credibility);
        let rationale = build_rationale(report, credibility, risk, severity);

        debug!(
            report_id = %report.id,
            credibility,
            risk,
            severity = %severity,
            "report evaluated"
        );

        Ok(EvaluationResult {
            report_id: report.id.clone(),
            credibility_score: credibility,
            risk_score: risk,
            severity,
            recommendation,
            rationale,
            evaluated_at: Utc::now(),
        })
    }

    /// Mean adjusted quality over the report's registered sources.
    ///
    /// Unregistered ids are filtered out; when none resolve, the fixed
    /// anonymous-sourcing default applies.
    fn source_quality(&self, report: &GossipReport) -> RumorResult<f32> {
        let mut qualities = Vec::with_capacity(report.source_ids.len());
        for id in &report.source_ids {
            if let Some(profile) = self.sources.get(id)? {
                qualities.push(profile.adjusted_quality(&report.topic));
            }
        }

        if qualities.is_empty() {
            trace!(report_id = %report.id, "no registered sources; using default quality");
            return Ok(DEFAULT_SOURCE_QUALITY);
        }

        #[allow(clippy::cast_precision_loss)]
        let count = qualities.len() as f32;
        Ok(qualities.iter().sum::<f32>() / count)
    }

    /// Source quality plus a capped evidence bonus, minus capped
    /// contradiction and above-pivot emotional penalties, clamped.
    #[allow(clippy::cast_precision_loss)]
    fn credibility_score(report: &GossipReport, source_quality: f32) -> f32 {
        let evidence_bonus = (report.evidence_count as f32 * EVIDENCE_STEP).min(EVIDENCE_CAP);
        let contradiction_penalty =
            (report.contradiction_count as f32 * CONTRADICTION_STEP).min(CONTRADICTION_CAP);
        let emotional_penalty =
            ((report.emotional_intensity - EMOTIONAL_PIVOT) * EMOTIONAL_PENALTY_WEIGHT).max(0.0);

        (source_quality + evidence_bonus - contradiction_penalty - emotional_penalty)
            .clamp(0.0, 1.0)
    }

    /// Propagation potential plus harm potential plus uncertainty
    /// pressure, clamped. Low credibility is itself a risk amplifier.
    #[allow(clippy::cast_precision_loss)]
    fn risk_score(report: &GossipReport, credibility: f32) -> f32 {
        let propagation_potential =
            (report.source_ids.len() as f32 * PROPAGATION_STEP).min(PROPAGATION_CAP);
        let harm_potential = HARM_BASELINE + report.emotional_intensity * HARM_EMOTIONAL_WEIGHT;
        let uncertainty_pressure = UNCERTAINTY_WEIGHT * (1.0 - credibility);

        (propagation_potential + harm_potential + uncertainty_pressure).clamp(0.0, 1.0)
    }

    /// Fixed decision table keyed by severity; the medium tier splits on
    /// the policy's medium credibility threshold.
    fn recommendation(&self, severity: Severity, credibility: f32) -> String {
        let text = match severity {
            Severity::Critical => {
                "Escalate to a cross-functional committee and activate the legal and reputational protocol."
            }
            Severity::High => {
                "Open a rapid investigation, freeze propagation, and require cross-verification."
            }
            Severity::Medium if credibility < self.policy.credibility.medium => {
                "Hold under observation; gather additional evidence before acting."
            }
            Severity::Medium => "Focused human verification with a 24-hour follow-up window.",
            Severity::Low => "Passive monitoring; log for system learning.",
        };
        text.to_string()
    }
}

/// Audit-trail summary. Human-readable only; never parsed.
fn build_rationale(
    report: &GossipReport,
    credibility: f32,
    risk: f32,
    severity: Severity,
) -> String {
    format!(
        "Report {}: credibility={credibility:.2}, risk={risk:.2}, severity={severity}. \
         Evidence={}, contradictions={}, emotional intensity={:.2}.",
        report.id, report.evidence_count, report.contradiction_count, report.emotional_intensity
    )
}
