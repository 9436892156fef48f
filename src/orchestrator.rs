//! Case orchestrator.
//!
//! The stateful workflow layer on top of the engine. Intake turns a
//! verdict into a prioritized case, the queue exposes cases in triage
//! order, transitions move cases between workflow statuses, and human
//! feedback closes the loop by adjusting the reliability of the sources
//! behind a case.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{info, warn};

use crate::case::{CaseId, CaseStatus, GossipCase};
use crate::engine::RumorEngine;
use crate::error::{RumorResult, WorkflowError};
use crate::feedback::FeedbackRecord;
use crate::report::GossipReport;
use crate::storage::{CaseStore, InMemoryCaseStore, StorageError};

/// Weight of the risk score in the priority mix.
const PRIORITY_RISK_WEIGHT: f32 = 0.7;
/// Weight of inverse credibility in the priority mix.
const PRIORITY_DOUBT_WEIGHT: f32 = 0.3;

/// Timeline note used when a transition carries none.
const DEFAULT_TRANSITION_NOTE: &str = "status updated";

/// Workflow layer owning the case registry.
///
/// The orchestrator shares the engine's source registry: scoring reads
/// it during intake, feedback writes it afterwards. Every operation is
/// synchronous in-memory work; when used behind a concurrent boundary
/// the case and source registries are shared mutable state that need a
/// single external synchronization point.
#[derive(Clone)]
pub struct CaseOrchestrator {
    engine: RumorEngine,
    cases: Arc<dyn CaseStore>,
}

impl CaseOrchestrator {
    /// Create an orchestrator with a fresh in-memory case registry.
    #[must_use]
    pub fn new(engine: RumorEngine) -> Self {
        Self::with_case_store(engine, Arc::new(InMemoryCaseStore::new()))
    }

    /// Create an orchestrator over an explicit case registry.
    #[must_use]
    pub fn with_case_store(engine: RumorEngine, cases: Arc<dyn CaseStore>) -> Self {
        Self { engine, cases }
    }

    /// The underlying evaluation engine.
    #[must_use]
    pub const fn engine(&self) -> &RumorEngine {
        &self.engine
    }

    /// Read handle on the case registry, for reporting/UI layers.
    #[must_use]
    pub fn case_store(&self) -> &Arc<dyn CaseStore> {
        &self.cases
    }

    /// Get a stored case by id. `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the case registry backend fails.
    pub fn case(&self, id: &CaseId) -> RumorResult<Option<GossipCase>> {
        Ok(self.cases.get(id)?)
    }

    /// Evaluate a report and open a case for it.
    ///
    /// Priority mixes risk with inverse credibility. High and critical
    /// severities open escalated; everything else starts in triage. The
    /// case is stored under `CASE-<report_id>`; a second intake of the
    /// same report id overwrites the prior case.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a registry backend fails.
    pub fn intake(&self, report: GossipReport) -> RumorResult<GossipCase> {
        let evaluation = self.engine.evaluate(&report)?;

        let priority = (evaluation.risk_score * PRIORITY_RISK_WEIGHT
            + (1.0 - evaluation.credibility_score) * PRIORITY_DOUBT_WEIGHT)
            .clamp(0.0, 1.0);
        let status = if evaluation.severity.is_escalating() {
            CaseStatus::Escalated
        } else {
            CaseStatus::Triage
        };

        let mut case = GossipCase::new(
            CaseId::for_report(&report.id),
            report,
            evaluation,
            status,
            priority,
        );
        case.record_event(format!(
            "Case opened with status {status} and priority {priority:.2}"
        ));

        let displaced = self.cases.put(case.clone())?;
        if displaced.is_some() {
            warn!(case_id = %case.id, "re-intake overwrote an existing case");
        }
        info!(
            case_id = %case.id,
            status = %status,
            priority,
            severity = %case.evaluation.severity,
            "case opened"
        );

        Ok(case)
    }

    /// Snapshot of all cases, sorted by priority descending. Ties keep
    /// the registry's ascending case-id order. Read-only.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the case registry backend fails.
    pub fn queue(&self) -> RumorResult<Vec<GossipCase>> {
        let mut cases = self.cases.list()?;
        cases.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(Ordering::Equal)
        });
        Ok(cases)
    }

    /// Move a case to a new status.
    ///
    /// Transitions are unconstrained: any status may follow any other,
    /// including self-transitions, and closed cases may be reopened.
    /// Each transition appends a timeline entry.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::CaseNotFound` for an unknown case id.
    pub fn transition_case(
        &self,
        id: &CaseId,
        new_status: CaseStatus,
        note: Option<&str>,
    ) -> RumorResult<GossipCase> {
        let Some(mut case) = self.cases.get(id)? else {
            return Err(WorkflowError::CaseNotFound { id: id.clone() }.into());
        };

        case.status = new_status;
        case.record_event(format!(
            "Estado -> {new_status}: {}",
            note.unwrap_or(DEFAULT_TRANSITION_NOTE)
        ));
        self.cases.update(case.clone())?;

        info!(case_id = %id, status = %new_status, "case transitioned");
        Ok(case)
    }

    /// Fold a human verdict back into source reliability.
    ///
    /// Every source of the case's original report that exists in the
    /// registry is shifted by the feedback's signed delta (clamped into
    /// [0.0, 1.0]); unregistered ids are skipped silently. One timeline
    /// entry summarizes the outcome.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::CaseNotFound` for an unknown case id;
    /// nothing is mutated in that path.
    pub fn apply_feedback(&self, feedback: &FeedbackRecord) -> RumorResult<()> {
        let Some(mut case) = self.cases.get(&feedback.case_id)? else {
            return Err(WorkflowError::CaseNotFound {
                id: feedback.case_id.clone(),
            }
            .into());
        };

        let delta = feedback.reliability_delta();
        let mut adjusted = 0usize;
        for source_id in &case.report.source_ids {
            match self.engine.sources().adjust_reliability(source_id, delta) {
                Ok(_) => adjusted += 1,
                // Unregistered reporters carry no trust state to adjust.
                Err(StorageError::SourceNotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        case.record_event(format!(
            "Feedback {}: confirmed_true={}, confidence={:.2}, adjusted {adjusted} source(s). {}",
            feedback.id,
            feedback.confirmed_true,
            feedback.confidence.clamp(0.0, 1.0),
            feedback.notes
        ));
        self.cases.update(case)?;

        info!(
            case_id = %feedback.case_id,
            feedback_id = %feedback.id,
            confirmed_true = feedback.confirmed_true,
            delta,
            adjusted,
            "feedback applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{SourceId, SourceProfile};
    use crate::storage::{InMemorySourceStore, SourceStore};
    use crate::verdict::Severity;

    fn orchestrator_with(
        profiles: impl IntoIterator<Item = SourceProfile>,
    ) -> (CaseOrchestrator, Arc<InMemorySourceStore>) {
        let sources = Arc::new(InMemorySourceStore::from_profiles(profiles));
        let engine = RumorEngine::new(sources.clone());
        (CaseOrchestrator::new(engine), sources)
    }

    fn hot_report(id: &str) -> GossipReport {
        GossipReport::builder()
            .id(id)
            .topic("rrhh")
            .sources(["s1", "s2"])
            .contradiction_count(2)
            .emotional_intensity(0.95)
            .build()
            .unwrap()
    }

    fn mild_report(id: &str) -> GossipReport {
        GossipReport::builder()
            .id(id)
            .topic("rrhh")
            .source("s1")
            .evidence_count(3)
            .emotional_intensity(0.1)
            .build()
            .unwrap()
    }

    fn weak_profiles() -> Vec<SourceProfile> {
        vec![
            SourceProfile::new("s1", 0.4, 0.2).with_expertise("rrhh"),
            SourceProfile::new("s2", 0.45, 0.3).with_expertise("legal"),
        ]
    }

    #[test]
    fn intake_escalates_high_risk_and_records_timeline() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());

        let case = orchestrator.intake(hot_report("E")).unwrap();

        assert_eq!(case.id.as_str(), "CASE-E");
        assert!(case.evaluation.severity.is_escalating());
        assert_eq!(case.status, CaseStatus::Escalated);
        assert!(case.priority > 0.6);
        assert_eq!(case.timeline.len(), 1);
        assert!(case.timeline[0].message.contains("Case opened"));
    }

    #[test]
    fn intake_triages_low_risk() {
        let (orchestrator, _) =
            orchestrator_with([SourceProfile::new("s1", 0.9, 0.0).with_expertise("rrhh")]);

        let case = orchestrator.intake(mild_report("M")).unwrap();

        assert!(!case.evaluation.severity.is_escalating());
        assert_eq!(case.status, CaseStatus::Triage);
    }

    #[test]
    fn intake_priority_matches_formula() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());

        let case = orchestrator.intake(hot_report("P")).unwrap();
        let expected = (case.evaluation.risk_score * 0.7
            + (1.0 - case.evaluation.credibility_score) * 0.3)
            .clamp(0.0, 1.0);
        assert!((case.priority - expected).abs() < 1e-6);
    }

    #[test]
    fn re_intake_overwrites_existing_case() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());

        orchestrator.intake(hot_report("D")).unwrap();
        let case_id = CaseId::new("CASE-D");
        orchestrator
            .transition_case(&case_id, CaseStatus::Closed, None)
            .unwrap();

        let fresh = orchestrator.intake(hot_report("D")).unwrap();
        assert_eq!(fresh.status, CaseStatus::Escalated);

        let stored = orchestrator.case(&case_id).unwrap().unwrap();
        assert_eq!(stored.status, CaseStatus::Escalated);
        assert_eq!(stored.timeline.len(), 1);
        assert_eq!(orchestrator.case_store().len().unwrap(), 1);
    }

    #[test]
    fn transition_is_unconstrained_and_audited() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());
        let case = orchestrator.intake(hot_report("T")).unwrap();

        let reviewed = orchestrator
            .transition_case(&case.id, CaseStatus::UnderReview, Some("assigned to pat"))
            .unwrap();
        assert_eq!(reviewed.status, CaseStatus::UnderReview);
        assert_eq!(
            reviewed.latest_event().unwrap().message,
            "Estado -> UNDER_REVIEW: assigned to pat"
        );

        // Closed is not terminal; reopening is allowed.
        orchestrator
            .transition_case(&case.id, CaseStatus::Closed, None)
            .unwrap();
        let reopened = orchestrator
            .transition_case(&case.id, CaseStatus::Triage, None)
            .unwrap();
        assert_eq!(reopened.status, CaseStatus::Triage);
        assert_eq!(
            reopened.latest_event().unwrap().message,
            "Estado -> TRIAGE: status updated"
        );
        assert_eq!(reopened.timeline.len(), 4);
    }

    #[test]
    fn transition_unknown_case_fails() {
        let (orchestrator, _) = orchestrator_with([]);

        let err = orchestrator
            .transition_case(&CaseId::new("CASE-404"), CaseStatus::Closed, None)
            .unwrap_err();
        assert!(err.is_workflow());
    }

    #[test]
    fn queue_orders_by_priority_descending() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());

        // Build three cases with hand-set priorities through the store,
        // then read them back through the queue.
        let mut high = orchestrator.intake(mild_report("A")).unwrap();
        let mut low = orchestrator.intake(mild_report("B")).unwrap();
        let mut mid = orchestrator.intake(mild_report("C")).unwrap();
        high.priority = 0.9;
        low.priority = 0.3;
        mid.priority = 0.6;
        for case in [&high, &low, &mid] {
            orchestrator.case_store().update((*case).clone()).unwrap();
        }

        let queue = orchestrator.queue().unwrap();
        let priorities: Vec<f32> = queue.iter().map(|c| c.priority).collect();
        assert_eq!(priorities, [0.9, 0.6, 0.3]);
    }

    #[test]
    fn queue_ties_keep_case_id_order() {
        let (orchestrator, _) = orchestrator_with(weak_profiles());

        for id in ["Z", "A", "M"] {
            let mut case = orchestrator.intake(mild_report(id)).unwrap();
            case.priority = 0.5;
            orchestrator.case_store().update(case).unwrap();
        }

        let ids: Vec<String> = orchestrator
            .queue()
            .unwrap()
            .into_iter()
            .map(|c| c.id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["CASE-A", "CASE-M", "CASE-Z"]);
    }

    #[test]
    fn feedback_confirmation_raises_reliability() {
        let (orchestrator, sources) =
            orchestrator_with([SourceProfile::new("s1", 0.5, 0.1).with_expertise("rrhh")]);
        let case = orchestrator.intake(mild_report("F")).unwrap();

        orchestrator
            .apply_feedback(&FeedbackRecord::new(
                case.id.clone(),
                true,
                0.75,
                "Confirmed by committee",
            ))
            .unwrap();

        let after = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert!((after.reliability - 0.56).abs() < 1e-6);

        let stored = orchestrator.case(&case.id).unwrap().unwrap();
        assert!(stored.latest_event().unwrap().message.starts_with("Feedback"));
    }

    #[test]
    fn feedback_denial_lowers_reliability() {
        let (orchestrator, sources) =
            orchestrator_with([SourceProfile::new("s1", 0.5, 0.1).with_expertise("rrhh")]);
        let case = orchestrator.intake(mild_report("G")).unwrap();

        orchestrator
            .apply_feedback(&FeedbackRecord::new(case.id, false, 1.0, ""))
            .unwrap();

        let after = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert!((after.reliability - 0.42).abs() < 1e-6);
    }

    #[test]
    fn feedback_reliability_never_leaves_unit_interval() {
        let (orchestrator, sources) =
            orchestrator_with([SourceProfile::new("s1", 0.97, 0.0).with_expertise("rrhh")]);
        let case = orchestrator.intake(mild_report("H")).unwrap();

        for _ in 0..3 {
            orchestrator
                .apply_feedback(&FeedbackRecord::new(case.id.clone(), true, 1.0, ""))
                .unwrap();
        }
        let maxed = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert_eq!(maxed.reliability, 1.0);

        for _ in 0..20 {
            orchestrator
                .apply_feedback(&FeedbackRecord::new(case.id.clone(), false, 1.0, ""))
                .unwrap();
        }
        let floored = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert_eq!(floored.reliability, 0.0);
    }

    #[test]
    fn feedback_skips_unregistered_sources() {
        let (orchestrator, sources) =
            orchestrator_with([SourceProfile::new("s1", 0.5, 0.1).with_expertise("rrhh")]);

        let report = GossipReport::builder()
            .id("I")
            .topic("rrhh")
            .sources(["s1", "ghost"])
            .build()
            .unwrap();
        let case = orchestrator.intake(report).unwrap();

        orchestrator
            .apply_feedback(&FeedbackRecord::new(case.id.clone(), true, 1.0, ""))
            .unwrap();

        let after = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert!((after.reliability - 0.58).abs() < 1e-6);
        assert!(!sources.contains(&SourceId::new("ghost")).unwrap());

        let stored = orchestrator.case(&case.id).unwrap().unwrap();
        assert!(stored
            .latest_event()
            .unwrap()
            .message
            .contains("adjusted 1 source(s)"));
    }

    #[test]
    fn feedback_unknown_case_fails_and_mutates_nothing() {
        let (orchestrator, sources) =
            orchestrator_with([SourceProfile::new("s1", 0.5, 0.1).with_expertise("rrhh")]);
        orchestrator.intake(mild_report("J")).unwrap();

        let err = orchestrator
            .apply_feedback(&FeedbackRecord::new(CaseId::new("CASE-404"), true, 1.0, ""))
            .unwrap_err();
        assert!(err.is_workflow());

        let untouched = sources.get(&SourceId::new("s1")).unwrap().unwrap();
        assert!((untouched.reliability - 0.5).abs() < f32::EPSILON);
    }
}
