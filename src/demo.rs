//! Demo bootstrap fixtures.
//!
//! A small seeded registry and sample report for smoke-testing the
//! engine/orchestrator integration. Not part of the production
//! contract; external callers and the test suites use it as a known
//! starting state.

use std::sync::Arc;

use crate::engine::RumorEngine;
use crate::orchestrator::CaseOrchestrator;
use crate::profile::SourceProfile;
use crate::report::GossipReport;
use crate::storage::InMemorySourceStore;

/// Three seeded source profiles: ana, leo, and mia.
#[must_use]
pub fn demo_source_store() -> Arc<InMemorySourceStore> {
    Arc::new(InMemorySourceStore::from_profiles([
        SourceProfile::new("ana", 0.78, 0.10)
            .with_expertise("equipo")
            .with_expertise("rrhh"),
        SourceProfile::new("leo", 0.62, 0.25).with_expertise("producto"),
        SourceProfile::new("mia", 0.70, 0.05)
            .with_expertise("rrhh")
            .with_expertise("legal"),
    ]))
}

/// A sample report sourced from all three demo profiles.
///
/// # Panics
///
/// Never panics; the builder fields are statically complete.
#[must_use]
pub fn demo_report() -> GossipReport {
    GossipReport::builder()
        .id("CH-001")
        .text("Word of a mass departure over a leadership conflict.")
        .topic("rrhh")
        .sources(["ana", "mia", "leo"])
        .evidence_count(2)
        .contradiction_count(1)
        .emotional_intensity(0.76)
        .build()
        .expect("demo report fields are statically complete")
}

/// An orchestrator over the demo registry with the default policy.
#[must_use]
pub fn demo_orchestrator() -> CaseOrchestrator {
    CaseOrchestrator::new(RumorEngine::new(demo_source_store()))
}
