//! # Rumorwatch - Credibility and Harm-Risk Triage
//!
//! Rumorwatch scores informal, unverified reports ("gossip reports")
//! for credibility and harm risk, derives a severity class, and routes
//! each report through a lightweight case-management workflow. Human
//! feedback on closed cases flows back into the trustworthiness of the
//! sources that originated the report.
//!
//! ## Core Concepts
//!
//! - **SourceProfile**: a per-reporter trust record (reliability, bias,
//!   topic expertise)
//! - **GossipReport**: an immutable unverified claim with evidence and
//!   contradiction counters
//! - **EvaluationResult**: a deterministic credibility/risk/severity
//!   verdict with an audit rationale
//! - **GossipCase**: a prioritized workflow record with an append-only
//!   timeline
//!
//! ## Usage
//!
//! ```rust
//! use rumorwatch::{CaseOrchestrator, FeedbackRecord, GossipReport, RumorEngine};
//! use rumorwatch::demo::demo_source_store;
//!
//! let engine = RumorEngine::new(demo_source_store());
//! let orchestrator = CaseOrchestrator::new(engine);
//!
//! let report = GossipReport::builder()
//!     .id("CH-042")
//!     .topic("rrhh")
//!     .source("ana")
//!     .evidence_count(2)
//!     .build()
//!     .unwrap();
//!
//! let case = orchestrator.intake(report).unwrap();
//! orchestrator
//!     .apply_feedback(&FeedbackRecord::new(case.id, true, 0.9, "verified"))
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core data model
pub mod case;
pub mod error;
pub mod feedback;
pub mod policy;
pub mod profile;
pub mod report;
pub mod verdict;

// Scoring and workflow
pub mod engine;
pub mod orchestrator;
pub mod storage;

// Bootstrap fixtures
pub mod demo;

// Re-export primary types at crate root for convenience
pub use case::{CaseId, CaseStatus, GossipCase, TimelineEntry};
pub use engine::{RumorEngine, DEFAULT_SOURCE_QUALITY};
pub use error::{PolicyError, RumorError, RumorResult, ValidationError, WorkflowError};
pub use feedback::{FeedbackId, FeedbackRecord};
pub use orchestrator::CaseOrchestrator;
pub use policy::{CredibilityThresholds, PolicyConfig, RiskThresholds};
pub use profile::{SourceId, SourceProfile};
pub use report::{GossipReport, ReportBuilder, ReportId};
pub use storage::{CaseStore, InMemoryCaseStore, InMemorySourceStore, SourceStore, StorageError};
pub use verdict::{EvaluationResult, Severity};
