//! Error types for rumorwatch.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific failure conditions and keeps error messages
//! consistent across the crate.

use thiserror::Error;

use crate::case::CaseId;
use crate::storage::StorageError;

/// Validation errors raised while constructing input records.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required builder field was never set.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },
}

/// Errors raised while loading a classification policy.
///
/// Policy documents must carry every threshold key explicitly. A missing
/// key is a hard failure at load time, never a silent default.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A required threshold key was absent from its section.
    #[error("Missing threshold key '{key}' in section '{section}'")]
    MissingThreshold {
        /// Section name (`credibility_thresholds` or `risk_thresholds`).
        section: String,
        /// The absent key.
        key: String,
    },

    /// The policy document could not be parsed as YAML.
    #[error("Failed to parse policy document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The policy document could not be parsed as JSON.
    #[error("Failed to parse policy document: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// The policy file could not be read.
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by case-workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The referenced case does not exist.
    #[error("Case not found: {id}")]
    CaseNotFound {
        /// The unresolved case identifier.
        id: CaseId,
    },
}

/// Top-level error type for rumorwatch.
///
/// This enum encompasses all failures that can surface from the public
/// API. Failures are local and synchronous; there are no retries and no
/// partial-failure semantics.
#[derive(Debug, Error)]
pub enum RumorError {
    /// Input construction failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Policy loading failed.
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// A workflow operation referenced a missing case.
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// A storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RumorError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a policy-loading error.
    #[must_use]
    pub const fn is_policy(&self) -> bool {
        matches!(self, Self::Policy(_))
    }

    /// Returns true if this is a workflow error.
    #[must_use]
    pub const fn is_workflow(&self) -> bool {
        matches!(self, Self::Workflow(_))
    }

    /// Returns true if this is a storage error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type alias for rumorwatch operations.
pub type RumorResult<T> = Result<T, RumorError>;
