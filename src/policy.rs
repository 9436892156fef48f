//! Classification policy.
//!
//! A policy is an immutable set of named thresholds used only for
//! classification decisions: banding credibility scores and mapping risk
//! scores onto severity tiers. Thresholds are expected ascending but the
//! ordering is not enforced.
//!
//! Policies are loaded from structured documents (YAML or JSON) carrying
//! two named mappings, `credibility_thresholds` and `risk_thresholds`.
//! Every key is required; a missing key fails fast at load time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::verdict::Severity;

/// Credibility score bands, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibilityThresholds {
    /// Floor of the low band.
    pub low: f32,
    /// Floor of the medium band.
    pub medium: f32,
    /// Floor of the high band.
    pub high: f32,
}

/// Risk score bands, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Floor of the medium severity tier.
    pub medium: f32,
    /// Floor of the high severity tier.
    pub high: f32,
    /// Floor of the critical severity tier.
    pub critical: f32,
}

/// Immutable classification thresholds.
///
/// # Examples
///
/// ```
/// use rumorwatch::{PolicyConfig, Severity};
///
/// let policy = PolicyConfig::default();
/// assert_eq!(policy.severity_for(0.94), Severity::Critical);
/// assert_eq!(policy.severity_for(0.10), Severity::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Credibility bands.
    pub credibility: CredibilityThresholds,
    /// Risk bands.
    pub risk: RiskThresholds,
}

/// Raw on-disk shape: two named key→number mappings.
#[derive(Debug, Deserialize)]
struct RawPolicy {
    credibility_thresholds: BTreeMap<String, f32>,
    risk_thresholds: BTreeMap<String, f32>,
}

fn require(
    section: &'static str,
    map: &BTreeMap<String, f32>,
    key: &'static str,
) -> Result<f32, PolicyError> {
    map.get(key)
        .copied()
        .ok_or_else(|| PolicyError::MissingThreshold {
            section: section.to_string(),
            key: key.to_string(),
        })
}

impl PolicyConfig {
    /// Builds a policy from the raw threshold mappings.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::MissingThreshold` for any absent key; there
    /// is no default substitution.
    fn from_raw(raw: &RawPolicy) -> Result<Self, PolicyError> {
        const CRED: &str = "credibility_thresholds";
        const RISK: &str = "risk_thresholds";

        Ok(Self {
            credibility: CredibilityThresholds {
                low: require(CRED, &raw.credibility_thresholds, "low")?,
                medium: require(CRED, &raw.credibility_thresholds, "medium")?,
                high: require(CRED, &raw.credibility_thresholds, "high")?,
            },
            risk: RiskThresholds {
                medium: require(RISK, &raw.risk_thresholds, "medium")?,
                high: require(RISK, &raw.risk_thresholds, "high")?,
                critical: require(RISK, &raw.risk_thresholds, "critical")?,
            },
        })
    }

    /// Loads a policy from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Parse` for malformed YAML or a missing
    /// section, and `PolicyError::MissingThreshold` for a missing key.
    pub fn from_yaml_str(document: &str) -> Result<Self, PolicyError> {
        let raw: RawPolicy = serde_yaml::from_str(document)?;
        Self::from_raw(&raw)
    }

    /// Loads a policy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Io` if the file cannot be read, plus the
    /// same failures as [`PolicyConfig::from_yaml_str`].
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&document)
    }

    /// Loads a policy from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::ParseJson` for malformed JSON or a missing
    /// section, and `PolicyError::MissingThreshold` for a missing key.
    pub fn from_json_str(document: &str) -> Result<Self, PolicyError> {
        let raw: RawPolicy = serde_json::from_str(document)?;
        Self::from_raw(&raw)
    }

    /// Maps a risk score onto a severity tier, comparing thresholds in
    /// descending order.
    #[must_use]
    pub fn severity_for(&self, risk_score: f32) -> Severity {
        if risk_score >= self.risk.critical {
            Severity::Critical
        } else if risk_score >= self.risk.high {
            Severity::High
        } else if risk_score >= self.risk.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Default for PolicyConfig {
    /// Fixed default thresholds used when no policy document is supplied.
    fn default() -> Self {
        Self {
            credibility: CredibilityThresholds {
                low: 0.35,
                medium: 0.55,
                high: 0.75,
            },
            risk: RiskThresholds {
                medium: 0.45,
                high: 0.70,
                critical: 0.85,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_YAML: &str = r"
credibility_thresholds:
  low: 0.35
  medium: 0.55
  high: 0.75
risk_thresholds:
  medium: 0.45
  high: 0.70
  critical: 0.85
";

    #[test]
    fn default_policy_thresholds() {
        let policy = PolicyConfig::default();
        assert!((policy.credibility.medium - 0.55).abs() < f32::EPSILON);
        assert!((policy.risk.critical - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn severity_step_function_under_default_policy() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.severity_for(0.94), Severity::Critical);
        assert_eq!(policy.severity_for(0.80), Severity::High);
        assert_eq!(policy.severity_for(0.50), Severity::Medium);
        assert_eq!(policy.severity_for(0.10), Severity::Low);
    }

    #[test]
    fn severity_boundaries_are_inclusive() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.severity_for(0.85), Severity::Critical);
        assert_eq!(policy.severity_for(0.70), Severity::High);
        assert_eq!(policy.severity_for(0.45), Severity::Medium);
    }

    #[test]
    fn yaml_load_matches_default() {
        let policy = PolicyConfig::from_yaml_str(FULL_YAML).unwrap();
        assert_eq!(policy, PolicyConfig::default());
    }

    #[test]
    fn missing_key_fails_fast() {
        let document = r"
credibility_thresholds:
  low: 0.35
  medium: 0.55
  high: 0.75
risk_thresholds:
  medium: 0.45
  high: 0.70
";
        let err = PolicyConfig::from_yaml_str(document).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::MissingThreshold { ref section, ref key }
                if section == "risk_thresholds" && key == "critical"
        ));
    }

    #[test]
    fn missing_section_fails_fast() {
        let document = r"
credibility_thresholds:
  low: 0.35
  medium: 0.55
  high: 0.75
";
        assert!(matches!(
            PolicyConfig::from_yaml_str(document),
            Err(PolicyError::Parse(_))
        ));
    }

    #[test]
    fn json_load_matches_default() {
        let document = r#"{
            "credibility_thresholds": {"low": 0.35, "medium": 0.55, "high": 0.75},
            "risk_thresholds": {"medium": 0.45, "high": 0.70, "critical": 0.85}
        }"#;
        let policy = PolicyConfig::from_json_str(document).unwrap();
        assert_eq!(policy, PolicyConfig::default());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let document = r"
credibility_thresholds:
  low: 0.1
  medium: 0.2
  high: 0.3
  experimental: 0.9
risk_thresholds:
  medium: 0.4
  high: 0.5
  critical: 0.6
";
        let policy = PolicyConfig::from_yaml_str(document).unwrap();
        assert!((policy.credibility.high - 0.3).abs() < f32::EPSILON);
    }
}
