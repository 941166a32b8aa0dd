//! Check results and the reportable projection.
//!
//! [`CheckResult`] is the engine's output shape, one per definition, in
//! definition order. Status is strictly binary: anything that goes wrong
//! while evaluating a check (missing file, bad regex, timeout, panic) is a
//! FAIL with evidence, never a distinct error state.
//!
//! [`to_reportable`] is the pure projection consumed by the surrounding
//! validation-record system: it keeps id, status, and evidence and drops the
//! internal fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::definition::CheckDefinition;

/// Binary outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl CheckStatus {
    /// Construct from a boolean verdict.
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Outcome of evaluating one check definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Externally visible identifier (`reportAs` or the definition id).
    pub id: String,
    /// The definition id this result was produced from.
    pub source_definition_id: String,
    /// Display title, carried over from the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// PASS or FAIL.
    pub status: CheckStatus,
    /// Human-readable explanation of the verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl CheckResult {
    /// Build a result for a definition from a verdict and evidence.
    pub fn new(def: &CheckDefinition, status: CheckStatus, evidence: impl Into<String>) -> Self {
        Self {
            id: def.report_id().to_string(),
            source_definition_id: def.id.clone(),
            title: def.title.clone(),
            status,
            evidence: Some(evidence.into()),
        }
    }

    /// Build a passing result.
    pub fn pass(def: &CheckDefinition, evidence: impl Into<String>) -> Self {
        Self::new(def, CheckStatus::Pass, evidence)
    }

    /// Build a failing result.
    pub fn fail(def: &CheckDefinition, evidence: impl Into<String>) -> Self {
        Self::new(def, CheckStatus::Fail, evidence)
    }
}

/// The narrower shape consumed by the external validation-record system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reportable {
    pub id: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Project engine results into the reportable shape.
///
/// Evidence falls back to the definition title when a runner produced no
/// evidence string.
pub fn to_reportable(results: &[CheckResult]) -> Vec<Reportable> {
    results
        .iter()
        .map(|r| Reportable {
            id: r.id.clone(),
            status: r.status,
            evidence: r.evidence.clone().or_else(|| r.title.clone()),
        })
        .collect()
}
