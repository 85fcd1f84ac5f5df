//! Consistency issue types.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Which consistency dimension an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Character,
    Location,
    Style,
    Color,
    Composition,
}

/// How serious an issue is.
///
/// Severities that are not recognised when deserializing map to
/// [`Severity::Unknown`], which carries no score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Score penalty of one issue of this severity.
    pub fn weight(self) -> f64 {
        match self {
            Self::Critical => 30.0,
            Self::High => 20.0,
            Self::Medium => 10.0,
            Self::Low => 5.0,
            Self::Unknown => 0.0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// A detected discrepancy between a shot and the material it inherits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    /// Deterministic id of the form `<condition>:<subject>`.
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub description: String,
    pub severity: Severity,
    /// Sheet, style record or parameter the issue is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<EntityId>,
}

impl ConsistencyIssue {
    pub fn new(
        id: impl Into<String>,
        issue_type: IssueType,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            issue_type,
            description: description.into(),
            severity,
            subject_id: None,
        }
    }

    pub fn with_subject(mut self, subject_id: impl Into<EntityId>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }
}
