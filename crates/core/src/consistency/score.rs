//! Reduction of an issue list to a 0-100 consistency score.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::issue::{ConsistencyIssue, IssueType};

/// Score of a shot with no issues.
pub const PERFECT_SCORE: f64 = 100.0;

/// Overall and per-dimension consistency, each in `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyScore {
    pub overall_score: f64,
    pub character_score: f64,
    pub style_score: f64,
    pub color_score: f64,
    pub composition_score: f64,
}

impl ConsistencyScore {
    /// All five fields set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            overall_score: value,
            character_score: value,
            style_score: value,
            color_score: value,
            composition_score: value,
        }
    }

    pub fn perfect() -> Self {
        Self::uniform(PERFECT_SCORE)
    }
}

/// `100 - total_penalty / max(issue_count, 1)`, clamped to `[0, 100]`.
///
/// Kept separate from the issue list so the clamp can be exercised with
/// penalties no well-formed list can produce.
pub fn average_penalty_score(total_penalty: f64, issue_count: usize) -> f64 {
    let avg = PERFECT_SCORE - total_penalty / issue_count.max(1) as f64;
    avg.clamp(0.0, PERFECT_SCORE)
}

fn score_of<'a>(issues: impl Iterator<Item = &'a ConsistencyIssue>) -> f64 {
    let (total, count) = issues.fold((0.0, 0usize), |(total, count), issue| {
        (total + issue.severity.weight(), count + 1)
    });
    if count == 0 {
        PERFECT_SCORE
    } else {
        average_penalty_score(total, count)
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Turns an issue list into a [`ConsistencyScore`].
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, issues: &[ConsistencyIssue]) -> ConsistencyScore;
}

/// Every dimension receives the overall average, regardless of issue type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScoring;

impl ScoringStrategy for UniformScoring {
    fn score(&self, issues: &[ConsistencyIssue]) -> ConsistencyScore {
        if issues.is_empty() {
            return ConsistencyScore::perfect();
        }
        ConsistencyScore::uniform(score_of(issues.iter()))
    }
}

/// Each dimension averages only its own issues; the overall score averages
/// all of them. Location issues count toward the character dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerDimensionScoring;

impl ScoringStrategy for PerDimensionScoring {
    fn score(&self, issues: &[ConsistencyIssue]) -> ConsistencyScore {
        let of = |types: &[IssueType]| {
            score_of(issues.iter().filter(|i| types.contains(&i.issue_type)))
        };
        ConsistencyScore {
            overall_score: score_of(issues.iter()),
            character_score: of(&[IssueType::Character, IssueType::Location]),
            style_score: of(&[IssueType::Style]),
            color_score: of(&[IssueType::Color]),
            composition_score: of(&[IssueType::Composition]),
        }
    }
}

/// Which [`ScoringStrategy`] the engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    Uniform,
    PerDimension,
}

impl ScoringMode {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "uniform" => Ok(Self::Uniform),
            "per_dimension" => Ok(Self::PerDimension),
            other => Err(CoreError::Validation(format!(
                "Invalid scoring mode '{other}'. Must be one of: uniform, per_dimension"
            ))),
        }
    }

    pub fn strategy(self) -> Box<dyn ScoringStrategy> {
        match self {
            Self::Uniform => Box::new(UniformScoring),
            Self::PerDimension => Box::new(PerDimensionScoring),
        }
    }
}

/// Baseline aggregation: the uniform strategy.
pub fn compute_consistency_score(issues: &[ConsistencyIssue]) -> ConsistencyScore {
    UniformScoring.score(issues)
}
