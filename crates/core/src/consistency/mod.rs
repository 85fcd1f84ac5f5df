//! Consistency engine core.
//!
//! Pure logic only: entity matching, the character/location/style rule sets,
//! severity policy, score aggregation and reference materialization. Data is
//! fetched by callers (see `shotline-consistency`).

pub mod inheritance;
pub mod issue;
pub mod materialize;
pub mod mentions;
pub mod policy;
pub mod score;
pub mod sheets;
pub mod style;

pub use inheritance::{select_inherited_sheets, InheritedReferences};
pub use issue::{ConsistencyIssue, IssueType, Severity};
pub use materialize::{materialize_inherited_references, merge_inherited_references};
pub use policy::{EntityFallbackPolicy, IssueCondition, SeverityPolicy, Tolerances};
pub use score::{
    compute_consistency_score, ConsistencyScore, PerDimensionScoring, ScoringMode,
    ScoringStrategy, UniformScoring,
};
pub use sheets::check_sheet_coverage;
pub use style::check_style_consistency;
