//! The consistency engine facade.
//!
//! [`ConsistencyEngine`] is an explicit value built around an injected
//! [`ReferenceStore`]. Every operation is read-only and best-effort: unknown
//! ids and store failures produce empty results, never errors.

use std::sync::Arc;

use serde::Serialize;
use shotline_core::bible::{AppearanceSheet, SheetKind};
use shotline_core::consistency::{
    check_sheet_coverage, check_style_consistency, materialize_inherited_references,
    ConsistencyIssue, ConsistencyScore, InheritedReferences, ScoringStrategy, SeverityPolicy,
    Tolerances,
};
use shotline_core::reference::ReferenceImage;
use shotline_core::store::ReferenceStore;

use crate::config::EngineConfig;
use crate::resolver::{InheritanceResolver, ResolvedShot};

/// Everything the UI needs to display for one shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub shot_id: String,
    pub inherited: InheritedReferences,
    pub issues: Vec<ConsistencyIssue>,
    pub score: ConsistencyScore,
}

pub struct ConsistencyEngine {
    resolver: InheritanceResolver,
    policy: SeverityPolicy,
    tolerances: Tolerances,
    scoring: Box<dyn ScoringStrategy>,
}

impl ConsistencyEngine {
    /// Engine with default configuration.
    pub fn new(store: Arc<dyn ReferenceStore>) -> Self {
        Self::with_config(store, &EngineConfig::default())
    }

    pub fn with_config(store: Arc<dyn ReferenceStore>, config: &EngineConfig) -> Self {
        Self {
            resolver: InheritanceResolver::new(
                store,
                config.entity_fallback,
                config.store_timeout,
            ),
            policy: config.severity_policy.clone(),
            tolerances: config.tolerances,
            scoring: config.scoring.strategy(),
        }
    }

    /// Replace the scoring strategy.
    pub fn with_scoring(mut self, scoring: Box<dyn ScoringStrategy>) -> Self {
        self.scoring = scoring;
        self
    }

    pub async fn get_inherited_references_for_shot(&self, shot_id: &str) -> InheritedReferences {
        self.resolver.get_inherited_references_for_shot(shot_id).await
    }

    /// Characters the shot names that lack a matching reference image, or
    /// whose reference weight drifts from the sheet.
    pub async fn validate_character_consistency(&self, shot_id: &str) -> Vec<ConsistencyIssue> {
        match self.resolver.resolve(shot_id).await {
            Some(resolved) => self.check_sheets(&resolved, SheetKind::Character),
            None => Vec::new(),
        }
    }

    /// Same as [`validate_character_consistency`](Self::validate_character_consistency)
    /// for locations.
    pub async fn validate_location_consistency(&self, shot_id: &str) -> Vec<ConsistencyIssue> {
        match self.resolver.resolve(shot_id).await {
            Some(resolved) => self.check_sheets(&resolved, SheetKind::Location),
            None => Vec::new(),
        }
    }

    /// Style, palette and parameter drift from the sequence style record.
    pub async fn validate_style_consistency(&self, shot_id: &str) -> Vec<ConsistencyIssue> {
        match self.resolver.resolve(shot_id).await {
            Some(resolved) => self.check_style(&resolved),
            None => Vec::new(),
        }
    }

    pub fn compute_consistency_score(&self, issues: &[ConsistencyIssue]) -> ConsistencyScore {
        self.scoring.score(issues)
    }

    pub fn materialize_inherited_references(
        &self,
        inherited: &[AppearanceSheet],
    ) -> Vec<ReferenceImage> {
        materialize_inherited_references(inherited)
    }

    /// All three rule sets against one already-resolved snapshot, in
    /// character, location, style order.
    pub fn evaluate(&self, resolved: &ResolvedShot) -> Vec<ConsistencyIssue> {
        let mut issues = self.check_sheets(resolved, SheetKind::Character);
        issues.extend(self.check_sheets(resolved, SheetKind::Location));
        issues.extend(self.check_style(resolved));
        issues
    }

    /// Resolve once, validate, score.
    ///
    /// Unknown shots produce an empty report with a perfect score.
    pub async fn recompute(&self, shot_id: &str) -> ConsistencyReport {
        let Some(resolved) = self.resolver.resolve(shot_id).await else {
            return ConsistencyReport {
                shot_id: shot_id.to_string(),
                inherited: InheritedReferences::empty(),
                issues: Vec::new(),
                score: self.scoring.score(&[]),
            };
        };

        let issues = self.evaluate(&resolved);
        let score = self.scoring.score(&issues);

        tracing::debug!(
            shot_id,
            issues = issues.len(),
            overall_score = score.overall_score,
            "Recomputed shot consistency",
        );

        ConsistencyReport {
            shot_id: shot_id.to_string(),
            inherited: resolved.inherited,
            issues,
            score,
        }
    }

    fn check_sheets(&self, resolved: &ResolvedShot, kind: SheetKind) -> Vec<ConsistencyIssue> {
        check_sheet_coverage(
            &resolved.shot,
            &resolved.inherited.from_master,
            kind,
            &self.policy,
            &self.tolerances,
        )
    }

    fn check_style(&self, resolved: &ResolvedShot) -> Vec<ConsistencyIssue> {
        check_style_consistency(
            &resolved.shot,
            resolved.inherited.from_sequence.as_ref(),
            &self.policy,
            &self.tolerances,
        )
    }
}
