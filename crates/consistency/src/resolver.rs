//! Inheritance resolution: shot -> sequence -> project.
//!
//! [`InheritanceResolver`] walks the hierarchy through a
//! [`ReferenceStore`] and returns the master sheets and sequence style a
//! shot inherits. Store failures never escape: they are logged and the shot
//! is treated as having no inherited material for this cycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shotline_core::bible::AppearanceSheet;
use shotline_core::consistency::{select_inherited_sheets, EntityFallbackPolicy, InheritedReferences};
use shotline_core::reference::{retain_valid_references, ReferenceImage};
use shotline_core::shot::{Sequence, Shot};
use shotline_core::store::{ReferenceStore, StoreError};

/// A shot together with everything it inherits, read in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShot {
    pub shot: Shot,
    /// `None` when the shot points at a sequence the store does not know.
    pub sequence: Option<Sequence>,
    pub inherited: InheritedReferences,
}

pub struct InheritanceResolver {
    store: Arc<dyn ReferenceStore>,
    fallback: EntityFallbackPolicy,
    store_timeout: Duration,
}

impl InheritanceResolver {
    pub fn new(
        store: Arc<dyn ReferenceStore>,
        fallback: EntityFallbackPolicy,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            fallback,
            store_timeout,
        }
    }

    /// Master sheets and sequence style inherited by `shot_id`.
    ///
    /// Unknown shots and store failures both yield
    /// [`InheritedReferences::empty`].
    pub async fn get_inherited_references_for_shot(&self, shot_id: &str) -> InheritedReferences {
        self.resolve(shot_id)
            .await
            .map(|resolved| resolved.inherited)
            .unwrap_or_default()
    }

    /// Load the shot and its inherited material.
    ///
    /// Returns `None` for unknown shots and when the store fails.
    pub async fn resolve(&self, shot_id: &str) -> Option<ResolvedShot> {
        match self.try_resolve(shot_id).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(
                    shot_id,
                    error = %e,
                    "Reference store lookup failed, treating shot as having no inherited data",
                );
                None
            }
        }
    }

    async fn try_resolve(&self, shot_id: &str) -> Result<Option<ResolvedShot>, StoreError> {
        let Some(mut shot) = self.bounded(self.store.get_shot(shot_id)).await? else {
            tracing::debug!(shot_id, "Shot not found");
            return Ok(None);
        };
        drop_malformed(&mut shot.reference_images, "shot", &shot.id);
        if let Err(e) = shot.validate() {
            tracing::warn!(shot_id, error = %e, "Shot failed validation, checking it anyway");
        }

        let Some(sequence) = self.bounded(self.store.get_sequence(&shot.sequence_id)).await?
        else {
            tracing::debug!(
                shot_id,
                sequence_id = %shot.sequence_id,
                "Shot belongs to an unknown sequence, nothing to inherit",
            );
            return Ok(Some(ResolvedShot {
                shot,
                sequence: None,
                inherited: InheritedReferences::empty(),
            }));
        };

        let (mut characters, mut locations, style) = tokio::try_join!(
            self.bounded(self.store.get_master_character_sheets(&sequence.project_id)),
            self.bounded(self.store.get_master_location_sheets(&sequence.project_id)),
            self.bounded(self.store.get_sequence_style(&sequence.id)),
        )?;

        for sheet in &mut characters {
            drop_malformed(&mut sheet.appearance_images, "character_sheet", &sheet.id);
        }
        for sheet in &mut locations {
            drop_malformed(&mut sheet.reference_images, "location_sheet", &sheet.id);
        }

        let bible: Vec<AppearanceSheet> = characters
            .into_iter()
            .map(AppearanceSheet::from)
            .chain(locations.into_iter().map(AppearanceSheet::from))
            .collect();
        let from_master = select_inherited_sheets(&shot, bible, self.fallback);

        tracing::debug!(
            shot_id,
            sequence_id = %sequence.id,
            project_id = %sequence.project_id,
            inherited_sheets = from_master.len(),
            has_style = style.is_some(),
            "Resolved inherited references",
        );

        Ok(Some(ResolvedShot {
            shot,
            sequence: Some(sequence),
            inherited: InheritedReferences {
                from_master,
                from_sequence: style,
            },
        }))
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.store_timeout.as_millis() as u64)),
        }
    }
}

/// Prune reference images that break the collection rules so a bad row
/// degrades one reference instead of the whole check.
fn drop_malformed(images: &mut Vec<ReferenceImage>, owner: &str, owner_id: &str) {
    for e in retain_valid_references(images) {
        tracing::warn!(owner, owner_id, error = %e, "Ignoring malformed reference image");
    }
}
