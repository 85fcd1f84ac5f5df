//! Read-only access to the project hierarchy and master bible.
//!
//! [`ReferenceStore`] is the seam between the consistency engine and
//! wherever bible, sequence and shot data actually lives. The engine never
//! writes through it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
use crate::shot::{Sequence, SequenceStyleRecord, Shot};

/// Failure reading from a reference store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Reference store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Reference store timed out after {0} ms")]
    Timeout(u64),
}

/// Read-only view of projects, sequences, shots and their bible material.
///
/// Lookups of unknown ids return `Ok(None)` / `Ok(vec![])`; `Err` is reserved
/// for the store itself failing.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn get_shot(&self, shot_id: &str) -> Result<Option<Shot>, StoreError>;

    async fn get_sequence(&self, sequence_id: &str) -> Result<Option<Sequence>, StoreError>;

    async fn get_master_character_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<CharacterAppearanceSheet>, StoreError>;

    async fn get_master_location_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<LocationAppearanceSheet>, StoreError>;

    async fn get_sequence_style(
        &self,
        sequence_id: &str,
    ) -> Result<Option<SequenceStyleRecord>, StoreError>;
}

// ---------------------------------------------------------------------------
// InMemoryReferenceStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    shots: HashMap<String, Shot>,
    sequences: HashMap<String, Sequence>,
    styles: HashMap<String, SequenceStyleRecord>,
    characters: Vec<CharacterAppearanceSheet>,
    locations: Vec<LocationAppearanceSheet>,
}

/// Reference store held entirely in memory.
///
/// Suitable for tests and for hosts that already keep the project loaded.
/// Writes replace existing rows with the same id.
#[derive(Default)]
pub struct InMemoryReferenceStore {
    tables: RwLock<Tables>,
}

impl InMemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_shot(&self, shot: Shot) {
        self.tables.write().await.shots.insert(shot.id.clone(), shot);
    }

    pub async fn put_sequence(&self, sequence: Sequence) {
        self.tables
            .write()
            .await
            .sequences
            .insert(sequence.id.clone(), sequence);
    }

    /// Store a style record, keyed by the sequence it belongs to.
    pub async fn put_sequence_style(&self, style: SequenceStyleRecord) {
        self.tables
            .write()
            .await
            .styles
            .insert(style.sequence_id.clone(), style);
    }

    pub async fn put_character_sheet(&self, sheet: CharacterAppearanceSheet) {
        let mut tables = self.tables.write().await;
        tables.characters.retain(|s| s.id != sheet.id);
        tables.characters.push(sheet);
    }

    pub async fn put_location_sheet(&self, sheet: LocationAppearanceSheet) {
        let mut tables = self.tables.write().await;
        tables.locations.retain(|s| s.id != sheet.id);
        tables.locations.push(sheet);
    }
}

#[async_trait]
impl ReferenceStore for InMemoryReferenceStore {
    async fn get_shot(&self, shot_id: &str) -> Result<Option<Shot>, StoreError> {
        Ok(self.tables.read().await.shots.get(shot_id).cloned())
    }

    async fn get_sequence(&self, sequence_id: &str) -> Result<Option<Sequence>, StoreError> {
        Ok(self.tables.read().await.sequences.get(sequence_id).cloned())
    }

    async fn get_master_character_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<CharacterAppearanceSheet>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .characters
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_master_location_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<LocationAppearanceSheet>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .locations
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_sequence_style(
        &self,
        sequence_id: &str,
    ) -> Result<Option<SequenceStyleRecord>, StoreError> {
        let tables = self.tables.read().await;
        let Some(sequence) = tables.sequences.get(sequence_id) else {
            return Ok(None);
        };
        let style = tables.styles.get(sequence_id).filter(|style| {
            sequence
                .style_id
                .as_ref()
                .map_or(true, |style_id| *style_id == style.id)
        });
        Ok(style.cloned())
    }
}
