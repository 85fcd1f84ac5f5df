//! [`ReferenceStore`] backed by PostgreSQL.

use async_trait::async_trait;
use shotline_core::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
use shotline_core::shot::{Sequence, SequenceStyleRecord, Shot};
use shotline_core::store::{ReferenceStore, StoreError};

use crate::repositories::{
    CharacterSheetRepo, LocationSheetRepo, SequenceRepo, SequenceStyleRepo, ShotRepo,
};
use crate::DbPool;

/// Map a sqlx failure onto the store boundary.
///
/// Connection-level problems become [`StoreError::Unavailable`]; everything
/// else, including rows that fail to decode, is [`StoreError::Database`].
pub fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Database(other.to_string()),
    }
}

#[derive(Clone)]
pub struct PgReferenceStore {
    pool: DbPool,
}

impl PgReferenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceStore for PgReferenceStore {
    async fn get_shot(&self, shot_id: &str) -> Result<Option<Shot>, StoreError> {
        let row = ShotRepo::find_by_id(&self.pool, shot_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Shot::from))
    }

    async fn get_sequence(&self, sequence_id: &str) -> Result<Option<Sequence>, StoreError> {
        let row = SequenceRepo::find_by_id(&self.pool, sequence_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Sequence::from))
    }

    async fn get_master_character_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<CharacterAppearanceSheet>, StoreError> {
        let rows = CharacterSheetRepo::list_by_project(&self.pool, project_id)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(CharacterAppearanceSheet::from).collect())
    }

    async fn get_master_location_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<LocationAppearanceSheet>, StoreError> {
        let rows = LocationSheetRepo::list_by_project(&self.pool, project_id)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(LocationAppearanceSheet::from).collect())
    }

    async fn get_sequence_style(
        &self,
        sequence_id: &str,
    ) -> Result<Option<SequenceStyleRecord>, StoreError> {
        let row = SequenceStyleRepo::find_for_sequence(&self.pool, sequence_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(SequenceStyleRecord::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        assert!(matches!(
            store_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            store_error(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }
}
