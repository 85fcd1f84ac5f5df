//! Repository for the `sequence_styles` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::sequence::{CreateSequenceStyle, SequenceStyleRow};
use crate::new_id;

const COLUMNS: &str =
    "id, sequence_id, style_name, intensity, palette, parameters, created_at, updated_at";

pub struct SequenceStyleRepo;

impl SequenceStyleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSequenceStyle,
    ) -> Result<SequenceStyleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sequence_styles (id, sequence_id, style_name, intensity, palette, parameters)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SequenceStyleRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.sequence_id)
            .bind(&input.style_name)
            .bind(input.intensity)
            .bind(&input.palette)
            .bind(Json(&input.parameters))
            .fetch_one(pool)
            .await
    }

    /// The style a sequence currently points at.
    ///
    /// When the sequence has no `style_id`, the most recently created style
    /// record for it is used instead.
    pub async fn find_for_sequence(
        pool: &PgPool,
        sequence_id: &str,
    ) -> Result<Option<SequenceStyleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sequence_styles st
             WHERE st.sequence_id = $1
               AND EXISTS (
                   SELECT 1 FROM sequences s
                   WHERE s.id = st.sequence_id
                     AND (s.style_id IS NULL OR s.style_id = st.id)
               )
             ORDER BY st.created_at DESC, st.id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, SequenceStyleRow>(&query)
            .bind(sequence_id)
            .fetch_optional(pool)
            .await
    }
}
