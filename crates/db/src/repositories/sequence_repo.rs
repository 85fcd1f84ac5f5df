//! Repository for the `sequences` table.

use sqlx::PgPool;

use crate::models::sequence::{CreateSequence, SequenceRow};
use crate::new_id;

const COLUMNS: &str = "id, project_id, name, style_id, created_at, updated_at";

pub struct SequenceRepo;

impl SequenceRepo {
    pub async fn create(pool: &PgPool, input: &CreateSequence) -> Result<SequenceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sequences (id, project_id, name, style_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SequenceRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.project_id)
            .bind(&input.name)
            .bind(&input.style_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<SequenceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences WHERE id = $1");
        sqlx::query_as::<_, SequenceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

}
