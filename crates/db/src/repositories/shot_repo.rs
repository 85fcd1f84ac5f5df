//! Repository for the `shots` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::shot::{CreateShot, ShotRow};
use crate::new_id;

const COLUMNS: &str = "id, sequence_id, prompt, tags, character_ids, location_ids, \
                       reference_images, visual_style, parameters, created_at, updated_at";

pub struct ShotRepo;

impl ShotRepo {
    pub async fn create(pool: &PgPool, input: &CreateShot) -> Result<ShotRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO shots
                (id, sequence_id, prompt, tags, character_ids, location_ids,
                 reference_images, visual_style, parameters)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShotRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.sequence_id)
            .bind(&input.prompt)
            .bind(&input.tags)
            .bind(&input.character_ids)
            .bind(&input.location_ids)
            .bind(Json(&input.reference_images))
            .bind(input.visual_style.as_ref().map(Json))
            .bind(Json(input.parameters.clone().unwrap_or_default()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ShotRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shots WHERE id = $1");
        sqlx::query_as::<_, ShotRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

}
