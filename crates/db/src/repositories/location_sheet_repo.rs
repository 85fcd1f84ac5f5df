//! Repository for the `location_sheets` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::sheet::{CreateLocationSheet, LocationSheetRow};
use crate::new_id;

const COLUMNS: &str = "id, project_id, location_name, aliases, thumbnail_url, \
                       reference_images, created_at, updated_at";

pub struct LocationSheetRepo;

impl LocationSheetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLocationSheet,
    ) -> Result<LocationSheetRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO location_sheets
                (id, project_id, location_name, aliases, thumbnail_url, reference_images)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationSheetRow>(&query)
            .bind(input.id.clone().unwrap_or_else(new_id))
            .bind(&input.project_id)
            .bind(&input.location_name)
            .bind(&input.aliases)
            .bind(&input.thumbnail_url)
            .bind(Json(&input.reference_images))
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: &str,
    ) -> Result<Vec<LocationSheetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM location_sheets
             WHERE project_id = $1
             ORDER BY location_name ASC, id ASC"
        );
        sqlx::query_as::<_, LocationSheetRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
